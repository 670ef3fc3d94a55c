use facecam::constants::MENU_SHOW_TITLE;
use facecam::controller::MenuState;
use objc2::rc::Retained;
use objc2::runtime::Sel;
use objc2_app_kit::{
    NSControlStateValueOff, NSControlStateValueOn, NSImage, NSMenu, NSMenuItem, NSStatusBar,
    NSStatusItem, NSVariableStatusItemLength,
};
use objc2_foundation::{MainThreadMarker, NSString};

pub struct StatusBar {
    _status_item: Retained<NSStatusItem>,
    toggle_item: Retained<NSMenuItem>,
}

impl StatusBar {
    pub fn new(mtm: MainThreadMarker) -> Self {
        let status_bar = NSStatusBar::systemStatusBar();
        let status_item = status_bar.statusItemWithLength(NSVariableStatusItemLength);

        if let Some(button) = status_item.button(mtm) {
            let image = NSImage::imageWithSystemSymbolName_accessibilityDescription(
                &NSString::from_str("person.crop.rectangle"),
                Some(&NSString::from_str("FaceCam")),
            );
            match image {
                Some(image) => {
                    image.setTemplate(true);
                    button.setImage(Some(&image));
                }
                None => button.setTitle(&NSString::from_str("\u{1FA9E}")), // 🪞
            }
        }

        let menu = NSMenu::new(mtm);

        // Actions route through the responder chain to the app delegate
        let toggle_item = unsafe {
            NSMenuItem::initWithTitle_action_keyEquivalent(
                mtm.alloc(),
                &NSString::from_str(MENU_SHOW_TITLE),
                Some(Sel::register(c"toggleMirror:")),
                &NSString::from_str(""),
            )
        };
        menu.addItem(&toggle_item);

        let reset_item = unsafe {
            NSMenuItem::initWithTitle_action_keyEquivalent(
                mtm.alloc(),
                &NSString::from_str("Reset Position"),
                Some(Sel::register(c"resetPosition:")),
                &NSString::from_str(""),
            )
        };
        menu.addItem(&reset_item);

        menu.addItem(&NSMenuItem::separatorItem(mtm));

        let quit_item = unsafe {
            NSMenuItem::initWithTitle_action_keyEquivalent(
                mtm.alloc(),
                &NSString::from_str("Quit FaceCam"),
                Some(Sel::register(c"terminate:")),
                &NSString::from_str("q"),
            )
        };
        menu.addItem(&quit_item);

        status_item.setMenu(Some(&menu));

        StatusBar {
            _status_item: status_item,
            toggle_item,
        }
    }

    pub fn update(&self, state: MenuState) {
        self.toggle_item.setTitle(&NSString::from_str(state.title));
        self.toggle_item.setState(if state.checked {
            NSControlStateValueOn
        } else {
            NSControlStateValueOff
        });
    }
}
