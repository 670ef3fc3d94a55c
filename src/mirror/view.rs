use std::cell::RefCell;

use facecam::constants::CORNER_RADIUS;
use facecam::geometry::Rect;
use facecam::preview::{DisplayState, PreviewAdapter, SurfaceHost};
use objc2::rc::Retained;
use objc2::{define_class, msg_send, DefinedClass, MainThreadOnly};
use objc2_app_kit::{
    NSColor, NSFont, NSProgressIndicator, NSProgressIndicatorStyle, NSTextAlignment, NSTextField,
    NSView,
};
use objc2_core_foundation::{CGFloat, CGPoint, CGRect, CGSize};
use objc2_foundation::{MainThreadMarker, NSRect, NSString};
use objc2_quartz_core::CALayer;

use crate::capture::PreviewLayer;
use crate::screen;

/// Attaches preview layers under the view's own backing layer.
pub struct LayerHost {
    root: Retained<CALayer>,
}

impl SurfaceHost for LayerHost {
    type Surface = PreviewLayer;

    fn attach(&self, surface: &PreviewLayer) {
        surface.0.setCornerRadius(CORNER_RADIUS);
        surface.0.setMasksToBounds(true);
        self.root.addSublayer(&surface.0);
    }

    fn detach(&self, surface: &PreviewLayer) {
        surface.0.removeFromSuperlayer();
    }

    fn resize(&self, surface: &PreviewLayer, bounds: Rect) {
        surface.0.setFrame(screen::to_cg(bounds));
    }

    fn bounds(&self) -> Rect {
        screen::from_cg(self.root.bounds())
    }
}

pub struct CameraViewIvars {
    adapter: RefCell<Option<PreviewAdapter<LayerHost>>>,
    spinner: RefCell<Option<Retained<NSProgressIndicator>>>,
    message: RefCell<Option<Retained<NSTextField>>>,
}

define_class!(
    #[unsafe(super(NSView))]
    #[thread_kind = MainThreadOnly]
    #[name = "FaceCamCameraView"]
    #[ivars = CameraViewIvars]
    pub struct CameraView;

    impl CameraView {
        #[unsafe(method(layout))]
        fn layout(&self) {
            let _: () = unsafe { msg_send![super(self), layout] };
            if let Some(adapter) = self.ivars().adapter.borrow().as_ref() {
                adapter.layout();
            }
            self.layout_placeholders();
        }

        // Let a click on the mirror start a window drag right away.
        #[unsafe(method(mouseDownCanMoveWindow))]
        fn mouse_down_can_move_window(&self) -> bool {
            true
        }
    }
);

impl CameraView {
    pub fn new(mtm: MainThreadMarker, frame: NSRect) -> Retained<Self> {
        let this = mtm.alloc().set_ivars(CameraViewIvars {
            adapter: RefCell::new(None),
            spinner: RefCell::new(None),
            message: RefCell::new(None),
        });
        let view: Retained<Self> = unsafe { msg_send![super(this), initWithFrame: frame] };

        view.setWantsLayer(true);
        if let Some(root) = view.layer() {
            root.setCornerRadius(CORNER_RADIUS);
            root.setMasksToBounds(true);
            *view.ivars().adapter.borrow_mut() = Some(PreviewAdapter::new(LayerHost { root }));
        }

        let spinner = NSProgressIndicator::initWithFrame(
            mtm.alloc(),
            CGRect::new(CGPoint::ZERO, CGSize::new(32.0, 32.0)),
        );
        spinner.setStyle(NSProgressIndicatorStyle::Spinning);
        spinner.setDisplayedWhenStopped(false);
        view.addSubview(&spinner);
        *view.ivars().spinner.borrow_mut() = Some(spinner);

        let message = NSTextField::labelWithString(&NSString::from_str(""), mtm);
        message.setTextColor(Some(&NSColor::whiteColor()));
        message.setFont(Some(&NSFont::systemFontOfSize(NSFont::smallSystemFontSize())));
        message.setAlignment(NSTextAlignment::Center);
        view.addSubview(&message);
        *view.ivars().message.borrow_mut() = Some(message);

        view.refresh_placeholders();
        view
    }

    /// Mirror the camera manager's published state.
    pub fn apply_camera_state(&self, preview: Option<&PreviewLayer>, error: Option<&str>) {
        if let Some(adapter) = self.ivars().adapter.borrow_mut().as_mut() {
            adapter.sync(preview, error);
        }
        self.refresh_placeholders();
    }

    fn refresh_placeholders(&self) {
        let adapter = self.ivars().adapter.borrow();
        let state = adapter
            .as_ref()
            .map_or(DisplayState::Loading, |a| a.display_state());

        // Dark rounded backdrop while there is no feed.
        let backdrop_alpha = match state {
            DisplayState::Loading => 0.8,
            DisplayState::Error(_) => 0.9,
            DisplayState::Live => 0.0,
        };
        if let Some(root) = self.layer() {
            let color = NSColor::colorWithWhite_alpha(0.0, backdrop_alpha).CGColor();
            root.setBackgroundColor(Some(&color));
        }

        if let Some(spinner) = self.ivars().spinner.borrow().as_ref() {
            if state == DisplayState::Loading {
                spinner.startAnimation(None);
            } else {
                spinner.stopAnimation(None);
            }
        }

        if let Some(message) = self.ivars().message.borrow().as_ref() {
            match state {
                DisplayState::Error(text) => {
                    message.setStringValue(&NSString::from_str(text));
                    message.setHidden(false);
                }
                _ => message.setHidden(true),
            }
        }
        drop(adapter);
        self.layout_placeholders();
    }

    fn layout_placeholders(&self) {
        let bounds = self.bounds();

        if let Some(spinner) = self.ivars().spinner.borrow().as_ref() {
            let side: CGFloat = 32.0;
            spinner.setFrame(CGRect::new(
                CGPoint::new(
                    (bounds.size.width - side) / 2.0,
                    (bounds.size.height - side) / 2.0,
                ),
                CGSize::new(side, side),
            ));
        }

        if let Some(message) = self.ivars().message.borrow().as_ref() {
            let inset: CGFloat = 16.0;
            let height: CGFloat = 48.0;
            message.setFrame(CGRect::new(
                CGPoint::new(inset, (bounds.size.height - height) / 2.0),
                CGSize::new((bounds.size.width - inset * 2.0).max(0.0), height),
            ));
        }
    }
}
