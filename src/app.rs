use std::cell::RefCell;

use facecam::camera::CameraManager;
use facecam::constants::{EVENT_POLL_INTERVAL, SESSION_QUEUE_LABEL};
use facecam::controller::MirrorController;
use facecam::events::{EventBus, WindowEvent};
use facecam::prefs::Preferences;
use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2::{define_class, msg_send, sel, DefinedClass, MainThreadOnly};
use objc2_app_kit::NSApplicationDelegate;
use objc2_foundation::{MainThreadMarker, NSNotification, NSObject, NSObjectProtocol, NSTimer};
use tracing::{info, warn};

use crate::capture::{AvCaptureBackend, DispatchSessionQueue};
use crate::defaults::UserDefaultsStore;
use crate::hotkey::HotkeyManager;
use crate::mirror::PanelFactory;
use crate::screen;
use crate::statusbar::StatusBar;

type Camera = CameraManager<AvCaptureBackend, DispatchSessionQueue>;
type Controller = MirrorController<PanelFactory, Camera, UserDefaultsStore>;

pub struct AppDelegateIvars {
    status_bar: RefCell<Option<StatusBar>>,
    hotkey_manager: RefCell<Option<HotkeyManager>>,
    controller: RefCell<Option<Controller>>,
    window_events: EventBus<WindowEvent>,
}

define_class!(
    #[unsafe(super(NSObject))]
    #[thread_kind = MainThreadOnly]
    #[name = "AppDelegate"]
    #[ivars = AppDelegateIvars]
    pub struct AppDelegate;

    unsafe impl NSObjectProtocol for AppDelegate {}

    unsafe impl NSApplicationDelegate for AppDelegate {
        #[unsafe(method(applicationDidFinishLaunching:))]
        fn application_did_finish_launching(&self, _notification: &NSNotification) {
            let mtm = MainThreadMarker::from(self);

            *self.ivars().status_bar.borrow_mut() = Some(StatusBar::new(mtm));

            match HotkeyManager::new() {
                Ok(manager) => *self.ivars().hotkey_manager.borrow_mut() = Some(manager),
                Err(e) => warn!("global hotkey unavailable: {e}"),
            }

            // Checks camera authorization right away.
            let camera = CameraManager::new(
                AvCaptureBackend,
                DispatchSessionQueue::new(SESSION_QUEUE_LABEL),
            );
            let prefs = Preferences::new(
                UserDefaultsStore::standard(),
                screen::main_visible_frame(mtm),
            );
            let factory = PanelFactory::new(mtm, self.ivars().window_events.publisher());

            let mut controller = MirrorController::new(factory, camera, prefs);
            controller.launch();
            *self.ivars().controller.borrow_mut() = Some(controller);

            self.sync_preview();
            self.update_menu();

            // Drain window/camera events and hotkey presses on the main thread.
            let target: &AnyObject = unsafe { &*(self as *const Self as *const AnyObject) };
            unsafe {
                NSTimer::scheduledTimerWithTimeInterval_target_selector_userInfo_repeats(
                    EVENT_POLL_INTERVAL,
                    target,
                    sel!(pollEvents:),
                    None,
                    true,
                );
            }

            info!("FaceCam started");
        }
    }

    // --- Event polling (called by NSTimer) ---
    impl AppDelegate {
        #[unsafe(method(pollEvents:))]
        fn poll_events(&self, _timer: &NSObject) {
            let toggle = self
                .ivars()
                .hotkey_manager
                .borrow()
                .as_ref()
                .is_some_and(HotkeyManager::toggle_pressed);
            if toggle {
                self.toggle();
            }

            let camera_changed = {
                let mut controller = self.ivars().controller.borrow_mut();
                let Some(controller) = controller.as_mut() else {
                    return;
                };
                for event in self.ivars().window_events.drain() {
                    controller.handle_window_event(event);
                }
                controller.capture_mut().pump()
            };
            if camera_changed {
                self.sync_preview();
            }
        }
    }

    // --- Menu actions ---
    impl AppDelegate {
        #[unsafe(method(toggleMirror:))]
        fn toggle_mirror(&self, _sender: &AnyObject) {
            self.toggle();
        }

        #[unsafe(method(resetPosition:))]
        fn reset_position(&self, _sender: &AnyObject) {
            if let Some(controller) = self.ivars().controller.borrow_mut().as_mut() {
                controller.reset_position();
            }
        }
    }
);

impl AppDelegate {
    pub fn new(mtm: MainThreadMarker) -> Retained<Self> {
        let this = mtm.alloc().set_ivars(AppDelegateIvars {
            status_bar: RefCell::new(None),
            hotkey_manager: RefCell::new(None),
            controller: RefCell::new(None),
            window_events: EventBus::new(),
        });
        unsafe { msg_send![super(this), init] }
    }

    fn toggle(&self) {
        if let Some(controller) = self.ivars().controller.borrow_mut().as_mut() {
            controller.toggle();
            info!(state = ?controller.state(), "mirror toggled");
        }
        self.sync_preview();
        self.update_menu();
    }

    /// Push the camera's preview/error into the mirror view, if it exists yet.
    fn sync_preview(&self) {
        let controller = self.ivars().controller.borrow();
        let Some(controller) = controller.as_ref() else {
            return;
        };
        if let Some(panel) = controller.window() {
            let camera = controller.capture();
            let error = camera.error_message();
            panel.show_camera_state(camera.preview(), error.as_deref());
        }
    }

    fn update_menu(&self) {
        let controller = self.ivars().controller.borrow();
        let status_bar = self.ivars().status_bar.borrow();
        if let (Some(controller), Some(status_bar)) = (controller.as_ref(), status_bar.as_ref()) {
            status_bar.update(controller.menu_state());
        }
    }
}
