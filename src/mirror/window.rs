use facecam::constants::{MAX_WINDOW_SIZE, MIN_WINDOW_SIZE};
use facecam::events::{EventPublisher, WindowEvent};
use facecam::geometry::{self, Size};
use objc2::rc::Retained;
use objc2::runtime::ProtocolObject;
use objc2::{define_class, msg_send, DefinedClass, MainThreadOnly};
use objc2_app_kit::{
    NSBackingStoreType, NSColor, NSWindow, NSWindowCollectionBehavior, NSWindowDelegate,
    NSWindowStyleMask,
};
use objc2_core_graphics::kCGFloatingWindowLevel;
use objc2_foundation::{MainThreadMarker, NSNotification, NSObjectProtocol, NSRect, NSSize};
use tracing::debug;

use crate::screen;

pub struct FloatingWindowIvars {
    events: EventPublisher<WindowEvent>,
}

// Borderless, always-on-top square window. Acts as its own delegate so moves
// and resizes turn into `WindowEvent`s.
define_class!(
    #[unsafe(super(NSWindow))]
    #[thread_kind = MainThreadOnly]
    #[name = "FaceCamFloatingWindow"]
    #[ivars = FloatingWindowIvars]
    pub struct FloatingWindow;

    unsafe impl NSObjectProtocol for FloatingWindow {}

    unsafe impl NSWindowDelegate for FloatingWindow {
        #[unsafe(method(windowDidMove:))]
        fn window_did_move(&self, _notification: &NSNotification) {
            self.publish_frame();
        }

        #[unsafe(method(windowDidResize:))]
        fn window_did_resize(&self, _notification: &NSNotification) {
            self.publish_frame();
        }

        #[unsafe(method(windowWillResize:toSize:))]
        fn window_will_resize(&self, _sender: &NSWindow, frame_size: NSSize) -> NSSize {
            let size = geometry::constrain_size(Size::new(frame_size.width, frame_size.height));
            NSSize::new(size.width, size.height)
        }
    }

    impl FloatingWindow {
        // Borderless windows refuse key status by default.
        #[unsafe(method(canBecomeKeyWindow))]
        fn can_become_key_window(&self) -> bool {
            true
        }

        #[unsafe(method(canBecomeMainWindow))]
        fn can_become_main_window(&self) -> bool {
            false
        }
    }
);

impl FloatingWindow {
    pub fn new(
        mtm: MainThreadMarker,
        frame: NSRect,
        events: EventPublisher<WindowEvent>,
    ) -> Retained<Self> {
        let this = mtm.alloc().set_ivars(FloatingWindowIvars { events });
        let window: Retained<Self> = unsafe {
            msg_send![
                super(this),
                initWithContentRect: frame,
                styleMask: NSWindowStyleMask::Borderless | NSWindowStyleMask::Resizable,
                backing: NSBackingStoreType::Buffered,
                defer: false
            ]
        };

        window.setLevel(kCGFloatingWindowLevel as _);
        window.setOpaque(false);
        window.setBackgroundColor(Some(&NSColor::clearColor()));
        window.setHasShadow(true);
        window.setMovableByWindowBackground(true);
        window.setCollectionBehavior(
            NSWindowCollectionBehavior::CanJoinAllSpaces
                | NSWindowCollectionBehavior::FullScreenAuxiliary,
        );
        window.setAspectRatio(NSSize::new(1.0, 1.0));
        window.setMinSize(NSSize::new(MIN_WINDOW_SIZE, MIN_WINDOW_SIZE));
        window.setMaxSize(NSSize::new(MAX_WINDOW_SIZE, MAX_WINDOW_SIZE));
        unsafe { window.setReleasedWhenClosed(false) };

        // Delegates are held weakly, so pointing at self does not create a cycle.
        window.setDelegate(Some(ProtocolObject::from_ref(&*window)));

        window
    }

    fn publish_frame(&self) {
        let frame = screen::from_cg(self.frame());
        debug!(?frame, "mirror window frame changed");
        self.ivars().events.publish(WindowEvent::FrameChanged(frame));
    }
}
