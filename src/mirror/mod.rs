pub mod view;
pub mod window;

use facecam::controller::{MirrorWindow, WindowFactory};
use facecam::events::{EventPublisher, WindowEvent};
use facecam::geometry::Rect;
use objc2::rc::Retained;
use objc2_core_foundation::{CGPoint, CGRect};
use objc2_foundation::MainThreadMarker;

use crate::capture::PreviewLayer;
use crate::screen;
use view::CameraView;
use window::FloatingWindow;

/// The floating window together with its camera view.
pub struct MirrorPanel {
    pub window: Retained<FloatingWindow>,
    pub view: Retained<CameraView>,
}

impl MirrorPanel {
    pub fn show_camera_state(&self, preview: Option<&PreviewLayer>, error: Option<&str>) {
        self.view.apply_camera_state(preview, error);
    }
}

impl MirrorWindow for MirrorPanel {
    fn set_frame(&self, frame: Rect) {
        self.window.setFrame_display(screen::to_cg(frame), true);
    }

    fn order_front(&self) {
        self.window.makeKeyAndOrderFront(None);
    }

    fn order_out(&self) {
        self.window.orderOut(None);
    }

    fn is_visible(&self) -> bool {
        self.window.isVisible()
    }
}

pub struct PanelFactory {
    mtm: MainThreadMarker,
    events: EventPublisher<WindowEvent>,
}

impl PanelFactory {
    pub fn new(mtm: MainThreadMarker, events: EventPublisher<WindowEvent>) -> Self {
        PanelFactory { mtm, events }
    }
}

impl WindowFactory for PanelFactory {
    type Window = MirrorPanel;

    fn create_window(&mut self, frame: Rect) -> MirrorPanel {
        let frame = screen::to_cg(frame);
        let window = FloatingWindow::new(self.mtm, frame, self.events.clone());
        let view = CameraView::new(self.mtm, CGRect::new(CGPoint::ZERO, frame.size));
        window.setContentView(Some(&view));
        MirrorPanel { window, view }
    }
}
