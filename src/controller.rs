//! Show/hide state machine behind the menu-bar item.

use tracing::{debug, info};

use crate::camera::CaptureControl;
use crate::constants::{MENU_HIDE_TITLE, MENU_SHOW_TITLE};
use crate::events::WindowEvent;
use crate::geometry::Rect;
use crate::prefs::{KeyValueStore, Preferences};

/// The floating mirror window, as far as the controller cares.
pub trait MirrorWindow {
    fn set_frame(&self, frame: Rect);
    fn order_front(&self);
    fn order_out(&self);
    fn is_visible(&self) -> bool;
}

/// Creates the window on first show.
pub trait WindowFactory {
    type Window: MirrorWindow;

    fn create_window(&mut self, frame: Rect) -> Self::Window;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorState {
    Hidden,
    Shown,
}

/// Title and checkmark of the toggle menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub title: &'static str,
    pub checked: bool,
}

pub struct MirrorController<F: WindowFactory, C: CaptureControl, S: KeyValueStore> {
    factory: F,
    window: Option<F::Window>,
    capture: C,
    prefs: Preferences<S>,
    state: MirrorState,
}

impl<F, C, S> MirrorController<F, C, S>
where
    F: WindowFactory,
    C: CaptureControl,
    S: KeyValueStore,
{
    pub fn new(factory: F, capture: C, prefs: Preferences<S>) -> Self {
        MirrorController {
            factory,
            window: None,
            capture,
            prefs,
            state: MirrorState::Hidden,
        }
    }

    /// Restore the window if it was visible when the app last quit.
    pub fn launch(&mut self) {
        if self.prefs.window_visible() {
            info!("restoring mirror window from last session");
            self.show();
        }
    }

    pub fn toggle(&mut self) {
        match self.state {
            MirrorState::Hidden => self.show(),
            MirrorState::Shown => self.hide(),
        }
    }

    pub fn show(&mut self) {
        if self.state == MirrorState::Shown {
            return;
        }
        let frame = self.prefs.window_frame();
        let window = self.window.get_or_insert_with(|| {
            debug!(?frame, "creating mirror window");
            self.factory.create_window(frame)
        });
        window.set_frame(frame);
        window.order_front();
        self.capture.start_capture();
        self.prefs.set_window_visible(true);
        self.state = MirrorState::Shown;
    }

    pub fn hide(&mut self) {
        if self.state == MirrorState::Hidden {
            return;
        }
        if let Some(window) = &self.window {
            window.order_out();
        }
        self.capture.stop_capture();
        self.prefs.set_window_visible(false);
        self.state = MirrorState::Hidden;
    }

    /// Forget the stored placement and move the window back to the default
    /// corner.
    pub fn reset_position(&mut self) {
        self.prefs.reset_to_defaults();
        let frame = self.prefs.window_frame();
        if let Some(window) = &self.window {
            window.set_frame(frame);
        }
        self.prefs.set_window_visible(self.state == MirrorState::Shown);
        info!(?frame, "window position reset");
    }

    pub fn handle_window_event(&self, event: WindowEvent) {
        match event {
            WindowEvent::FrameChanged(frame) => self.prefs.record_frame(frame),
        }
    }

    pub fn menu_state(&self) -> MenuState {
        match self.state {
            MirrorState::Hidden => MenuState {
                title: MENU_SHOW_TITLE,
                checked: false,
            },
            MirrorState::Shown => MenuState {
                title: MENU_HIDE_TITLE,
                checked: true,
            },
        }
    }

    pub fn state(&self) -> MirrorState {
        self.state
    }

    pub fn window(&self) -> Option<&F::Window> {
        self.window.as_ref()
    }

    pub fn capture(&self) -> &C {
        &self.capture
    }

    pub fn capture_mut(&mut self) -> &mut C {
        &mut self.capture
    }

    pub fn prefs(&self) -> &Preferences<S> {
        &self.prefs
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}
