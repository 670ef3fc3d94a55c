//! Platform-neutral core of the FaceCam mirror: geometry, preferences,
//! camera session lifecycle, preview attachment and the show/hide
//! controller. No Objective-C FFI lives here, so everything can be tested on
//! any host; the macOS binary plugs AppKit and AVFoundation into the traits.

pub mod camera;
pub mod constants;
pub mod controller;
pub mod error;
pub mod events;
pub mod geometry;
pub mod logging;
pub mod preview;
pub mod prefs;

pub use camera::{
    Authorization, AuthorizationStatus, CameraManager, CameraState, CaptureBackend,
    CaptureControl, InlineQueue, SessionQueue,
};
pub use controller::{MenuState, MirrorController, MirrorState, MirrorWindow, WindowFactory};
pub use error::CaptureError;
pub use events::{CameraEvent, EventBus, EventPublisher, WindowEvent};
pub use geometry::{Point, Rect, Size};
pub use preview::{DisplayState, PreviewAdapter, SurfaceHost};
pub use prefs::{KeyValueStore, MemoryStore, Preferences};

/// Clamp a value to [lo, hi]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}
