//! Compile-time defaults shared by the library and the macOS front end.

/// Side of the mirror window when nothing is stored.
pub const DEFAULT_WINDOW_SIZE: f64 = 300.0;
pub const MIN_WINDOW_SIZE: f64 = 150.0;
pub const MAX_WINDOW_SIZE: f64 = 800.0;

/// Gap between the default window position and the screen's visible edges.
pub const SCREEN_MARGIN: f64 = 20.0;

/// Origin used when no screen geometry is available.
pub const FALLBACK_ORIGIN: (f64, f64) = (100.0, 100.0);

/// Corner radius of the preview mask and the placeholder background.
pub const CORNER_RADIUS: f64 = 16.0;

// NSUserDefaults keys
pub const PREF_WINDOW_X: &str = "windowX";
pub const PREF_WINDOW_Y: &str = "windowY";
pub const PREF_WINDOW_SIZE: &str = "windowSize";
pub const PREF_WINDOW_VISIBLE: &str = "windowVisible";

pub const SESSION_QUEUE_LABEL: &str = "com.facecam.session";

/// Seconds between UI-thread polls of the event buses and the hotkey receiver.
pub const EVENT_POLL_INTERVAL: f64 = 0.1;

pub const MENU_SHOW_TITLE: &str = "Show Mirror";
pub const MENU_HIDE_TITLE: &str = "Hide Mirror";
