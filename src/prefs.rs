//! Persisted window placement and visibility.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::constants::{
    DEFAULT_WINDOW_SIZE, PREF_WINDOW_SIZE, PREF_WINDOW_VISIBLE, PREF_WINDOW_X, PREF_WINDOW_Y,
};
use crate::geometry::{self, Point, Rect};

/// Flat scalar key-value storage, shaped after `NSUserDefaults`.
///
/// Reads return `None` when the key has never been written (or was removed).
pub trait KeyValueStore {
    fn double(&self, key: &str) -> Option<f64>;
    fn bool(&self, key: &str) -> Option<bool>;
    fn set_double(&self, key: &str, value: f64);
    fn set_bool(&self, key: &str, value: bool);
    fn remove(&self, key: &str);
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Value {
    Double(f64),
    Bool(bool),
}

/// In-process store. Used by tests and whenever no OS defaults are available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

// Mirrors NSUserDefaults coercions: a stored bool reads as 0/1 and a
// stored number reads as true when non-zero.
impl KeyValueStore for MemoryStore {
    fn double(&self, key: &str) -> Option<f64> {
        self.values.borrow().get(key).map(|v| match *v {
            Value::Double(d) => d,
            Value::Bool(b) => f64::from(u8::from(b)),
        })
    }

    fn bool(&self, key: &str) -> Option<bool> {
        self.values.borrow().get(key).map(|v| match *v {
            Value::Double(d) => d != 0.0,
            Value::Bool(b) => b,
        })
    }

    fn set_double(&self, key: &str, value: f64) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), Value::Double(value));
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), Value::Bool(value));
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// The four persisted scalars plus the defaults derived from screen geometry.
///
/// Built once at startup and handed to the controller.
pub struct Preferences<S: KeyValueStore> {
    store: S,
    /// Visible frame of the main screen, if there is one.
    screen: Option<Rect>,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S, screen: Option<Rect>) -> Self {
        Preferences { store, screen }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn screen(&self) -> Option<Rect> {
        self.screen
    }

    pub fn window_x(&self) -> f64 {
        self.store
            .double(PREF_WINDOW_X)
            .unwrap_or_else(|| self.default_position().x)
    }

    pub fn set_window_x(&self, x: f64) {
        self.store.set_double(PREF_WINDOW_X, x);
    }

    pub fn window_y(&self) -> f64 {
        self.store
            .double(PREF_WINDOW_Y)
            .unwrap_or_else(|| self.default_position().y)
    }

    pub fn set_window_y(&self, y: f64) {
        self.store.set_double(PREF_WINDOW_Y, y);
    }

    /// Stored side length; missing or non-positive values read as the default.
    pub fn window_size(&self) -> f64 {
        match self.store.double(PREF_WINDOW_SIZE) {
            Some(size) if size > 0.0 => size,
            _ => DEFAULT_WINDOW_SIZE,
        }
    }

    pub fn set_window_size(&self, size: f64) {
        self.store.set_double(PREF_WINDOW_SIZE, size);
    }

    pub fn window_visible(&self) -> bool {
        self.store.bool(PREF_WINDOW_VISIBLE).unwrap_or(false)
    }

    pub fn set_window_visible(&self, visible: bool) {
        self.store.set_bool(PREF_WINDOW_VISIBLE, visible);
    }

    /// Stored frame with the square and size limits applied.
    pub fn window_frame(&self) -> Rect {
        geometry::constrain_frame(Rect::square(
            self.window_x(),
            self.window_y(),
            self.window_size(),
        ))
    }

    /// Persist a frame reported by the window.
    pub fn record_frame(&self, frame: Rect) {
        self.set_window_x(frame.origin.x);
        self.set_window_y(frame.origin.y);
        self.set_window_size(frame.size.width);
    }

    pub fn reset_to_defaults(&self) {
        for key in [
            PREF_WINDOW_X,
            PREF_WINDOW_Y,
            PREF_WINDOW_SIZE,
            PREF_WINDOW_VISIBLE,
        ] {
            self.store.remove(key);
        }
    }

    fn default_position(&self) -> Point {
        geometry::default_origin(self.screen, self.window_size())
    }
}
