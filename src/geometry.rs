//! Window geometry in AppKit screen coordinates (bottom-left origin).
//!
//! These are plain value types so the frame rules can be exercised without
//! AppKit. The macOS front end converts to and from `CGRect` at the edge.

use crate::clamp;
use crate::constants::{FALLBACK_ORIGIN, MAX_WINDOW_SIZE, MIN_WINDOW_SIZE, SCREEN_MARGIN};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    pub const fn square(side: f64) -> Self {
        Size { width: side, height: side }
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub const fn square(x: f64, y: f64, side: f64) -> Self {
        Rect::new(x, y, side, side)
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Same rect with the origin moved to zero, as a view's bounds would be.
    pub fn bounds(&self) -> Rect {
        Rect {
            origin: Point::default(),
            size: self.size,
        }
    }
}

/// Clamp a window side to the allowed range.
pub fn clamp_side(side: f64) -> f64 {
    clamp(side, MIN_WINDOW_SIZE, MAX_WINDOW_SIZE)
}

/// Apply the 1:1 aspect ratio and the size limits.
///
/// The width drives the result, matching how AppKit derives the height of an
/// aspect-locked window from the dragged width.
pub fn constrain_size(size: Size) -> Size {
    Size::square(clamp_side(size.width))
}

/// Constrain a whole frame, keeping its origin.
pub fn constrain_frame(frame: Rect) -> Rect {
    Rect {
        origin: frame.origin,
        size: constrain_size(frame.size),
    }
}

/// Bottom-right placement inside `visible_frame`, inset by the screen margin.
///
/// Without a screen the window lands at a fixed fallback origin.
pub fn default_origin(visible_frame: Option<Rect>, side: f64) -> Point {
    match visible_frame {
        Some(screen) => Point::new(
            screen.max_x() - side - SCREEN_MARGIN,
            screen.min_y() + SCREEN_MARGIN,
        ),
        None => Point::new(FALLBACK_ORIGIN.0, FALLBACK_ORIGIN.1),
    }
}
