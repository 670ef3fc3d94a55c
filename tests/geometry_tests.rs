//! Frame rules for the mirror window: square, 150..=800, default placement.

mod common;

use common::approx_eq;
use facecam::constants::{MAX_WINDOW_SIZE, MIN_WINDOW_SIZE};
use facecam::geometry::{clamp_side, constrain_frame, constrain_size, default_origin};
use facecam::{Point, Rect, Size};

#[test]
fn valid_square_frames_pass_unchanged() {
    for side in [150.0, 151.5, 300.0, 640.0, 800.0] {
        let frame = Rect::square(42.0, 17.0, side);
        assert_eq!(constrain_frame(frame), frame, "side {side}");
    }
}

#[test]
fn undersized_frames_clamp_to_minimum() {
    let frame = constrain_frame(Rect::square(10.0, 10.0, 20.0));
    assert_eq!(frame.size, Size::square(MIN_WINDOW_SIZE));
    assert_eq!(frame.origin, Point::new(10.0, 10.0));
}

#[test]
fn oversized_frames_clamp_to_maximum() {
    let frame = constrain_frame(Rect::square(0.0, 0.0, 2000.0));
    assert_eq!(frame.size, Size::square(MAX_WINDOW_SIZE));
}

#[test]
fn non_square_frames_become_square_from_width() {
    let size = constrain_size(Size::new(400.0, 250.0));
    assert!(size.is_square());
    assert_eq!(size.width, 400.0);

    let size = constrain_size(Size::new(100.0, 500.0));
    assert!(size.is_square());
    assert_eq!(size.width, MIN_WINDOW_SIZE);
}

#[test]
fn clamp_side_bounds() {
    assert_eq!(clamp_side(0.0), MIN_WINDOW_SIZE);
    assert_eq!(clamp_side(1e6), MAX_WINDOW_SIZE);
    assert_eq!(clamp_side(333.0), 333.0);
}

#[test]
fn default_origin_is_bottom_right_minus_margin() {
    let screen = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    let origin = default_origin(Some(screen), 300.0);
    assert!(approx_eq(origin.x, 1600.0));
    assert!(approx_eq(origin.y, 20.0));
}

#[test]
fn default_origin_respects_visible_frame_offset() {
    // Dock on the left, menu bar on top: visible frame starts away from zero.
    let visible = Rect::new(80.0, 0.0, 1840.0, 1055.0);
    let origin = default_origin(Some(visible), 200.0);
    assert!(approx_eq(origin.x, 80.0 + 1840.0 - 200.0 - 20.0));
    assert!(approx_eq(origin.y, 20.0));
}

#[test]
fn default_origin_without_screen_uses_fallback() {
    assert_eq!(default_origin(None, 300.0), Point::new(100.0, 100.0));
}
