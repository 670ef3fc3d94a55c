use facecam::geometry::Rect;
use objc2_app_kit::NSScreen;
use objc2_core_foundation::{CGPoint, CGRect, CGSize};
use objc2_foundation::MainThreadMarker;

/// Visible frame (minus menu bar and Dock) of the main screen, if any.
pub fn main_visible_frame(mtm: MainThreadMarker) -> Option<Rect> {
    NSScreen::mainScreen(mtm).map(|screen| from_cg(screen.visibleFrame()))
}

pub fn to_cg(rect: Rect) -> CGRect {
    CGRect::new(
        CGPoint::new(rect.origin.x, rect.origin.y),
        CGSize::new(rect.size.width, rect.size.height),
    )
}

pub fn from_cg(rect: CGRect) -> Rect {
    Rect::new(
        rect.origin.x,
        rect.origin.y,
        rect.size.width,
        rect.size.height,
    )
}
