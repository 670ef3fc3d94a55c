//! Preview attachment: one sublayer at a time, sized to the host.

mod common;

use common::{FakeSurface, RecordingHost};
use facecam::{DisplayState, PreviewAdapter, Rect};

fn adapter() -> PreviewAdapter<RecordingHost> {
    let host = RecordingHost::default();
    host.bounds.set(Rect::new(0.0, 0.0, 300.0, 300.0));
    PreviewAdapter::new(host)
}

#[test]
fn starts_loading() {
    let adapter = adapter();
    assert_eq!(adapter.display_state(), DisplayState::Loading);
    assert!(adapter.host().sublayers.borrow().is_empty());
}

#[test]
fn same_surface_twice_attaches_once() {
    let mut adapter = adapter();
    adapter.set_surface(FakeSurface(1));
    adapter.set_surface(FakeSurface(1));

    assert_eq!(*adapter.host().sublayers.borrow(), vec![1]);
    assert_eq!(adapter.display_state(), DisplayState::Live);
}

#[test]
fn different_surface_replaces_old_one() {
    let mut adapter = adapter();
    adapter.set_surface(FakeSurface(1));
    adapter.set_surface(FakeSurface(2));

    assert_eq!(*adapter.host().sublayers.borrow(), vec![2]);
    assert_eq!(adapter.surface(), Some(&FakeSurface(2)));
}

#[test]
fn surface_fills_bounds_on_attach_and_layout() {
    let mut adapter = adapter();
    adapter.set_surface(FakeSurface(7));
    assert_eq!(
        adapter.host().frames.borrow().last(),
        Some(&(7, Rect::new(0.0, 0.0, 300.0, 300.0)))
    );

    adapter.host().bounds.set(Rect::new(0.0, 0.0, 480.0, 480.0));
    adapter.layout();
    assert_eq!(
        adapter.host().frames.borrow().last(),
        Some(&(7, Rect::new(0.0, 0.0, 480.0, 480.0)))
    );
}

#[test]
fn layout_without_surface_does_nothing() {
    let adapter = adapter();
    adapter.layout();
    assert!(adapter.host().frames.borrow().is_empty());
}

#[test]
fn error_replaces_live_surface() {
    let mut adapter = adapter();
    adapter.set_surface(FakeSurface(1));
    adapter.set_error("Camera was disconnected");

    assert!(adapter.host().sublayers.borrow().is_empty());
    assert_eq!(
        adapter.display_state(),
        DisplayState::Error("Camera was disconnected")
    );
}

#[test]
fn sync_follows_camera_state() {
    let mut adapter = adapter();

    adapter.sync(None, None);
    assert_eq!(adapter.display_state(), DisplayState::Loading);

    adapter.sync(Some(&FakeSurface(3)), None);
    adapter.sync(Some(&FakeSurface(3)), None);
    assert_eq!(*adapter.host().sublayers.borrow(), vec![3]);
    assert_eq!(adapter.display_state(), DisplayState::Live);

    adapter.sync(None, Some("No camera found"));
    assert_eq!(adapter.display_state(), DisplayState::Error("No camera found"));
    assert!(adapter.host().sublayers.borrow().is_empty());
}
