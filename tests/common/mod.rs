//! Fakes shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use facecam::camera::{AuthorizationStatus, CaptureBackend, CaptureControl};
use facecam::controller::{MirrorWindow, WindowFactory};
use facecam::error::CaptureError;
use facecam::events::{CameraEvent, EventPublisher};
use facecam::geometry::Rect;
use facecam::preview::SurfaceHost;

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// === Camera ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Grant,
    Deny,
    /// Keep the callback so the test can answer later.
    Hold,
}

/// Session stand-in: just a running flag plus an id.
pub struct FakeSession {
    pub id: u32,
    pub running: Arc<Mutex<bool>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeSurface(pub u32);

/// Counters and switches shared between a test and its backend.
#[derive(Default)]
pub struct BackendProbe {
    pub configure_calls: AtomicUsize,
    pub start_calls: AtomicUsize,
    pub stop_calls: AtomicUsize,
    pub running: Arc<Mutex<bool>>,
    pub held_prompt: Mutex<Option<Box<dyn FnOnce(bool) + Send>>>,
    pub events: Mutex<Option<EventPublisher<CameraEvent<FakeSurface>>>>,
}

impl BackendProbe {
    pub fn configure_calls(&self) -> usize {
        self.configure_calls.load(Ordering::SeqCst)
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        *self.running.lock().unwrap()
    }

    /// Answer a prompt that was held back.
    pub fn answer_prompt(&self, granted: bool) {
        let callback = self.held_prompt.lock().unwrap().take().expect("no pending prompt");
        callback(granted);
    }

    /// Simulate the camera being unplugged.
    pub fn disconnect(&self) {
        let events = self.events.lock().unwrap();
        events
            .as_ref()
            .expect("session not configured")
            .publish(CameraEvent::DeviceDisconnected);
    }
}

pub struct FakeBackend {
    pub status: AuthorizationStatus,
    pub prompt: PromptAnswer,
    pub configure_result: Result<(), CaptureError>,
    pub probe: Arc<BackendProbe>,
}

impl FakeBackend {
    pub fn new(status: AuthorizationStatus) -> (Self, Arc<BackendProbe>) {
        let probe = Arc::new(BackendProbe::default());
        let backend = FakeBackend {
            status,
            prompt: PromptAnswer::Grant,
            configure_result: Ok(()),
            probe: Arc::clone(&probe),
        };
        (backend, probe)
    }

    pub fn with_prompt(mut self, answer: PromptAnswer) -> Self {
        self.prompt = answer;
        self
    }

    pub fn failing_with(mut self, err: CaptureError) -> Self {
        self.configure_result = Err(err);
        self
    }
}

impl CaptureBackend for FakeBackend {
    type Session = FakeSession;
    type Surface = FakeSurface;

    fn authorization_status(&self) -> AuthorizationStatus {
        self.status
    }

    fn request_access(&self, on_result: Box<dyn FnOnce(bool) + Send + 'static>) {
        match self.prompt {
            PromptAnswer::Grant => on_result(true),
            PromptAnswer::Deny => on_result(false),
            PromptAnswer::Hold => *self.probe.held_prompt.lock().unwrap() = Some(on_result),
        }
    }

    fn configure(
        &self,
        events: &EventPublisher<CameraEvent<FakeSurface>>,
    ) -> Result<(FakeSession, FakeSurface), CaptureError> {
        let n = self.probe.configure_calls.fetch_add(1, Ordering::SeqCst) as u32 + 1;
        self.configure_result.clone()?;
        *self.probe.events.lock().unwrap() = Some(events.clone());
        let session = FakeSession {
            id: n,
            running: Arc::clone(&self.probe.running),
        };
        Ok((session, FakeSurface(n)))
    }

    fn is_running(&self, session: &FakeSession) -> bool {
        *session.running.lock().unwrap()
    }

    fn start_running(&self, session: &FakeSession) {
        self.probe.start_calls.fetch_add(1, Ordering::SeqCst);
        *session.running.lock().unwrap() = true;
    }

    fn stop_running(&self, session: &FakeSession) {
        self.probe.stop_calls.fetch_add(1, Ordering::SeqCst);
        *session.running.lock().unwrap() = false;
    }
}

// === Controller ===

/// Records the calls the controller makes on capture.
#[derive(Default, Clone)]
pub struct CaptureLog {
    pub calls: Rc<RefCell<Vec<&'static str>>>,
}

impl CaptureLog {
    pub fn running(&self) -> bool {
        self.calls.borrow().last() == Some(&"start")
    }
}

impl CaptureControl for CaptureLog {
    fn start_capture(&self) {
        self.calls.borrow_mut().push("start");
    }

    fn stop_capture(&self) {
        self.calls.borrow_mut().push("stop");
    }
}

#[derive(Default)]
pub struct WindowRecord {
    pub frame: Cell<Rect>,
    pub visible: Cell<bool>,
}

pub struct FakeWindow {
    pub record: Rc<WindowRecord>,
}

impl MirrorWindow for FakeWindow {
    fn set_frame(&self, frame: Rect) {
        self.record.frame.set(frame);
    }

    fn order_front(&self) {
        self.record.visible.set(true);
    }

    fn order_out(&self) {
        self.record.visible.set(false);
    }

    fn is_visible(&self) -> bool {
        self.record.visible.get()
    }
}

#[derive(Default)]
pub struct FakeFactory {
    pub created: Rc<Cell<usize>>,
    pub initial_frames: Rc<RefCell<Vec<Rect>>>,
}

impl WindowFactory for FakeFactory {
    type Window = FakeWindow;

    fn create_window(&mut self, frame: Rect) -> FakeWindow {
        self.created.set(self.created.get() + 1);
        self.initial_frames.borrow_mut().push(frame);
        let record = Rc::new(WindowRecord::default());
        record.frame.set(frame);
        FakeWindow { record }
    }
}

// === Preview ===

/// A layer tree reduced to a list of attached surface ids.
#[derive(Default)]
pub struct RecordingHost {
    pub sublayers: RefCell<Vec<u32>>,
    pub frames: RefCell<Vec<(u32, Rect)>>,
    pub bounds: Cell<Rect>,
}

impl SurfaceHost for RecordingHost {
    type Surface = FakeSurface;

    fn attach(&self, surface: &FakeSurface) {
        self.sublayers.borrow_mut().push(surface.0);
    }

    fn detach(&self, surface: &FakeSurface) {
        self.sublayers.borrow_mut().retain(|id| *id != surface.0);
    }

    fn resize(&self, surface: &FakeSurface, bounds: Rect) {
        self.frames.borrow_mut().push((surface.0, bounds));
    }

    fn bounds(&self) -> Rect {
        self.bounds.get()
    }
}
