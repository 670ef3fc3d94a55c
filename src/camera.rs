//! Camera authorization and capture-session lifecycle.
//!
//! `CameraManager` is owned by the UI thread. Session work runs as jobs on a
//! serial [`SessionQueue`]; the session object itself lives in a slot that
//! only those jobs touch. Results come back as [`CameraEvent`]s and are
//! applied to [`CameraState`] by [`CameraManager::pump`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::error::CaptureError;
use crate::events::{CameraEvent, EventBus, EventPublisher};

/// What the OS reports for camera access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    NotDetermined,
    Authorized,
    Denied,
    Restricted,
    Unknown,
}

/// Resolved authorization as seen by the app. Fixed once it leaves
/// `Unauthorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Unauthorized,
    Authorized,
    Denied,
}

/// The platform capture stack.
///
/// Every method except `authorization_status` and `request_access` is only
/// called from session-queue jobs.
pub trait CaptureBackend: Send + Sync + 'static {
    type Session: Send + 'static;
    type Surface: Clone + PartialEq + Send + 'static;

    fn authorization_status(&self) -> AuthorizationStatus;

    /// Show the OS permission prompt. `on_result` may run on any thread.
    fn request_access(&self, on_result: Box<dyn FnOnce(bool) + Send + 'static>);

    /// Build a session for the front camera (or the default camera) and a
    /// mirrored preview surface bound to it. `events` stays valid for the
    /// life of the session, e.g. to report a disconnect.
    fn configure(
        &self,
        events: &EventPublisher<CameraEvent<Self::Surface>>,
    ) -> Result<(Self::Session, Self::Surface), CaptureError>;

    fn is_running(&self, session: &Self::Session) -> bool;
    fn start_running(&self, session: &Self::Session);
    fn stop_running(&self, session: &Self::Session);
}

/// Serial executor for session jobs: at most one job runs at a time, in
/// submission order.
pub trait SessionQueue {
    fn dispatch(&self, job: Box<dyn FnOnce() + Send + 'static>);
}

/// Runs each job immediately on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineQueue;

impl SessionQueue for InlineQueue {
    fn dispatch(&self, job: Box<dyn FnOnce() + Send + 'static>) {
        job();
    }
}

/// Start/stop from the controller's point of view.
pub trait CaptureControl {
    fn start_capture(&self);
    fn stop_capture(&self);
}

/// UI-observable camera state. Only changed on the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState<S> {
    pub authorization: Authorization,
    pub running: bool,
    pub preview: Option<S>,
    pub error: Option<CaptureError>,
}

impl<S> Default for CameraState<S> {
    fn default() -> Self {
        CameraState {
            authorization: Authorization::Unauthorized,
            running: false,
            preview: None,
            error: None,
        }
    }
}

impl<S> CameraState<S> {
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Queue-side session storage.
struct SessionSlot<T> {
    session: Option<T>,
    /// Last start/stop request, applied as soon as a session exists.
    wants_running: bool,
}

type SharedSlot<T> = Arc<Mutex<SessionSlot<T>>>;

fn lock<T>(slot: &Mutex<SessionSlot<T>>) -> MutexGuard<'_, SessionSlot<T>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct CameraManager<B: CaptureBackend, Q: SessionQueue> {
    backend: Arc<B>,
    queue: Q,
    slot: SharedSlot<B::Session>,
    bus: EventBus<CameraEvent<B::Surface>>,
    state: CameraState<B::Surface>,
}

impl<B: CaptureBackend, Q: SessionQueue> CameraManager<B, Q> {
    /// Create the manager and immediately check camera authorization.
    pub fn new(backend: B, queue: Q) -> Self {
        let mut manager = CameraManager {
            backend: Arc::new(backend),
            queue,
            slot: Arc::new(Mutex::new(SessionSlot {
                session: None,
                wants_running: false,
            })),
            bus: EventBus::new(),
            state: CameraState::default(),
        };
        manager.check_authorization();
        manager
    }

    pub fn state(&self) -> &CameraState<B::Surface> {
        &self.state
    }

    pub fn preview(&self) -> Option<&B::Surface> {
        self.state.preview.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.error_message()
    }

    pub fn is_authorized(&self) -> bool {
        self.state.authorization == Authorization::Authorized
    }

    /// Whether a session has been built. Safe to call from the UI thread;
    /// the slot lock is only held briefly by queue jobs.
    pub fn has_session(&self) -> bool {
        lock(&self.slot).session.is_some()
    }

    fn check_authorization(&mut self) {
        match self.backend.authorization_status() {
            AuthorizationStatus::Authorized => {
                info!("camera access already granted");
                self.state.authorization = Authorization::Authorized;
                self.setup_session();
            }
            AuthorizationStatus::NotDetermined => {
                info!("requesting camera access");
                let events = self.bus.publisher();
                self.backend.request_access(Box::new(move |granted| {
                    events.publish(CameraEvent::AccessResolved(granted));
                }));
            }
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted => {
                self.state.authorization = Authorization::Denied;
                self.fail(CaptureError::PermissionDenied);
            }
            AuthorizationStatus::Unknown => {
                self.fail(CaptureError::UnknownAuthorizationStatus);
            }
        }
    }

    fn setup_session(&self) {
        let backend = Arc::clone(&self.backend);
        let slot = Arc::clone(&self.slot);
        let events = self.bus.publisher();

        self.queue.dispatch(Box::new(move || {
            match backend.configure(&events) {
                Ok((session, surface)) => {
                    let mut slot = lock(&slot);
                    if slot.wants_running && !backend.is_running(&session) {
                        backend.start_running(&session);
                        events.publish(CameraEvent::RunningChanged(true));
                    }
                    slot.session = Some(session);
                    drop(slot);
                    debug!("capture session configured");
                    events.publish(CameraEvent::PreviewReady(surface));
                }
                Err(err) => {
                    events.publish(CameraEvent::Failed(err));
                }
            }
        }));
    }

    fn set_running(&self, running: bool) {
        let backend = Arc::clone(&self.backend);
        let slot = Arc::clone(&self.slot);
        let events = self.bus.publisher();

        self.queue.dispatch(Box::new(move || {
            let mut slot = lock(&slot);
            slot.wants_running = running;
            let Some(session) = slot.session.as_ref() else {
                return;
            };
            if backend.is_running(session) == running {
                return;
            }
            if running {
                backend.start_running(session);
            } else {
                backend.stop_running(session);
            }
            events.publish(CameraEvent::RunningChanged(running));
        }));
    }

    /// Apply everything the background side has reported. Call from the UI
    /// thread. Returns true when the state changed.
    pub fn pump(&mut self) -> bool {
        let events = self.bus.drain();
        let changed = !events.is_empty();
        for event in events {
            self.apply(event);
        }
        changed
    }

    fn apply(&mut self, event: CameraEvent<B::Surface>) {
        match event {
            CameraEvent::AccessResolved(granted) => {
                if self.state.authorization != Authorization::Unauthorized {
                    return;
                }
                if granted {
                    info!("camera access granted");
                    self.state.authorization = Authorization::Authorized;
                    self.setup_session();
                } else {
                    self.state.authorization = Authorization::Denied;
                    self.fail(CaptureError::AccessRefused);
                }
            }
            CameraEvent::PreviewReady(surface) => {
                self.state.preview = Some(surface);
            }
            CameraEvent::Failed(err) => self.fail(err),
            CameraEvent::RunningChanged(running) => {
                debug!(running, "capture running state changed");
                self.state.running = running;
            }
            CameraEvent::DeviceDisconnected => {
                self.state.preview = None;
                self.fail(CaptureError::DeviceDisconnected);
                self.stop_capture();
            }
        }
    }

    fn fail(&mut self, err: CaptureError) {
        warn!(code = err.code(), "{err}");
        self.state.error = Some(err);
    }
}

impl<B: CaptureBackend, Q: SessionQueue> CaptureControl for CameraManager<B, Q> {
    fn start_capture(&self) {
        self.set_running(true);
    }

    fn stop_capture(&self) {
        self.set_running(false);
    }
}
