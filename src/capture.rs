use std::ptr::NonNull;
use std::sync::Mutex;

use block2::RcBlock;
use dispatch2::{DispatchQueue, DispatchRetained};
use facecam::camera::{AuthorizationStatus, CaptureBackend, SessionQueue};
use facecam::error::CaptureError;
use facecam::events::{CameraEvent, EventPublisher};
use objc2::rc::Retained;
use objc2::runtime::{AnyObject, Bool, ProtocolObject};
use objc2_av_foundation::{
    AVAuthorizationStatus, AVCaptureDevice, AVCaptureDeviceInput, AVCaptureDevicePosition,
    AVCaptureDeviceTypeBuiltInWideAngleCamera, AVCaptureDeviceWasDisconnectedNotification,
    AVCaptureSession, AVCaptureSessionPresetHigh, AVCaptureVideoPreviewLayer,
    AVLayerVideoGravityResizeAspectFill, AVMediaTypeVideo,
};
use objc2_foundation::{NSNotification, NSNotificationCenter, NSObjectProtocol};
use objc2_quartz_core::CATransform3DMakeScale;
use tracing::{debug, info, warn};

/// AVFoundation capture stack.
pub struct AvCaptureBackend;

/// A running-or-stopped `AVCaptureSession` plus its disconnect observer.
pub struct CaptureSession {
    session: Retained<AVCaptureSession>,
    disconnect_observer: Option<Retained<ProtocolObject<dyn NSObjectProtocol>>>,
}

// SAFETY: AVCaptureSession is documented as usable from any one thread at a
// time. The session only ever lives in the manager's queue slot and is only
// touched by jobs on the serial session queue.
unsafe impl Send for CaptureSession {}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        if let Some(observer) = self.disconnect_observer.take() {
            let observer: &AnyObject =
                unsafe { &*(Retained::as_ptr(&observer) as *const AnyObject) };
            let center = NSNotificationCenter::defaultCenter();
            unsafe { center.removeObserver(observer) };
        }
    }
}

/// The mirrored preview layer handed to the UI thread.
#[derive(Clone)]
pub struct PreviewLayer(pub Retained<AVCaptureVideoPreviewLayer>);

// SAFETY: the layer is created on the session queue and then only used on the
// main thread after the hand-off through the camera event bus.
unsafe impl Send for PreviewLayer {}

impl PartialEq for PreviewLayer {
    fn eq(&self, other: &Self) -> bool {
        Retained::as_ptr(&self.0) == Retained::as_ptr(&other.0)
    }
}

impl CaptureBackend for AvCaptureBackend {
    type Session = CaptureSession;
    type Surface = PreviewLayer;

    fn authorization_status(&self) -> AuthorizationStatus {
        let Some(media_type) = (unsafe { AVMediaTypeVideo }) else {
            return AuthorizationStatus::Unknown;
        };
        match unsafe { AVCaptureDevice::authorizationStatusForMediaType(media_type) } {
            AVAuthorizationStatus::Authorized => AuthorizationStatus::Authorized,
            AVAuthorizationStatus::NotDetermined => AuthorizationStatus::NotDetermined,
            AVAuthorizationStatus::Denied => AuthorizationStatus::Denied,
            AVAuthorizationStatus::Restricted => AuthorizationStatus::Restricted,
            _ => AuthorizationStatus::Unknown,
        }
    }

    fn request_access(&self, on_result: Box<dyn FnOnce(bool) + Send + 'static>) {
        let Some(media_type) = (unsafe { AVMediaTypeVideo }) else {
            on_result(false);
            return;
        };
        // The completion block is `Fn`; the callback must run once.
        let slot = Mutex::new(Some(on_result));
        let block = RcBlock::new(move |granted: Bool| {
            let callback = slot.lock().ok().and_then(|mut cb| cb.take());
            if let Some(callback) = callback {
                callback(granted.as_bool());
            }
        });
        unsafe {
            AVCaptureDevice::requestAccessForMediaType_completionHandler(media_type, &block);
        }
    }

    fn configure(
        &self,
        events: &EventPublisher<CameraEvent<PreviewLayer>>,
    ) -> Result<(CaptureSession, PreviewLayer), CaptureError> {
        let session = unsafe { AVCaptureSession::new() };
        if let Some(preset) = unsafe { AVCaptureSessionPresetHigh } {
            unsafe { session.setSessionPreset(preset) };
        }

        let device = find_camera().ok_or(CaptureError::NoDeviceFound)?;
        info!(camera = %unsafe { device.localizedName() }, "using camera");

        let input = unsafe { AVCaptureDeviceInput::deviceInputWithDevice_error(&device) }
            .map_err(|e| CaptureError::InputCreationFailed(e.localizedDescription().to_string()))?;

        if !unsafe { session.canAddInput(&input) } {
            return Err(CaptureError::InputCreationFailed(
                "the capture session rejected the camera input".to_string(),
            ));
        }
        unsafe { session.addInput(&input) };

        let layer = unsafe { AVCaptureVideoPreviewLayer::layerWithSession(&session) };
        if let Some(gravity) = unsafe { AVLayerVideoGravityResizeAspectFill } {
            unsafe { layer.setVideoGravity(gravity) };
        }
        // Flip horizontally, like a real mirror.
        layer.setTransform(CATransform3DMakeScale(-1.0, 1.0, 1.0));

        let disconnect_observer = observe_disconnect(&device, events.clone());

        Ok((
            CaptureSession {
                session,
                disconnect_observer,
            },
            PreviewLayer(layer),
        ))
    }

    fn is_running(&self, session: &CaptureSession) -> bool {
        unsafe { session.session.isRunning() }
    }

    fn start_running(&self, session: &CaptureSession) {
        debug!("starting capture session");
        unsafe { session.session.startRunning() };
    }

    fn stop_running(&self, session: &CaptureSession) {
        debug!("stopping capture session");
        unsafe { session.session.stopRunning() };
    }
}

/// Built-in front camera, else whatever the system considers the default.
fn find_camera() -> Option<Retained<AVCaptureDevice>> {
    let media_type = unsafe { AVMediaTypeVideo }?;

    let front = unsafe { AVCaptureDeviceTypeBuiltInWideAngleCamera }.and_then(|device_type| unsafe {
        AVCaptureDevice::defaultDeviceWithDeviceType_mediaType_position(
            device_type,
            Some(media_type),
            AVCaptureDevicePosition::Front,
        )
    });

    front.or_else(|| {
        debug!("no front camera, falling back to the default video device");
        unsafe { AVCaptureDevice::defaultDeviceWithMediaType(media_type) }
    })
}

fn observe_disconnect(
    device: &AVCaptureDevice,
    events: EventPublisher<CameraEvent<PreviewLayer>>,
) -> Option<Retained<ProtocolObject<dyn NSObjectProtocol>>> {
    let Some(name) = (unsafe { AVCaptureDeviceWasDisconnectedNotification }) else {
        warn!("device disconnect notifications unavailable");
        return None;
    };

    let block = RcBlock::new(move |_notification: NonNull<NSNotification>| {
        events.publish(CameraEvent::DeviceDisconnected);
    });

    let device: &AnyObject = device;
    let center = NSNotificationCenter::defaultCenter();
    let observer = unsafe {
        center.addObserverForName_object_queue_usingBlock(Some(name), Some(device), None, &block)
    };
    Some(observer)
}

/// Serial libdispatch queue that owns all session work.
pub struct DispatchSessionQueue {
    queue: DispatchRetained<DispatchQueue>,
}

impl DispatchSessionQueue {
    pub fn new(label: &str) -> Self {
        DispatchSessionQueue {
            queue: DispatchQueue::new(label, None),
        }
    }
}

impl SessionQueue for DispatchSessionQueue {
    fn dispatch(&self, job: Box<dyn FnOnce() + Send + 'static>) {
        self.queue.exec_async(job);
    }
}
