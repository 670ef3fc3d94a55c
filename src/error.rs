use thiserror::Error;

/// Everything that can keep the live preview from showing.
///
/// None of these are fatal: the `Display` text is what the mirror window
/// renders in place of the camera feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Camera access denied. Enable in System Settings > Privacy > Camera")]
    PermissionDenied,

    /// The user answered "Don't Allow" to the permission prompt.
    #[error("Camera access denied")]
    AccessRefused,

    #[error("No camera found")]
    NoDeviceFound,

    #[error("Failed to setup camera: {0}")]
    InputCreationFailed(String),

    #[error("Unknown camera authorization status")]
    UnknownAuthorizationStatus,

    #[error("Camera was disconnected")]
    DeviceDisconnected,
}

impl CaptureError {
    /// Short stable identifier for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            CaptureError::PermissionDenied => "permission_denied",
            CaptureError::AccessRefused => "access_refused",
            CaptureError::NoDeviceFound => "no_device",
            CaptureError::InputCreationFailed(_) => "input_failed",
            CaptureError::UnknownAuthorizationStatus => "unknown_authorization",
            CaptureError::DeviceDisconnected => "device_disconnected",
        }
    }
}
