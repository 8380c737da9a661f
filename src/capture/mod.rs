// SPDX-License-Identifier: MPL-2.0
//! Camera capture for feeding photos into a comparison.
//!
//! The host owns the actual camera stream. This module decides which
//! constraints to request, classifies host failures, tracks the capture
//! session and encodes captured frames.

pub mod frame;
pub mod session;

use std::fmt;
use std::time::Duration;

use crate::config::CAMERA_START_TIMEOUT_SECS;

pub use frame::{encode_capture, photo_file_name, CapturedFrame, EncodedPhoto};
pub use session::{CameraCommand, CameraSession, SessionState};

/// Which camera to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FacingMode {
    /// Front camera.
    User,
    /// Rear camera.
    #[default]
    Environment,
}

impl FacingMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }

    /// The other camera.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }

    #[must_use]
    pub fn is_rear(self) -> bool {
        self == FacingMode::Environment
    }
}

impl fmt::Display for FacingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested range for one stream property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintRange {
    pub min: u32,
    pub ideal: u32,
    pub max: u32,
}

impl ConstraintRange {
    #[must_use]
    pub const fn new(min: u32, ideal: u32, max: u32) -> Self {
        Self { min, ideal, max }
    }

    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Stream constraints passed to the host when opening a camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureConstraints {
    pub facing: FacingMode,
    pub width: ConstraintRange,
    pub height: ConstraintRange,
    pub ideal_frame_rate: u32,
    pub max_frame_rate: u32,
    pub aspect_ratio: f32,
    /// Continuous focus, exposure and white balance (rear camera only).
    pub continuous_adjustments: bool,
    /// How long the stream may take to deliver its first metadata.
    pub start_timeout: Duration,
}

impl CaptureConstraints {
    #[must_use]
    pub fn for_facing(facing: FacingMode) -> Self {
        let (width, height) = match facing {
            FacingMode::Environment => (
                ConstraintRange::new(1280, 1920, 4096),
                ConstraintRange::new(720, 1080, 3072),
            ),
            FacingMode::User => (
                ConstraintRange::new(640, 1280, 1920),
                ConstraintRange::new(480, 720, 1080),
            ),
        };

        Self {
            facing,
            width,
            height,
            ideal_frame_rate: 30,
            max_frame_rate: 30,
            aspect_ratio: 16.0 / 9.0,
            continuous_adjustments: facing.is_rear(),
            start_timeout: Duration::from_secs(CAMERA_START_TIMEOUT_SECS),
        }
    }
}

/// Camera failures, classified from host error names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    PermissionDenied,
    NotFound,
    InUse,
    /// The device cannot satisfy the constraints; try the other camera.
    Overconstrained { suggested: FacingMode },
    Timeout,
    Unsupported,
    /// A capture was requested without a live stream.
    NotStreaming,
    Other(String),
}

impl CameraError {
    /// Maps a host error name (e.g. `NotAllowedError`) to a camera error.
    ///
    /// `facing` is the camera that failed to open.
    #[must_use]
    pub fn from_host_error(name: &str, message: &str, facing: FacingMode) -> Self {
        match name {
            "NotAllowedError" | "SecurityError" => CameraError::PermissionDenied,
            "NotFoundError" => CameraError::NotFound,
            "NotReadableError" => CameraError::InUse,
            "OverconstrainedError" => CameraError::Overconstrained {
                suggested: facing.toggled(),
            },
            "TimeoutError" => CameraError::Timeout,
            "NotSupportedError" => CameraError::Unsupported,
            _ => CameraError::Other(message.to_string()),
        }
    }

    /// Localization key for user-facing notifications.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            CameraError::PermissionDenied => "camera-error-permission-denied",
            CameraError::NotFound => "camera-error-not-found",
            CameraError::InUse => "camera-error-in-use",
            CameraError::Overconstrained {
                suggested: FacingMode::User,
            } => "camera-error-overconstrained-try-front",
            CameraError::Overconstrained {
                suggested: FacingMode::Environment,
            } => "camera-error-overconstrained-try-rear",
            CameraError::Timeout => "camera-error-timeout",
            CameraError::Unsupported => "camera-error-unsupported",
            CameraError::NotStreaming => "camera-error-not-streaming",
            CameraError::Other(_) => "camera-error-generic",
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied => write!(f, "camera permission denied"),
            CameraError::NotFound => write!(f, "no camera found"),
            CameraError::InUse => write!(f, "camera is in use by another application"),
            CameraError::Overconstrained { suggested } => write!(
                f,
                "camera does not support the requested settings, try the {} camera",
                suggested
            ),
            CameraError::Timeout => write!(f, "camera stream did not start in time"),
            CameraError::Unsupported => write!(f, "camera access is not supported"),
            CameraError::NotStreaming => write!(f, "camera is not streaming"),
            CameraError::Other(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CameraError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn rear_camera_requests_high_resolution() {
        let constraints = CaptureConstraints::for_facing(FacingMode::Environment);
        assert_eq!(constraints.width, ConstraintRange::new(1280, 1920, 4096));
        assert_eq!(constraints.height, ConstraintRange::new(720, 1080, 3072));
        assert!(constraints.continuous_adjustments);
    }

    #[test]
    fn front_camera_requests_hd() {
        let constraints = CaptureConstraints::for_facing(FacingMode::User);
        assert_eq!(constraints.width.ideal, 1280);
        assert_eq!(constraints.height.ideal, 720);
        assert!(constraints.width.contains(640));
        assert!(!constraints.width.contains(2560));
        assert!(!constraints.continuous_adjustments);
    }

    #[test]
    fn shared_constraints() {
        for facing in [FacingMode::User, FacingMode::Environment] {
            let constraints = CaptureConstraints::for_facing(facing);
            assert_eq!(constraints.ideal_frame_rate, 30);
            assert_eq!(constraints.max_frame_rate, 30);
            assert_abs_diff_eq!(constraints.aspect_ratio, 16.0 / 9.0);
            assert_eq!(constraints.start_timeout, Duration::from_secs(15));
        }
    }

    #[test]
    fn default_facing_is_rear() {
        assert_eq!(FacingMode::default(), FacingMode::Environment);
        assert_eq!(FacingMode::User.toggled(), FacingMode::Environment);
        assert_eq!(FacingMode::Environment.to_string(), "environment");
    }

    #[test]
    fn host_errors_are_classified() {
        let facing = FacingMode::Environment;
        assert_eq!(
            CameraError::from_host_error("NotAllowedError", "", facing),
            CameraError::PermissionDenied
        );
        assert_eq!(
            CameraError::from_host_error("NotFoundError", "", facing),
            CameraError::NotFound
        );
        assert_eq!(
            CameraError::from_host_error("NotReadableError", "", facing),
            CameraError::InUse
        );
        assert_eq!(
            CameraError::from_host_error("WeirdError", "device exploded", facing),
            CameraError::Other("device exploded".to_string())
        );
    }

    #[test]
    fn overconstrained_suggests_other_camera() {
        let err = CameraError::from_host_error("OverconstrainedError", "", FacingMode::Environment);
        assert_eq!(
            err,
            CameraError::Overconstrained {
                suggested: FacingMode::User
            }
        );
        assert_eq!(err.i18n_key(), "camera-error-overconstrained-try-front");
        assert!(err.to_string().contains("user"));
    }
}
