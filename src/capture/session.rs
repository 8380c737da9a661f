// SPDX-License-Identifier: MPL-2.0
//! Camera session state machine.
//!
//! ```text
//! Idle ──start──▶ Starting ──stream_ready──▶ Streaming ──capture──▶ Captured
//!                    │                           │                    │
//!                    └──failure / timeout──▶ Failed        retake ────┘
//! ```
//!
//! Transitions return a [`CameraCommand`] telling the host whether to open
//! or close the device stream.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::frame::{encode_capture, CapturedFrame, EncodedPhoto};
use super::{CameraError, CaptureConstraints, FacingMode};
use crate::error::Result;

/// Stream work requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CameraCommand {
    #[default]
    None,
    /// Open a stream with these constraints, replacing any open stream.
    Open(CaptureConstraints),
    /// Close the open stream.
    Close,
}

/// Current session state.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Starting { since: Instant },
    Streaming,
    Captured(EncodedPhoto),
    Failed(CameraError),
}

#[derive(Debug, Clone)]
pub struct CameraSession {
    facing: FacingMode,
    state: SessionState,
}

impl Default for CameraSession {
    fn default() -> Self {
        Self::new(FacingMode::default())
    }
}

impl CameraSession {
    #[must_use]
    pub fn new(facing: FacingMode) -> Self {
        Self {
            facing,
            state: SessionState::Idle,
        }
    }

    #[must_use]
    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn constraints(&self) -> CaptureConstraints {
        CaptureConstraints::for_facing(self.facing)
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        matches!(self.state, SessionState::Streaming)
    }

    /// Stream is opening or open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            SessionState::Starting { .. } | SessionState::Streaming
        )
    }

    #[must_use]
    pub fn error(&self) -> Option<&CameraError> {
        match &self.state {
            SessionState::Failed(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn photo(&self) -> Option<&EncodedPhoto> {
        match &self.state {
            SessionState::Captured(photo) => Some(photo),
            _ => None,
        }
    }

    /// Requests a stream for the current camera. Restarts an active one.
    pub fn start(&mut self, now: Instant) -> CameraCommand {
        debug!(facing = %self.facing, "camera starting");
        self.state = SessionState::Starting { since: now };
        CameraCommand::Open(self.constraints())
    }

    /// The host reports that the stream delivered its metadata.
    ///
    /// Returns false when no start is pending.
    pub fn stream_ready(&mut self) -> bool {
        if !matches!(self.state, SessionState::Starting { .. }) {
            return false;
        }
        debug!(facing = %self.facing, "camera streaming");
        self.state = SessionState::Streaming;
        true
    }

    /// The host reports a stream failure.
    pub fn stream_failed(&mut self, error: CameraError) -> CameraCommand {
        warn!(facing = %self.facing, %error, "camera failed");
        let command = if self.is_active() {
            CameraCommand::Close
        } else {
            CameraCommand::None
        };
        self.state = SessionState::Failed(error);
        command
    }

    /// Fails a start that has not produced a stream within the timeout.
    pub fn check_timeout(&mut self, now: Instant) -> CameraCommand {
        let SessionState::Starting { since } = self.state else {
            return CameraCommand::None;
        };
        if now.saturating_duration_since(since) < self.constraints().start_timeout {
            return CameraCommand::None;
        }
        self.stream_failed(CameraError::Timeout)
    }

    /// Encodes `frame` and stops the stream.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::NotStreaming`] outside the streaming state, or
    /// an image error if encoding fails (the stream stays open).
    pub fn capture(
        &mut self,
        frame: &CapturedFrame,
        taken_at: DateTime<Utc>,
    ) -> Result<CameraCommand> {
        if !self.is_streaming() {
            return Err(CameraError::NotStreaming.into());
        }
        let photo = encode_capture(frame, self.facing, taken_at)?;
        debug!(file = %photo.file_name, bytes = photo.size(), "photo captured");
        self.state = SessionState::Captured(photo);
        Ok(CameraCommand::Close)
    }

    /// Discards the captured photo and restarts the stream.
    pub fn retake(&mut self, now: Instant) -> CameraCommand {
        if !matches!(self.state, SessionState::Captured(_)) {
            return CameraCommand::None;
        }
        self.start(now)
    }

    /// Switches to the other camera, restarting the stream when active.
    pub fn switch_camera(&mut self, now: Instant) -> CameraCommand {
        self.facing = self.facing.toggled();
        if self.is_active() {
            self.start(now)
        } else {
            CameraCommand::None
        }
    }

    /// Hands over the captured photo and returns to idle.
    pub fn confirm(&mut self) -> Option<EncodedPhoto> {
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Captured(photo) => Some(photo),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Stops the session, dropping any captured photo.
    pub fn stop(&mut self) -> CameraCommand {
        let command = if self.is_active() {
            CameraCommand::Close
        } else {
            CameraCommand::None
        };
        self.state = SessionState::Idle;
        command
    }
}
