// SPDX-License-Identifier: MPL-2.0
//! Interaction events and drag timing records.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened during a drag-and-drop interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionEventKind {
    DragStart,
    DropSuccess,
    DropError {
        /// Human-readable failure description.
        message: String,
    },
}

/// A timestamped interaction event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InteractionEvent {
    #[serde(flatten)]
    pub kind: InteractionEventKind,
    pub timestamp: DateTime<Utc>,
}

impl InteractionEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn now(kind: InteractionEventKind) -> Self {
        Self::at(kind, Utc::now())
    }

    #[must_use]
    pub fn at(kind: InteractionEventKind, timestamp: DateTime<Utc>) -> Self {
        Self { kind, timestamp }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.kind, InteractionEventKind::DropError { .. })
    }
}

/// How a timed drag ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    Success,
    Error(String),
}

impl DragOutcome {
    pub(crate) fn into_event_kind(self) -> InteractionEventKind {
        match self {
            DragOutcome::Success => InteractionEventKind::DropSuccess,
            DragOutcome::Error(message) => InteractionEventKind::DropError { message },
        }
    }
}

/// Timing of one completed drag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DragMetric {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    #[serde(rename = "duration_ms", with = "duration_millis")]
    pub duration: Duration,
}

/// Serializes a `Duration` as fractional milliseconds.
pub(crate) mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = f64::deserialize(deserializer)?;
        Ok(Duration::try_from_secs_f64(millis / 1000.0).unwrap_or_default())
    }
}
