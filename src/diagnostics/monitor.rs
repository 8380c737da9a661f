// SPDX-License-Identifier: MPL-2.0
//! Drag-and-drop interaction monitor.
//!
//! The monitor is an explicitly constructed value. Code that only needs to
//! report (upload handlers, retry logic) receives a cloneable
//! [`MonitorHandle`] and never touches the stored history.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::Serialize;
use tracing::{debug, warn};

use super::events::{DragMetric, DragOutcome, InteractionEvent, InteractionEventKind};
use super::CircularBuffer;
use crate::config::{DEFAULT_MONITOR_HISTORY, DEFAULT_SLOW_OPERATION_MS, RECENT_EVENTS_IN_STATS};

/// Channel capacity between handles and the monitor.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Monitor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Number of metrics and events kept.
    pub history_size: usize,
    /// Drags slower than this are logged as warnings.
    pub slow_threshold: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            history_size: DEFAULT_MONITOR_HISTORY,
            slow_threshold: Duration::from_millis(DEFAULT_SLOW_OPERATION_MS),
        }
    }
}

/// Started drag measurement. Pass it back to `finish_drag`.
#[derive(Debug, Clone, Copy)]
#[must_use = "a drag timer records nothing until it is finished"]
pub struct DragTimer {
    started: Instant,
    started_at: DateTime<Utc>,
}

impl DragTimer {
    fn start() -> Self {
        Self {
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    fn finish(self, slow_threshold: Duration) -> DragMetric {
        let duration = self.started.elapsed();
        if duration > slow_threshold {
            warn!(
                duration_ms = duration.as_secs_f64() * 1000.0,
                "drag operation took too long"
            );
        }
        DragMetric {
            started_at: self.started_at,
            ended_at: Utc::now(),
            duration,
        }
    }
}

#[derive(Debug, Clone)]
enum MonitorRecord {
    Event(InteractionEvent),
    Metric(DragMetric),
}

/// Handle for reporting interactions to an [`InteractionMonitor`].
///
/// Cheap to clone. Sends never block; records are dropped when the channel
/// is full or the monitor is gone.
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    record_tx: Sender<MonitorRecord>,
    slow_threshold: Duration,
}

impl MonitorHandle {
    /// Records a drag start and returns its timer.
    pub fn start_drag(&self) -> DragTimer {
        self.send(MonitorRecord::Event(InteractionEvent::now(
            InteractionEventKind::DragStart,
        )));
        DragTimer::start()
    }

    /// Records the end of a timed drag.
    pub fn finish_drag(&self, timer: DragTimer, outcome: DragOutcome) {
        let metric = timer.finish(self.slow_threshold);
        self.send(MonitorRecord::Metric(metric));
        self.send(MonitorRecord::Event(InteractionEvent::at(
            outcome.into_event_kind(),
            metric.ended_at,
        )));
    }

    /// Records a failure that has no associated drag timer.
    pub fn record_error(&self, message: impl Into<String>) {
        self.send(MonitorRecord::Event(InteractionEvent::now(
            InteractionEventKind::DropError {
                message: message.into(),
            },
        )));
    }

    fn send(&self, record: MonitorRecord) {
        if let Err(TrySendError::Full(_)) = self.record_tx.try_send(record) {
            debug!("interaction monitor channel full, record dropped");
        }
    }
}

/// Aggregate timing statistics.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PerformanceStats {
    pub total_operations: usize,
    pub average_duration_ms: f64,
    pub max_duration_ms: f64,
    pub min_duration_ms: f64,
    /// Newest events, oldest of them first.
    pub recent_events: Vec<InteractionEvent>,
}

#[derive(Serialize)]
struct MonitorReport<'a> {
    generated_at: DateTime<Utc>,
    stats: Option<PerformanceStats>,
    metrics: Vec<&'a DragMetric>,
    events: Vec<&'a InteractionEvent>,
}

/// Stores drag metrics and interaction events in bounded histories.
#[derive(Debug)]
pub struct InteractionMonitor {
    metrics: CircularBuffer<DragMetric>,
    events: CircularBuffer<InteractionEvent>,
    record_rx: Receiver<MonitorRecord>,
    record_tx: Sender<MonitorRecord>,
    config: MonitorConfig,
}

impl Default for InteractionMonitor {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}

impl InteractionMonitor {
    #[must_use]
    pub fn new(config: MonitorConfig) -> Self {
        let (record_tx, record_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);
        Self {
            metrics: CircularBuffer::new(config.history_size),
            events: CircularBuffer::new(config.history_size),
            record_rx,
            record_tx,
            config,
        }
    }

    #[must_use]
    pub fn handle(&self) -> MonitorHandle {
        MonitorHandle {
            record_tx: self.record_tx.clone(),
            slow_threshold: self.config.slow_threshold,
        }
    }

    #[must_use]
    pub fn config(&self) -> MonitorConfig {
        self.config
    }

    /// Moves records sent through handles into the histories.
    pub fn process_pending(&mut self) {
        while let Ok(record) = self.record_rx.try_recv() {
            self.store(record);
        }
    }

    /// Records a drag start directly, bypassing the channel.
    pub fn start_drag(&mut self) -> DragTimer {
        self.events
            .push(InteractionEvent::now(InteractionEventKind::DragStart));
        DragTimer::start()
    }

    /// Records the end of a timed drag directly, bypassing the channel.
    pub fn finish_drag(&mut self, timer: DragTimer, outcome: DragOutcome) -> DragMetric {
        let metric = timer.finish(self.config.slow_threshold);
        self.metrics.push(metric);
        self.events
            .push(InteractionEvent::at(outcome.into_event_kind(), metric.ended_at));
        metric
    }

    fn store(&mut self, record: MonitorRecord) {
        match record {
            MonitorRecord::Event(event) => self.events.push(event),
            MonitorRecord::Metric(metric) => self.metrics.push(metric),
        }
    }

    /// Timing statistics over the stored metrics, `None` when empty.
    ///
    /// Call [`Self::process_pending`] first to include handle reports.
    #[must_use]
    pub fn stats(&self) -> Option<PerformanceStats> {
        if self.metrics.is_empty() {
            return None;
        }

        let durations: Vec<f64> = self
            .metrics
            .iter()
            .map(|metric| metric.duration.as_secs_f64() * 1000.0)
            .collect();
        let total = durations.iter().sum::<f64>();
        #[allow(clippy::cast_precision_loss)]
        let average = total / durations.len() as f64;
        let max = durations.iter().copied().fold(f64::MIN, f64::max);
        let min = durations.iter().copied().fold(f64::MAX, f64::min);

        Some(PerformanceStats {
            total_operations: durations.len(),
            average_duration_ms: average,
            max_duration_ms: max,
            min_duration_ms: min,
            recent_events: self.events.recent(RECENT_EVENTS_IN_STATS).cloned().collect(),
        })
    }

    pub fn metrics(&self) -> impl Iterator<Item = &DragMetric> {
        self.metrics.iter()
    }

    pub fn events(&self) -> impl Iterator<Item = &InteractionEvent> {
        self.events.iter()
    }

    /// Clears both histories and discards pending handle reports.
    pub fn reset(&mut self) {
        while self.record_rx.try_recv().is_ok() {}
        self.metrics.clear();
        self.events.clear();
    }

    /// Serializes stats, metrics and events as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        let report = MonitorReport {
            generated_at: Utc::now(),
            stats: self.stats(),
            metrics: self.metrics.iter().collect(),
            events: self.events.iter().collect(),
        };
        serde_json::to_string_pretty(&report)
    }
}
