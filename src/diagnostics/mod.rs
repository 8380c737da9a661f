// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for drag-and-drop interactions.
//!
//! Drag timings and interaction events are kept in memory-bounded
//! histories and can be summarized or exported as JSON.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Ring buffer with fixed capacity
//! - [`InteractionMonitor`]: Owns the histories and computes statistics
//! - [`MonitorHandle`]: Cloneable, non-blocking reporter for other components

mod buffer;
mod events;
mod monitor;

pub use buffer::CircularBuffer;
pub use events::{DragMetric, DragOutcome, InteractionEvent, InteractionEventKind};
pub use monitor::{DragTimer, InteractionMonitor, MonitorConfig, MonitorHandle, PerformanceStats};
