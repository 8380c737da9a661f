// SPDX-License-Identifier: MPL-2.0
//! Autoplay sweep timing.
//!
//! The split oscillates linearly 0 → 100 → 0 with a triangular waveform.
//! Each autoplay run gets a fresh [`AutoplayTicket`]; ticks scheduled for an
//! earlier run carry an old ticket and are discarded.

use std::time::{Duration, Instant};

use crate::domain::ui::newtypes::{AutoplayDuration, SliderPercent};

/// Split position `elapsed` into an autoplay run.
///
/// The phase restarts every `2 * duration`, rising during the first half
/// and falling during the second.
#[must_use]
pub fn triangle_wave(elapsed: Duration, duration: AutoplayDuration) -> SliderPercent {
    let half = f64::from(duration.millis());
    let cycle = half * 2.0;
    let phase = (elapsed.as_secs_f64() * 1000.0).rem_euclid(cycle) / half;
    let percent = if phase <= 1.0 {
        phase * 100.0
    } else {
        (2.0 - phase) * 100.0
    };
    #[allow(clippy::cast_possible_truncation)]
    let percent = percent as f32;
    SliderPercent::new(percent)
}

/// Identifies one autoplay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutoplayTicket {
    generation: u64,
}

impl AutoplayTicket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Active autoplay run.
#[derive(Debug, Clone, Copy)]
struct AutoplayRun {
    ticket: AutoplayTicket,
    started_at: Instant,
}

/// Issues tickets and evaluates ticks for the current run.
#[derive(Debug, Clone, Default)]
pub struct AutoplayClock {
    next_generation: u64,
    run: Option<AutoplayRun>,
}

impl AutoplayClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new run at `now`, invalidating any previous ticket.
    pub fn start(&mut self, now: Instant) -> AutoplayTicket {
        self.next_generation = self.next_generation.wrapping_add(1);
        let ticket = AutoplayTicket {
            generation: self.next_generation,
        };
        self.run = Some(AutoplayRun {
            ticket,
            started_at: now,
        });
        ticket
    }

    /// Stops the current run. Returns true if one was active.
    pub fn stop(&mut self) -> bool {
        self.run.take().is_some()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Ticket of the current run, if any.
    #[must_use]
    pub fn ticket(&self) -> Option<AutoplayTicket> {
        self.run.map(|run| run.ticket)
    }

    /// Time since the current run started, or `None` if `ticket` is stale.
    #[must_use]
    pub fn elapsed(&self, ticket: AutoplayTicket, now: Instant) -> Option<Duration> {
        let run = self.run?;
        if run.ticket != ticket {
            return None;
        }
        Some(now.saturating_duration_since(run.started_at))
    }
}
