// SPDX-License-Identifier: MPL-2.0
//! Autoplay timer driven by a tokio interval.
//!
//! The driver owns the only live timer of a slider. Ticks are sent over a
//! channel tagged with the run's [`AutoplayTicket`]; the state machine drops
//! any tick whose ticket no longer matches, so ticks already queued when the
//! timer is cancelled never move the split.

use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use super::autoplay::AutoplayTicket;
use super::slider::Effect;
use crate::config::AUTOPLAY_TICK_MS;

/// Interval between autoplay ticks (~60 per second).
pub const AUTOPLAY_TICK_INTERVAL: Duration = Duration::from_millis(AUTOPLAY_TICK_MS);

/// One timer firing for an autoplay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayTick {
    pub ticket: AutoplayTicket,
    pub at: Instant,
}

/// Runs the autoplay interval task for one slider.
///
/// Must be used from within a tokio runtime. Dropping the driver cancels
/// the task.
#[derive(Debug)]
pub struct AutoplayDriver {
    sender: UnboundedSender<AutoplayTick>,
    interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl AutoplayDriver {
    /// Creates a driver delivering ticks to `sender` at the default cadence.
    #[must_use]
    pub fn new(sender: UnboundedSender<AutoplayTick>) -> Self {
        Self::with_interval(sender, AUTOPLAY_TICK_INTERVAL)
    }

    #[must_use]
    pub fn with_interval(sender: UnboundedSender<AutoplayTick>, interval: Duration) -> Self {
        Self {
            sender,
            interval,
            task: None,
        }
    }

    /// Performs the timer work requested by a state machine transition.
    pub fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::StartAutoplay(ticket) => self.start(ticket),
            Effect::StopAutoplay => self.stop(),
        }
    }

    /// Starts ticking for `ticket`, cancelling any previous run first.
    pub fn start(&mut self, ticket: AutoplayTicket) {
        self.stop();

        let sender = self.sender.clone();
        let period = self.interval;
        debug!(generation = ticket.generation(), "autoplay timer started");
        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let tick = AutoplayTick {
                    ticket,
                    at: Instant::now(),
                };
                if sender.send(tick).is_err() {
                    // Receiver gone: the slider was torn down
                    break;
                }
            }
        }));
    }

    /// Cancels the running timer, if any.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("autoplay timer stopped");
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for AutoplayDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
