// SPDX-License-Identifier: MPL-2.0
//! Retry bookkeeping with linear backoff.
//!
//! Failures are counted per `context:message` key. Each failure below the
//! cap schedules a retry after `base_delay * attempt`; past the cap the
//! failure is terminal until [`RetryTracker::reset`].
//!
//! The tracker never sleeps or spawns. Scheduling is delegated to a
//! [`RetryScheduler`], so hosts can use a tokio timer, an Iced task or a
//! plain closure in tests.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use tracing::{error, info};

use crate::config::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BASE_DELAY_MS};
use crate::diagnostics::MonitorHandle;

/// Backoff parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    base_delay: Duration,
    max_retries: u32,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(base_delay: Duration, max_retries: u32) -> Self {
        Self {
            base_delay,
            max_retries,
        }
    }

    #[must_use]
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before retry number `attempt` (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
            DEFAULT_MAX_RETRIES,
        )
    }
}

/// What to do after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after `delay`. `attempt` starts at 1.
    Retry { attempt: u32, delay: Duration },
    /// The retry budget for this failure is spent.
    Exhausted,
}

/// Runs a retry after a delay.
pub trait RetryScheduler {
    fn schedule(&mut self, delay: Duration, attempt: u32);
}

impl<F> RetryScheduler for F
where
    F: FnMut(Duration, u32),
{
    fn schedule(&mut self, delay: Duration, attempt: u32) {
        self(delay, attempt);
    }
}

/// Failure count for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureCount {
    pub key: String,
    pub count: u32,
}

/// Counts failures and decides whether to retry them.
#[derive(Debug, Default)]
pub struct RetryTracker {
    policy: RetryPolicy,
    counts: HashMap<String, u32>,
    monitor: Option<MonitorHandle>,
}

impl RetryTracker {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            counts: HashMap::new(),
            monitor: None,
        }
    }

    /// Reports every handled failure to `monitor`.
    #[must_use]
    pub fn with_monitor(mut self, monitor: MonitorHandle) -> Self {
        self.monitor = Some(monitor);
        self
    }

    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Counts a failure and returns the retry decision for it.
    pub fn record_failure(&mut self, context: &str, message: &str) -> RetryDecision {
        let key = failure_key(context, message);
        let count = self.counts.entry(key).or_insert(0);
        let previous = *count;
        *count = previous.saturating_add(1);

        if previous < self.policy.max_retries {
            let attempt = previous + 1;
            RetryDecision::Retry {
                attempt,
                delay: self.policy.delay_for(attempt),
            }
        } else {
            RetryDecision::Exhausted
        }
    }

    /// Records a failure, reports it to the monitor and schedules a retry
    /// when the budget allows.
    pub fn handle_failure<E, S>(
        &mut self,
        error: &E,
        context: &str,
        scheduler: Option<&mut S>,
    ) -> RetryDecision
    where
        E: fmt::Display + ?Sized,
        S: RetryScheduler + ?Sized,
    {
        let message = error.to_string();
        error!(context, error = %message, "interaction failed");

        if let Some(monitor) = &self.monitor {
            monitor.record_error(message.clone());
        }

        let decision = self.record_failure(context, &message);
        match decision {
            RetryDecision::Retry { attempt, delay } => {
                if let Some(scheduler) = scheduler {
                    info!(
                        context,
                        attempt,
                        max_retries = self.policy.max_retries,
                        "scheduling retry"
                    );
                    scheduler.schedule(delay, attempt);
                }
            }
            RetryDecision::Exhausted => {
                error!(key = %failure_key(context, &message), "retry limit reached, giving up");
            }
        }
        decision
    }

    /// Failure count for a key, zero if never seen.
    #[must_use]
    pub fn failures(&self, context: &str, message: &str) -> u32 {
        self.counts
            .get(&failure_key(context, message))
            .copied()
            .unwrap_or(0)
    }

    /// All failure counts, sorted by key.
    #[must_use]
    pub fn stats(&self) -> Vec<FailureCount> {
        let mut stats: Vec<_> = self
            .counts
            .iter()
            .map(|(key, count)| FailureCount {
                key: key.clone(),
                count: *count,
            })
            .collect();
        stats.sort_by(|a, b| a.key.cmp(&b.key));
        stats
    }

    pub fn reset(&mut self) {
        self.counts.clear();
    }
}

fn failure_key(context: &str, message: &str) -> String {
    format!("{context}:{message}")
}
