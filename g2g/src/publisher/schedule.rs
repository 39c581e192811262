//! Publish cadence bookkeeping

use std::time::Duration;
use tokio::time::Instant;

/// Tracks when the last pass completed and when the next one is due
#[derive(Debug, Clone, Copy)]
pub(crate) struct Schedule {
    last_publish: Instant,
    interval: Duration,
}

impl Schedule {
    /// Start a schedule with `now` as the baseline
    pub(crate) fn new(interval: Duration, now: Instant) -> Self {
        Self {
            last_publish: now,
            interval,
        }
    }

    /// Instant the next pass is due; may already be in the past
    pub(crate) fn next_deadline(&self) -> Instant {
        self.last_publish + self.interval
    }

    /// Remaining wait from `now`, or None when the pass is overdue
    pub(crate) fn delay_from(&self, now: Instant) -> Option<Duration> {
        self.next_deadline().checked_duration_since(now).filter(|d| !d.is_zero())
    }

    /// Record a completed pass
    pub(crate) fn mark_published(&mut self, now: Instant) {
        self.last_publish = now;
    }

    #[cfg(test)]
    pub(crate) fn last_publish(&self) -> Instant {
        self.last_publish
    }
}
