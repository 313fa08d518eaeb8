//! Follow-mode polling schedule.
//!
//! The poller is a plain state machine driven by the UI tick: it never sleeps
//! or spawns anything itself. A cycle is chained after the previous poll's
//! response, and consecutive failures stretch the delay so an unreachable
//! server is not queried at full rate forever.

use std::time::{Duration, Instant};

/// Default delay between follow-mode refreshes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Default upper bound for the failure back-off.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Back-off exponent cap (2^6 = 64 intervals).
const MAX_BACKOFF_SHIFT: u32 = 6;

/// Polling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_backoff: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }
}

/// Schedules stat refreshes while follow mode is enabled.
#[derive(Debug)]
pub struct Poller {
    config: PollConfig,
    next_due: Option<Instant>,
    in_flight: bool,
    failures: u32,
}

impl Poller {
    pub fn new(config: PollConfig) -> Self {
        Self {
            config,
            next_due: None,
            in_flight: false,
            failures: 0,
        }
    }

    /// Schedules the first cycle one interval from `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.config.interval);
    }

    /// Returns `true` when a stat refresh should be issued now.
    ///
    /// With follow disabled a due cycle is skipped and rescheduled, so the
    /// loop keeps checking until follow is turned back on.
    pub fn poll(&mut self, now: Instant, follow: bool) -> bool {
        if self.in_flight {
            return false;
        }
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        if follow {
            self.in_flight = true;
            self.next_due = None;
            true
        } else {
            self.next_due = Some(now + self.config.interval);
            false
        }
    }

    /// Records the outcome of the poll issued by the last `poll()` call and
    /// chains the next cycle.
    pub fn complete(&mut self, now: Instant, ok: bool) {
        if !self.in_flight {
            return;
        }
        self.in_flight = false;
        if ok {
            self.failures = 0;
        } else {
            self.failures = self.failures.saturating_add(1);
        }
        self.next_due = Some(now + self.current_delay());
    }

    /// Delay before the next cycle given the current failure streak.
    pub fn current_delay(&self) -> Duration {
        if self.failures == 0 {
            return self.config.interval;
        }
        let factor = 1u32 << self.failures.min(MAX_BACKOFF_SHIFT);
        self.config
            .interval
            .saturating_mul(factor)
            .min(self.config.max_backoff.max(self.config.interval))
    }

    /// `true` once `start` has been called.
    pub fn is_started(&self) -> bool {
        self.next_due.is_some() || self.in_flight
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }
}
