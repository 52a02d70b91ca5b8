//! Time-based refresh gating.

use std::time::{Duration, Instant};

/// Says whether a periodic refresh is due.
///
/// The first check is always due. After a due check, further checks are not
/// due until `interval` has elapsed.
#[derive(Debug, Clone)]
pub struct CheckDue {
    interval: Duration,
    last: Option<Instant>,
}

impl CheckDue {
    /// Default refresh interval for provider configuration (one hour).
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60 * 60);

    /// Creates a gate that fires at most once per `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns the configured interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` and restarts the interval if a refresh is due now.
    pub fn check(&mut self) -> bool {
        self.check_at(Instant::now())
    }

    /// Like [`check`](Self::check), evaluated at `now`.
    pub fn check_at(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Makes the next check due regardless of the interval.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for CheckDue {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
