//! Time source
//!
//! Every scheduler entry point reads "now" exactly once through a [`Clock`],
//! so tests can pin it with [`FixedClock`].

use chrono::Utc;

pub trait Clock {
    /// Current time in epoch milliseconds
    fn now_ms(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock pinned to a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl FixedClock {
    pub fn advance_by(&mut self, ms: i64) {
        self.0 = self.0.saturating_add(ms);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}
