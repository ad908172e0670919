//! Clock capability for reading the current time.
//!
//! Everything in this crate that needs "now" takes a [`Clock`] instead of
//! calling [`Utc::now`] directly, so tests can substitute a fixed or scripted
//! time for a single call site without touching global state. This keeps mood
//! computations reproducible even when tests run concurrently.

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// Implementations must be cheap to call and safe to share across threads.
pub trait Clock: Send + Sync {
    /// Returns the current time (real or fake).
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
///
/// Intended for tests, but harmless in production code paths that need a
/// pinned reference time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_returns_pinned_instant() {
        let t = Utc.with_ymd_and_hms(2023, 1, 1, 12, 0, 0).unwrap();
        let clock = FixedClock(t);
        assert_eq!(clock.now(), t);
        assert_eq!(clock.now(), t);
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
