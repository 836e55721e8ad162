//! Time source abstraction.
//!
//! Expiry is a point-in-time predicate, so every service that evaluates it
//! takes its notion of "now" from a [`Clock`] rather than the system clock
//! directly. Tests substitute a controllable clock to exercise TTL behavior
//! deterministically.

use chrono::{DateTime, Utc};

/// Provides the current instant to expiry checks and record creation.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
