//! Wall-clock access for expiry evaluation.

use chrono::Utc;

use super::generalized_time::Instant;

/// A source of the current time.
///
/// Read once per evaluation. Tests and the `--now` override use
/// [`FixedClock`].
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::from_datetime(Utc::now())
    }
}

/// A clock pinned to a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(Instant);

impl FixedClock {
    pub const fn new(now: Instant) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
