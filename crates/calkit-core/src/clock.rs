//! Time source abstraction.
//!
//! Every place that needs "now" or "today" reads it through a [`Clock`], so
//! tests can pin the current date instead of depending on wall-clock time.

use std::fmt::Debug;
use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};

/// A source of the current local date and time.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Returns the current local calendar day.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// A clock shared between several state holders.
pub type SharedClock = Arc<dyn Clock>;

/// Clock backed by the operating system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    /// Creates a clock that always reports `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Creates a clock frozen at local midnight of the given day.
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN))
    }

    /// Wraps this clock for sharing.
    pub fn shared(self) -> SharedClock {
        Arc::new(self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

/// Returns a shared handle to the system clock.
pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}
