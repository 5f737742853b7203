//! Injected clock abstraction.
//!
//! # Responsibility
//! - Provide "now"/"today" to the future-date completion guard without
//!   reading the system clock from inside business logic.
//!
//! # Invariants
//! - Production code uses [`SystemClock`]; tests pin time with
//!   [`FixedClock`] so date guards are deterministic.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current time for date guards.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day, derived from [`Clock::now`].
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Pins the clock to midnight UTC of the given day.
    pub fn at_day(day: NaiveDate) -> Self {
        Self {
            now: day.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
