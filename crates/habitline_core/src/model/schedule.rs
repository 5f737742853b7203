//! Weekday schedule model.
//!
//! # Responsibility
//! - Answer "is this habit due on date D" from a set of active weekdays.
//! - Render human-readable schedule summaries.
//! - Encode/decode the compact storage form used by the SQLite layer.
//!
//! # Invariants
//! - Weekday numbering is Mon=1..Sun=7 everywhere, including storage.
//! - The set never holds duplicates; rendering order is always Mon -> Sun.
//! - An empty schedule is never due on any date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Summary label for a schedule covering all seven days.
pub const EVERY_DAY_LABEL: &str = "Every day";
/// Summary placeholder for a schedule with no active days.
pub const NO_SCHEDULE_LABEL: &str = "No schedule";

/// Day of week with canonical Monday-first numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in canonical Mon -> Sun order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Canonical day number, Mon=1..Sun=7.
    pub fn number(self) -> u8 {
        match self {
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
            Self::Sunday => 7,
        }
    }

    /// Parses a canonical day number back into a weekday.
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Monday),
            2 => Some(Self::Tuesday),
            3 => Some(Self::Wednesday),
            4 => Some(Self::Thursday),
            5 => Some(Self::Friday),
            6 => Some(Self::Saturday),
            7 => Some(Self::Sunday),
            _ => None,
        }
    }

    /// Weekday of a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        // number_from_monday is 1..7, so the unwrap below cannot fail.
        Self::from_number(date.weekday().number_from_monday() as u8)
            .unwrap_or(Self::Monday)
    }

    /// Full display label.
    pub fn title(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Abbreviated display label used in schedule summaries.
    pub fn short_title(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        }
    }
}

/// Set of active weekdays for a habit.
///
/// The empty set models a one-off item with no recurrence; such a habit is
/// never due under the weekly filter (listing policy for one-offs is decided
/// at the repository level).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    days: BTreeSet<Weekday>,
}

impl Schedule {
    /// Empty schedule (a non-repeating item).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Schedule covering all seven days.
    pub fn every_day() -> Self {
        Self::from_days(Weekday::ALL)
    }

    /// Builds a schedule from any iterator of weekdays; duplicates collapse.
    pub fn from_days(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    /// Active weekdays in canonical Mon -> Sun order.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.days.iter().copied()
    }

    /// Returns whether the habit is due on `date`.
    ///
    /// True iff the date's weekday is a member of the set. The empty set is
    /// due on no date.
    pub fn is_due(&self, date: NaiveDate) -> bool {
        self.days.contains(&Weekday::from_date(date))
    }

    /// Human-readable summary of the schedule.
    ///
    /// Empty set -> placeholder, full set -> "Every day", otherwise an
    /// ordered comma-joined list of short labels ("Mon, Wed, Fri").
    pub fn summary(&self) -> String {
        if self.days.is_empty() {
            return NO_SCHEDULE_LABEL.to_string();
        }
        if self.days.len() == Weekday::ALL.len() {
            return EVERY_DAY_LABEL.to_string();
        }
        let mut out = String::new();
        for (i, day) in self.days.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(day.short_title());
        }
        out
    }

    /// Compact storage encoding: comma-joined day numbers ("1,3,5").
    ///
    /// The empty schedule encodes to the empty string.
    pub fn to_storage(&self) -> String {
        let mut out = String::new();
        for (i, day) in self.days.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{}", day.number());
        }
        out
    }

    /// Decodes the storage form produced by [`Schedule::to_storage`].
    ///
    /// Returns `None` when any component is not a valid day number.
    pub fn from_storage(value: &str) -> Option<Self> {
        if value.is_empty() {
            return Some(Self::empty());
        }
        let mut days = BTreeSet::new();
        for part in value.split(',') {
            let number: u8 = part.parse().ok()?;
            days.insert(Weekday::from_number(number)?);
        }
        Some(Self { days })
    }
}

impl FromIterator<Weekday> for Schedule {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        Self::from_days(iter)
    }
}
