//! Completion record model.
//!
//! # Invariants
//! - A record keys on (habit, calendar day); time of day is discarded.
//! - At most one record exists per (habit, day) pair.

use crate::model::habit::HabitId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A recorded instance of a habit being done on a specific calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub habit_id: HabitId,
    pub day: NaiveDate,
}

impl CompletionRecord {
    pub fn new(habit_id: HabitId, day: NaiveDate) -> Self {
        Self { habit_id, day }
    }
}
