//! Habit entity.
//!
//! # Responsibility
//! - Define the canonical habit record and its attribute validation.
//!
//! # Invariants
//! - `id` is stable and never reused for another habit.
//! - `title` is non-empty and at most [`MAX_TITLE_CHARS`] characters.
//! - Category membership is a storage-level relation, not an embedded field.

use crate::model::schedule::Schedule;
use crate::model::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a habit.
pub type HabitId = Uuid;

/// Maximum habit title length in characters.
pub const MAX_TITLE_CHARS: usize = 38;

/// A user-defined recurring (or one-off) activity to track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Stable global id.
    pub id: HabitId,
    /// Display title, non-empty, at most [`MAX_TITLE_CHARS`] characters.
    pub title: String,
    /// Symbolic color identifier resolved by the UI layer.
    pub color_tag: String,
    /// Short emoji string shown on the habit card.
    pub emoji: String,
    /// Active weekdays; empty for one-off items.
    pub schedule: Schedule,
    /// Pinned habits are surfaced first by the UI layer.
    pub pinned: bool,
    /// Creation timestamp in epoch milliseconds, assigned by storage.
    pub created_at: i64,
}

impl Habit {
    /// Creates a habit with a generated stable id.
    ///
    /// `created_at` starts at zero and is assigned by the storage layer on
    /// insert.
    pub fn new(
        title: impl Into<String>,
        color_tag: impl Into<String>,
        emoji: impl Into<String>,
        schedule: Schedule,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            color_tag: color_tag.into(),
            emoji: emoji.into(),
            schedule,
            pinned: false,
            created_at: 0,
        }
    }

    /// Validates attribute invariants.
    ///
    /// # Errors
    /// - [`ValidationError::NilId`] for the nil UUID.
    /// - [`ValidationError::EmptyTitle`] for an empty/whitespace title.
    /// - [`ValidationError::TitleTooLong`] past [`MAX_TITLE_CHARS`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let chars = self.title.chars().count();
        if chars > MAX_TITLE_CHARS {
            return Err(ValidationError::TitleTooLong { chars });
        }
        Ok(())
    }

    /// Whether this is a recurring habit rather than a one-off item.
    pub fn is_recurring(&self) -> bool {
        !self.schedule.is_empty()
    }
}
