//! Domain model for habits, categories, schedules and completion records.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Own input validation for entity attributes.
//!
//! # Invariants
//! - Every entity is identified by a stable non-nil UUID.
//! - A schedule never holds duplicate weekdays.
//! - A completion record always refers to a whole calendar day.

pub mod category;
pub mod habit;
pub mod record;
pub mod schedule;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failures for entity attributes.
///
/// Raised before any persistence is attempted; a validation failure never
/// leaves partial state behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Entity id is the nil UUID.
    NilId,
    /// Habit title is empty or whitespace-only.
    EmptyTitle,
    /// Habit title exceeds [`habit::MAX_TITLE_CHARS`] characters.
    TitleTooLong { chars: usize },
    /// Category name is empty or whitespace-only.
    EmptyCategoryName,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "entity id must not be the nil uuid"),
            Self::EmptyTitle => write!(f, "habit title must not be empty"),
            Self::TitleTooLong { chars } => write!(
                f,
                "habit title is {chars} characters, maximum is {}",
                habit::MAX_TITLE_CHARS
            ),
            Self::EmptyCategoryName => write!(f, "category name must not be empty"),
        }
    }
}

impl Error for ValidationError {}

/// Validates a category name shared by create and rename paths.
pub(crate) fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyCategoryName);
    }
    Ok(())
}
