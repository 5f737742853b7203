//! Category entity and grouped read model.

use crate::model::habit::Habit;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a category.
pub type CategoryId = Uuid;

/// Named grouping of habits.
///
/// Names are unique among categories (case-sensitive exact match); the
/// repository enforces this by reusing the existing id on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable global id.
    pub id: CategoryId,
    /// Unique display name.
    pub name: String,
    /// Creation timestamp in epoch milliseconds, assigned by storage.
    pub created_at: i64,
}

/// One category together with the habits visible under the active query.
///
/// Read model returned by the day listing; categories with no matching
/// habits are omitted from the grouping entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub habits: Vec<Habit>,
}
