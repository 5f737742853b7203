//! Core domain logic for Habitline, a weekday-scheduled habit tracker.
//! This crate is the single source of truth for business invariants:
//! schedules, categories, completion records and the daily visibility rules.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryGroup, CategoryId};
pub use model::habit::{Habit, HabitId, MAX_TITLE_CHARS};
pub use model::record::CompletionRecord;
pub use model::schedule::{Schedule, Weekday};
pub use model::ValidationError;
pub use repo::habit_repo::{
    EmptySchedulePolicy, HabitRepository, RepoError, RepoResult, SqliteHabitRepository,
};
pub use search::filter_groups;
pub use service::notify::{ChangeKind, ChangeNotifier};
pub use service::tracker_service::TrackerService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
