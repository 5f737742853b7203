//! Habit tracking use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for UI callers over the repository.
//! - Emit one change notification per successful mutation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/transaction contracts.
//! - Service layer remains storage-agnostic.

use crate::model::category::{Category, CategoryGroup, CategoryId};
use crate::model::habit::{Habit, HabitId};
use crate::model::record::CompletionRecord;
use crate::repo::habit_repo::{HabitRepository, RepoResult};
use crate::service::notify::{ChangeKind, ChangeNotifier};
use chrono::NaiveDate;
use log::debug;

/// Use-case facade over a habit repository.
///
/// Every successful mutation emits exactly one [`ChangeKind`] through the
/// owned [`ChangeNotifier`]; failed operations emit nothing.
pub struct TrackerService<R: HabitRepository> {
    repo: R,
    notifier: ChangeNotifier,
}

impl<R: HabitRepository> TrackerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Registers a callback invoked after every successful mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(ChangeKind) + Send + 'static) {
        self.notifier.subscribe(subscriber);
    }

    /// Creates a category by name, reusing the existing id when the name is
    /// already taken.
    pub fn create_category(&mut self, name: &str) -> RepoResult<CategoryId> {
        let id = self.repo.create_category(name)?;
        debug!("event=category_create module=service status=ok id={id}");
        self.notifier.notify(ChangeKind::Categories);
        Ok(id)
    }

    pub fn rename_category(&mut self, id: CategoryId, new_name: &str) -> RepoResult<()> {
        self.repo.rename_category(id, new_name)?;
        debug!("event=category_rename module=service status=ok id={id}");
        self.notifier.notify(ChangeKind::Categories);
        Ok(())
    }

    /// Deletes a category together with its habits and completions.
    pub fn delete_category(&mut self, id: CategoryId) -> RepoResult<()> {
        self.repo.delete_category(id)?;
        debug!("event=category_delete module=service status=ok id={id}");
        self.notifier.notify(ChangeKind::Categories);
        Ok(())
    }

    pub fn list_categories(&self) -> RepoResult<Vec<Category>> {
        self.repo.list_categories()
    }

    pub fn add_habit(&mut self, habit: &Habit, category_id: CategoryId) -> RepoResult<()> {
        self.repo.add_habit(habit, category_id)?;
        debug!(
            "event=habit_add module=service status=ok id={} category={category_id}",
            habit.id
        );
        self.notifier.notify(ChangeKind::Habits);
        Ok(())
    }

    pub fn update_habit(&mut self, habit: &Habit, category_id: CategoryId) -> RepoResult<()> {
        self.repo.update_habit(habit, category_id)?;
        debug!("event=habit_update module=service status=ok id={}", habit.id);
        self.notifier.notify(ChangeKind::Habits);
        Ok(())
    }

    /// Deletes a habit and all of its completion records.
    pub fn delete_habit(&mut self, id: HabitId) -> RepoResult<()> {
        self.repo.delete_habit(id)?;
        debug!("event=habit_delete module=service status=ok id={id}");
        self.notifier.notify(ChangeKind::Habits);
        Ok(())
    }

    pub fn toggle_pin(&mut self, habit_id: HabitId) -> RepoResult<()> {
        self.repo.toggle_pin(habit_id)?;
        debug!("event=habit_toggle_pin module=service status=ok id={habit_id}");
        self.notifier.notify(ChangeKind::Habits);
        Ok(())
    }

    pub fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>> {
        self.repo.get_habit(id)
    }

    /// Habits due on `date`, grouped by category, optionally filtered by a
    /// case-insensitive title search.
    pub fn visible_habits(
        &self,
        date: NaiveDate,
        search_text: Option<&str>,
    ) -> RepoResult<Vec<CategoryGroup>> {
        self.repo.visible_habits(date, search_text)
    }

    pub fn mark_complete(&mut self, habit_id: HabitId, day: NaiveDate) -> RepoResult<()> {
        self.repo.mark_complete(habit_id, day)?;
        debug!("event=record_add module=service status=ok habit={habit_id} day={day}");
        self.notifier.notify(ChangeKind::Records);
        Ok(())
    }

    pub fn unmark_complete(&mut self, habit_id: HabitId, day: NaiveDate) -> RepoResult<()> {
        self.repo.unmark_complete(habit_id, day)?;
        debug!("event=record_remove module=service status=ok habit={habit_id} day={day}");
        self.notifier.notify(ChangeKind::Records);
        Ok(())
    }

    pub fn is_completed(&self, habit_id: HabitId, day: NaiveDate) -> RepoResult<bool> {
        self.repo.is_completed(habit_id, day)
    }

    pub fn completion_count(&self, habit_id: HabitId) -> RepoResult<u32> {
        self.repo.completion_count(habit_id)
    }

    pub fn records_for(&self, habit_id: HabitId) -> RepoResult<Vec<CompletionRecord>> {
        self.repo.records_for(habit_id)
    }

    /// Total completions across all habits (statistics screen).
    pub fn total_completions(&self) -> RepoResult<u32> {
        self.repo.total_completions()
    }
}
