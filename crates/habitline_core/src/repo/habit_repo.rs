//! Habit repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the aggregate category/habit/completion store behind one
//!   trait.
//! - Enforce the date guards (duplicate day, future day) and referential
//!   invariants (no orphan habits or records).
//!
//! # Invariants
//! - Write paths validate entities before SQL mutations.
//! - Every mutation runs inside a single transaction.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::clock::Clock;
use crate::db::DbError;
use crate::model::category::{Category, CategoryGroup, CategoryId};
use crate::model::habit::{Habit, HabitId};
use crate::model::record::CompletionRecord;
use crate::model::schedule::Schedule;
use crate::model::{validate_category_name, ValidationError};
use crate::search;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const HABIT_COLUMNS: &str = "uuid, title, color_tag, emoji, schedule, pinned, created_at";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for habit/category/record persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    CategoryNotFound(CategoryId),
    HabitNotFound(HabitId),
    /// Category rename would collide with an existing name.
    DuplicateName { name: String },
    /// A completion record already exists for that (habit, day) pair.
    DuplicateRecord { habit_id: HabitId, day: NaiveDate },
    /// Attempt to complete a day later than the injected clock's today.
    FutureDate { day: NaiveDate, today: NaiveDate },
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::CategoryNotFound(id) => write!(f, "category not found: {id}"),
            Self::HabitNotFound(id) => write!(f, "habit not found: {id}"),
            Self::DuplicateName { name } => {
                write!(f, "category name already in use: {name}")
            }
            Self::DuplicateRecord { habit_id, day } => {
                write!(f, "habit {habit_id} is already completed on {day}")
            }
            Self::FutureDate { day, today } => {
                write!(f, "cannot mark {day} complete: later than today ({today})")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted habit data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Listing behavior for habits with an empty schedule (one-off items).
///
/// Product behavior differs between app revisions, so the policy is explicit
/// repository configuration rather than a hardcoded rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptySchedulePolicy {
    /// One-off items never appear in the daily listing.
    #[default]
    NeverDue,
    /// One-off items appear in every day's listing.
    AlwaysDue,
}

/// Aggregate store for categories, habits and completion records.
///
/// Mutating operations take `&mut self` and are atomic; queries take
/// `&self` and never modify state.
pub trait HabitRepository {
    /// Creates a category, or returns the existing id when the exact name
    /// is already in use (idempotent-by-name creation).
    fn create_category(&mut self, name: &str) -> RepoResult<CategoryId>;
    /// Renames a category. The new name must not collide with another
    /// category.
    fn rename_category(&mut self, id: CategoryId, new_name: &str) -> RepoResult<()>;
    /// Deletes a category together with its habits and their completion
    /// records.
    fn delete_category(&mut self, id: CategoryId) -> RepoResult<()>;
    /// All categories in insertion order.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;

    /// Adds a habit to an existing category.
    fn add_habit(&mut self, habit: &Habit, category_id: CategoryId) -> RepoResult<()>;
    /// Replaces the attributes of an existing habit (matched by id) and
    /// may move it to another category.
    fn update_habit(&mut self, habit: &Habit, category_id: CategoryId) -> RepoResult<()>;
    /// Deletes a habit and all of its completion records.
    fn delete_habit(&mut self, id: HabitId) -> RepoResult<()>;
    /// Flips the pinned flag.
    fn toggle_pin(&mut self, habit_id: HabitId) -> RepoResult<()>;
    /// Fetches one habit by id.
    fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>>;

    /// Habits due on `date`, grouped by category in insertion order, with
    /// an optional case-insensitive title filter. Categories with no
    /// matching habits are omitted.
    fn visible_habits(
        &self,
        date: NaiveDate,
        search_text: Option<&str>,
    ) -> RepoResult<Vec<CategoryGroup>>;

    /// Records a completion for (habit, day).
    ///
    /// # Errors
    /// - [`RepoError::HabitNotFound`] for an unknown habit.
    /// - [`RepoError::FutureDate`] when `day` is after the clock's today.
    /// - [`RepoError::DuplicateRecord`] when the day is already recorded.
    fn mark_complete(&mut self, habit_id: HabitId, day: NaiveDate) -> RepoResult<()>;
    /// Removes the completion record if present; absent records are not an
    /// error.
    fn unmark_complete(&mut self, habit_id: HabitId, day: NaiveDate) -> RepoResult<()>;
    /// Whether a completion record exists for (habit, day).
    fn is_completed(&self, habit_id: HabitId, day: NaiveDate) -> RepoResult<bool>;
    /// Total completions for one habit, regardless of date.
    fn completion_count(&self, habit_id: HabitId) -> RepoResult<u32>;
    /// All completion records for one habit, newest day first.
    fn records_for(&self, habit_id: HabitId) -> RepoResult<Vec<CompletionRecord>>;
    /// Total completions across all habits (statistics screen).
    fn total_completions(&self) -> RepoResult<u32>;
}

/// SQLite-backed habit repository.
pub struct SqliteHabitRepository<'conn> {
    conn: &'conn mut Connection,
    clock: Box<dyn Clock>,
    empty_schedule: EmptySchedulePolicy,
}

impl std::fmt::Debug for SqliteHabitRepository<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteHabitRepository")
            .field("conn", &self.conn)
            .field("empty_schedule", &self.empty_schedule)
            .finish_non_exhaustive()
    }
}

impl<'conn> SqliteHabitRepository<'conn> {
    /// Constructs a repository over a migrated connection using the system
    /// clock and the default one-off policy.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        Self::with_clock(conn, Box::new(crate::clock::SystemClock))
    }

    /// Constructs a repository with an injected clock, for deterministic
    /// future-date checks.
    pub fn with_clock(conn: &'conn mut Connection, clock: Box<dyn Clock>) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self {
            conn,
            clock,
            empty_schedule: EmptySchedulePolicy::default(),
        })
    }

    /// Overrides the listing policy for empty-schedule habits.
    pub fn with_empty_schedule_policy(mut self, policy: EmptySchedulePolicy) -> Self {
        self.empty_schedule = policy;
        self
    }

    fn due_under_policy(&self, schedule: &Schedule, date: NaiveDate) -> bool {
        if schedule.is_empty() {
            return self.empty_schedule == EmptySchedulePolicy::AlwaysDue;
        }
        schedule.is_due(date)
    }
}

impl HabitRepository for SqliteHabitRepository<'_> {
    fn create_category(&mut self, name: &str) -> RepoResult<CategoryId> {
        validate_category_name(name)?;

        let tx = self.conn.transaction()?;
        if let Some(existing) = category_id_by_name(&tx, name)? {
            return Ok(existing);
        }

        let id = Uuid::new_v4();
        tx.execute(
            "INSERT INTO categories (uuid, name) VALUES (?1, ?2);",
            params![id.to_string(), name],
        )?;
        tx.commit()?;

        Ok(id)
    }

    fn rename_category(&mut self, id: CategoryId, new_name: &str) -> RepoResult<()> {
        validate_category_name(new_name)?;

        let tx = self.conn.transaction()?;
        match category_id_by_name(&tx, new_name)? {
            Some(holder) if holder == id => return Ok(()),
            Some(_) => {
                return Err(RepoError::DuplicateName {
                    name: new_name.to_string(),
                });
            }
            None => {}
        }

        let changed = tx.execute(
            "UPDATE categories SET name = ?2 WHERE uuid = ?1;",
            params![id.to_string(), new_name],
        )?;
        if changed == 0 {
            return Err(RepoError::CategoryNotFound(id));
        }
        tx.commit()?;

        Ok(())
    }

    fn delete_category(&mut self, id: CategoryId) -> RepoResult<()> {
        let tx = self.conn.transaction()?;
        // Habits and their completion records go with the category via
        // ON DELETE CASCADE.
        let changed = tx.execute(
            "DELETE FROM categories WHERE uuid = ?1;",
            [id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::CategoryNotFound(id));
        }
        tx.commit()?;

        Ok(())
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, created_at
             FROM categories
             ORDER BY created_at ASC, rowid ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }

        Ok(categories)
    }

    fn add_habit(&mut self, habit: &Habit, category_id: CategoryId) -> RepoResult<()> {
        habit.validate()?;

        let tx = self.conn.transaction()?;
        if !category_exists(&tx, category_id)? {
            return Err(RepoError::CategoryNotFound(category_id));
        }

        tx.execute(
            "INSERT INTO habits (uuid, title, color_tag, emoji, schedule, category_uuid, pinned)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                habit.id.to_string(),
                habit.title.as_str(),
                habit.color_tag.as_str(),
                habit.emoji.as_str(),
                habit.schedule.to_storage(),
                category_id.to_string(),
                habit.pinned as i64,
            ],
        )?;
        tx.commit()?;

        Ok(())
    }

    fn update_habit(&mut self, habit: &Habit, category_id: CategoryId) -> RepoResult<()> {
        habit.validate()?;

        let tx = self.conn.transaction()?;
        if !category_exists(&tx, category_id)? {
            return Err(RepoError::CategoryNotFound(category_id));
        }

        // created_at keeps its original value so listing order is stable
        // across edits.
        let changed = tx.execute(
            "UPDATE habits
             SET
                title = ?2,
                color_tag = ?3,
                emoji = ?4,
                schedule = ?5,
                category_uuid = ?6,
                pinned = ?7
             WHERE uuid = ?1;",
            params![
                habit.id.to_string(),
                habit.title.as_str(),
                habit.color_tag.as_str(),
                habit.emoji.as_str(),
                habit.schedule.to_storage(),
                category_id.to_string(),
                habit.pinned as i64,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::HabitNotFound(habit.id));
        }
        tx.commit()?;

        Ok(())
    }

    fn delete_habit(&mut self, id: HabitId) -> RepoResult<()> {
        let tx = self.conn.transaction()?;
        // Completion records go with the habit via ON DELETE CASCADE.
        let changed = tx.execute("DELETE FROM habits WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::HabitNotFound(id));
        }
        tx.commit()?;

        Ok(())
    }

    fn toggle_pin(&mut self, habit_id: HabitId) -> RepoResult<()> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE habits SET pinned = 1 - pinned WHERE uuid = ?1;",
            [habit_id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::HabitNotFound(habit_id));
        }
        tx.commit()?;

        Ok(())
    }

    fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {HABIT_COLUMNS} FROM habits WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_habit_row(row)?));
        }

        Ok(None)
    }

    fn visible_habits(
        &self,
        date: NaiveDate,
        search_text: Option<&str>,
    ) -> RepoResult<Vec<CategoryGroup>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                h.uuid, h.title, h.color_tag, h.emoji, h.schedule, h.pinned, h.created_at,
                c.uuid AS category_uuid, c.name AS category_name,
                c.created_at AS category_created_at
             FROM habits h
             INNER JOIN categories c ON c.uuid = h.category_uuid
             ORDER BY c.created_at ASC, c.rowid ASC, h.created_at ASC, h.rowid ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut groups: Vec<CategoryGroup> = Vec::new();
        while let Some(row) = rows.next()? {
            let habit = parse_habit_row(row)?;
            if !self.due_under_policy(&habit.schedule, date) {
                continue;
            }

            let category_uuid: String = row.get("category_uuid")?;
            let category_id = parse_uuid(&category_uuid, "habits.category_uuid")?;
            match groups.last_mut() {
                Some(group) if group.category.id == category_id => group.habits.push(habit),
                _ => groups.push(CategoryGroup {
                    category: Category {
                        id: category_id,
                        name: row.get("category_name")?,
                        created_at: row.get("category_created_at")?,
                    },
                    habits: vec![habit],
                }),
            }
        }

        match search_text {
            Some(query) if !query.is_empty() => Ok(search::filter_groups(&groups, query)),
            _ => Ok(groups),
        }
    }

    fn mark_complete(&mut self, habit_id: HabitId, day: NaiveDate) -> RepoResult<()> {
        let today = self.clock.today();

        let tx = self.conn.transaction()?;
        if !habit_exists(&tx, habit_id)? {
            return Err(RepoError::HabitNotFound(habit_id));
        }
        if day > today {
            return Err(RepoError::FutureDate { day, today });
        }
        if record_exists(&tx, habit_id, day)? {
            return Err(RepoError::DuplicateRecord { habit_id, day });
        }

        tx.execute(
            "INSERT INTO completion_records (habit_uuid, day) VALUES (?1, ?2);",
            params![habit_id.to_string(), day.to_string()],
        )?;
        tx.commit()?;

        Ok(())
    }

    fn unmark_complete(&mut self, habit_id: HabitId, day: NaiveDate) -> RepoResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM completion_records WHERE habit_uuid = ?1 AND day = ?2;",
            params![habit_id.to_string(), day.to_string()],
        )?;
        tx.commit()?;

        Ok(())
    }

    fn is_completed(&self, habit_id: HabitId, day: NaiveDate) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM completion_records WHERE habit_uuid = ?1 AND day = ?2
             );",
            params![habit_id.to_string(), day.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn completion_count(&self, habit_id: HabitId) -> RepoResult<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM completion_records WHERE habit_uuid = ?1;",
            [habit_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn records_for(&self, habit_id: HabitId) -> RepoResult<Vec<CompletionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT day FROM completion_records WHERE habit_uuid = ?1 ORDER BY day DESC;",
        )?;

        let mut rows = stmt.query([habit_id.to_string()])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let day_text: String = row.get("day")?;
            let day = parse_day(&day_text)?;
            records.push(CompletionRecord::new(habit_id, day));
        }

        Ok(records)
    }

    fn total_completions(&self) -> RepoResult<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM completion_records;",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let habits_present: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'habits'
         );",
        [],
        |row| row.get(0),
    )?;
    if habits_present != 1 {
        return Err(RepoError::InvalidData(
            "connection is not migrated: habits table is missing".to_string(),
        ));
    }
    Ok(())
}

fn category_id_by_name(conn: &Connection, name: &str) -> RepoResult<Option<CategoryId>> {
    let uuid_text: Option<String> = conn
        .query_row(
            "SELECT uuid FROM categories WHERE name = ?1;",
            [name],
            |row| row.get(0),
        )
        .optional()?;

    match uuid_text {
        Some(text) => Ok(Some(parse_uuid(&text, "categories.uuid")?)),
        None => Ok(None),
    }
}

fn category_exists(conn: &Connection, id: CategoryId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE uuid = ?1);",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn habit_exists(conn: &Connection, id: HabitId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM habits WHERE uuid = ?1);",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn record_exists(conn: &Connection, habit_id: HabitId, day: NaiveDate) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM completion_records WHERE habit_uuid = ?1 AND day = ?2
         );",
        params![habit_id.to_string(), day.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_habit_row(row: &Row<'_>) -> RepoResult<Habit> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "habits.uuid")?;

    let schedule_text: String = row.get("schedule")?;
    let schedule = Schedule::from_storage(&schedule_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid schedule value `{schedule_text}` in habits.schedule"
        ))
    })?;

    let pinned = match row.get::<_, i64>("pinned")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid pinned value `{other}` in habits.pinned"
            )));
        }
    };

    let habit = Habit {
        id,
        title: row.get("title")?,
        color_tag: row.get("color_tag")?,
        emoji: row.get("emoji")?,
        schedule,
        pinned,
        created_at: row.get("created_at")?,
    };
    habit.validate()?;
    Ok(habit)
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let uuid_text: String = row.get("uuid")?;
    Ok(Category {
        id: parse_uuid(&uuid_text, "categories.uuid")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_uuid(text: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{text}` in {column}")))
}

fn parse_day(text: &str) -> RepoResult<NaiveDate> {
    text.parse().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid day value `{text}` in completion_records.day"
        ))
    })
}
