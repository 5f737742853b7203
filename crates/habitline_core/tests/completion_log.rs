use chrono::NaiveDate;
use habitline_core::db::open_db_in_memory;
use habitline_core::{
    FixedClock, Habit, HabitRepository, RepoError, Schedule, SqliteHabitRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn repo(conn: &mut Connection) -> SqliteHabitRepository<'_> {
    SqliteHabitRepository::with_clock(conn, Box::new(FixedClock::at_day(today()))).unwrap()
}

fn seeded_habit(repo: &mut SqliteHabitRepository<'_>) -> Habit {
    let health = repo.create_category("Health").unwrap();
    let habit = Habit::new("Run", "red", "🏃", Schedule::every_day());
    repo.add_habit(&habit, health).unwrap();
    habit
}

#[test]
fn mark_complete_records_the_day() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = repo(&mut conn);
    let habit = seeded_habit(&mut repo);

    let day = date(2024, 1, 1);
    repo.mark_complete(habit.id, day).unwrap();

    assert!(repo.is_completed(habit.id, day).unwrap());
    assert!(!repo.is_completed(habit.id, date(2024, 1, 2)).unwrap());
    assert_eq!(repo.completion_count(habit.id).unwrap(), 1);
}

#[test]
fn duplicate_mark_fails_and_leaves_one_record() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = repo(&mut conn);
    let habit = seeded_habit(&mut repo);

    let day = date(2024, 1, 1);
    repo.mark_complete(habit.id, day).unwrap();

    let err = repo.mark_complete(habit.id, day).unwrap_err();
    assert!(matches!(
        err,
        RepoError::DuplicateRecord { habit_id, day: d } if habit_id == habit.id && d == day
    ));
    assert_eq!(repo.completion_count(habit.id).unwrap(), 1);
}

#[test]
fn marking_a_future_day_fails_without_creating_a_record() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = repo(&mut conn);
    let habit = seeded_habit(&mut repo);

    let future = date(2024, 1, 11);
    let err = repo.mark_complete(habit.id, future).unwrap_err();
    assert!(matches!(
        err,
        RepoError::FutureDate { day, today: t } if day == future && t == today()
    ));
    assert_eq!(repo.completion_count(habit.id).unwrap(), 0);
    assert!(!repo.is_completed(habit.id, future).unwrap());
}

#[test]
fn marking_today_itself_is_allowed() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = repo(&mut conn);
    let habit = seeded_habit(&mut repo);

    repo.mark_complete(habit.id, today()).unwrap();
    assert!(repo.is_completed(habit.id, today()).unwrap());
}

#[test]
fn mark_complete_rejects_unknown_habit() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = repo(&mut conn);

    let missing = Uuid::new_v4();
    let err = repo.mark_complete(missing, date(2024, 1, 1)).unwrap_err();
    assert!(matches!(err, RepoError::HabitNotFound(id) if id == missing));

    // Unknown habit wins over the future-date guard.
    let err = repo.mark_complete(missing, date(2024, 1, 11)).unwrap_err();
    assert!(matches!(err, RepoError::HabitNotFound(id) if id == missing));
}

#[test]
fn unmark_complete_is_idempotent() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = repo(&mut conn);
    let habit = seeded_habit(&mut repo);

    let day = date(2024, 1, 1);
    repo.mark_complete(habit.id, day).unwrap();
    repo.unmark_complete(habit.id, day).unwrap();
    assert!(!repo.is_completed(habit.id, day).unwrap());

    // Removing again, or removing a day that never existed, is not an error.
    repo.unmark_complete(habit.id, day).unwrap();
    repo.unmark_complete(habit.id, date(2023, 12, 31)).unwrap();
    repo.unmark_complete(Uuid::new_v4(), day).unwrap();
    assert_eq!(repo.completion_count(habit.id).unwrap(), 0);
}

#[test]
fn records_for_returns_newest_day_first() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = repo(&mut conn);
    let habit = seeded_habit(&mut repo);

    repo.mark_complete(habit.id, date(2024, 1, 3)).unwrap();
    repo.mark_complete(habit.id, date(2024, 1, 9)).unwrap();
    repo.mark_complete(habit.id, date(2024, 1, 5)).unwrap();

    let days: Vec<_> = repo
        .records_for(habit.id)
        .unwrap()
        .into_iter()
        .map(|record| record.day)
        .collect();
    assert_eq!(days, [date(2024, 1, 9), date(2024, 1, 5), date(2024, 1, 3)]);
}

#[test]
fn total_completions_spans_all_habits() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = repo(&mut conn);

    let health = repo.create_category("Health").unwrap();
    let run = Habit::new("Run", "red", "🏃", Schedule::every_day());
    let water = Habit::new("Water", "mint", "💧", Schedule::every_day());
    repo.add_habit(&run, health).unwrap();
    repo.add_habit(&water, health).unwrap();

    repo.mark_complete(run.id, date(2024, 1, 8)).unwrap();
    repo.mark_complete(run.id, date(2024, 1, 9)).unwrap();
    repo.mark_complete(water.id, date(2024, 1, 9)).unwrap();

    assert_eq!(repo.total_completions().unwrap(), 3);
    assert_eq!(repo.completion_count(run.id).unwrap(), 2);
    assert_eq!(repo.completion_count(water.id).unwrap(), 1);
}
