use chrono::NaiveDate;
use habitline_core::db::open_db_in_memory;
use habitline_core::{
    ChangeKind, FixedClock, Habit, Schedule, SqliteHabitRepository, TrackerService, Weekday,
};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

fn observed_events(
    service: &mut TrackerService<SqliteHabitRepository<'_>>,
) -> Arc<Mutex<Vec<ChangeKind>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    service.subscribe(move |kind| {
        sink.lock().unwrap().push(kind);
    });
    events
}

#[test]
fn each_successful_mutation_emits_one_event() {
    let mut conn = open_db_in_memory().unwrap();
    let repo =
        SqliteHabitRepository::with_clock(&mut conn, Box::new(FixedClock::at_day(today())))
            .unwrap();
    let mut service = TrackerService::new(repo);
    let events = observed_events(&mut service);

    let health = service.create_category("Health").unwrap();
    let habit = Habit::new("Water", "mint", "💧", Schedule::from_days([Weekday::Monday]));
    service.add_habit(&habit, health).unwrap();
    service.toggle_pin(habit.id).unwrap();
    service.mark_complete(habit.id, today()).unwrap();
    service.unmark_complete(habit.id, today()).unwrap();
    service.delete_habit(habit.id).unwrap();
    service.delete_category(health).unwrap();

    assert_eq!(
        *events.lock().unwrap(),
        [
            ChangeKind::Categories,
            ChangeKind::Habits,
            ChangeKind::Habits,
            ChangeKind::Records,
            ChangeKind::Records,
            ChangeKind::Habits,
            ChangeKind::Categories,
        ]
    );
}

#[test]
fn failed_mutations_emit_nothing() {
    let mut conn = open_db_in_memory().unwrap();
    let repo =
        SqliteHabitRepository::with_clock(&mut conn, Box::new(FixedClock::at_day(today())))
            .unwrap();
    let mut service = TrackerService::new(repo);
    let events = observed_events(&mut service);

    assert!(service.create_category("").is_err());
    assert!(service.delete_habit(Uuid::new_v4()).is_err());

    let health = service.create_category("Health").unwrap();
    let habit = Habit::new("Run", "red", "🏃", Schedule::every_day());
    service.add_habit(&habit, health).unwrap();
    service.mark_complete(habit.id, today()).unwrap();
    // Duplicate completion fails and must stay silent.
    assert!(service.mark_complete(habit.id, today()).is_err());

    assert_eq!(
        *events.lock().unwrap(),
        [ChangeKind::Categories, ChangeKind::Habits, ChangeKind::Records]
    );
}

#[test]
fn queries_pass_through_without_events() {
    let mut conn = open_db_in_memory().unwrap();
    let repo =
        SqliteHabitRepository::with_clock(&mut conn, Box::new(FixedClock::at_day(today())))
            .unwrap();
    let mut service = TrackerService::new(repo);

    let health = service.create_category("Health").unwrap();
    let habit = Habit::new("Water", "mint", "💧", Schedule::from_days([Weekday::Monday]));
    service.add_habit(&habit, health).unwrap();
    service.mark_complete(habit.id, today()).unwrap();

    let events = observed_events(&mut service);

    let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let groups = service.visible_habits(monday, Some("wat")).unwrap();
    assert_eq!(groups.len(), 1);
    assert!(service.is_completed(habit.id, today()).unwrap());
    assert_eq!(service.completion_count(habit.id).unwrap(), 1);
    assert_eq!(service.total_completions().unwrap(), 1);
    assert_eq!(service.records_for(habit.id).unwrap().len(), 1);
    assert_eq!(service.list_categories().unwrap().len(), 1);
    assert!(service.get_habit(habit.id).unwrap().is_some());

    assert!(events.lock().unwrap().is_empty());
}
