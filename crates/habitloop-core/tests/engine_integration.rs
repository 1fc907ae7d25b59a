//! Integration tests for the streak and checkoff engine.
//!
//! These drive the full workflow - create, check off, derive, filter,
//! delete - through the registry against real SQLite stores.

use chrono::{DateTime, Duration, TimeZone, Utc};
use habitloop_core::{query, CoreError, Frequency, HabitRegistry, SqliteStore};

/// Noon UTC, offset in days from 2024-01-01 (a Monday).
fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::days(offset)
}

fn registry() -> HabitRegistry<SqliteStore> {
    HabitRegistry::new(SqliteStore::open_memory().unwrap())
}

#[test]
fn daily_lifecycle_from_creation_to_deletion() {
    let registry = registry();
    let habit = registry
        .create("Read", "Read 20 pages before bed", Frequency::Daily)
        .unwrap();

    // Fresh habit: nothing recorded yet.
    let state = registry.streak_state(&habit.id, day(0)).unwrap();
    assert_eq!(state.current_length, 0);
    assert_eq!(state.longest_length, 0);
    assert!(!state.is_active);

    // Three consecutive days.
    for offset in 0..3 {
        registry.checkoff(&habit.id, day(offset)).unwrap();
    }
    let state = registry.streak_state(&habit.id, day(2)).unwrap();
    assert_eq!(state.current_length, 3);
    assert!(state.is_active);
    assert!(state.established());

    // Two days later the streak is broken but the record stands.
    let state = registry.streak_state(&habit.id, day(4)).unwrap();
    assert_eq!(state.current_length, 0);
    assert!(!state.is_active);
    assert_eq!(state.longest_length, 3);

    // Deletion cascades into the ledger and makes the id unknown.
    registry.delete(&habit.id).unwrap();
    assert!(matches!(
        registry.streak_state(&habit.id, day(4)).unwrap_err(),
        CoreError::NotFound(_)
    ));
    assert!(matches!(
        registry.checkoff(&habit.id, day(4)).unwrap_err(),
        CoreError::InvalidHabit(_)
    ));
}

#[test]
fn weekly_habit_credits_any_day_of_the_week() {
    let registry = registry();
    let habit = registry
        .create("Long run", "10k on any day", Frequency::Weekly)
        .unwrap();

    // Thursday of week one, Sunday of week two, Monday of week three.
    registry.checkoff(&habit.id, day(3)).unwrap();
    registry.checkoff(&habit.id, day(13)).unwrap();
    registry.checkoff(&habit.id, day(14)).unwrap();

    // Reference on Wednesday of week three.
    let state = registry.streak_state(&habit.id, day(16)).unwrap();
    assert_eq!(state.current_length, 3);
    assert!(state.is_active);

    // Skipping week four breaks it by week five.
    let state = registry.streak_state(&habit.id, day(29)).unwrap();
    assert_eq!(state.current_length, 0);
    assert_eq!(state.longest_length, 3);
}

#[test]
fn single_checkoff_is_counted_but_not_established() {
    let registry = registry();
    let habit = registry
        .create("Meditate", "Ten quiet minutes", Frequency::Daily)
        .unwrap();
    registry.checkoff(&habit.id, day(0)).unwrap();

    let state = registry.streak_state(&habit.id, day(0)).unwrap();
    assert_eq!(state.current_length, 1);
    assert!(state.is_active);
    assert!(!state.established());

    registry.checkoff(&habit.id, day(1)).unwrap();
    let state = registry.streak_state(&habit.id, day(1)).unwrap();
    assert!(state.established());
}

#[test]
fn filters_narrow_the_overview_without_reordering() {
    let registry = registry();
    let read = registry.create("Read", "20 pages", Frequency::Daily).unwrap();
    let run = registry.create("Run", "5k", Frequency::Weekly).unwrap();
    let write = registry.create("Write", "One paragraph", Frequency::Daily).unwrap();

    // Read: active two-day streak ending at the reference day.
    registry.checkoff(&read.id, day(5)).unwrap();
    registry.checkoff(&read.id, day(6)).unwrap();
    // Run: one checkoff weeks ago, long broken.
    registry.checkoff(&run.id, day(0)).unwrap();
    // Write: never checked off.
    let _ = write;

    let view = registry.list_all(day(6)).unwrap();
    assert_eq!(view.len(), 3);

    let daily = query::by_frequency(view.clone(), Frequency::Daily);
    let titles: Vec<_> = daily.iter().map(|row| row.habit.title.as_str()).collect();
    assert_eq!(titles, ["Read", "Write"]);

    let active_daily = query::by_active_status(daily, true);
    let titles: Vec<_> = active_daily.iter().map(|row| row.habit.title.as_str()).collect();
    assert_eq!(titles, ["Read"]);

    let busy = query::by_min_checkoffs(view.clone(), 1);
    let titles: Vec<_> = busy.iter().map(|row| row.habit.title.as_str()).collect();
    assert_eq!(titles, ["Read", "Run"]);

    let (best, holders) = query::longest_overall(&view).unwrap();
    assert_eq!(best, 2);
    assert_eq!(holders, ["Read"]);
}

#[test]
fn deleting_one_habit_leaves_the_others_untouched() {
    let registry = registry();
    let keep = registry.create("Keep", "stays around", Frequency::Daily).unwrap();
    let gone = registry.create("Gone", "gets removed", Frequency::Daily).unwrap();
    registry.checkoff(&keep.id, day(0)).unwrap();
    registry.checkoff(&gone.id, day(0)).unwrap();

    registry.delete(&gone.id).unwrap();

    let view = registry.list_all(day(0)).unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].habit.id, keep.id);
    assert_eq!(view[0].checkoff_count, 1);
}

#[test]
fn state_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("habitloop.db");

    let habit_id = {
        let registry = HabitRegistry::new(SqliteStore::open(&db_path).unwrap());
        let habit = registry
            .create("Stretch", "Five minutes after waking", Frequency::Daily)
            .unwrap();
        registry.checkoff(&habit.id, day(0)).unwrap();
        registry.checkoff(&habit.id, day(1)).unwrap();
        habit.id
    };

    let reopened = HabitRegistry::new(SqliteStore::open(&db_path).unwrap());
    let habit = reopened.get(&habit_id).unwrap();
    assert_eq!(habit.title, "Stretch");

    let state = reopened.streak_state(&habit_id, day(1)).unwrap();
    assert_eq!(state.current_length, 2);
    assert!(state.is_active);
}
