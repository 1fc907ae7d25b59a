//! Shared helpers for the command modules.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use habitloop_core::{Config, Frequency, Habit, HabitRegistry, SqliteStore};

/// Open the registry against `--db`, the configured path, or the default
/// database location, in that order of precedence.
pub fn open_registry(db: Option<PathBuf>) -> Result<HabitRegistry<SqliteStore>, Box<dyn std::error::Error>> {
    let store = match db {
        Some(path) => SqliteStore::open(path)?,
        None => match Config::load_or_default().storage.path {
            Some(path) => SqliteStore::open(path)?,
            None => SqliteStore::open_default()?,
        },
    };
    Ok(HabitRegistry::new(store))
}

/// Resolve a habit argument: an exact id wins, otherwise an exact title
/// as long as it is unambiguous.
pub fn resolve_habit(
    registry: &HabitRegistry<SqliteStore>,
    reference: &str,
) -> Result<Habit, Box<dyn std::error::Error>> {
    let habits = registry.habits()?;
    if let Some(habit) = habits.iter().find(|h| h.id == reference) {
        return Ok(habit.clone());
    }

    let mut by_title = habits.iter().filter(|h| h.title == reference);
    match (by_title.next(), by_title.next()) {
        (Some(habit), None) => Ok(habit.clone()),
        (Some(_), Some(_)) => {
            Err(format!("habit title '{reference}' is ambiguous, use the id").into())
        }
        (None, _) => Err(format!("no habit matching '{reference}'").into()),
    }
}

/// Parse a `YYYY-MM-DD` argument as midnight UTC of that day.
pub fn parse_date_arg(date_str: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{date_str}', expected YYYY-MM-DD"))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// Resolve the frequency for a new habit: explicit argument first, the
/// configured default otherwise.
pub fn resolve_frequency(arg: Option<String>) -> Result<Frequency, Box<dyn std::error::Error>> {
    match arg {
        Some(raw) => Ok(Frequency::from_str(&raw)?),
        None => Ok(Config::load_or_default().defaults.frequency),
    }
}

/// Unit word for streak lengths: "day(s)" or "week(s)".
pub fn period_noun(frequency: Frequency, count: u32) -> &'static str {
    match (frequency, count) {
        (Frequency::Daily, 1) => "day",
        (Frequency::Daily, _) => "days",
        (Frequency::Weekly, 1) => "week",
        (Frequency::Weekly, _) => "weeks",
    }
}
