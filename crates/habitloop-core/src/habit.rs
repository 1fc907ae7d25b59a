//! Habit and checkoff entities.
//!
//! A habit is defined by its cadence ([`Frequency`]); completions are
//! recorded as [`Checkoff`] events and never mutated afterwards. All
//! period math lives on `Frequency`, so the streak calculator stays
//! agnostic of what a "period" actually is.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ValidationError;

/// How often a habit is meant to be completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Once per calendar day.
    Daily,
    /// Once per calendar week (Monday through Sunday).
    Weekly,
}

impl Frequency {
    /// Normalize a timestamp to the period it is credited against.
    ///
    /// Daily habits key on the calendar date; weekly habits key on the
    /// Monday of the week the timestamp falls in, so any completion from
    /// Monday 00:00 up to (but excluding) the next Monday credits the
    /// same week.
    pub fn period_key(&self, ts: DateTime<Utc>) -> NaiveDate {
        let date = ts.date_naive();
        match self {
            Frequency::Daily => date,
            Frequency::Weekly => {
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
            }
        }
    }

    /// The period key immediately following `key`.
    ///
    /// Two period keys `a` and `b` are consecutive exactly when
    /// `next_period(a) == b`.
    pub fn next_period(&self, key: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => key + Duration::days(1),
            Frequency::Weekly => key + Duration::days(7),
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Daily
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            other => Err(ValidationError::UnknownFrequency(other.to_string())),
        }
    }
}

/// A recurring habit defined by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier
    pub id: String,
    /// Habit title
    pub title: String,
    /// What the habit is about
    pub description: String,
    /// Completion cadence
    pub frequency: Frequency,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Build a habit with a fresh identity and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if title or description is
    /// empty or whitespace-only.
    pub fn new(title: &str, description: &str, frequency: Frequency) -> Result<Self, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "title" });
        }
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "description" });
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            frequency,
            created_at: Utc::now(),
        })
    }
}

/// A recorded completion event for a habit.
///
/// Checkoffs are append-only; they are removed only when their habit is
/// deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Checkoff {
    /// Id of the habit this completion belongs to
    pub habit_id: String,
    /// When the completion happened
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_period_key_is_calendar_date() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap();
        assert_eq!(Frequency::Daily.period_key(ts), date(2024, 3, 15));
    }

    #[test]
    fn weekly_period_key_snaps_to_monday() {
        // 2024-01-01 is a Monday; every day of that week keys to it.
        for day in 1..=7 {
            let ts = Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap();
            assert_eq!(Frequency::Weekly.period_key(ts), date(2024, 1, 1));
        }
        // Monday 00:00 of the next week starts a new period.
        let next_monday = Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap();
        assert_eq!(Frequency::Weekly.period_key(next_monday), date(2024, 1, 8));
    }

    #[test]
    fn next_period_advances_by_one_cadence() {
        assert_eq!(Frequency::Daily.next_period(date(2024, 1, 31)), date(2024, 2, 1));
        assert_eq!(Frequency::Weekly.next_period(date(2024, 1, 1)), date(2024, 1, 8));
    }

    #[test]
    fn frequency_parses_case_insensitive() {
        assert_eq!("Daily".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert_eq!("WEEKLY".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert!("hourly".parse::<Frequency>().is_err());
    }

    #[test]
    fn new_habit_rejects_blank_fields() {
        assert!(Habit::new("  ", "desc", Frequency::Daily).is_err());
        assert!(Habit::new("Read", "", Frequency::Daily).is_err());
    }

    #[test]
    fn new_habit_assigns_unique_ids() {
        let a = Habit::new("Read", "Read 20 pages", Frequency::Daily).unwrap();
        let b = Habit::new("Read", "Read 20 pages", Frequency::Daily).unwrap();
        assert_ne!(a.id, b.id);
    }
}
