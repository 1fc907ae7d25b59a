//! SQLite-backed habit and checkoff persistence.
//!
//! Habits live in one table, checkoffs in another keyed by habit id.
//! Timestamps are stored as RFC3339 text, which sorts chronologically
//! for UTC values, so ordered reads come straight from the index.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{data_dir, HabitStore};
use crate::error::StorageError;
use crate::habit::{Frequency, Habit};

fn format_frequency(frequency: Frequency) -> &'static str {
    match frequency {
        Frequency::Daily => "daily",
        Frequency::Weekly => "weekly",
    }
}

fn parse_frequency(frequency_str: &str) -> Frequency {
    Frequency::from_str(frequency_str).unwrap_or(Frequency::Daily)
}

fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Build a Habit from a database row
fn row_to_habit(row: &rusqlite::Row) -> Result<Habit, rusqlite::Error> {
    let frequency_str: String = row.get(3)?;
    let created_at_str: String = row.get(4)?;
    Ok(Habit {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        frequency: parse_frequency(&frequency_str),
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

/// SQLite database implementing [`HabitStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if necessary) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the schema
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.create_schema()?;
        Ok(store)
    }

    /// Open the database at `~/.config/habitloop/habitloop.db`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be prepared or the
    /// database cannot be opened.
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(Self::default_path()?)
    }

    /// Default database location inside the data directory.
    pub fn default_path() -> Result<PathBuf, StorageError> {
        Ok(data_dir()?.join("habitloop.db"))
    }

    /// Open an ephemeral in-memory database (tests, dry runs).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.create_schema()?;
        Ok(store)
    }

    fn create_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS habits (
                id          TEXT PRIMARY KEY,
                title       TEXT NOT NULL,
                description TEXT NOT NULL,
                frequency   TEXT NOT NULL,
                created_at  TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS checkoffs (
                habit_id  TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );

            -- Ordered history reads per habit
            CREATE INDEX IF NOT EXISTS idx_checkoffs_habit_timestamp
                ON checkoffs(habit_id, timestamp);",
        )?;
        Ok(())
    }
}

impl HabitStore for SqliteStore {
    fn save_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO habits (id, title, description, frequency, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                habit.id,
                habit.title,
                habit.description,
                format_frequency(habit.frequency),
                habit.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn load_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, frequency, created_at
             FROM habits
             ORDER BY created_at ASC, rowid ASC",
        )?;
        let rows = stmt.query_map([], row_to_habit)?;

        let mut habits = Vec::new();
        for row in rows {
            habits.push(row?);
        }
        Ok(habits)
    }

    fn delete_habit(&self, habit_id: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM habits WHERE id = ?1", params![habit_id])?;
        Ok(())
    }

    fn save_checkoff(&self, habit_id: &str, timestamp: DateTime<Utc>) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO checkoffs (habit_id, timestamp) VALUES (?1, ?2)",
            params![habit_id, timestamp.to_rfc3339()],
        )?;
        Ok(())
    }

    fn load_checkoffs(&self, habit_id: &str) -> Result<Vec<DateTime<Utc>>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT timestamp FROM checkoffs
             WHERE habit_id = ?1
             ORDER BY timestamp ASC, rowid ASC",
        )?;
        let rows = stmt.query_map(params![habit_id], |row| row.get::<_, String>(0))?;

        let mut timestamps = Vec::new();
        for row in rows {
            let raw = row?;
            match DateTime::parse_from_rfc3339(&raw) {
                Ok(ts) => timestamps.push(ts.with_timezone(&Utc)),
                // A corrupt timestamp must not shift streak math; skip it.
                Err(e) => eprintln!("Warning: skipping unparseable checkoff '{raw}': {e}"),
            }
        }
        Ok(timestamps)
    }

    fn delete_checkoffs(&self, habit_id: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM checkoffs WHERE habit_id = ?1", params![habit_id])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn habit(title: &str, frequency: Frequency) -> Habit {
        Habit::new(title, "test fixture", frequency).unwrap()
    }

    #[test]
    fn habit_roundtrip_preserves_fields() {
        let store = SqliteStore::open_memory().unwrap();
        let original = habit("Read", Frequency::Weekly);
        store.save_habit(&original).unwrap();

        let loaded = store.load_habits().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, original.id);
        assert_eq!(loaded[0].title, "Read");
        assert_eq!(loaded[0].frequency, Frequency::Weekly);
        assert_eq!(loaded[0].created_at, original.created_at);
    }

    #[test]
    fn habits_come_back_in_creation_order() {
        let store = SqliteStore::open_memory().unwrap();
        let first = habit("First", Frequency::Daily);
        let second = habit("Second", Frequency::Daily);
        store.save_habit(&first).unwrap();
        store.save_habit(&second).unwrap();

        let titles: Vec<_> = store
            .load_habits()
            .unwrap()
            .into_iter()
            .map(|h| h.title)
            .collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[test]
    fn checkoffs_come_back_sorted_by_timestamp() {
        let store = SqliteStore::open_memory().unwrap();
        let h = habit("Read", Frequency::Daily);
        store.save_habit(&h).unwrap();

        let base = Utc.with_ymd_and_hms(2024, 1, 1, 8, 30, 0).unwrap();
        store.save_checkoff(&h.id, base + Duration::hours(5)).unwrap();
        store.save_checkoff(&h.id, base).unwrap();

        let loaded = store.load_checkoffs(&h.id).unwrap();
        assert_eq!(loaded, vec![base, base + Duration::hours(5)]);
    }

    #[test]
    fn delete_habit_leaves_other_rows_alone() {
        let store = SqliteStore::open_memory().unwrap();
        let keep = habit("Keep", Frequency::Daily);
        let gone = habit("Gone", Frequency::Daily);
        store.save_habit(&keep).unwrap();
        store.save_habit(&gone).unwrap();

        store.delete_habit(&gone.id).unwrap();
        let loaded = store.load_habits().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, keep.id);
    }

    #[test]
    fn delete_checkoffs_is_scoped_to_one_habit() {
        let store = SqliteStore::open_memory().unwrap();
        let a = habit("A", Frequency::Daily);
        let b = habit("B", Frequency::Daily);
        store.save_habit(&a).unwrap();
        store.save_habit(&b).unwrap();
        store.save_checkoff(&a.id, Utc::now()).unwrap();
        store.save_checkoff(&b.id, Utc::now()).unwrap();

        store.delete_checkoffs(&a.id).unwrap();
        assert!(store.load_checkoffs(&a.id).unwrap().is_empty());
        assert_eq!(store.load_checkoffs(&b.id).unwrap().len(), 1);
    }

    #[test]
    fn unknown_frequency_string_falls_back_to_daily() {
        assert_eq!(parse_frequency("hourly"), Frequency::Daily);
        assert_eq!(parse_frequency("weekly"), Frequency::Weekly);
    }
}
