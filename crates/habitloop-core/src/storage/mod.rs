//! Storage collaborators: the [`HabitStore`] seam, its SQLite
//! implementation and the TOML configuration file.

mod config;
mod sqlite;

pub use config::{Config, DefaultsConfig, DisplayConfig, StorageConfig};
pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::error::StorageError;
use crate::habit::Habit;

/// Durable record store for habits and their checkoffs.
///
/// The registry receives an implementation at construction and never
/// opens connections on its own. Checkoff rows are append-only from the
/// engine's point of view: there is no update, and removal always wipes
/// a habit's entire history at once.
pub trait HabitStore {
    /// Persist a new habit.
    fn save_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Every stored habit, ascending by creation time.
    fn load_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Remove a single habit record. Checkoffs are not touched; callers
    /// cascade via [`HabitStore::delete_checkoffs`] first.
    fn delete_habit(&self, habit_id: &str) -> Result<(), StorageError>;

    /// Append one checkoff event.
    fn save_checkoff(&self, habit_id: &str, timestamp: DateTime<Utc>) -> Result<(), StorageError>;

    /// Every checkoff timestamp for a habit, ascending.
    fn load_checkoffs(&self, habit_id: &str) -> Result<Vec<DateTime<Utc>>, StorageError>;

    /// Remove every checkoff recorded for a habit.
    fn delete_checkoffs(&self, habit_id: &str) -> Result<(), StorageError>;
}

/// Returns `~/.config/habitloop[-dev]/` based on HABITLOOP_ENV.
///
/// Set HABITLOOP_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABITLOOP_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habitloop-dev")
    } else {
        base_dir.join("habitloop")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
