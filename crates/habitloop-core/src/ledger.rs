//! Append-only checkoff ledger.
//!
//! The ledger records completion events and hands back ordered history.
//! It never updates or removes individual entries; the only destructive
//! operation is wiping a habit's whole history, which the registry
//! invokes as part of habit deletion.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, Result};
use crate::habit::Checkoff;
use crate::storage::HabitStore;

/// Append-only log of completion events, keyed by habit id.
///
/// Borrows the storage collaborator; habit lifecycle stays with the
/// registry.
pub struct CheckoffLedger<'a, S: HabitStore> {
    store: &'a S,
}

impl<'a, S: HabitStore> CheckoffLedger<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Record a completion for `habit_id` at `timestamp`.
    ///
    /// Duplicate timestamps are accepted and stored as-is; the streak
    /// calculator collapses them per period on read.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidHabit` if no habit with this id exists.
    pub fn record(&self, habit_id: &str, timestamp: DateTime<Utc>) -> Result<Checkoff> {
        let known = self.store.load_habits()?.iter().any(|h| h.id == habit_id);
        if !known {
            return Err(CoreError::InvalidHabit(habit_id.to_string()));
        }
        self.store.save_checkoff(habit_id, timestamp)?;
        Ok(Checkoff {
            habit_id: habit_id.to_string(),
            timestamp,
        })
    }

    /// All checkoff timestamps for a habit, oldest first.
    ///
    /// An id with no recorded checkoffs yields an empty history; the
    /// ledger does not distinguish unknown habits here, the registry
    /// does that where the contract requires it.
    pub fn history(&self, habit_id: &str) -> Result<Vec<DateTime<Utc>>> {
        Ok(self.store.load_checkoffs(habit_id)?)
    }

    /// Remove every checkoff for a habit.
    ///
    /// Only meant to be called while deleting the habit itself.
    pub fn delete_all(&self, habit_id: &str) -> Result<()> {
        Ok(self.store.delete_checkoffs(habit_id)?)
    }
}
