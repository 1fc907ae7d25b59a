//! Habit registry: lifecycle and orchestration.
//!
//! The registry owns the set of habits and wires the ledger and the
//! streak calculator together. The storage collaborator is injected at
//! construction, so the whole engine runs against any [`HabitStore`]
//! implementation - the SQLite store in production, an in-memory one in
//! tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::habit::{Checkoff, Frequency, Habit};
use crate::ledger::CheckoffLedger;
use crate::storage::HabitStore;
use crate::streak::{self, StreakRun, StreakState};

/// One habit together with its derived state, as returned by
/// [`HabitRegistry::list_all`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitOverview {
    /// The habit itself
    pub habit: Habit,
    /// Streak state at the reference time the view was built for
    pub streak: StreakState,
    /// Total number of recorded checkoffs, duplicates included
    pub checkoff_count: usize,
    /// Most recent checkoff, if any
    pub last_checkoff: Option<DateTime<Utc>>,
}

/// Owns the habit set and coordinates ledger and streak derivation.
pub struct HabitRegistry<S: HabitStore> {
    store: S,
}

impl<S: HabitStore> HabitRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Ledger view over the same storage collaborator.
    pub fn ledger(&self) -> CheckoffLedger<'_, S> {
        CheckoffLedger::new(&self.store)
    }

    /// Create and persist a new habit.
    ///
    /// # Errors
    ///
    /// Returns a validation error if title or description is blank.
    pub fn create(&self, title: &str, description: &str, frequency: Frequency) -> Result<Habit> {
        let habit = Habit::new(title, description, frequency)?;
        self.store.save_habit(&habit)?;
        Ok(habit)
    }

    /// All stored habits in creation order, without derived state.
    pub fn habits(&self) -> Result<Vec<Habit>> {
        Ok(self.store.load_habits()?)
    }

    /// Fetch a single habit by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the id is unknown.
    pub fn get(&self, habit_id: &str) -> Result<Habit> {
        self.habits()?
            .into_iter()
            .find(|h| h.id == habit_id)
            .ok_or_else(|| CoreError::NotFound(habit_id.to_string()))
    }

    /// Delete a habit along with every checkoff it owns.
    ///
    /// The checkoff history goes first so a failure can not leave
    /// orphaned checkoffs behind a missing habit.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the id is unknown.
    pub fn delete(&self, habit_id: &str) -> Result<()> {
        let habit = self.get(habit_id)?;
        self.ledger().delete_all(&habit.id)?;
        self.store.delete_habit(&habit.id)?;
        Ok(())
    }

    /// Record a completion for a habit at an explicit time.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidHabit` if the id is unknown.
    pub fn checkoff(&self, habit_id: &str, timestamp: DateTime<Utc>) -> Result<Checkoff> {
        self.ledger().record(habit_id, timestamp)
    }

    /// Record a completion for a habit right now.
    pub fn checkoff_now(&self, habit_id: &str) -> Result<Checkoff> {
        self.checkoff(habit_id, Utc::now())
    }

    /// Ordered checkoff history of one habit.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the id is unknown.
    pub fn checkoff_history(&self, habit_id: &str) -> Result<Vec<DateTime<Utc>>> {
        let habit = self.get(habit_id)?;
        self.ledger().history(&habit.id)
    }

    /// Streak state of one habit as seen at `reference`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the id is unknown.
    pub fn streak_state(&self, habit_id: &str, reference: DateTime<Utc>) -> Result<StreakState> {
        let habit = self.get(habit_id)?;
        let history = self.ledger().history(&habit.id)?;
        Ok(streak::compute(habit.frequency, &history, reference))
    }

    /// Every maximal streak run in a habit's history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the id is unknown.
    pub fn streak_runs(&self, habit_id: &str) -> Result<Vec<StreakRun>> {
        let habit = self.get(habit_id)?;
        let history = self.ledger().history(&habit.id)?;
        Ok(streak::runs(habit.frequency, &history))
    }

    /// All habits in creation order, each with its streak state derived
    /// at `reference`.
    pub fn list_all(&self, reference: DateTime<Utc>) -> Result<Vec<HabitOverview>> {
        let habits = self.habits()?;
        let ledger = self.ledger();
        let mut view = Vec::with_capacity(habits.len());
        for habit in habits {
            let history = ledger.history(&habit.id)?;
            view.push(HabitOverview {
                streak: streak::compute(habit.frequency, &history, reference),
                checkoff_count: history.len(),
                last_checkoff: history.last().copied(),
                habit,
            });
        }
        Ok(view)
    }
}
