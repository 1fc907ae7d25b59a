//! Streak derivation from checkoff history.
//!
//! This module is the analytical core of the engine: given a cadence, a
//! habit's raw checkoff timestamps and a reference time standing in for
//! "now", it derives how long the current streak is, whether it is still
//! alive, and the longest streak ever achieved. Everything here is pure -
//! no clock reads, no storage - so the same inputs always produce the same
//! answer.
//!
//! Timestamps are first normalized to period keys (see
//! [`Frequency::period_key`]), duplicates within a period collapse to one,
//! and the remaining keys are grouped into maximal runs of consecutive
//! periods. A streak counts as active while the habit can still extend it
//! without a gap: the last completed period is either the reference period
//! itself or the one just before it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::habit::Frequency;

/// Derived streak facts for one habit at a given reference time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Length of the run ending at the reference period or the one just
    /// before it; 0 when that run is already broken
    pub current_length: u32,
    /// Whether the streak can still be extended without a gap
    pub is_active: bool,
    /// Longest run of consecutive completed periods anywhere in history
    pub longest_length: u32,
}

impl StreakState {
    /// Whether the current streak is worth surfacing to the user.
    ///
    /// A single completed period is not yet a streak in user-facing
    /// terms; two or more consecutive periods are. This is a display
    /// threshold only - `current_length` always carries the true count.
    pub fn established(&self) -> bool {
        self.current_length >= 2
    }
}

/// A maximal run of consecutive completed periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRun {
    /// Period key of the first completed period in the run
    pub start: NaiveDate,
    /// Period key of the last completed period in the run
    pub end: NaiveDate,
    /// Number of periods in the run
    pub length: u32,
}

/// Group checkoff timestamps into maximal runs of consecutive periods.
///
/// Timestamps may arrive in any order and may repeat within a period;
/// the result is ordered oldest run first.
pub fn runs(frequency: Frequency, checkoffs: &[DateTime<Utc>]) -> Vec<StreakRun> {
    let periods: BTreeSet<NaiveDate> = checkoffs
        .iter()
        .map(|ts| frequency.period_key(*ts))
        .collect();

    let mut all = Vec::new();
    let mut current: Option<StreakRun> = None;
    for key in periods {
        current = Some(match current {
            Some(run) if frequency.next_period(run.end) == key => StreakRun {
                start: run.start,
                end: key,
                length: run.length + 1,
            },
            Some(run) => {
                all.push(run);
                StreakRun { start: key, end: key, length: 1 }
            }
            None => StreakRun { start: key, end: key, length: 1 },
        });
    }
    if let Some(run) = current {
        all.push(run);
    }
    all
}

/// Derive the streak state for a habit with cadence `frequency` from its
/// raw checkoff timestamps, as seen at `reference`.
///
/// The reference period itself does not have to be completed yet: a
/// streak whose last completed period is the one directly before the
/// reference period is still active, the user simply has not checked off
/// the current period so far.
pub fn compute(
    frequency: Frequency,
    checkoffs: &[DateTime<Utc>],
    reference: DateTime<Utc>,
) -> StreakState {
    let runs = runs(frequency, checkoffs);
    let longest = runs.iter().map(|run| run.length).max().unwrap_or(0);

    let Some(last) = runs.last() else {
        return StreakState::default();
    };

    let ref_period = frequency.period_key(reference);
    let is_active = last.end == ref_period || frequency.next_period(last.end) == ref_period;

    StreakState {
        current_length: if is_active { last.length } else { 0 },
        is_active,
        longest_length: longest,
    }
}
