//! Filtering and cross-habit queries over the registry's overview rows.
//!
//! Filters are pure functions over an already-derived view: they keep
//! matching rows in their original order and compose by simple chaining,
//! which gives logical AND semantics. They never touch storage and never
//! recompute streaks.

use crate::habit::Frequency;
use crate::registry::HabitOverview;

/// Keep only habits with the given cadence.
pub fn by_frequency(view: Vec<HabitOverview>, frequency: Frequency) -> Vec<HabitOverview> {
    view.into_iter()
        .filter(|row| row.habit.frequency == frequency)
        .collect()
}

/// Keep only habits whose streak activity matches `active`.
pub fn by_active_status(view: Vec<HabitOverview>, active: bool) -> Vec<HabitOverview> {
    view.into_iter()
        .filter(|row| row.streak.is_active == active)
        .collect()
}

/// Keep only habits with at least `min` recorded checkoffs.
pub fn by_min_checkoffs(view: Vec<HabitOverview>, min: usize) -> Vec<HabitOverview> {
    view.into_iter()
        .filter(|row| row.checkoff_count >= min)
        .collect()
}

/// The longest streak ever achieved across the whole view, together with
/// the titles of the habits that achieved it.
///
/// Returns `None` for an empty view. When no habit has completed a single
/// period the record is 0 and no titles are listed, since nothing holds
/// a record yet. Duplicate titles collapse to one entry.
pub fn longest_overall(view: &[HabitOverview]) -> Option<(u32, Vec<String>)> {
    let best = view.iter().map(|row| row.streak.longest_length).max()?;
    if best == 0 {
        return Some((0, Vec::new()));
    }

    let mut titles: Vec<String> = Vec::new();
    for row in view.iter().filter(|row| row.streak.longest_length == best) {
        if !titles.contains(&row.habit.title) {
            titles.push(row.habit.title.clone());
        }
    }
    Some((best, titles))
}
