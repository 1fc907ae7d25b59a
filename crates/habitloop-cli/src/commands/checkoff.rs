//! Checkoff recording command for CLI.

use std::path::PathBuf;

use chrono::Utc;

use super::common;

pub fn run(
    db: Option<PathBuf>,
    habit: &str,
    date: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = common::open_registry(db)?;
    let habit = common::resolve_habit(&registry, habit)?;

    let timestamp = match date {
        Some(date_str) => common::parse_date_arg(&date_str)?,
        None => Utc::now(),
    };
    let checkoff = registry.checkoff(&habit.id, timestamp)?;
    println!(
        "Checked off '{}' for {}",
        habit.title,
        checkoff.timestamp.format("%Y-%m-%d")
    );

    let state = registry.streak_state(&habit.id, Utc::now())?;
    if state.established() {
        println!(
            "Current streak: {} {}",
            state.current_length,
            common::period_noun(habit.frequency, state.current_length)
        );
    }
    Ok(())
}
