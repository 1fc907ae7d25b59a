//! Habit management commands for CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use habitloop_core::Config;

use super::common;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit title
        title: String,
        /// What the habit is about
        #[arg(long)]
        description: String,
        /// Completion cadence: daily or weekly (configured default when omitted)
        #[arg(long)]
        frequency: Option<String>,
    },
    /// List all habits with their streak state
    List {
        /// Emit the raw overview records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one habit in full
    Show {
        /// Habit id or title
        habit: String,
    },
    /// Delete a habit and its entire checkoff history
    Delete {
        /// Habit id or title
        habit: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(db: Option<PathBuf>, action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let registry = common::open_registry(db)?;

    match action {
        HabitAction::Add {
            title,
            description,
            frequency,
        } => {
            let frequency = common::resolve_frequency(frequency)?;
            let habit = registry.create(&title, &description, frequency)?;
            println!("Habit created: {}", habit.id);
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::List { json } => {
            let view = registry.list_all(Utc::now())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }

            if view.is_empty() {
                println!("No habits yet. Create one with 'habitloop habit add'.");
                return Ok(());
            }

            let width = view
                .iter()
                .map(|row| row.habit.title.len())
                .max()
                .unwrap_or(0)
                .max("TITLE".len());

            println!(
                "{:<width$}  {:<9}  {:>6}  {:>7}  {:>9}  LAST CHECKOFF",
                "TITLE", "FREQUENCY", "STREAK", "LONGEST", "CHECKOFFS",
            );
            for row in &view {
                // Below the two-period threshold a streak is not shown yet.
                let streak = if row.streak.established() { row.streak.current_length } else { 0 };
                let longest = if row.streak.longest_length >= 2 { row.streak.longest_length } else { 0 };
                let last = row
                    .last_checkoff
                    .map(|ts| ts.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<width$}  {:<9}  {:>6}  {:>7}  {:>9}  {}",
                    row.habit.title,
                    row.habit.frequency.to_string(),
                    streak,
                    longest,
                    row.checkoff_count,
                    last,
                );
            }

            if Config::load_or_default().display.hints {
                println!();
                println!(
                    "A streak starts once a habit is completed in two consecutive days (daily) or weeks (weekly)."
                );
            }
        }
        HabitAction::Show { habit } => {
            let habit = common::resolve_habit(&registry, &habit)?;
            let state = registry.streak_state(&habit.id, Utc::now())?;
            let history = registry.checkoff_history(&habit.id)?;
            let runs = registry.streak_runs(&habit.id)?;
            let payload = serde_json::json!({
                "habit": habit,
                "streak": state,
                "checkoff_count": history.len(),
                "last_checkoff": history.last(),
                "runs": runs,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        HabitAction::Delete { habit, yes } => {
            let habit = common::resolve_habit(&registry, &habit)?;
            if !yes {
                print!(
                    "Delete '{}' and all of its checkoffs? This cannot be undone. [y/N] ",
                    habit.title
                );
                io::stdout().flush()?;
                let mut answer = String::new();
                io::stdin().read_line(&mut answer)?;
                if !matches!(answer.trim(), "y" | "Y" | "yes") {
                    println!("Deletion cancelled.");
                    return Ok(());
                }
            }
            registry.delete(&habit.id)?;
            println!("Habit deleted: {}", habit.title);
        }
    }
    Ok(())
}
