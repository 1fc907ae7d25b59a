//! Streak analysis and filtering commands for CLI.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::Utc;
use clap::Subcommand;
use habitloop_core::{query, Frequency};

use super::common;

#[derive(Subcommand)]
pub enum AnalyzeAction {
    /// Filter habits by cadence, streak activity and checkoff count
    Filter {
        /// Keep only habits with this cadence: daily or weekly
        #[arg(long)]
        frequency: Option<String>,
        /// Keep only habits with an active streak
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        /// Keep only habits with a broken streak
        #[arg(long)]
        inactive: bool,
        /// Keep only habits with at least N recorded checkoffs
        #[arg(long, value_name = "N")]
        min_checkoffs: Option<usize>,
        /// Emit the matching overview records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Longest streak for one habit, or the record across all habits
    Longest {
        /// Habit id or title (omit for the overall record)
        habit: Option<String>,
        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Completed streak runs of a habit, oldest first
    History {
        /// Habit id or title
        habit: String,
        /// Emit all runs as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(db: Option<PathBuf>, action: AnalyzeAction) -> Result<(), Box<dyn std::error::Error>> {
    let registry = common::open_registry(db)?;

    match action {
        AnalyzeAction::Filter {
            frequency,
            active,
            inactive,
            min_checkoffs,
            json,
        } => {
            let mut view = registry.list_all(Utc::now())?;
            if let Some(raw) = frequency {
                view = query::by_frequency(view, Frequency::from_str(&raw)?);
            }
            if active {
                view = query::by_active_status(view, true);
            }
            if inactive {
                view = query::by_active_status(view, false);
            }
            if let Some(min) = min_checkoffs {
                view = query::by_min_checkoffs(view, min);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else if view.is_empty() {
                println!("No habits found with this filter.");
            } else {
                for row in &view {
                    println!(
                        "{}  ({}, {} checkoffs)",
                        row.habit.title, row.habit.frequency, row.checkoff_count
                    );
                }
            }
        }
        AnalyzeAction::Longest { habit, json } => match habit {
            Some(reference) => {
                let habit = common::resolve_habit(&registry, &reference)?;
                let state = registry.streak_state(&habit.id, Utc::now())?;
                if json {
                    let payload = serde_json::json!({
                        "habit": habit.title,
                        "longest_length": state.longest_length,
                    });
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                } else if state.longest_length >= 2 {
                    println!(
                        "Longest streak for '{}': {} {}",
                        habit.title,
                        state.longest_length,
                        common::period_noun(habit.frequency, state.longest_length)
                    );
                } else {
                    println!("No streak established yet for '{}'.", habit.title);
                }
            }
            None => {
                let view = registry.list_all(Utc::now())?;
                let Some((best, holders)) = query::longest_overall(&view) else {
                    println!("No habits yet.");
                    return Ok(());
                };
                if json {
                    let payload = serde_json::json!({
                        "longest_length": best,
                        "habits": holders,
                    });
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                } else if best >= 2 {
                    println!("Longest streak across all habits: {best} periods");
                    println!("Held by: {}", holders.join(", "));
                } else {
                    println!("No streaks established yet.");
                }
            }
        },
        AnalyzeAction::History { habit, json } => {
            let habit = common::resolve_habit(&registry, &habit)?;
            let runs = registry.streak_runs(&habit.id)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&runs)?);
                return Ok(());
            }

            // Single-period runs never became streaks; skip them here.
            let established: Vec<_> = runs.iter().filter(|run| run.length >= 2).collect();
            if established.is_empty() {
                println!("No streak runs recorded yet for '{}'.", habit.title);
                return Ok(());
            }

            println!("Streak runs for '{}':", habit.title);
            for run in established {
                let label = match habit.frequency {
                    Frequency::Daily => format!("{} .. {}", run.start, run.end),
                    Frequency::Weekly => format!("week of {} .. week of {}", run.start, run.end),
                };
                println!(
                    "  {}  ({} {})",
                    label,
                    run.length,
                    common::period_noun(habit.frequency, run.length)
                );
            }
        }
    }
    Ok(())
}
