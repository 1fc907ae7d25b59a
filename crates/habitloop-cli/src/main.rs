use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "habitloop", version, about = "Habit tracking with streak analytics")]
struct Cli {
    /// Database file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Record a completion for a habit
    Checkoff {
        /// Habit id or title
        habit: String,
        /// Completion date (YYYY-MM-DD) instead of now
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
    },
    /// Streak analysis and filtering
    Analyze {
        #[command(subcommand)]
        action: commands::analyze::AnalyzeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(cli.db, action),
        Commands::Checkoff { habit, date } => commands::checkoff::run(cli.db, &habit, date),
        Commands::Analyze { action } => commands::analyze::run(cli.db, action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "habitloop", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
