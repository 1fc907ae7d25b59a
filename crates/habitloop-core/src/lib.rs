//! # Habitloop Core Library
//!
//! This library provides the core business logic for the habitloop habit
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary; any frontend is a thin layer over
//! the same engine.
//!
//! ## Architecture
//!
//! - **Streak Calculator**: Pure derivation of current/longest streaks from
//!   checkoff timestamps; "now" is always an explicit parameter
//! - **Checkoff Ledger**: Append-only log of completion events
//! - **Habit Registry**: Habit lifecycle plus orchestration of ledger and
//!   calculator, over an injected storage collaborator
//! - **Storage**: SQLite-based persistence and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`HabitRegistry`]: Habit lifecycle and derived views
//! - [`streak::compute`]: The streak derivation itself
//! - [`HabitStore`]: Storage seam the engine is generic over
//! - [`Config`]: Application configuration management

pub mod error;
pub mod habit;
pub mod ledger;
pub mod query;
pub mod registry;
pub mod storage;
pub mod streak;

pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use habit::{Checkoff, Frequency, Habit};
pub use ledger::CheckoffLedger;
pub use registry::{HabitOverview, HabitRegistry};
pub use storage::{Config, HabitStore, SqliteStore};
pub use streak::{StreakRun, StreakState};
