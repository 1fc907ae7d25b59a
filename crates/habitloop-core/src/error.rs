//! Core error types for habitloop-core.
//!
//! This module defines the error hierarchy using thiserror. Callers match
//! on `CoreError` variants to distinguish bad input, missing habits and
//! storage failures.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitloop-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected input when creating a habit
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A registry operation referenced a habit that does not exist
    #[error("No habit found with id '{0}'")]
    NotFound(String),

    /// A checkoff referenced a habit that does not exist
    #[error("Cannot record checkoff: no habit with id '{0}'")]
    InvalidHabit(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required text field was empty or whitespace
    #[error("Invalid value for '{field}': must not be empty")]
    EmptyField { field: &'static str },

    /// Frequency string did not name a known cadence
    #[error("Unknown frequency '{0}', expected 'daily' or 'weekly'")]
    UnknownFrequency(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Application data directory could not be prepared
    #[error("Cannot prepare data directory {path}: {message}")]
    DataDir { path: PathBuf, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not name an existing configuration entry
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

// Helper implementations for converting from other error types

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
