//! Error types for the msd-app session layer.

use std::path::PathBuf;

/// Application error type wrapping errors from the backend crates.
///
/// Ticking, scrubbing and parameter edits never return errors; only
/// session construction, string-keyed queries and output writing can fail.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to write output: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for msd-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<msd_config::ConfigError> for AppError {
    fn from(err: msd_config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<msd_config::ValidationError> for AppError {
    fn from(err: msd_config::ValidationError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<msd_sim::SimError> for AppError {
    fn from(err: msd_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<msd_history::HistoryError> for AppError {
    fn from(err: msd_history::HistoryError) -> Self {
        AppError::History(err.to_string())
    }
}
