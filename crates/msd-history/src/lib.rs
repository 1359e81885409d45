//! msd-history: rolling sample history backing graphs and scrubbing.

pub mod buffer;
pub mod query;
pub mod types;

pub use buffer::{AppendOutcome, DEFAULT_MAX_DURATION_S, HistoryBuffer};
pub use query::{HistorySummary, series, summarize};
pub use types::*;

pub type HistoryResult<T> = Result<T, HistoryError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HistoryError {
    #[error("Unknown channel: {name}")]
    UnknownChannel { name: String },

    #[error("Invalid retention window: {value}")]
    InvalidRetention { value: f64 },
}
