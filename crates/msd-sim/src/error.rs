//! Error types for simulation setup.
//!
//! Stepping never fails; these only surface when building parameters,
//! forcing or batch-run options from untrusted input.

use thiserror::Error;

/// Errors encountered while configuring a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Numeric error: {0}")]
    Numeric(#[from] msd_core::CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
