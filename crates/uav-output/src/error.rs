//! Error types for uav-output.

use thiserror::Error;
use uav_sim::SimError;

/// Errors that can occur when writing output or running comparisons.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("run count must be at least 1")]
    NoRuns,
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
