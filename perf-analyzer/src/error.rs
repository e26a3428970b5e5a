//! Error types for perf-analyzer operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parallel fraction {0} is outside [0, 1]")]
    InvalidFraction(f64),

    #[error("sequential baseline time has not been set")]
    UninitializedBaseline,

    #[error("invalid time {0}s: must be positive and finite")]
    InvalidTime(f64),

    #[error("invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(usize),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
