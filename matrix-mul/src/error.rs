//! Error types for matrix-mul operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid matrix dimension: {0}")]
    InvalidDimension(String),

    #[error("matrix dimension mismatch: A is {0}x{0}, B is {1}x{1}")]
    DimensionMismatch(usize, usize),

    #[error("invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(usize),

    #[error("invalid block size {0}: tiles must be at least 1x1")]
    InvalidBlockSize(usize),

    #[error("failed to launch worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("worker {worker} failed while computing rows/tiles [{start}, {end})")]
    WorkerFailure {
        worker: usize,
        start: usize,
        end: usize,
    },
}
