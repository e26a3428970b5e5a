//! Error types for the benchmark driver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("multiplication engine error: {0}")]
    Engine(#[from] matrix_mul::Error),

    #[error("analysis error: {0}")]
    Analyzer(#[from] perf_analyzer::Error),

    #[error("benchmark task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
