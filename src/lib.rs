//! Benchmark driver for sequential vs. parallel matrix multiplication.
//!
//! Ties the `matrix-mul` engine to the `perf-analyzer` session: reads the
//! command line, probes the host for a tile size, runs the baseline and
//! every configured worker count, and reports speedup, efficiency and the
//! Amdahl fit.

pub mod config;
pub mod error;
pub mod hardware;
pub mod report;
pub mod runner;

pub use error::Error;
