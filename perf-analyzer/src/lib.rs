//! Parallel-performance analysis of benchmark timings.
//!
//! `perf-analyzer` turns raw timings (worker count, elapsed seconds, problem
//! size) into speedup, efficiency, GFLOPS and granularity, and fits
//! Amdahl's law to them.
//!
//! # Features
//!
//! - Explicit [`Session`] object holding the sequential baseline and the
//!   ordered list of runs
//! - Empirical parallel fraction bootstrapped from the first two-worker run
//! - Amdahl speedup prediction and speedup limit
//! - Scalability summary over all runs
//! - CSV export with a fixed column layout
//!
//! # Example
//!
//! ```
//! use perf_analyzer::{Granularity, Session};
//!
//! let mut session = Session::new();
//! session.set_sequential_time(10.0)?;
//!
//! session.add_result(2, 5.5, Some(500))?;
//! let run = session.add_result(4, 3.2, Some(500))?;
//! assert_eq!(run.granularity(), Granularity::Medium);
//! assert!(run.speedup_amdahl().is_some());
//!
//! let summary = session.scalability().expect("two runs recorded");
//! println!("{}", summary.scalability);
//! # Ok::<(), perf_analyzer::Error>(())
//! ```

mod amdahl;
mod error;
mod export;
mod measurement;
mod scalability;
mod session;

pub use amdahl::{amdahl_speedup, max_speedup, parallel_fraction_from_two_workers};
pub use error::Error;
pub use export::{export_csv, to_csv_string, write_csv};
pub use measurement::{Granularity, Measurement, gflops};
pub use scalability::{Scalability, ScalabilitySummary};
pub use session::Session;
