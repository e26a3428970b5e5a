//! Drives one benchmark session: baseline, parallel runs, verification and
//! analysis.

use std::time::Duration;

use matrix_mul::{MatrixMul, Product, Tolerance, verify};
use perf_analyzer::Session;
use tracing::{info, warn};

use crate::Error;
use crate::config::{BenchConfig, Strategy};

/// Timer resolution floor, so a trivially small multiply never reports a
/// zero duration to the analyzer.
const MIN_TIMING_SECS: f64 = 1e-9;

#[derive(Debug)]
pub struct BenchmarkReport {
    pub session: Session,
    pub size: usize,
    pub strategy: Strategy,
    /// Tile edge used by the blocked strategy.
    pub block_size: usize,
    pub sequential_elapsed: Duration,
    /// Worker counts whose result disagreed with the sequential baseline.
    pub verification_failures: Vec<usize>,
}

/// Runs the sequential baseline and then every configured worker count in
/// order.
///
/// Each parallel result is checked against the baseline. A mismatch is
/// logged and listed in the report; the session carries on.
pub fn run_benchmark(config: &BenchConfig, block_size: usize) -> Result<BenchmarkReport, Error> {
    let mm = MatrixMul::random(config.size, config.seed)?;
    info!(
        size = config.size,
        strategy = ?config.strategy,
        workers = ?config.workers,
        block_size,
        "starting benchmark"
    );

    let baseline = mm.multiply_sequential();
    let mut session = Session::new();
    session.set_sequential_time(timing_secs(&baseline))?;

    let mut verification_failures = Vec::new();
    for &workers in &config.workers {
        let product = match config.strategy {
            Strategy::Rows => mm.multiply_parallel(workers)?,
            Strategy::Blocked => mm.multiply_parallel_blocked(workers, block_size)?,
        };

        if !verify(&product.matrix, &baseline.matrix, Tolerance::default()) {
            warn!(workers, "parallel result does not match the sequential baseline");
            verification_failures.push(workers);
        }

        let measurement = session.add_result(workers, timing_secs(&product), Some(config.size))?;
        info!(
            workers,
            secs = measurement.elapsed_secs(),
            speedup = measurement.speedup(),
            efficiency = measurement.efficiency(),
            "run complete"
        );
    }

    Ok(BenchmarkReport {
        session,
        size: config.size,
        strategy: config.strategy,
        block_size,
        sequential_elapsed: baseline.elapsed,
        verification_failures,
    })
}

/// Runs [`run_benchmark`] on the blocking thread pool so the async runtime
/// stays responsive while the workers hold the CPU.
pub async fn run_in_background(
    config: BenchConfig,
    block_size: usize,
) -> Result<BenchmarkReport, Error> {
    tokio::task::spawn_blocking(move || run_benchmark(&config, block_size)).await?
}

fn timing_secs(product: &Product) -> f64 {
    product.elapsed_secs().max(MIN_TIMING_SECS)
}
