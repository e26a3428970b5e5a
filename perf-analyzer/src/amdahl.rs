//! Amdahl's-law model: speedup for a given parallel fraction, and the
//! inverse used to estimate that fraction from a two-worker measurement.

use tracing::warn;

use crate::Error;

/// `S(f, P) = 1 / ((1 - f) + f / P)`.
///
/// `f` must lie in `[0, 1]` and `workers` must be at least 1.
pub fn amdahl_speedup(f: f64, workers: usize) -> Result<f64, Error> {
    check_fraction(f)?;
    if workers == 0 {
        return Err(Error::InvalidWorkerCount(workers));
    }
    if f == 1.0 {
        return Ok(workers as f64);
    }
    Ok(1.0 / ((1.0 - f) + f / workers as f64))
}

/// Inverts Amdahl's law at P = 2: `S(2) = 2 / (2 - f)`, so
/// `f = 2 * (1 - 1 / S(2))`.
///
/// The estimate is clamped to `[0, 1]`; a non-positive speedup yields 0.
pub fn parallel_fraction_from_two_workers(speedup: f64) -> f64 {
    if speedup <= 0.0 || speedup.is_nan() {
        return 0.0;
    }
    let raw = 2.0 * (1.0 - 1.0 / speedup);
    let f = raw.clamp(0.0, 1.0);
    if f != raw {
        warn!(speedup, raw, clamped = f, "empirical parallel fraction clamped");
    }
    f
}

/// Speedup limit as the worker count grows without bound: `1 / (1 - f)`,
/// infinite for a fully parallel workload.
pub fn max_speedup(f: f64) -> Result<f64, Error> {
    check_fraction(f)?;
    if f >= 1.0 {
        return Ok(f64::INFINITY);
    }
    Ok(1.0 / (1.0 - f))
}

fn check_fraction(f: f64) -> Result<(), Error> {
    if (0.0..=1.0).contains(&f) {
        Ok(())
    } else {
        Err(Error::InvalidFraction(f))
    }
}
