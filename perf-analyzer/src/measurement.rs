//! Recorded benchmark runs and their derived metrics.

use std::fmt;

use serde::Serialize;

const COARSE_EFFICIENCY: f64 = 0.8;
const MEDIUM_EFFICIENCY: f64 = 0.5;

/// How well a run's work scaled across its workers, bucketed by efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Granularity {
    Coarse,
    Medium,
    Fine,
}

impl Granularity {
    /// `Coarse` above 0.8, `Medium` above 0.5, `Fine` otherwise. Both bounds
    /// are strict, so exactly 0.8 is `Medium` and exactly 0.5 is `Fine`.
    pub fn classify(efficiency: f64) -> Self {
        if efficiency > COARSE_EFFICIENCY {
            Granularity::Coarse
        } else if efficiency > MEDIUM_EFFICIENCY {
            Granularity::Medium
        } else {
            Granularity::Fine
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Granularity::Coarse => "Coarse",
            Granularity::Medium => "Medium",
            Granularity::Fine => "Fine",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Floating-point operations per second, in billions, for an N×N multiply:
/// one multiply and one add per inner step, `2 * N³` in total.
pub fn gflops(problem_size: usize, elapsed_secs: f64) -> f64 {
    let n = problem_size as f64;
    (2.0 * n * n * n) / elapsed_secs / 1e9
}

/// One benchmark run. Derived fields are fixed when the run is recorded and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub(crate) workers: usize,
    pub(crate) elapsed_secs: f64,
    pub(crate) problem_size: Option<usize>,
    pub(crate) speedup: f64,
    pub(crate) efficiency: f64,
    pub(crate) granularity: Granularity,
    pub(crate) gflops: Option<f64>,
    pub(crate) speedup_amdahl: Option<f64>,
}

impl Measurement {
    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn problem_size(&self) -> Option<usize> {
        self.problem_size
    }

    /// Sequential time divided by this run's time.
    pub fn speedup(&self) -> f64 {
        self.speedup
    }

    /// Speedup per worker, on a 0–1 scale for sub-linear runs.
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn gflops(&self) -> Option<f64> {
        self.gflops
    }

    /// Amdahl's-law prediction for this worker count, present only when the
    /// parallel fraction was already known when the run was recorded.
    pub fn speedup_amdahl(&self) -> Option<f64> {
        self.speedup_amdahl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granularity_boundaries() {
        assert_eq!(Granularity::classify(0.81), Granularity::Coarse);
        assert_eq!(Granularity::classify(0.80), Granularity::Medium);
        assert_eq!(Granularity::classify(0.51), Granularity::Medium);
        assert_eq!(Granularity::classify(0.50), Granularity::Fine);
        assert_eq!(Granularity::classify(0.0), Granularity::Fine);
        assert_eq!(Granularity::classify(1.3), Granularity::Coarse);
    }

    #[test]
    fn granularity_labels() {
        assert_eq!(Granularity::Coarse.to_string(), "Coarse");
        assert_eq!(Granularity::Medium.to_string(), "Medium");
        assert_eq!(Granularity::Fine.to_string(), "Fine");
    }

    #[test]
    fn gflops_counts_two_n_cubed() {
        // 2 * 1000³ flops in one second
        assert!((gflops(1000, 1.0) - 2.0).abs() < 1e-12);
        assert!((gflops(500, 5.5) - 0.25 / 5.5).abs() < 1e-12);
    }
}
