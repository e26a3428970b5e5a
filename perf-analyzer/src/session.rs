//! Benchmark analysis session.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::Error;
use crate::amdahl::{amdahl_speedup, max_speedup, parallel_fraction_from_two_workers};
use crate::measurement::{Granularity, Measurement, gflops};
use crate::scalability::ScalabilitySummary;

const BOOTSTRAP_WORKERS: usize = 2;

/// Analysis state for one benchmark session.
///
/// A session starts without a baseline; [`Session::set_sequential_time`]
/// must be called before any run can be recorded. Runs are appended in
/// order and never modified.
///
/// # Parallel fraction
///
/// The empirical parallel fraction is estimated once, from the first run
/// recorded with exactly two workers, by inverting Amdahl's law. Runs
/// recorded before that one carry no Amdahl prediction, and the estimate is
/// not revisited when later runs arrive.
///
/// # Example
///
/// ```
/// use perf_analyzer::Session;
///
/// let mut session = Session::new();
/// session.set_sequential_time(10.0)?;
///
/// let first = session.add_result(2, 5.0, Some(500))?;
/// assert_eq!(first.speedup(), 2.0);
/// assert_eq!(session.parallel_fraction(), Some(1.0));
///
/// let second = session.add_result(4, 2.5, Some(500))?;
/// assert_eq!(second.speedup_amdahl(), Some(4.0));
/// # Ok::<(), perf_analyzer::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    started_at: DateTime<Utc>,
    sequential_time: Option<f64>,
    parallel_fraction: Option<f64>,
    measurements: Vec<Measurement>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            sequential_time: None,
            parallel_fraction: None,
            measurements: Vec::new(),
        }
    }

    /// Stores the single-threaded baseline in seconds.
    ///
    /// Setting it again is allowed; runs already recorded keep the metrics
    /// derived from the previous baseline.
    pub fn set_sequential_time(&mut self, secs: f64) -> Result<(), Error> {
        check_time(secs)?;
        info!(sequential_secs = secs, "sequential baseline set");
        self.sequential_time = Some(secs);
        Ok(())
    }

    /// Records one parallel run and returns its derived metrics.
    pub fn add_result(
        &mut self,
        workers: usize,
        elapsed_secs: f64,
        problem_size: Option<usize>,
    ) -> Result<&Measurement, Error> {
        let sequential = self.sequential_time.ok_or(Error::UninitializedBaseline)?;
        if workers == 0 {
            return Err(Error::InvalidWorkerCount(workers));
        }
        check_time(elapsed_secs)?;

        let speedup = sequential / elapsed_secs;
        let efficiency = speedup / workers as f64;
        let speedup_amdahl = match self.parallel_fraction {
            Some(f) => Some(amdahl_speedup(f, workers)?),
            None => None,
        };

        let measurement = Measurement {
            workers,
            elapsed_secs,
            problem_size,
            speedup,
            efficiency,
            granularity: Granularity::classify(efficiency),
            gflops: problem_size.map(|n| gflops(n, elapsed_secs)),
            speedup_amdahl,
        };

        if workers == BOOTSTRAP_WORKERS && self.parallel_fraction.is_none() {
            let f = parallel_fraction_from_two_workers(speedup);
            info!(speedup, parallel_fraction = f, "empirical parallel fraction estimated");
            self.parallel_fraction = Some(f);
        }

        debug!(
            workers,
            elapsed_secs,
            speedup,
            efficiency,
            granularity = %measurement.granularity,
            "measurement recorded"
        );
        self.measurements.push(measurement);
        Ok(&self.measurements[self.measurements.len() - 1])
    }

    pub fn sequential_time(&self) -> Option<f64> {
        self.sequential_time
    }

    /// Empirical parallel fraction, once a two-worker run has been recorded.
    pub fn parallel_fraction(&self) -> Option<f64> {
        self.parallel_fraction
    }

    /// Fraction of the work that stays serial, `1 - f`.
    pub fn serial_fraction(&self) -> Option<f64> {
        self.parallel_fraction.map(|f| 1.0 - f)
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Amdahl speedup limit for the empirical fraction, infinite when the
    /// workload looks fully parallel.
    pub fn max_theoretical_speedup(&self) -> Option<f64> {
        self.parallel_fraction.and_then(|f| max_speedup(f).ok())
    }

    /// Efficiency spread over all recorded runs; `None` with fewer than two.
    pub fn scalability(&self) -> Option<ScalabilitySummary> {
        ScalabilitySummary::from_measurements(&self.measurements, self.parallel_fraction)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Drops every run, the baseline and the parallel fraction.
    pub fn reset(&mut self) {
        self.sequential_time = None;
        self.parallel_fraction = None;
        self.measurements.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn check_time(secs: f64) -> Result<(), Error> {
    if secs > 0.0 && secs.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidTime(secs))
    }
}
