//! Efficiency spread across a session's runs.

use std::fmt;

use crate::measurement::Measurement;

const GOOD_DROP: f64 = 0.3;
const REGULAR_DROP: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalability {
    Good,
    Regular,
    Poor,
}

impl Scalability {
    /// `Good` below a 0.3 efficiency drop, `Regular` below 0.5, `Poor`
    /// otherwise.
    pub fn from_drop(efficiency_drop: f64) -> Self {
        if efficiency_drop < GOOD_DROP {
            Scalability::Good
        } else if efficiency_drop < REGULAR_DROP {
            Scalability::Regular
        } else {
            Scalability::Poor
        }
    }
}

impl fmt::Display for Scalability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Scalability::Good => "Good",
            Scalability::Regular => "Regular",
            Scalability::Poor => "Poor",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalabilitySummary {
    pub avg_efficiency: f64,
    pub max_efficiency: f64,
    pub min_efficiency: f64,
    pub efficiency_drop: f64,
    pub scalability: Scalability,
    pub parallel_fraction: Option<f64>,
}

impl ScalabilitySummary {
    pub fn from_measurements(
        measurements: &[Measurement],
        parallel_fraction: Option<f64>,
    ) -> Option<Self> {
        if measurements.len() < 2 {
            return None;
        }

        let efficiencies = measurements.iter().map(Measurement::efficiency);
        let sum: f64 = efficiencies.clone().sum();
        let max_efficiency = efficiencies.clone().fold(f64::NEG_INFINITY, f64::max);
        let min_efficiency = efficiencies.fold(f64::INFINITY, f64::min);
        let efficiency_drop = max_efficiency - min_efficiency;

        Some(Self {
            avg_efficiency: sum / measurements.len() as f64,
            max_efficiency,
            min_efficiency,
            efficiency_drop,
            scalability: Scalability::from_drop(efficiency_drop),
            parallel_fraction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Session;

    #[test]
    fn needs_two_measurements() {
        let mut session = Session::new();
        assert!(session.scalability().is_none());

        session.set_sequential_time(1.0).unwrap();
        session.add_result(2, 0.6, None).unwrap();
        assert!(session.scalability().is_none());

        session.add_result(4, 0.4, None).unwrap();
        assert!(session.scalability().is_some());
    }

    #[test]
    fn summary_of_end_to_end_scenario() {
        let mut session = Session::new();
        session.set_sequential_time(10.0).unwrap();
        for (workers, secs) in [(2, 5.5), (4, 3.2), (6, 2.5), (8, 2.1)] {
            session.add_result(workers, secs, Some(500)).unwrap();
        }

        let summary = session.scalability().unwrap();
        let max = 10.0 / 5.5 / 2.0;
        let min = 10.0 / 2.1 / 8.0;
        assert!((summary.max_efficiency - max).abs() < 1e-12);
        assert!((summary.min_efficiency - min).abs() < 1e-12);
        assert!((summary.efficiency_drop - (max - min)).abs() < 1e-12);
        assert!((summary.avg_efficiency - 0.738).abs() < 1e-3);
        assert_eq!(summary.scalability, Scalability::Regular);
        assert_eq!(summary.parallel_fraction, session.parallel_fraction());
    }

    #[test]
    fn drop_thresholds() {
        assert_eq!(Scalability::from_drop(0.0), Scalability::Good);
        assert_eq!(Scalability::from_drop(0.29), Scalability::Good);
        assert_eq!(Scalability::from_drop(0.3), Scalability::Regular);
        assert_eq!(Scalability::from_drop(0.49), Scalability::Regular);
        assert_eq!(Scalability::from_drop(0.5), Scalability::Poor);
        assert_eq!(Scalability::Poor.to_string(), "Poor");
    }
}
