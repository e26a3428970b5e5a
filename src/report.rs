//! Plain-text summary of a finished benchmark.

use std::fmt::Write;

use crate::config::Strategy;
use crate::runner::BenchmarkReport;

pub fn render(report: &BenchmarkReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &BenchmarkReport) -> std::fmt::Result {
    let session = &report.session;

    writeln!(out, "Matrix {0}x{0}", report.size)?;
    match report.strategy {
        Strategy::Rows => writeln!(out, "Strategy: row partitioning")?,
        Strategy::Blocked => writeln!(
            out,
            "Strategy: tile partitioning ({0}x{0} tiles)",
            report.block_size
        )?,
    }
    writeln!(
        out,
        "Session started: {}",
        session.started_at().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(
        out,
        "Sequential baseline: {:.6}s",
        report.sequential_elapsed.as_secs_f64()
    )?;

    match session.parallel_fraction() {
        Some(f) => {
            writeln!(out, "Parallel fraction (f): {:.4} ({:.2}%)", f, f * 100.0)?;
            if let Some(max) = session.max_theoretical_speedup() {
                if max.is_infinite() {
                    writeln!(out, "Max theoretical speedup: unbounded")?;
                } else {
                    writeln!(out, "Max theoretical speedup: {:.2}x", max)?;
                }
            }
            writeln!(out, "Serial limit: {:.1}%", (1.0 - f) * 100.0)?;
        }
        None => writeln!(out, "Parallel fraction (f): not estimated (needs a 2-worker run)")?,
    }

    writeln!(out)?;
    writeln!(
        out,
        "{:>8} {:>12} {:>10} {:>10} {:>10} {:>8} {:>9}",
        "workers", "time (s)", "speedup", "amdahl", "eff", "grain", "GFLOPS"
    )?;
    for m in session.measurements() {
        let amdahl = m
            .speedup_amdahl()
            .map_or_else(|| "-".to_string(), |s| format!("{:.2}x", s));
        let gflops = m.gflops().map_or_else(|| "-".to_string(), |g| format!("{:.3}", g));
        writeln!(
            out,
            "{:>8} {:>12.6} {:>9.2}x {:>10} {:>9.1}% {:>8} {:>9}",
            m.workers(),
            m.elapsed_secs(),
            m.speedup(),
            amdahl,
            m.efficiency() * 100.0,
            m.granularity(),
            gflops
        )?;
    }

    writeln!(out)?;
    match session.scalability() {
        Some(summary) => {
            writeln!(out, "Scalability: {}", summary.scalability)?;
            writeln!(out, "Average efficiency: {:.2}%", summary.avg_efficiency * 100.0)?;
            writeln!(out, "Efficiency drop: {:.2}%", summary.efficiency_drop * 100.0)?;
        }
        None => writeln!(out, "Scalability: not enough data")?,
    }

    if !report.verification_failures.is_empty() {
        writeln!(
            out,
            "WARNING: results differed from the baseline for worker counts {:?}",
            report.verification_failures
        )?;
    }
    Ok(())
}
