use matmul_bench::config::{BenchArgs, BenchConfig, Strategy};
use matmul_bench::{report, runner};
use matrix_mul::{MatrixMul, Tolerance, verify};
use perf_analyzer::{Granularity, Session};

use clap::Parser;

fn small_config(strategy: Strategy, workers: Vec<usize>) -> BenchConfig {
    BenchConfig {
        size: 40,
        workers,
        strategy,
        block_size: None,
        seed: Some(11),
        csv: None,
    }
}

#[tokio::test]
async fn test_full_benchmark_rows() {
    let report = runner::run_in_background(small_config(Strategy::Rows, vec![2, 4, 5]), 64)
        .await
        .unwrap();

    let session = &report.session;
    assert_eq!(session.measurements().len(), 3);
    assert!(report.verification_failures.is_empty());

    let f = session.parallel_fraction().unwrap();
    assert!((0.0..=1.0).contains(&f));
    assert_eq!(session.measurements()[0].speedup_amdahl(), None);
    assert!(session.measurements()[1].speedup_amdahl().is_some());

    let text = report::render(&report);
    assert!(text.contains("Matrix 40x40"));
}

#[tokio::test]
async fn test_full_benchmark_blocked_with_csv() {
    let report = runner::run_in_background(small_config(Strategy::Blocked, vec![1, 2, 3]), 7)
        .await
        .unwrap();
    assert!(report.verification_failures.is_empty());

    let path = std::env::temp_dir().join(format!("matmul-bench-it-{}.csv", std::process::id()));
    perf_analyzer::export_csv(&report.session, &path).await.unwrap();
    let csv = tokio::fs::read_to_string(&path).await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "procesos,tiempo_s,speedup_exp,speedup_amdahl,eficiencia,granularidad,gflops,matrix_size"
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("1,"));
    assert!(lines[1].ends_with(",40"));
}

#[test]
fn test_invalid_configuration_is_rejected_before_running() {
    let args = BenchArgs::try_parse_from(["matmul-bench", "-w", "0"]).unwrap();
    assert!(BenchConfig::from_args(args, 4).is_err());
}

#[test]
fn test_engine_feeds_analyzer() {
    let mm = MatrixMul::random(32, Some(5)).unwrap();
    let seq = mm.multiply_sequential();

    let mut session = Session::new();
    session.set_sequential_time(seq.elapsed_secs().max(1e-9)).unwrap();

    for workers in 1..=4 {
        let par = mm.multiply_parallel(workers).unwrap();
        assert!(verify(&par.matrix, &seq.matrix, Tolerance::default()));
        let m = session
            .add_result(workers, par.elapsed_secs().max(1e-9), Some(mm.size()))
            .unwrap();
        assert!(m.speedup() > 0.0);
        assert!(matches!(
            m.granularity(),
            Granularity::Coarse | Granularity::Medium | Granularity::Fine
        ));
    }
    assert!(session.parallel_fraction().is_some());
    assert!(session.scalability().is_some());
}
