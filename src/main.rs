use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use matmul_bench::config::{BenchArgs, BenchConfig};
use matmul_bench::hardware::HardwareInfo;
use matmul_bench::{report, runner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = BenchArgs::parse();
    let hardware = HardwareInfo::detect();
    let config = BenchConfig::from_args(args, hardware.logical_cores)?;
    let block_size = config
        .block_size
        .unwrap_or_else(|| hardware.optimal_block_size());
    let csv_path = config.csv.clone();

    println!(
        "Logical cores: {}, block size: {}",
        hardware.logical_cores, block_size
    );

    let report = runner::run_in_background(config, block_size).await?;
    print!("{}", report::render(&report));

    if let Some(path) = csv_path {
        perf_analyzer::export_csv(&report.session, &path).await?;
        println!("Results exported to {}", path.display());
    }

    Ok(())
}
