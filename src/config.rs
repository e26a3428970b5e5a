//! Command-line configuration and its validation.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::Error;

pub const DEFAULT_MATRIX_SIZE: usize = 500;

/// How the result matrix is split across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Contiguous row ranges.
    Rows,
    /// Square tiles of `--block-size`.
    Blocked,
}

#[derive(Debug, Parser)]
#[command(
    name = "matmul-bench",
    about = "Benchmark sequential vs. parallel matrix multiplication and fit Amdahl's law"
)]
pub struct BenchArgs {
    /// Matrix size N (the operands are N×N).
    #[arg(short = 'n', long, default_value_t = DEFAULT_MATRIX_SIZE)]
    pub size: usize,

    /// Comma-separated worker counts. They run in ascending order with
    /// duplicates dropped. Defaults to powers of two up to the logical core
    /// count.
    #[arg(short, long, value_delimiter = ',')]
    pub workers: Vec<usize>,

    #[arg(short, long, value_enum, default_value_t = Strategy::Rows)]
    pub strategy: Strategy,

    /// Tile edge for the blocked strategy. Defaults to a size derived from
    /// the L1 data cache.
    #[arg(short, long)]
    pub block_size: Option<usize>,

    /// Seed for the operand RNG.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the results to this CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

/// Validated benchmark configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub size: usize,
    pub workers: Vec<usize>,
    pub strategy: Strategy,
    pub block_size: Option<usize>,
    pub seed: Option<u64>,
    pub csv: Option<PathBuf>,
}

impl BenchConfig {
    /// Checks the arguments before anything is computed. The worker list is
    /// sorted and de-duplicated; an empty one is replaced by
    /// [`default_worker_counts`] for `logical_cores`.
    pub fn from_args(args: BenchArgs, logical_cores: usize) -> Result<Self, Error> {
        if args.size == 0 {
            return Err(Error::Config("matrix size must be at least 1".into()));
        }
        if let Some(&bad) = args.workers.iter().find(|&&w| w == 0) {
            return Err(Error::Config(format!(
                "worker count {} is invalid, every run needs at least one worker",
                bad
            )));
        }
        if args.block_size == Some(0) {
            return Err(Error::Config("block size must be at least 1".into()));
        }

        let workers = if args.workers.is_empty() {
            default_worker_counts(logical_cores)
        } else {
            let mut workers = args.workers;
            workers.sort_unstable();
            workers.dedup();
            workers
        };

        Ok(Self {
            size: args.size,
            workers,
            strategy: args.strategy,
            block_size: args.block_size,
            seed: args.seed,
            csv: args.csv,
        })
    }
}

/// `2, 4, 8, …` up to `max`, with `max` itself appended when it is not a
/// power of two. A single core yields `[1]`.
pub fn default_worker_counts(max: usize) -> Vec<usize> {
    if max < 2 {
        return vec![1];
    }
    let mut counts = Vec::new();
    let mut p = 2;
    while p <= max {
        counts.push(p);
        p *= 2;
    }
    if counts.last() != Some(&max) {
        counts.push(max);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> BenchArgs {
        BenchArgs::try_parse_from(std::iter::once("matmul-bench").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults() {
        let config = BenchConfig::from_args(parse(&[]), 8).unwrap();
        assert_eq!(config.size, DEFAULT_MATRIX_SIZE);
        assert_eq!(config.workers, vec![2, 4, 8]);
        assert_eq!(config.strategy, Strategy::Rows);
        assert_eq!(config.block_size, None);
        assert_eq!(config.csv, None);
    }

    #[test]
    fn explicit_arguments() {
        let args = parse(&[
            "-n", "128", "-w", "2,3,6", "--strategy", "blocked", "-b", "16", "--seed", "9",
            "--csv", "out.csv",
        ]);
        let config = BenchConfig::from_args(args, 4).unwrap();
        assert_eq!(config.size, 128);
        assert_eq!(config.workers, vec![2, 3, 6]);
        assert_eq!(config.strategy, Strategy::Blocked);
        assert_eq!(config.block_size, Some(16));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.csv, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn worker_counts_are_sorted_and_deduplicated() {
        let config = BenchConfig::from_args(parse(&["-w", "4,2,4,1"]), 8).unwrap();
        assert_eq!(config.workers, vec![1, 2, 4]);
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = BenchConfig::from_args(parse(&["-n", "0"]), 4);
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn zero_workers_are_rejected() {
        let err = BenchConfig::from_args(parse(&["-w", "2,0,4"]), 4);
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn zero_block_size_is_rejected() {
        let err = BenchConfig::from_args(parse(&["-b", "0"]), 4);
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn default_worker_counts_by_core_count() {
        assert_eq!(default_worker_counts(1), vec![1]);
        assert_eq!(default_worker_counts(2), vec![2]);
        assert_eq!(default_worker_counts(6), vec![2, 4, 6]);
        assert_eq!(default_worker_counts(8), vec![2, 4, 8]);
        assert_eq!(default_worker_counts(12), vec![2, 4, 8, 12]);
    }
}
