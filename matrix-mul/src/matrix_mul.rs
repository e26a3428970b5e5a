//! Sequential and multi-threaded matrix multiplication.

use std::ops::Range;
use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::Error;
use crate::matrix::Matrix;
use crate::partition::{row_partitions, tile_partitions, tiles_per_edge};

/// A computed result matrix together with the wall-clock time it took.
#[derive(Debug, Clone)]
pub struct Product {
    pub matrix: Matrix,
    pub elapsed: Duration,
}

impl Product {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Owns the two square operands and computes `C = A × B` either on the
/// calling thread or across a set of worker threads.
///
/// Every parallel call launches its own workers and joins all of them before
/// returning, so thread startup and teardown are part of the measured time.
/// Workers share A and B read-only and each one receives exclusive mutable
/// access to a disjoint slice of the result buffer, so writes to C never
/// take a lock.
///
/// # Example
///
/// ```
/// use matrix_mul::{Matrix, MatrixMul, Tolerance, verify};
///
/// let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
/// let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]])?;
/// let mm = MatrixMul::new(a, b)?;
///
/// let seq = mm.multiply_sequential();
/// assert_eq!(seq.matrix.to_rows(), vec![vec![19.0, 22.0], vec![43.0, 50.0]]);
///
/// let par = mm.multiply_parallel(2)?;
/// assert!(verify(&par.matrix, &seq.matrix, Tolerance::default()));
/// # Ok::<(), matrix_mul::Error>(())
/// ```
pub struct MatrixMul {
    a: Matrix,
    b: Matrix,
}

impl MatrixMul {
    pub fn new(a: Matrix, b: Matrix) -> Result<Self, Error> {
        if a.size() != b.size() {
            return Err(Error::DimensionMismatch(a.size(), b.size()));
        }
        Ok(Self { a, b })
    }

    /// Builds N×N operands with uniform values in `[0, 1)`.
    ///
    /// The same seed always yields the same operands; without one the RNG is
    /// seeded from OS entropy.
    pub fn random(n: usize, seed: Option<u64>) -> Result<Self, Error> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let a = Matrix::random(n, &mut rng)?;
        let b = Matrix::random(n, &mut rng)?;
        Self::new(a, b)
    }

    pub fn size(&self) -> usize {
        self.a.size()
    }

    pub fn a(&self) -> &Matrix {
        &self.a
    }

    pub fn b(&self) -> &Matrix {
        &self.b
    }

    /// Single-threaded baseline. The timer covers the multiply only, not the
    /// allocation of C.
    pub fn multiply_sequential(&self) -> Product {
        let n = self.size();
        let mut c = self.a.zeros_like();

        let start = Instant::now();
        multiply_rows(&self.a, &self.b, 0..n, c.as_mut_slice());
        let elapsed = start.elapsed();

        info!(n, elapsed_ms = elapsed.as_secs_f64() * 1e3, "sequential multiplication finished");
        Product { matrix: c, elapsed }
    }

    /// Row-partitioned parallel multiply.
    ///
    /// Worker `p` owns rows `[p * N/P, (p + 1) * N/P)`; the last worker also
    /// takes the remainder.
    pub fn multiply_parallel(&self, workers: usize) -> Result<Product, Error> {
        if workers == 0 {
            return Err(Error::InvalidWorkerCount(workers));
        }
        let n = self.size();
        let mut c = self.a.zeros_like();
        let (a, b) = (&self.a, &self.b);

        let start = Instant::now();
        let parts = row_partitions(n, workers);
        debug_assert!(crate::partition::covers_exactly(&parts, n));
        debug!(n, workers, ?parts, "row partitions");

        let mut rest = c.as_mut_slice();
        let mut assignments = Vec::with_capacity(workers);
        for rows in parts {
            let (mine, tail) = std::mem::take(&mut rest).split_at_mut(rows.len() * n);
            rest = tail;
            assignments.push((rows, mine));
        }

        run_workers("rows", assignments, |rows, out| multiply_rows(a, b, rows, out))?;
        let elapsed = start.elapsed();

        info!(
            n,
            workers,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            "row-parallel multiplication finished"
        );
        Ok(Product { matrix: c, elapsed })
    }

    /// Tile-partitioned parallel multiply.
    ///
    /// C is cut into `ceil(N / block_size)²` tiles, numbered row by row; the
    /// tile index space is split across workers the same way rows are.
    /// Boundary tiles are clipped to the matrix edge.
    pub fn multiply_parallel_blocked(
        &self,
        workers: usize,
        block_size: usize,
    ) -> Result<Product, Error> {
        if workers == 0 {
            return Err(Error::InvalidWorkerCount(workers));
        }
        if block_size == 0 {
            return Err(Error::InvalidBlockSize(block_size));
        }
        let n = self.size();
        let mut c = self.a.zeros_like();
        let (a, b) = (&self.a, &self.b);

        let start = Instant::now();
        let parts = tile_partitions(n, block_size, workers);
        let edge = tiles_per_edge(n, block_size);
        debug_assert!(crate::partition::covers_exactly(&parts, edge * edge));
        debug!(n, workers, block_size, tiles = edge * edge, ?parts, "tile partitions");

        let mut tiles = split_tiles(c.as_mut_slice(), n, block_size).into_iter();
        let mut assignments = Vec::with_capacity(workers);
        for range in parts {
            let mine: Vec<Tile<'_>> = tiles.by_ref().take(range.len()).collect();
            assignments.push((range, mine));
        }

        run_workers("tiles", assignments, |_, mine| {
            for mut tile in mine {
                multiply_tile(a, b, &mut tile, block_size);
            }
        })?;
        let elapsed = start.elapsed();

        info!(
            n,
            workers,
            block_size,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            "tile-parallel multiplication finished"
        );
        Ok(Product { matrix: c, elapsed })
    }
}

/// Accumulates rows `rows` of `A × B` into `out`, which must hold exactly
/// those rows and start zeroed. Uses i-k-j order so B is walked row-wise.
fn multiply_rows(a: &Matrix, b: &Matrix, rows: Range<usize>, out: &mut [f64]) {
    let n = a.size();
    for (i, c_row) in rows.zip(out.chunks_exact_mut(n)) {
        for (k, &a_ik) in a.row(i).iter().enumerate() {
            for (c, &b_kj) in c_row.iter_mut().zip(b.row(k)) {
                *c += a_ik * b_kj;
            }
        }
    }
}

/// One output tile: the row segments of C it covers plus its top-left
/// coordinate.
struct Tile<'c> {
    row0: usize,
    col0: usize,
    rows: Vec<&'c mut [f64]>,
}

/// Cuts the result buffer into per-tile mutable row segments, ordered by
/// flattened tile index.
fn split_tiles(c: &mut [f64], n: usize, block_size: usize) -> Vec<Tile<'_>> {
    let edge = tiles_per_edge(n, block_size);
    let mut tiles: Vec<Tile<'_>> = (0..edge * edge)
        .map(|t| Tile {
            row0: (t / edge) * block_size,
            col0: (t % edge) * block_size,
            rows: Vec::with_capacity(block_size.min(n)),
        })
        .collect();

    for (i, row) in c.chunks_mut(n).enumerate() {
        let bi = i / block_size;
        for (bj, segment) in row.chunks_mut(block_size).enumerate() {
            tiles[bi * edge + bj].rows.push(segment);
        }
    }
    tiles
}

fn multiply_tile(a: &Matrix, b: &Matrix, tile: &mut Tile<'_>, block_size: usize) {
    let n = a.size();
    for k0 in (0..n).step_by(block_size) {
        let k_end = (k0 + block_size).min(n);
        for (di, c_seg) in tile.rows.iter_mut().enumerate() {
            let a_row = a.row(tile.row0 + di);
            for k in k0..k_end {
                let a_ik = a_row[k];
                let b_seg = &b.row(k)[tile.col0..tile.col0 + c_seg.len()];
                for (c, &b_kj) in c_seg.iter_mut().zip(b_seg) {
                    *c += a_ik * b_kj;
                }
            }
        }
    }
}

/// Launches one scoped thread per assignment and joins every one of them.
///
/// Each assignment pairs the index range a worker owns with the data it
/// works on. Fails with `WorkerFailure` naming the first worker that
/// panicked; the caller must then discard the result buffer.
fn run_workers<W, F>(label: &str, assignments: Vec<(Range<usize>, W)>, work: F) -> Result<(), Error>
where
    W: Send,
    F: Fn(Range<usize>, W) + Sync,
{
    let work = &work;
    thread::scope(|s| {
        let mut handles = Vec::with_capacity(assignments.len());
        let mut spawn_error = None;

        for (worker, (range, unit)) in assignments.into_iter().enumerate() {
            debug!(worker, start = range.start, end = range.end, "launching {} worker", label);
            let owned = range.clone();
            let spawned = thread::Builder::new()
                .name(format!("matmul-{}-{}", label, worker))
                .spawn_scoped(s, move || work(owned, unit));
            match spawned {
                Ok(handle) => handles.push((worker, range, handle)),
                Err(e) => {
                    spawn_error = Some(Error::Spawn(e));
                    break;
                }
            }
        }

        let joined = join_workers(handles);
        match spawn_error {
            Some(e) => Err(e),
            None => joined,
        }
    })
}

fn join_workers(handles: Vec<(usize, Range<usize>, ScopedJoinHandle<'_, ()>)>) -> Result<(), Error> {
    let mut failure = None;
    for (worker, range, handle) in handles {
        if handle.join().is_err() && failure.is_none() {
            failure = Some(Error::WorkerFailure {
                worker,
                start: range.start,
                end: range.end,
            });
        }
    }
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
