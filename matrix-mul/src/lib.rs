//! Dense square matrix multiplication, sequential and multi-threaded.
//!
//! `matrix-mul` computes `C = A × B` for N×N `f64` matrices either on the
//! calling thread or by statically partitioning C across a set of worker
//! threads launched for the call and joined before it returns.
//!
//! # Partitioning
//!
//! - **Rows**: worker `p` owns rows `[p * N/P, (p + 1) * N/P)`, the last
//!   worker also takes the leftover rows.
//! - **Tiles**: C is cut into `block_size`-wide square tiles numbered row by
//!   row, and that tile index space is split across workers the same way.
//!
//! Workers read A and B through shared references and write only into the
//! slice of C handed to them at launch, so no lock guards the result.
//!
//! # Example
//!
//! ```
//! use matrix_mul::{MatrixMul, Tolerance, verify};
//!
//! let mm = MatrixMul::random(64, Some(1))?;
//! let seq = mm.multiply_sequential();
//! let par = mm.multiply_parallel_blocked(4, 16)?;
//!
//! assert!(verify(&par.matrix, &seq.matrix, Tolerance::default()));
//! # Ok::<(), matrix_mul::Error>(())
//! ```

mod error;
mod matrix;
mod matrix_mul;
mod partition;
mod verify;

pub use error::Error;
pub use matrix::Matrix;
pub use matrix_mul::{MatrixMul, Product};
pub use partition::{
    DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE, MIN_BLOCK_SIZE, block_size_from_hint, row_partitions,
    split_even, tile_partitions, tiles_per_edge,
};
pub use verify::{Tolerance, verify};
