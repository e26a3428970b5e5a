//! Approximate element-wise comparison of result matrices.

use crate::matrix::Matrix;

/// Relative and absolute tolerances for [`verify`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub rel: f64,
    pub abs: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rel: 1e-5,
            abs: 1e-8,
        }
    }
}

/// Returns `true` when every element satisfies
/// `|candidate - reference| <= abs + rel * |reference|`.
///
/// Matrices of different size never match. A mismatch is a result for the
/// caller to act on, not an error.
pub fn verify(candidate: &Matrix, reference: &Matrix, tol: Tolerance) -> bool {
    if candidate.size() != reference.size() {
        return false;
    }
    candidate
        .as_slice()
        .iter()
        .zip(reference.as_slice())
        .all(|(&a, &b)| (a - b).abs() <= tol.abs + tol.rel * b.abs())
}
