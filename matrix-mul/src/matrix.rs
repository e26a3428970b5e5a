//! Square row-major matrix storage.

use rand::Rng;

use crate::Error;

/// A dense N×N matrix of `f64` values stored row-major in one contiguous
/// buffer.
///
/// The size is fixed at construction. Element `(i, j)` lives at
/// `data[i * n + j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates an N×N matrix filled with zeros.
    pub fn zeros(n: usize) -> Result<Self, Error> {
        let len = element_count(n)?;
        Ok(Self {
            n,
            data: vec![0.0; len],
        })
    }

    /// Wraps an existing row-major buffer of exactly `n * n` elements.
    pub fn from_vec(n: usize, data: Vec<f64>) -> Result<Self, Error> {
        let len = element_count(n)?;
        if data.len() != len {
            return Err(Error::InvalidDimension(format!(
                "expected {} elements for a {}x{} matrix, got {}",
                len,
                n,
                n,
                data.len()
            )));
        }
        Ok(Self { n, data })
    }

    /// Builds a matrix from nested rows, rejecting ragged or non-square input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, Error> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::InvalidDimension("matrix has no rows".into()));
        }
        let mut data = Vec::with_capacity(element_count(n)?);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(Error::InvalidDimension(format!(
                    "row {} has {} columns, expected {} for a square matrix",
                    i,
                    row.len(),
                    n
                )));
            }
            data.extend(row);
        }
        Ok(Self { n, data })
    }

    /// Fills an N×N matrix with uniform values in `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Self, Error> {
        let mut matrix = Self::zeros(n)?;
        for value in &mut matrix.data {
            *value = rng.gen_range(0.0..1.0);
        }
        Ok(matrix)
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// A zeroed matrix of the same size.
    pub(crate) fn zeros_like(&self) -> Matrix {
        Matrix {
            n: self.n,
            data: vec![0.0; self.n * self.n],
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Copies the matrix out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.n).map(|row| row.to_vec()).collect()
    }
}

/// `n * n`, rejecting an empty matrix and sizes whose element count does
/// not fit in `usize`.
fn element_count(n: usize) -> Result<usize, Error> {
    if n == 0 {
        return Err(Error::InvalidDimension("matrix size must be at least 1".into()));
    }
    n.checked_mul(n).ok_or_else(|| {
        Error::InvalidDimension(format!("a {}x{} matrix has too many elements", n, n))
    })
}
