//! Dense linear algebra for the least-squares fitter.
//!
//! Design matrices are plain [`DMatrix`] values. Normal-equation matrices are
//! kept in packed upper-triangular form and solved by Cholesky, with an LU
//! fallback for positive semi-definite systems that Cholesky rejects only
//! because of rounding.

use nalgebra::{DMatrix, DVector};

use crate::error::FittingError;

/// Relative pivot size below which a factorization is treated as singular.
const PIVOT_TOLERANCE: f64 = 1e-13;

/// Relative residual accepted from the LU fallback.
const RESIDUAL_TOLERANCE: f64 = 1e-8;

/// A symmetric square matrix storing only its upper triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricMatrix {
    size: usize,
    data: Vec<f64>,
}

impl SymmetricMatrix {
    /// Creates a zero matrix of the given size.
    #[must_use]
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * (size + 1) / 2],
        }
    }

    /// Builds the Gram matrix `AᵗA` of a dense matrix.
    #[must_use]
    pub fn gram(a: &DMatrix<f64>) -> Self {
        let mut result = Self::zeros(a.ncols());
        for i in 0..a.ncols() {
            for j in i..a.ncols() {
                let value = a.column(i).dot(&a.column(j));
                result.set(i, j, value);
            }
        }
        result
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, row: usize, col: usize) -> usize {
        let (i, j) = if row <= col { (row, col) } else { (col, row) };
        i * self.size - i * (i + 1) / 2 + j
    }

    /// Returns the entry at `(row, col)`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[self.index(row, col)]
    }

    /// Sets the entry at `(row, col)` and its mirror.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let k = self.index(row, col);
        self.data[k] = value;
    }

    /// Expands to a full dense matrix.
    #[must_use]
    pub fn to_dense(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.size, self.size, |i, j| self.get(i, j))
    }

    /// Solves `self · x = rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`FittingError::SingularSystem`] if the matrix is rank deficient.
    pub fn solve(&self, rhs: &DVector<f64>) -> Result<DVector<f64>, FittingError> {
        let singular = FittingError::SingularSystem { size: self.size };
        if self.size == 0 {
            return Err(singular);
        }
        let dense = self.to_dense();
        let scale = dense.diagonal().amax();
        if scale <= 0.0 {
            return Err(singular);
        }

        if let Some(cholesky) = dense.clone().cholesky() {
            let l = cholesky.l();
            let min_pivot = l.diagonal().iter().fold(f64::INFINITY, |acc, &d| acc.min(d));
            if min_pivot * min_pivot > PIVOT_TOLERANCE * scale {
                return Ok(cholesky.solve(rhs));
            }
            return Err(singular);
        }

        tracing::debug!(size = self.size, "cholesky rejected normal matrix, trying LU");
        let x = dense.clone().lu().solve(rhs).ok_or(singular.clone())?;
        let residual = (&dense * &x - rhs).norm();
        if residual <= RESIDUAL_TOLERANCE * rhs.norm().max(1.0) && x.iter().all(|v| v.is_finite()) {
            Ok(x)
        } else {
            Err(singular)
        }
    }
}
