//! # Sparse × dense multiplication engine
//!
//! [`SparseMatrixEngine`] holds a CSR and a CSC view of one logical matrix,
//! both compressed independently from the same dense snapshot, and routes
//! each product to the representation whose layout suits it:
//!
//! - vector products and row-scatter products go through CSR
//! - column-scatter products go through CSC
//!
//! Each operation checks operand sizes before allocating its result.

use std::fmt;
use std::ops::AddAssign;

use ndarray::{Array2, ArrayView2};
use num_traits::Num;

use crate::error::{MatrixError, Result};
use crate::matrix::{SparseMatrixCSC, SparseMatrixCSR};

/// Dual-representation sparse matrix
#[derive(Clone)]
pub struct SparseMatrixEngine<T> {
    csr: SparseMatrixCSR<T>,
    csc: SparseMatrixCSC<T>,
}

impl<T> SparseMatrixEngine<T>
where
    T: Copy + Num + AddAssign,
{
    /// Compresses `dense` into both layouts
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidShape`] if `dense` has no rows.
    pub fn new(dense: ArrayView2<'_, T>) -> Result<Self> {
        let csr = SparseMatrixCSR::from_dense(dense)?;
        let csc = SparseMatrixCSC::from_dense(dense)?;
        Ok(Self::from_views(csr, csc))
    }

    /// Compresses a dense matrix given as a slice of rows into both layouts
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidShape`] for an empty or ragged input.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let csr = SparseMatrixCSR::from_rows(rows)?;
        let csc = SparseMatrixCSC::from_rows(rows)?;
        Ok(Self::from_views(csr, csc))
    }

    fn from_views(csr: SparseMatrixCSR<T>, csc: SparseMatrixCSC<T>) -> Self {
        log::debug!(
            "built sparse engine: {}x{} with {} nonzeros",
            csr.rows(),
            csr.cols(),
            csr.nnz()
        );
        Self { csr, csc }
    }

    /// Row-major view
    pub fn csr(&self) -> &SparseMatrixCSR<T> {
        &self.csr
    }

    /// Column-major view
    pub fn csc(&self) -> &SparseMatrixCSC<T> {
        &self.csc
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.csr.rows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.csr.cols()
    }

    /// Number of stored nonzeros
    pub fn nnz(&self) -> usize {
        self.csr.nnz()
    }

    /// Fraction of stored entries, `nnz / (rows * cols)`
    pub fn density(&self) -> f64 {
        let cells = self.rows() * self.cols();
        if cells == 0 {
            0.0
        } else {
            self.nnz() as f64 / cells as f64
        }
    }

    /// Matrix × vector through the CSR view
    ///
    /// The vector length is checked against the row count. The CSR product
    /// then also requires it to equal the column count, so a non-square
    /// matrix rejects every vector.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`] if either check fails.
    pub fn multiply_with_vector(&self, vector: &[T]) -> Result<Vec<T>> {
        if vector.len() != self.csr.rows() {
            return Err(MatrixError::mismatch(
                "engine vector multiply",
                self.csr.rows(),
                vector.len(),
            ));
        }
        self.csr.mul_vector(vector)
    }

    /// Matrix × dense through the CSR row-scatter product
    ///
    /// Tall matrices are accepted: dense rows past `cols()` are not read.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`] unless `dense` has as many
    /// rows as this matrix. A wide matrix (more columns than rows) is
    /// rejected by the CSR product.
    pub fn multiply_with_csr_dense_matrix(&self, dense: ArrayView2<'_, T>) -> Result<Array2<T>> {
        if dense.nrows() != self.csr.rows() {
            return Err(MatrixError::mismatch(
                "engine CSR dense multiply",
                self.csr.rows(),
                dense.nrows(),
            ));
        }
        log::trace!(
            "CSR dense multiply: {}x{} · {}x{}",
            self.rows(),
            self.cols(),
            dense.nrows(),
            dense.ncols()
        );
        self.csr.mul_dense(dense)
    }

    /// Matrix × dense through the CSC column-scatter product
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`] unless `dense` has as many
    /// columns as this matrix (and, through CSC, as many rows as well).
    pub fn multiply_with_csc_dense_matrix(&self, dense: ArrayView2<'_, T>) -> Result<Array2<T>> {
        if dense.ncols() != self.csc.cols() {
            return Err(MatrixError::mismatch(
                "engine CSC dense multiply",
                self.csc.cols(),
                dense.ncols(),
            ));
        }
        log::trace!(
            "CSC dense multiply: {}x{} · {}x{}",
            self.rows(),
            self.cols(),
            dense.nrows(),
            dense.ncols()
        );
        self.csc.mul_dense(dense)
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for SparseMatrixEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseMatrixEngine")
            .field("csr", &self.csr)
            .field("csc", &self.csc)
            .finish()
    }
}
