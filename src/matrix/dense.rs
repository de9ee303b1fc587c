//! Dense matrix helpers
//!
//! Dense operands are plain `ndarray::Array2` values. The only way to hand
//! the library a ragged grid is through [`dense_from_rows`], which rejects it.

use ndarray::{Array2, ArrayView2};
use num_traits::Num;

use crate::error::{MatrixError, Result};

/// Row-major dense matrix storage
pub type DenseMatrix<T> = Array2<T>;

/// Builds a dense matrix from a slice of rows
///
/// # Errors
///
/// Returns [`MatrixError::InvalidShape`] when `rows` is empty or when any
/// row's length differs from the first row's.
pub fn dense_from_rows<T: Copy>(rows: &[Vec<T>]) -> Result<DenseMatrix<T>> {
    let n_cols = check_rows(rows)?;
    let data: Vec<T> = rows.iter().flat_map(|row| row.iter().copied()).collect();

    Array2::from_shape_vec((rows.len(), n_cols), data)
        .map_err(|e| MatrixError::invalid_shape(e.to_string()))
}

/// Validates that `rows` is non-empty and rectangular, returning the column count
pub(crate) fn check_rows<T>(rows: &[Vec<T>]) -> Result<usize> {
    let first = rows
        .first()
        .ok_or_else(|| MatrixError::invalid_shape("matrix has no rows"))?;
    let n_cols = first.len();

    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n_cols) {
        return Err(MatrixError::invalid_shape(format!(
            "row {} has {} entries, expected {}",
            i,
            row.len(),
            n_cols
        )));
    }

    Ok(n_cols)
}

/// Creates an `n × n` identity matrix
pub fn identity<T: Copy + Num>(n: usize) -> DenseMatrix<T> {
    let mut m = Array2::from_elem((n, n), T::zero());
    for i in 0..n {
        m[[i, i]] = T::one();
    }
    m
}

/// Number of entries exactly equal to zero
pub fn count_zeros<T: Copy + Num>(m: ArrayView2<'_, T>) -> usize {
    m.iter().filter(|v| v.is_zero()).count()
}
