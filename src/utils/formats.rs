//! Utilities for converting between our sparse formats and `sprs`

use num_traits::Num;
use sprs::CsMat;

use crate::error::{MatrixError, Result};
use crate::matrix::{SparseMatrixCSC, SparseMatrixCSR};

/// Converts our CSR matrix format to sprs CsMat format
///
/// # Errors
///
/// Returns [`MatrixError::InvalidShape`] if sprs rejects the structure.
pub fn to_sprs_csr<T>(matrix: &SparseMatrixCSR<T>) -> Result<CsMat<T>>
where
    T: Copy + Num + Default,
{
    CsMat::try_new(
        (matrix.rows(), matrix.cols()),
        matrix.row_pointers().to_vec(),
        matrix.col_indices().to_vec(),
        matrix.values().to_vec(),
    )
    .map_err(|(_, _, _, e)| MatrixError::invalid_shape(format!("sprs rejected CSR: {:?}", e)))
}

/// Converts our CSC matrix format to sprs CsMat format (as CSC)
///
/// # Errors
///
/// Returns [`MatrixError::InvalidShape`] if sprs rejects the structure.
pub fn to_sprs_csc<T>(matrix: &SparseMatrixCSC<T>) -> Result<CsMat<T>>
where
    T: Copy + Num + Default,
{
    CsMat::try_new_csc(
        (matrix.rows(), matrix.cols()),
        matrix.col_pointers().to_vec(),
        matrix.row_indices().to_vec(),
        matrix.values().to_vec(),
    )
    .map_err(|(_, _, _, e)| MatrixError::invalid_shape(format!("sprs rejected CSC: {:?}", e)))
}

/// Converts a sprs CsMat (either storage) to our SparseMatrixCSR format
///
/// Explicitly stored zeros in `matrix` are kept as stored entries.
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> Result<SparseMatrixCSR<T>>
where
    T: Copy + Num + Default,
{
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSR::from_parts(n_rows, n_cols, indptr, indices, data)
}

/// Converts a sprs CsMat (either storage) to our SparseMatrixCSC format
///
/// Explicitly stored zeros in `matrix` are kept as stored entries.
pub fn from_sprs_csc<T>(matrix: CsMat<T>) -> Result<SparseMatrixCSC<T>>
where
    T: Copy + Num + Default,
{
    let matrix = if matrix.is_csc() {
        matrix
    } else {
        matrix.to_csc()
    };

    let (n_rows, n_cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSC::from_parts(n_rows, n_cols, indptr, indices, data)
}
