//! Conversion functions between matrix formats

use ndarray::Array2;
use num_traits::Num;

use crate::matrix::{SparseMatrixCSC, SparseMatrixCSR};

impl<T: Copy + Num> SparseMatrixCSR<T> {
    /// Converts this CSR matrix to CSC format
    pub fn to_csc(&self) -> SparseMatrixCSC<T> {
        let col_ptr = counts_to_pointers(&self.col_idx, self.n_cols);

        let nnz = self.nnz();
        let mut row_idx = vec![0; nnz];
        let mut values = vec![T::zero(); nnz];

        // Rows are visited in ascending order, so each column fills in ascending row order
        let mut next = col_ptr.clone();

        for i in 0..self.n_rows {
            for (col, &val) in self.row_iter(i) {
                let pos = next[col];
                row_idx[pos] = i;
                values[pos] = val;
                next[col] += 1;
            }
        }

        SparseMatrixCSC {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            col_ptr,
            row_idx,
            values,
        }
    }

    /// Expands this matrix back into dense storage
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::from_elem((self.n_rows, self.n_cols), T::zero());
        for i in 0..self.n_rows {
            for (col, &val) in self.row_iter(i) {
                dense[[i, col]] = val;
            }
        }
        dense
    }
}

impl<T: Copy + Num> SparseMatrixCSC<T> {
    /// Converts this CSC matrix to CSR format
    pub fn to_csr(&self) -> SparseMatrixCSR<T> {
        let row_ptr = counts_to_pointers(&self.row_idx, self.n_rows);

        let nnz = self.nnz();
        let mut col_idx = vec![0; nnz];
        let mut values = vec![T::zero(); nnz];

        let mut next = row_ptr.clone();

        for j in 0..self.n_cols {
            for (row, &val) in self.col_iter(j) {
                let pos = next[row];
                col_idx[pos] = j;
                values[pos] = val;
                next[row] += 1;
            }
        }

        SparseMatrixCSR {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Expands this matrix back into dense storage
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::from_elem((self.n_rows, self.n_cols), T::zero());
        for j in 0..self.n_cols {
            for (row, &val) in self.col_iter(j) {
                dense[[row, j]] = val;
            }
        }
        dense
    }
}

/// Histogram of `indices` over `0..n`, turned into pointers via prefix sum
fn counts_to_pointers(indices: &[usize], n: usize) -> Vec<usize> {
    let mut counts = vec![0; n];
    for &idx in indices {
        counts[idx] += 1;
    }
    crate::utils::exclusive_scan(&counts)
}
