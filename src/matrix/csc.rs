//! Compressed Sparse Column (CSC) matrix format implementation

use std::fmt;
use std::ops::AddAssign;

use ndarray::{Array2, ArrayView2};
use num_traits::Num;

use crate::constants::{DEBUG_MAX_ENTRIES, DEBUG_MAX_LINES};
use crate::error::{MatrixError, Result};
use crate::matrix::dense::check_rows;

/// A sparse matrix in Compressed Sparse Column (CSC) format
///
/// The CSC format stores a sparse matrix using three arrays:
/// - col_ptr: Array of size n_cols + 1 containing indices into row_idx and values arrays
/// - row_idx: Array of size nnz containing row indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Within a column, entries are ordered by ascending row.
#[derive(Clone, PartialEq)]
pub struct SparseMatrixCSC<T> {
    /// Number of rows in the matrix
    pub(crate) n_rows: usize,

    /// Number of columns in the matrix
    pub(crate) n_cols: usize,

    /// Column pointers (size: n_cols + 1)
    /// col_ptr[j] is the index in row_idx and values where column j starts
    /// col_ptr[n_cols] is equal to nnz
    pub(crate) col_ptr: Vec<usize>,

    /// Row indices (size: nnz)
    pub(crate) row_idx: Vec<usize>,

    /// Non-zero values (size: nnz)
    pub(crate) values: Vec<T>,
}

impl<T> SparseMatrixCSC<T>
where
    T: Copy + Num,
{
    /// Creates a CSC matrix from its raw arrays
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidShape`] if the arrays are inconsistent:
    /// - col_ptr.len() must be n_cols + 1, start at 0 and never decrease
    /// - row_idx.len() must equal values.len()
    /// - col_ptr[n_cols] must equal row_idx.len()
    /// - every row index must be below n_rows
    /// - row indices must be strictly increasing within each column
    ///
    /// Stored values are taken as given: an explicit zero stays a stored entry.
    pub fn from_parts(
        n_rows: usize,
        n_cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        if col_ptr.len() != n_cols + 1 {
            return Err(MatrixError::invalid_shape(format!(
                "col_ptr has length {}, expected n_cols + 1 = {}",
                col_ptr.len(),
                n_cols + 1
            )));
        }
        if row_idx.len() != values.len() {
            return Err(MatrixError::invalid_shape(
                "row_idx.len() must equal values.len()",
            ));
        }
        if col_ptr[0] != 0 || col_ptr[n_cols] != row_idx.len() {
            return Err(MatrixError::invalid_shape(
                "col_ptr must start at 0 and end at nnz",
            ));
        }
        if col_ptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(MatrixError::invalid_shape("col_ptr must be non-decreasing"));
        }
        if let Some(&row) = row_idx.iter().find(|&&row| row >= n_rows) {
            return Err(MatrixError::invalid_shape(format!(
                "row index {} out of bounds (n_rows = {})",
                row, n_rows
            )));
        }
        if let Some(start) = col_ptr
            .windows(2)
            .find(|w| row_idx[w[0]..w[1]].windows(2).any(|pair| pair[0] >= pair[1]))
            .map(|w| w[0])
        {
            return Err(MatrixError::invalid_shape(format!(
                "row indices must be strictly increasing within a column (entry {})",
                start
            )));
        }

        Ok(Self {
            n_rows,
            n_cols,
            col_ptr,
            row_idx,
            values,
        })
    }

    /// Compresses a dense matrix column by column, keeping entries that are
    /// not exactly zero
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidShape`] if `dense` has no rows.
    pub fn from_dense(dense: ArrayView2<'_, T>) -> Result<Self> {
        let (n_rows, n_cols) = dense.dim();
        if n_rows == 0 {
            return Err(MatrixError::invalid_shape("matrix has no rows"));
        }

        let nnz = dense.iter().filter(|v| !v.is_zero()).count();

        let mut col_ptr = Vec::with_capacity(n_cols + 1);
        let mut row_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        for column in dense.columns() {
            col_ptr.push(values.len());
            for (i, &val) in column.iter().enumerate() {
                if !val.is_zero() {
                    row_idx.push(i);
                    values.push(val);
                }
            }
        }
        col_ptr.push(values.len());

        Ok(Self {
            n_rows,
            n_cols,
            col_ptr,
            row_idx,
            values,
        })
    }

    /// Compresses a dense matrix given as a slice of rows
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidShape`] for an empty or ragged input.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let n_cols = check_rows(rows)?;
        let nnz = rows.iter().flatten().filter(|v| !v.is_zero()).count();

        let mut col_ptr = Vec::with_capacity(n_cols + 1);
        let mut row_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        for j in 0..n_cols {
            col_ptr.push(values.len());
            for (i, row) in rows.iter().enumerate() {
                if !row[j].is_zero() {
                    row_idx.push(i);
                    values.push(row[j]);
                }
            }
        }
        col_ptr.push(values.len());

        Ok(Self {
            n_rows: rows.len(),
            n_cols,
            col_ptr,
            row_idx,
            values,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.n_cols
    }

    /// Non-zero values, grouped by column
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Row index of each stored value
    pub fn row_indices(&self) -> &[usize] {
        &self.row_idx
    }

    /// Column boundaries into [`values`](Self::values), length `cols() + 1`
    pub fn col_pointers(&self) -> &[usize] {
        &self.col_ptr
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over the non-zero elements in column j
    ///
    /// Each item is a tuple (row_idx, value) representing a non-zero element
    pub(crate) fn col_iter(&self, j: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(j < self.n_cols, "Column index out of bounds");

        let start = self.col_ptr[j];
        let end = self.col_ptr[j + 1];

        self.row_idx[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&row, val)| (row, val))
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            col_ptr: vec![0; n_cols + 1],
            row_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self {
            n_rows: n,
            n_cols: n,
            col_ptr: (0..=n).collect(),
            row_idx: (0..n).collect(),
            values: vec![T::one(); n],
        }
    }
}

impl<T> SparseMatrixCSC<T>
where
    T: Copy + Num + AddAssign,
{
    /// Column-scatter product: for every column `j` and every nonzero
    /// `(row, val)` in it, adds `val * dense[j, ..]` to row `row` of the result
    ///
    /// The sparse column index pairs with the dense row index, so the result
    /// has shape `self.rows() × dense.ncols()`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`] unless
    /// `dense.nrows() == self.cols()`.
    pub fn mul_dense(&self, dense: ArrayView2<'_, T>) -> Result<Array2<T>> {
        if dense.nrows() != self.n_cols {
            return Err(MatrixError::mismatch(
                "CSC dense multiply",
                self.n_cols,
                dense.nrows(),
            ));
        }

        let mut result = Array2::from_elem((self.n_rows, dense.ncols()), T::zero());

        for (j, dense_row) in dense.rows().into_iter().enumerate() {
            for (row, &val) in self.col_iter(j) {
                for (out, &d) in result.row_mut(row).iter_mut().zip(dense_row.iter()) {
                    *out += val * d;
                }
            }
        }

        Ok(result)
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for SparseMatrixCSC<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSC {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let max_cols_to_print = DEBUG_MAX_LINES.min(self.n_cols);

        if max_cols_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for j in 0..max_cols_to_print {
                write!(f, "    col {}: ", j)?;
                let start = self.col_ptr[j];
                let end = self.col_ptr[j + 1];

                if start == end {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = DEBUG_MAX_ENTRIES.min(end - start);

                    for i in start..(start + max_elements) {
                        write!(f, "({}, {:?}) ", self.row_idx[i], self.values[i])?;
                    }

                    if end - start > max_elements {
                        write!(f, "... ({} more)", end - start - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.n_cols > max_cols_to_print {
                writeln!(f, "    ... ({} more columns)", self.n_cols - max_cols_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
