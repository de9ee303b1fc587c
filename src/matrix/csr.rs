//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;
use std::ops::AddAssign;

use ndarray::{Array2, ArrayView2};
use num_traits::Num;

use crate::constants::{DEBUG_MAX_ENTRIES, DEBUG_MAX_LINES};
use crate::error::{MatrixError, Result};
use crate::matrix::dense::check_rows;

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing indices into col_idx and values arrays
/// - col_idx: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Within a row, entries are ordered by ascending column. The matrix is never
/// modified after construction; all multiplications allocate their result.
#[derive(Clone, PartialEq)]
pub struct SparseMatrixCSR<T> {
    /// Number of rows in the matrix
    pub(crate) n_rows: usize,

    /// Number of columns in the matrix
    pub(crate) n_cols: usize,

    /// Row pointers (size: n_rows + 1)
    /// row_ptr[i] is the index in col_idx and values where row i starts
    /// row_ptr[n_rows] is equal to nnz
    pub(crate) row_ptr: Vec<usize>,

    /// Column indices (size: nnz)
    pub(crate) col_idx: Vec<usize>,

    /// Non-zero values (size: nnz)
    pub(crate) values: Vec<T>,
}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num,
{
    /// Creates a CSR matrix from its raw arrays
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidShape`] if the arrays are inconsistent:
    /// - row_ptr.len() must be n_rows + 1, start at 0 and never decrease
    /// - col_idx.len() must equal values.len()
    /// - row_ptr[n_rows] must equal col_idx.len()
    /// - every column index must be below n_cols
    /// - column indices must be strictly increasing within each row
    ///
    /// Stored values are taken as given: an explicit zero stays a stored entry.
    pub fn from_parts(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        if row_ptr.len() != n_rows + 1 {
            return Err(MatrixError::invalid_shape(format!(
                "row_ptr has length {}, expected n_rows + 1 = {}",
                row_ptr.len(),
                n_rows + 1
            )));
        }
        if col_idx.len() != values.len() {
            return Err(MatrixError::invalid_shape(
                "col_idx.len() must equal values.len()",
            ));
        }
        if row_ptr[0] != 0 || row_ptr[n_rows] != col_idx.len() {
            return Err(MatrixError::invalid_shape(
                "row_ptr must start at 0 and end at nnz",
            ));
        }
        if row_ptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(MatrixError::invalid_shape("row_ptr must be non-decreasing"));
        }
        if let Some(&col) = col_idx.iter().find(|&&col| col >= n_cols) {
            return Err(MatrixError::invalid_shape(format!(
                "column index {} out of bounds (n_cols = {})",
                col, n_cols
            )));
        }
        if let Some(start) = row_ptr
            .windows(2)
            .find(|w| col_idx[w[0]..w[1]].windows(2).any(|pair| pair[0] >= pair[1]))
            .map(|w| w[0])
        {
            return Err(MatrixError::invalid_shape(format!(
                "column indices must be strictly increasing within a row (entry {})",
                start
            )));
        }

        Ok(Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Compresses a dense matrix, keeping entries that are not exactly zero
    ///
    /// The first pass counts nonzeros so the arrays are allocated once at
    /// their final size; the second pass fills them row by row.
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

        let mut row_ptr = Vec::with_capacity(n_rows + 1);
        let mut col_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        for row in dense.rows() {
            row_ptr.push(values.len());
            for (j, &val) in row.iter().enumerate() {
                if !val.is_zero() {
                    col_idx.push(j);
                    values.push(val);
                }
            }
        }
        row_ptr.push(values.len());

        Ok(Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
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

        let mut row_ptr = Vec::with_capacity(rows.len() + 1);
        let mut col_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        for row in rows {
            row_ptr.push(values.len());
            for (j, &val) in row.iter().enumerate() {
                if !val.is_zero() {
                    col_idx.push(j);
                    values.push(val);
                }
            }
        }
        row_ptr.push(values.len());

        Ok(Self {
            n_rows: rows.len(),
            n_cols,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns declared by the source matrix
    pub fn cols(&self) -> usize {
        self.n_cols
    }

    /// Non-zero values, grouped by row
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Column index of each stored value
    pub fn col_indices(&self) -> &[usize] {
        &self.col_idx
    }

    /// Row boundaries into [`values`](Self::values), length `rows() + 1`
    pub fn row_pointers(&self) -> &[usize] {
        &self.row_ptr
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_idx, value) representing a non-zero element
    pub(crate) fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(i < self.n_rows, "Row index out of bounds");

        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];

        self.col_idx[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&col, val)| (col, val))
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_ptr: vec![0; n_rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self {
            n_rows: n,
            n_cols: n,
            row_ptr: (0..=n).collect(),
            col_idx: (0..n).collect(),
            values: vec![T::one(); n],
        }
    }
}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num + AddAssign,
{
    /// Computes `self · vector`
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`] unless
    /// `vector.len() == self.cols()`.
    pub fn mul_vector(&self, vector: &[T]) -> Result<Vec<T>> {
        if vector.len() != self.n_cols {
            return Err(MatrixError::mismatch(
                "CSR vector multiply",
                self.n_cols,
                vector.len(),
            ));
        }

        let result = self
            .row_ptr
            .windows(2)
            .map(|bounds| {
                let mut sum = T::zero();
                for k in bounds[0]..bounds[1] {
                    sum += self.values[k] * vector[self.col_idx[k]];
                }
                sum
            })
            .collect();

        Ok(result)
    }

    /// Row-scatter product: for every nonzero `(i, col, val)`, adds
    /// `val * dense[col, ..]` to row `i` of the result
    ///
    /// `dense` must have one row per row of this matrix. Rows of `dense`
    /// past `self.cols()` are never read, so for a tall matrix the result is
    /// `self · dense[..cols, ..]`. The result has shape
    /// `self.rows() × dense.ncols()`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`] unless
    /// `dense.nrows() == self.rows()`, or if `self.cols()` exceeds
    /// `dense.nrows()` (a wide matrix has columns with no matching dense row).
    pub fn mul_dense(&self, dense: ArrayView2<'_, T>) -> Result<Array2<T>> {
        if dense.nrows() != self.n_rows {
            return Err(MatrixError::mismatch(
                "CSR dense multiply",
                self.n_rows,
                dense.nrows(),
            ));
        }
        if self.n_cols > dense.nrows() {
            return Err(MatrixError::mismatch(
                "CSR dense multiply",
                self.n_cols,
                dense.nrows(),
            ));
        }

        let mut result = Array2::from_elem((self.n_rows, dense.ncols()), T::zero());

        for (i, mut out_row) in result.rows_mut().into_iter().enumerate() {
            for (col, &val) in self.row_iter(i) {
                for (out, &d) in out_row.iter_mut().zip(dense.row(col).iter()) {
                    *out += val * d;
                }
            }
        }

        Ok(result)
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for SparseMatrixCSR<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSR {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        let max_rows_to_print = DEBUG_MAX_LINES.min(self.n_rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i)?;
                let start = self.row_ptr[i];
                let end = self.row_ptr[i + 1];

                if start == end {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = DEBUG_MAX_ENTRIES.min(end - start);

                    for j in start..(start + max_elements) {
                        write!(f, "({}, {:?}) ", self.col_idx[j], self.values[j])?;
                    }

                    if end - start > max_elements {
                        write!(f, "... ({} more)", end - start - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.n_rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_dense_layout() {
        let dense = array![[0.0, 2.0], [3.0, 0.0]];
        let csr = SparseMatrixCSR::from_dense(dense.view()).unwrap();

        assert_eq!(csr.values(), &[2.0, 3.0]);
        assert_eq!(csr.col_indices(), &[1, 0]);
        assert_eq!(csr.row_pointers(), &[0, 1, 2]);
        assert_eq!(csr.rows(), 2);
        assert_eq!(csr.cols(), 2);
    }

    #[test]
    fn test_from_rows_matches_from_dense() {
        let rows = vec![vec![1.0, 0.0, 2.0], vec![0.0, 0.0, 0.0], vec![4.0, 5.0, 0.0]];
        let dense = array![[1.0, 0.0, 2.0], [0.0, 0.0, 0.0], [4.0, 5.0, 0.0]];

        let a = SparseMatrixCSR::from_rows(&rows).unwrap();
        let b = SparseMatrixCSR::from_dense(dense.view()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.row_pointers(), &[0, 2, 2, 4]);
    }

    #[test]
    fn test_negative_zero_is_not_stored() {
        let csr = SparseMatrixCSR::from_rows(&[vec![-0.0, 1.0]]).unwrap();
        assert_eq!(csr.nnz(), 1);
        assert_eq!(csr.col_indices(), &[1]);
    }

    #[test]
    fn test_row_iter() {
        let matrix = SparseMatrixCSR::from_parts(
            3, 3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        )
        .unwrap();

        let row0: Vec<_> = matrix.row_iter(0).collect();
        assert_eq!(row0, vec![(0, &1), (1, &2)]);

        let row2: Vec<_> = matrix.row_iter(2).collect();
        assert_eq!(row2, vec![(0, &4), (2, &5)]);
    }

    #[test]
    fn test_identity() {
        let identity = SparseMatrixCSR::<i32>::identity(3);

        assert_eq!(identity.nnz(), 3);
        assert_eq!(identity.row_pointers(), &[0, 1, 2, 3]);
        assert_eq!(identity.col_indices(), &[0, 1, 2]);
        assert_eq!(identity.values(), &[1, 1, 1]);
    }

    #[test]
    fn test_invalid_row_ptr() {
        let err = SparseMatrixCSR::from_parts(
            3, 3,
            vec![0, 2, 3], // Missing last element
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        )
        .unwrap_err();
        assert!(matches!(err, MatrixError::InvalidShape { .. }));
    }

    #[test]
    fn test_decreasing_row_ptr() {
        let err = SparseMatrixCSR::from_parts(2, 2, vec![0, 2, 1], vec![0], vec![1.0])
            .unwrap_err();
        assert!(matches!(err, MatrixError::InvalidShape { .. }));
    }

    #[test]
    fn test_mul_vector() {
        let csr = SparseMatrixCSR::from_rows(&[vec![1.0, 0.0, 2.0], vec![0.0, 3.0, 0.0]]).unwrap();
        let y = csr.mul_vector(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(y, vec![7.0, 6.0]);
    }

    #[test]
    fn test_mul_vector_length_mismatch() {
        let csr = SparseMatrixCSR::from_rows(&[vec![1.0, 0.0, 2.0], vec![0.0, 3.0, 0.0]]).unwrap();
        let err = csr.mul_vector(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err, MatrixError::mismatch("CSR vector multiply", 3, 2));
    }

    #[test]
    fn test_mul_dense() {
        let csr = SparseMatrixCSR::from_rows(&[vec![1.0, 2.0], vec![0.0, 3.0]]).unwrap();
        let b = array![[1.0, 0.0, 1.0], [2.0, 1.0, 0.0]];
        let c = csr.mul_dense(b.view()).unwrap();
        assert_eq!(c, array![[5.0, 2.0, 1.0], [6.0, 3.0, 0.0]]);
    }

    #[test]
    fn test_mul_dense_tall_matrix() {
        // 3×2: dense needs 3 rows, and its last row is never read
        let csr = SparseMatrixCSR::from_rows(&[vec![1.0, 2.0], vec![0.0, 3.0], vec![4.0, 0.0]])
            .unwrap();
        let b = array![[1.0, 0.0], [0.0, 1.0], [9.0, 9.0]];
        let c = csr.mul_dense(b.view()).unwrap();
        assert_eq!(c, array![[1.0, 2.0], [0.0, 3.0], [4.0, 0.0]]);
    }

    #[test]
    fn test_mul_dense_wide_matrix_rejected() {
        let csr = SparseMatrixCSR::from_rows(&[vec![1.0, 0.0, 2.0], vec![0.0, 3.0, 0.0]]).unwrap();

        let b = array![[1.0], [1.0]];
        let err = csr.mul_dense(b.view()).unwrap_err();
        assert_eq!(err, MatrixError::mismatch("CSR dense multiply", 3, 2));

        let b = array![[1.0], [1.0], [1.0]];
        let err = csr.mul_dense(b.view()).unwrap_err();
        assert_eq!(err, MatrixError::mismatch("CSR dense multiply", 2, 3));
    }

    #[test]
    fn test_unsorted_column_indices_rejected() {
        let err = SparseMatrixCSR::from_parts(1, 3, vec![0, 2], vec![2, 0], vec![1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, MatrixError::InvalidShape { .. }));
    }

    #[test]
    fn test_duplicate_column_indices_rejected() {
        let err = SparseMatrixCSR::from_parts(2, 3, vec![0, 1, 3], vec![0, 1, 1], vec![1.0, 2.0, 3.0])
            .unwrap_err();
        assert!(matches!(err, MatrixError::InvalidShape { .. }));
    }

    #[test]
    fn test_index_order_resets_per_row() {
        // Column 2 then column 0 is fine when they sit in different rows
        let csr = SparseMatrixCSR::from_parts(2, 3, vec![0, 1, 2], vec![2, 0], vec![1.0, 2.0])
            .unwrap();
        assert_eq!(csr.to_dense(), array![[0.0, 0.0, 1.0], [2.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_explicit_zero_kept_from_parts() {
        let csr = SparseMatrixCSR::from_parts(1, 2, vec![0, 1], vec![1], vec![0.0]).unwrap();
        assert_eq!(csr.nnz(), 1);
        assert_eq!(csr.mul_vector(&[1.0, 1.0]).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_debug_output() {
        let csr = SparseMatrixCSR::from_rows(&[vec![0.0, 2.0], vec![0.0, 0.0]]).unwrap();
        let text = format!("{:?}", csr);
        assert!(text.contains("dimensions: 2 × 2"));
        assert!(text.contains("row 0: (1, 2.0)"));
        assert!(text.contains("row 1: (empty)"));
    }
}
