//! Reference dense kernel
//!
//! The plain `i, j, k` triple loop. Every other dense strategy is checked
//! against it.

use std::ops::AddAssign;

use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use num_traits::Num;

use crate::error::{MatrixError, Result};

/// Computes `a · b` with the reference triple loop
///
/// # Errors
///
/// Returns [`MatrixError::DimensionMismatch`] unless `a.ncols() == b.nrows()`.
pub fn multiply_naive<T>(a: ArrayView2<'_, T>, b: ArrayView2<'_, T>) -> Result<Array2<T>>
where
    T: Copy + Num + AddAssign,
{
    check_inner_dims("naive multiply", a, b)?;

    let mut c = Array2::from_elem((a.nrows(), b.ncols()), T::zero());
    multiply_band(a, b, 0, c.view_mut());
    Ok(c)
}

/// Fails unless `a`'s column count equals `b`'s row count
pub(crate) fn check_inner_dims<T>(
    operation: &'static str,
    a: ArrayView2<'_, T>,
    b: ArrayView2<'_, T>,
) -> Result<()> {
    if a.ncols() != b.nrows() {
        return Err(MatrixError::mismatch(operation, a.ncols(), b.nrows()));
    }
    Ok(())
}

/// Writes rows `first_row .. first_row + out.nrows()` of `a · b` into `out`
pub(crate) fn multiply_band<T>(
    a: ArrayView2<'_, T>,
    b: ArrayView2<'_, T>,
    first_row: usize,
    mut out: ArrayViewMut2<'_, T>,
) where
    T: Copy + Num + AddAssign,
{
    let inner = a.ncols();

    for (r, mut out_row) in out.rows_mut().into_iter().enumerate() {
        let a_row = a.row(first_row + r);
        for (j, cell) in out_row.iter_mut().enumerate() {
            let mut sum = T::zero();
            for k in 0..inner {
                sum += a_row[k] * b[[k, j]];
            }
            *cell = sum;
        }
    }
}
