//! # Fork-join dense kernel
//!
//! The output row range is split recursively at its midpoint. Bands no wider
//! than the threshold are computed sequentially with the reference per-row
//! formula; wider bands are split into two disjoint mutable row views that
//! run through [`rayon::join`], which returns only after both halves finish.
//!
//! Each task owns its rows outright, so the output needs no locking and the
//! result does not depend on scheduling order.

use std::ops::AddAssign;

use ndarray::{Array2, ArrayView2, ArrayViewMut2, Axis};
use num_traits::Num;
use rayon::ThreadPool;

use crate::constants::PARALLEL_ROW_THRESHOLD;
use crate::error::{MatrixError, Result};
use crate::kernels::naive::{check_inner_dims, multiply_band};

/// Computes `a · b` on the global rayon pool with the default band threshold
///
/// # Errors
///
/// Returns [`MatrixError::DimensionMismatch`] unless `a.ncols() == b.nrows()`.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// use strata::multiply_parallel;
///
/// let a = array![[1.0, 2.0], [3.0, 4.0]];
/// let b = array![[5.0, 6.0], [7.0, 8.0]];
/// let c = multiply_parallel(a.view(), b.view()).unwrap();
/// assert_eq!(c, array![[19.0, 22.0], [43.0, 50.0]]);
/// ```
pub fn multiply_parallel<T>(a: ArrayView2<'_, T>, b: ArrayView2<'_, T>) -> Result<Array2<T>>
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    multiply_parallel_with_threshold(a, b, PARALLEL_ROW_THRESHOLD)
}

/// Computes `a · b`, computing bands of at most `threshold` rows sequentially
///
/// # Errors
///
/// - [`MatrixError::InvalidParameter`] if `threshold` is 0
/// - [`MatrixError::DimensionMismatch`] unless `a.ncols() == b.nrows()`
pub fn multiply_parallel_with_threshold<T>(
    a: ArrayView2<'_, T>,
    b: ArrayView2<'_, T>,
    threshold: usize,
) -> Result<Array2<T>>
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    if threshold == 0 {
        return Err(MatrixError::invalid_parameter(
            "parallel_threshold",
            "must be at least 1",
        ));
    }
    check_inner_dims("parallel multiply", a, b)?;

    let mut c = Array2::from_elem((a.nrows(), b.ncols()), T::zero());
    fork_join_rows(a, b, c.view_mut(), 0, threshold);
    Ok(c)
}

/// Same as [`multiply_parallel_with_threshold`], with the tasks confined to `pool`
pub fn multiply_parallel_in_pool<T>(
    pool: &ThreadPool,
    a: ArrayView2<'_, T>,
    b: ArrayView2<'_, T>,
    threshold: usize,
) -> Result<Array2<T>>
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    pool.install(|| multiply_parallel_with_threshold(a, b, threshold))
}

fn fork_join_rows<T>(
    a: ArrayView2<'_, T>,
    b: ArrayView2<'_, T>,
    out: ArrayViewMut2<'_, T>,
    first_row: usize,
    threshold: usize,
) where
    T: Copy + Num + AddAssign + Send + Sync,
{
    let width = out.nrows();
    if width <= threshold {
        multiply_band(a, b, first_row, out);
        return;
    }

    let mid = width / 2;
    let (top, bottom) = out.split_at(Axis(0), mid);
    rayon::join(
        move || fork_join_rows(a, b, top, first_row, threshold),
        move || fork_join_rows(a, b, bottom, first_row + mid, threshold),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::multiply_naive;

    #[test]
    fn test_matches_naive_across_thresholds() {
        let a = Array2::from_shape_fn((37, 11), |(i, j)| ((i * 7 + j * 3) % 13) as i64 - 6);
        let b = Array2::from_shape_fn((11, 9), |(i, j)| ((i + 2 * j) % 5) as i64);
        let expected = multiply_naive(a.view(), b.view()).unwrap();

        for threshold in [1, 2, 5, 36, 37, 64] {
            let c = multiply_parallel_with_threshold(a.view(), b.view(), threshold).unwrap();
            assert_eq!(c, expected, "threshold {}", threshold);
        }
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let a = Array2::<f64>::eye(2);
        let err = multiply_parallel_with_threshold(a.view(), a.view(), 0).unwrap_err();
        assert!(matches!(
            err,
            MatrixError::InvalidParameter { name: "parallel_threshold", .. }
        ));
    }

    #[test]
    fn test_runs_inside_bounded_pool() {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let a = Array2::from_shape_fn((130, 130), |(i, j)| (i + j) as i64);
        let b = Array2::<i64>::eye(130);

        let c = multiply_parallel_in_pool(&pool, a.view(), b.view(), 16).unwrap();
        assert_eq!(c, a);
    }

    #[test]
    fn test_empty_rows() {
        let a = Array2::<f64>::zeros((0, 3));
        let b = Array2::<f64>::zeros((3, 2));
        let c = multiply_parallel(a.view(), b.view()).unwrap();
        assert_eq!(c.dim(), (0, 2));
    }
}
