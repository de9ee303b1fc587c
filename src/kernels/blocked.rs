//! Cache-blocked dense kernel
//!
//! The index space `[0, n)` is cut into tiles of `tile_size` along `i`, `j`
//! and `k`. Each tile triple runs the reference accumulation restricted to
//! the tile; tiles on the boundary are clipped to `n`. Partial sums are
//! grouped per `k`-tile, so results match the reference kernel only up to
//! floating-point rounding.

use std::ops::AddAssign;

use ndarray::{Array2, ArrayView2};
use num_traits::Num;

use crate::error::{MatrixError, Result};

/// Computes `a · b` for square `n × n` operands using `tile_size` tiles
///
/// # Errors
///
/// - [`MatrixError::InvalidParameter`] if `tile_size` is 0
/// - [`MatrixError::InvalidShape`] if `a` is not square
/// - [`MatrixError::DimensionMismatch`] if `b` is not the same shape as `a`
pub fn multiply_blocked<T>(
    a: ArrayView2<'_, T>,
    b: ArrayView2<'_, T>,
    tile_size: usize,
) -> Result<Array2<T>>
where
    T: Copy + Num + AddAssign,
{
    if tile_size == 0 {
        return Err(MatrixError::invalid_parameter(
            "tile_size",
            "must be at least 1",
        ));
    }

    let n = a.nrows();
    if a.ncols() != n {
        return Err(MatrixError::invalid_shape(format!(
            "blocked multiply needs a square left operand, got {}x{}",
            n,
            a.ncols()
        )));
    }
    if b.nrows() != n {
        return Err(MatrixError::mismatch("blocked multiply", n, b.nrows()));
    }
    if b.ncols() != n {
        return Err(MatrixError::mismatch("blocked multiply", n, b.ncols()));
    }

    let mut c = Array2::from_elem((n, n), T::zero());

    for i0 in (0..n).step_by(tile_size) {
        let i1 = (i0 + tile_size).min(n);
        for j0 in (0..n).step_by(tile_size) {
            let j1 = (j0 + tile_size).min(n);
            for k0 in (0..n).step_by(tile_size) {
                let k1 = (k0 + tile_size).min(n);

                for ii in i0..i1 {
                    for jj in j0..j1 {
                        let mut sum = T::zero();
                        for kk in k0..k1 {
                            sum += a[[ii, kk]] * b[[kk, jj]];
                        }
                        c[[ii, jj]] += sum;
                    }
                }
            }
        }
    }

    Ok(c)
}
