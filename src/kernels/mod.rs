//! # Dense kernels and strategy selection
//!
//! Three interchangeable kernels compute a dense × dense product:
//!
//! - [`multiply_naive`]: the reference triple loop
//! - [`multiply_blocked`]: cache tiles over square operands
//! - [`multiply_parallel`]: fork-join over row bands
//!
//! [`select_strategy`] picks one from the operand shapes and a
//! [`KernelConfig`]; [`multiply_dense`] and [`DenseMultiplier`] run the pick.

pub mod blocked;
pub mod naive;
pub mod parallel;

use std::ops::AddAssign;

use ndarray::{Array2, ArrayView2};
use num_traits::Num;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{MatrixError, Result};
use crate::matrix::config::{KernelConfig, Strategy};

pub use blocked::multiply_blocked;
pub use naive::multiply_naive;
pub use parallel::{
    multiply_parallel, multiply_parallel_in_pool, multiply_parallel_with_threshold,
};

/// Resolves [`Strategy::Auto`] for operands of the given shapes
///
/// Explicit strategies are returned unchanged. For `Auto`:
/// - non-square operands go to `Parallel` when there are more rows than
///   `parallel_threshold` and more than one thread, otherwise to `Naive`
/// - square operands that fit in one tile go to `Naive`
/// - square operands taller than `parallel_threshold` go to `Parallel` when
///   more than one thread is configured
/// - everything else goes to `Blocked`
pub fn select_strategy(
    a_dim: (usize, usize),
    b_dim: (usize, usize),
    config: &KernelConfig,
) -> Strategy {
    if config.strategy != Strategy::Auto {
        return config.strategy;
    }

    let (rows, inner) = a_dim;
    let square = rows == inner && b_dim == a_dim;
    let can_fork = rows > config.parallel_threshold && config.n_threads > 1;

    let chosen = if !square {
        if can_fork {
            Strategy::Parallel
        } else {
            Strategy::Naive
        }
    } else if rows <= config.tile_size {
        Strategy::Naive
    } else if can_fork {
        Strategy::Parallel
    } else {
        Strategy::Blocked
    };

    log::debug!(
        "selected {:?} for {}x{} · {}x{}",
        chosen,
        a_dim.0,
        a_dim.1,
        b_dim.0,
        b_dim.1
    );
    chosen
}

/// Computes `a · b` with the strategy chosen by `config`, on the global rayon pool
///
/// # Errors
///
/// Returns [`MatrixError::InvalidParameter`] for an invalid config, and
/// whatever the selected kernel returns for incompatible operands.
pub fn multiply_dense<T>(
    a: ArrayView2<'_, T>,
    b: ArrayView2<'_, T>,
    config: &KernelConfig,
) -> Result<Array2<T>>
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    config.validate()?;

    match select_strategy(a.dim(), b.dim(), config) {
        Strategy::Naive => multiply_naive(a, b),
        Strategy::Blocked => multiply_blocked(a, b, config.tile_size),
        Strategy::Parallel | Strategy::Auto => {
            multiply_parallel_with_threshold(a, b, config.parallel_threshold)
        }
    }
}

/// Dense multiplier owning a bounded worker pool of `config.n_threads` threads
pub struct DenseMultiplier {
    config: KernelConfig,
    pool: ThreadPool,
}

impl DenseMultiplier {
    /// Validates `config` and starts its worker pool
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidParameter`] for an invalid config and
    /// [`MatrixError::ThreadPool`] if the pool cannot be started.
    pub fn new(config: KernelConfig) -> Result<Self> {
        config.validate()?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.n_threads)
            .thread_name(|i| format!("strata-worker-{}", i))
            .build()
            .map_err(|e| MatrixError::ThreadPool(e.to_string()))?;

        log::debug!("started dense multiplier with {} workers", config.n_threads);
        Ok(Self { config, pool })
    }

    /// Config this multiplier was built with
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Computes `a · b`; parallel work runs only on this multiplier's pool
    pub fn multiply<T>(&self, a: ArrayView2<'_, T>, b: ArrayView2<'_, T>) -> Result<Array2<T>>
    where
        T: Copy + Num + AddAssign + Send + Sync,
    {
        match select_strategy(a.dim(), b.dim(), &self.config) {
            Strategy::Naive => multiply_naive(a, b),
            Strategy::Blocked => multiply_blocked(a, b, self.config.tile_size),
            Strategy::Parallel | Strategy::Auto => {
                multiply_parallel_in_pool(&self.pool, a, b, self.config.parallel_threshold)
            }
        }
    }
}

impl std::fmt::Debug for DenseMultiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DenseMultiplier")
            .field("config", &self.config)
            .field("workers", &self.pool.current_num_threads())
            .finish()
    }
}
