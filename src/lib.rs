//! # STRATA: dense and compressed-sparse matrix multiplication
//!
//! STRATA multiplies matrices along two independent axes:
//!
//! - **Storage**: dense `ndarray` arrays, or compressed sparse rows (CSR) and
//!   columns (CSC) built from a dense snapshot
//! - **Execution**: a naive reference loop, a cache-blocked loop, or a
//!   fork-join loop over row bands
//!
//! Every multiplication borrows its inputs read-only and returns a freshly
//! allocated result, or an error raised before any work is done.
//!
//! ## Components
//!
//! 1. **Sparse formats**: [`SparseMatrixCSR`] and [`SparseMatrixCSC`], each
//!    supporting right-multiplication by dense operands.
//!
//! 2. **Sparse engine**: [`SparseMatrixEngine`] keeps both formats of one
//!    matrix and routes vector and matrix products to the right one.
//!
//! 3. **Dense kernels**:
//!    - [`multiply_naive`]: correctness oracle
//!    - [`multiply_blocked`]: tiled by a configurable tile size
//!    - [`multiply_parallel`]: rayon fork-join over disjoint row bands
//!
//! 4. **Strategy selection**: [`select_strategy`], [`multiply_dense`] and
//!    [`DenseMultiplier`] pick a kernel from the operand shapes and a
//!    [`KernelConfig`].
//!
//! ## Usage
//!
//! ```
//! use ndarray::array;
//! use strata::{multiply_blocked, multiply_naive, SparseMatrixEngine};
//!
//! let a = array![[1.0, 2.0], [3.0, 4.0]];
//! let b = array![[5.0, 6.0], [7.0, 8.0]];
//!
//! let c = multiply_naive(a.view(), b.view()).unwrap();
//! assert_eq!(c, array![[19.0, 22.0], [43.0, 50.0]]);
//! assert_eq!(multiply_blocked(a.view(), b.view(), 1).unwrap(), c);
//!
//! let engine = SparseMatrixEngine::from_rows(&[vec![0.0, 2.0], vec![3.0, 0.0]]).unwrap();
//! assert_eq!(engine.csr().values(), &[2.0, 3.0]);
//! assert_eq!(engine.multiply_with_vector(&[1.0, 1.0]).unwrap(), vec![2.0, 3.0]);
//! ```

pub mod constants;
pub mod engine;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod utils;

// Re-export primary components
pub use engine::SparseMatrixEngine;
pub use error::{MatrixError, Result};
pub use kernels::{
    multiply_blocked, multiply_dense, multiply_naive, multiply_parallel,
    multiply_parallel_in_pool, multiply_parallel_with_threshold, select_strategy,
    DenseMultiplier,
};
pub use matrix::{
    count_zeros, dense_from_rows, identity, DenseMatrix, KernelConfig, SparseMatrixCSC,
    SparseMatrixCSR, Strategy,
};
pub use utils::{from_sprs_csc, from_sprs_csr, to_sprs_csc, to_sprs_csr};

/// Version information for the STRATA library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
