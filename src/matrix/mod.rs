// Matrix data structures and operations

pub mod config;
pub mod conversion;
pub mod csc;
pub mod csr;
pub mod dense;

pub use config::{KernelConfig, Strategy};
pub use csc::SparseMatrixCSC;
pub use csr::SparseMatrixCSR;
pub use dense::{count_zeros, dense_from_rows, identity, DenseMatrix};
