//! Configuration for dense kernel selection and execution

use crate::constants::{DEFAULT_TILE_SIZE, PARALLEL_ROW_THRESHOLD};
use crate::error::{MatrixError, Result};

/// Execution strategy for a dense × dense product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Reference triple loop
    Naive,
    /// Cache-tiled loop over square operands
    Blocked,
    /// Fork-join over row bands
    Parallel,
    /// Pick one of the above from the operand shapes and the config
    Auto,
}

/// Configuration for dense multiplication
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Requested strategy
    pub strategy: Strategy,

    /// Tile width for the blocked kernel
    pub tile_size: usize,

    /// Row-band width at or below which the parallel kernel runs sequentially
    pub parallel_threshold: usize,

    /// Number of worker threads available to the parallel kernel
    pub n_threads: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            tile_size: DEFAULT_TILE_SIZE,
            parallel_threshold: PARALLEL_ROW_THRESHOLD,
            n_threads: num_cpus::get(), // Use all available cores
        }
    }
}

impl KernelConfig {
    /// Config that always runs the given strategy
    pub fn for_strategy(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Sets the blocked kernel's tile width
    pub fn with_tile_size(mut self, tile_size: usize) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Sets the row-band width below which the parallel kernel stops splitting
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Sets the worker count
    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = n_threads;
        self
    }

    /// Checks that every tuning parameter is at least 1
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("tile_size", self.tile_size),
            ("parallel_threshold", self.parallel_threshold),
            ("n_threads", self.n_threads),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(MatrixError::invalid_parameter(name, "must be at least 1"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KernelConfig::default();
        assert_eq!(config.strategy, Strategy::Auto);
        assert_eq!(config.tile_size, DEFAULT_TILE_SIZE);
        assert_eq!(config.parallel_threshold, PARALLEL_ROW_THRESHOLD);
        assert!(config.n_threads >= 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let err = KernelConfig::default().with_tile_size(0).validate().unwrap_err();
        assert_eq!(
            err,
            MatrixError::invalid_parameter("tile_size", "must be at least 1")
        );

        let err = KernelConfig::default().with_threads(0).validate().unwrap_err();
        assert!(matches!(err, MatrixError::InvalidParameter { name: "n_threads", .. }));
    }
}
