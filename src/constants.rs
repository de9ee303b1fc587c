//! Centralized constants for the STRATA multiplication library
//!
//! Tuning defaults live here rather than scattered through the kernels.

// ============================================================================
// DENSE KERNEL DEFAULTS
// ============================================================================

/// Default tile width for the cache-blocked kernel
///
/// Three 64×64 tiles of `f64` occupy 96KB, which sits inside a typical L2.
pub const DEFAULT_TILE_SIZE: usize = 64;

/// Row-band width at or below which the parallel kernel stops splitting
/// and computes the band sequentially
pub const PARALLEL_ROW_THRESHOLD: usize = 64;

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Maximum number of rows/columns rendered by the sparse `Debug` impls
pub const DEBUG_MAX_LINES: usize = 5;

/// Maximum number of entries per row/column rendered by the sparse `Debug` impls
pub const DEBUG_MAX_ENTRIES: usize = 5;
