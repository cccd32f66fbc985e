//! Benchmark workloads for aos structured arrays.
//!
//! Provides pre-built arrays and storage configs shared by the benches:
//!
//! - [`reference_grid`]: 100x100 points (10K elements)
//! - [`stress_cube`]: 46x46x46 counters (~100K elements)
//! - [`reference_line`]: flat 100K-element counter line
//! - [`narrow_segments`]: config that forces many small segments

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use aos_array::StructuredArray;
use aos_core::ArrayError;
use aos_storage::StorageConfig;
use aos_test_utils::{Counter, Point, PointGrid};

/// Side length of [`reference_grid`].
pub const GRID_SIDE: u64 = 100;

/// Side length of [`stress_cube`].
pub const CUBE_SIDE: u64 = 46;

/// Length of [`reference_line`].
pub const LINE_LEN: u64 = 100_000;

/// 100x100 grid of points, each initialised to its coordinates.
pub fn reference_grid() -> Result<StructuredArray<Point>, ArrayError> {
    Ok(PointGrid::new(GRID_SIDE, GRID_SIDE)?.into_inner())
}

/// 46x46x46 cube of counters holding their row-major ordinal.
pub fn stress_cube() -> StructuredArray<Counter> {
    Counter::numbered_with(&[CUBE_SIDE, CUBE_SIDE, CUBE_SIDE])
}

/// One-dimensional line of counters for shallow-copy workloads.
pub fn reference_line() -> StructuredArray<Counter> {
    Counter::numbered(LINE_LEN)
}

/// 1024-slot first segment followed by 256-slot segments.
pub fn narrow_segments() -> StorageConfig {
    StorageConfig::with_sizing(1024, 8)
}
