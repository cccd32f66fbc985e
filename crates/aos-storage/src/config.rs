//! Storage partitioning parameters.

use aos_core::ArrayError;

/// Configuration for [`PartitionedStorage`](crate::PartitionedStorage).
///
/// Controls how a logical index range is split into segments. Validated when
/// storage is allocated; all values are immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    /// Capacity of the first ("int-addressable") segment, in slots.
    ///
    /// Default: `i32::MAX`. Must be in `1..=i32::MAX`.
    pub first_segment_capacity: u64,

    /// Log2 of the capacity of every further segment.
    ///
    /// Default: 30 (1Gi slots). Must be in `1..=30`.
    pub segment_bits: u32,
}

impl StorageConfig {
    /// Default first-segment capacity: the largest 32-bit signed index + 1.
    pub const DEFAULT_FIRST_SEGMENT_CAPACITY: u64 = i32::MAX as u64;

    /// Default segment size exponent.
    pub const DEFAULT_SEGMENT_BITS: u32 = 30;

    /// Largest permitted segment size exponent.
    pub const MAX_SEGMENT_BITS: u32 = 30;

    /// Create a config with the default sizing.
    pub fn new() -> Self {
        Self {
            first_segment_capacity: Self::DEFAULT_FIRST_SEGMENT_CAPACITY,
            segment_bits: Self::DEFAULT_SEGMENT_BITS,
        }
    }

    /// Create a config with explicit sizing. Not validated until use.
    pub fn with_sizing(first_segment_capacity: u64, segment_bits: u32) -> Self {
        Self {
            first_segment_capacity,
            segment_bits,
        }
    }

    /// Capacity of each segment after the first, in slots.
    pub fn segment_size(&self) -> u64 {
        1u64 << self.segment_bits
    }

    /// Mask extracting the offset within a segment.
    pub fn segment_mask(&self) -> u64 {
        self.segment_size() - 1
    }

    /// Check the sizing invariants.
    pub fn validate(&self) -> Result<(), ArrayError> {
        if self.segment_bits == 0 || self.segment_bits > Self::MAX_SEGMENT_BITS {
            return Err(ArrayError::invalid_argument(format!(
                "segment_bits must be in 1..={}, got {}",
                Self::MAX_SEGMENT_BITS,
                self.segment_bits
            )));
        }
        if self.first_segment_capacity == 0
            || self.first_segment_capacity > Self::DEFAULT_FIRST_SEGMENT_CAPACITY
        {
            return Err(ArrayError::invalid_argument(format!(
                "first_segment_capacity must be in 1..={}, got {}",
                Self::DEFAULT_FIRST_SEGMENT_CAPACITY,
                self.first_segment_capacity
            )));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new()
    }
}
