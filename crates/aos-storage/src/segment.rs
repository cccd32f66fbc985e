//! Fixed-capacity segments and the partitioned storage built from them.
//!
//! A [`Segment`] is a `Vec<T>` reserved to an exact capacity and filled in
//! order. A [`PartitionedStorage`] chains segments so that a logical index
//! range `[0, length)` can exceed what a single segment may address:
//!
//! ```text
//! index:   0 ........ first_cap-1 | first_cap ...... | ...          | ... length-1
//! segment: [        first        ] [ 1 << bits      ] [ 1 << bits  ] [ remainder ]
//! ```
//!
//! Indices below `first_segment_capacity` are served by the first segment.
//! Beyond it, `extra = index - first_segment_capacity` selects segment
//! `extra >> segment_bits` at offset `extra & segment_mask`.

use std::collections::TryReserveError;

use aos_core::ArrayError;

use crate::config::StorageConfig;

/// A single contiguous segment filled front to back.
///
/// The backing `Vec` is reserved to exactly `capacity` slots at creation and
/// never reallocates.
pub struct Segment<T> {
    data: Vec<T>,
    capacity: usize,
}

impl<T> Segment<T> {
    /// Reserve a segment of exactly `capacity` slots.
    pub fn try_new(capacity: usize) -> Result<Self, TryReserveError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)?;
        Ok(Self { data, capacity })
    }

    /// Append a value to the next free slot.
    ///
    /// Returns the value back if the segment is full.
    pub fn push(&mut self, value: T) -> Result<(), T> {
        if self.data.len() >= self.capacity {
            return Err(value);
        }
        self.data.push(value);
        Ok(())
    }

    /// Shared access to the populated slots.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable access to the populated slots.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Number of populated slots.
    pub fn used(&self) -> usize {
        self.data.len()
    }

    /// Total slot capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots still free.
    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    /// Whether every slot is populated.
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// Memory reserved by the segment in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.capacity * std::mem::size_of::<T>()
    }
}

/// Segmented backing store covering `[0, length)` with no gaps or overlaps.
///
/// Slots are populated once, in ascending index order, through
/// [`push`](Self::push); afterwards they can be read, mutated in place or
/// replaced, but never added or removed.
pub struct PartitionedStorage<T> {
    /// `segments[0]` is the first segment; the rest are `1 << segment_bits`
    /// slots each except the last, which holds the remainder.
    segments: Vec<Segment<T>>,
    length: u64,
    filled: u64,
    first_capacity: u64,
    segment_bits: u32,
    segment_mask: u64,
}

impl<T> PartitionedStorage<T> {
    /// Allocate storage for `length` slots, none populated yet.
    ///
    /// Reserves `ceil(extra / segment_size)` segments after the first, the
    /// last sized to the remainder. Returns `Err(ArrayError::InvalidArgument)`
    /// if the config is invalid or the memory cannot be reserved.
    pub fn allocate(length: u64, config: &StorageConfig) -> Result<Self, ArrayError> {
        config.validate()?;
        let first_len = length.min(config.first_segment_capacity);
        let extra_len = length - first_len;
        let segment_size = config.segment_size();
        let extra_segments = extra_len.div_ceil(segment_size);

        let reserve_failed = |err: TryReserveError| {
            ArrayError::invalid_argument(format!("cannot reserve storage for {length} slots: {err}"))
        };

        let table_len = usize::try_from(extra_segments + 1)
            .map_err(|_| ArrayError::invalid_argument(format!("length {length} is not addressable")))?;
        let mut segments = Vec::new();
        segments.try_reserve_exact(table_len).map_err(reserve_failed)?;

        // Both sizes are bounded by a validated config, so they fit in usize.
        segments.push(Segment::try_new(first_len as usize).map_err(reserve_failed)?);
        let mut left = extra_len;
        for _ in 0..extra_segments {
            let size = left.min(segment_size);
            segments.push(Segment::try_new(size as usize).map_err(reserve_failed)?);
            left -= size;
        }

        Ok(Self {
            segments,
            length,
            filled: 0,
            first_capacity: config.first_segment_capacity,
            segment_bits: config.segment_bits,
            segment_mask: config.segment_mask(),
        })
    }

    /// Allocate and populate every slot from `init`, in ascending index order.
    ///
    /// The first error from `init` is returned and the partial storage dropped.
    pub fn try_from_fn<F>(length: u64, config: &StorageConfig, mut init: F) -> Result<Self, ArrayError>
    where
        F: FnMut(u64) -> Result<T, ArrayError>,
    {
        let mut storage = Self::allocate(length, config)?;
        for index in 0..length {
            storage.push(init(index)?)?;
        }
        Ok(storage)
    }

    /// Populate the next unpopulated slot.
    ///
    /// Returns `Err(ArrayError::InvalidState)` if every slot is populated.
    pub fn push(&mut self, value: T) -> Result<(), ArrayError> {
        if self.filled >= self.length {
            return Err(ArrayError::invalid_state(format!(
                "all {} slots already populated",
                self.length
            )));
        }
        let (segment, _) = self.locate(self.filled);
        if self.segments[segment].push(value).is_err() {
            return Err(ArrayError::invalid_state(format!(
                "segment {segment} full before slot {} was populated",
                self.filled
            )));
        }
        self.filled += 1;
        Ok(())
    }

    /// Logical length.
    pub fn len(&self) -> u64 {
        self.length
    }

    /// Whether the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of populated slots.
    pub fn filled(&self) -> u64 {
        self.filled
    }

    /// Whether every slot has been populated.
    pub fn is_complete(&self) -> bool {
        self.filled == self.length
    }

    /// Number of segments, including the first.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Sum of all segment capacities. Always equal to [`len`](Self::len).
    pub fn capacity(&self) -> u64 {
        self.segments.iter().map(|s| s.capacity() as u64).sum()
    }

    /// Per-segment capacities, first segment first.
    pub fn segment_capacities(&self) -> Vec<usize> {
        self.segments.iter().map(|s| s.capacity()).collect()
    }

    /// Memory reserved across all segments in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.segments.iter().map(|s| s.memory_bytes()).sum()
    }

    /// Shared access to the slot at `index`.
    pub fn get(&self, index: u64) -> Result<&T, ArrayError> {
        self.check_populated(index)?;
        let (segment, offset) = self.locate(index);
        Ok(&self.segments[segment].as_slice()[offset])
    }

    /// Mutable access to the slot at `index`.
    pub fn get_mut(&mut self, index: u64) -> Result<&mut T, ArrayError> {
        self.check_populated(index)?;
        let (segment, offset) = self.locate(index);
        Ok(&mut self.segments[segment].as_mut_slice()[offset])
    }

    /// Replace the value at `index`, returning the previous one.
    pub fn set(&mut self, index: u64, value: T) -> Result<T, ArrayError> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Borrow the slot at `source` immutably and the slot at `target` mutably.
    ///
    /// Returns `Err(ArrayError::InvalidArgument)` if the two indices are equal.
    pub fn get_pair_mut(&mut self, source: u64, target: u64) -> Result<(&T, &mut T), ArrayError> {
        if source == target {
            return Err(ArrayError::invalid_argument(format!(
                "source and target are the same slot {source}"
            )));
        }
        self.check_populated(source)?;
        self.check_populated(target)?;
        let (src_seg, src_off) = self.locate(source);
        let (dst_seg, dst_off) = self.locate(target);

        if src_seg == dst_seg {
            let data = self.segments[src_seg].as_mut_slice();
            if src_off < dst_off {
                let (lo, hi) = data.split_at_mut(dst_off);
                Ok((&lo[src_off], &mut hi[0]))
            } else {
                let (lo, hi) = data.split_at_mut(src_off);
                Ok((&hi[0], &mut lo[dst_off]))
            }
        } else if src_seg < dst_seg {
            let (lo, hi) = self.segments.split_at_mut(dst_seg);
            Ok((&lo[src_seg].as_slice()[src_off], &mut hi[0].as_mut_slice()[dst_off]))
        } else {
            let (lo, hi) = self.segments.split_at_mut(src_seg);
            Ok((&hi[0].as_slice()[src_off], &mut lo[dst_seg].as_mut_slice()[dst_off]))
        }
    }

    /// Iterate populated slots in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.segments.iter().flat_map(|s| s.as_slice().iter())
    }

    /// Iterate populated slots mutably in ascending index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.segments.iter_mut().flat_map(|s| s.as_mut_slice().iter_mut())
    }

    /// Map a logical index to `(segment, offset)`.
    fn locate(&self, index: u64) -> (usize, usize) {
        if index < self.first_capacity {
            return (0, index as usize);
        }
        let extra = index - self.first_capacity;
        let segment = (extra >> self.segment_bits) as usize + 1;
        let offset = (extra & self.segment_mask) as usize;
        (segment, offset)
    }

    fn check_populated(&self, index: u64) -> Result<(), ArrayError> {
        ArrayError::check_index(0, index, self.length)?;
        if index >= self.filled {
            return Err(ArrayError::invalid_state(format!(
                "slot {index} has not been populated"
            )));
        }
        Ok(())
    }
}
