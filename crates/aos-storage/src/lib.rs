//! Partitioned segment storage backing aos structured arrays.
//!
//! A structured array keeps each dimension's slots (elements, or sub-arrays
//! for outer dimensions) in a [`PartitionedStorage`]. The storage spans index
//! ranges larger than one segment may address by chaining fixed-size
//! segments after an int-addressable first segment; see [`segment`] for the
//! addressing scheme and [`StorageConfig`] for the sizing knobs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod segment;

pub use config::StorageConfig;
pub use segment::{PartitionedStorage, Segment};
