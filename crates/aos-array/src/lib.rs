//! Multi-dimensional structured array construction and access engine.
//!
//! A [`StructuredArray`] emulates a fixed-size C-style array of structs: a
//! fixed shape, every slot constructed exactly once before the array is
//! returned, and bounds-checked, dimension-aware access afterwards.
//!
//! # Architecture
//!
//! ```text
//! StructuredArray<T> (lengths [a, b, c])
//! └── PartitionedStorage<StructuredArray<T>>   a sub-arrays over [b, c]
//!     └── PartitionedStorage<StructuredArray<T>>   b sub-arrays over [c]
//!         └── PartitionedStorage<T>   c elements
//! ```
//!
//! Construction ([`ArrayBuilder`]) descends this tree in row-major order and
//! asks an [`ElementFactory`](aos_core::ElementFactory) for a constructor
//! spec at every leaf slot. Copy construction uses a [`CopyFactory`];
//! in-place field copies go through [`ShallowCopy`](aos_core::ShallowCopy).
//!
//! # Concurrency
//!
//! Builds are synchronous and single-threaded; a partially built array is
//! never observable. A finished array can be read from several threads when
//! `T: Sync`. Mutation, including shallow copies, needs `&mut` access and is
//! therefore serialised by the borrow checker.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod builder;
pub mod copy;
pub mod cursor;
pub mod erased;

pub use array::StructuredArray;
pub use builder::ArrayBuilder;
pub use copy::CopyFactory;
pub use cursor::ElementCursor;
pub use erased::AnyStructuredArray;
