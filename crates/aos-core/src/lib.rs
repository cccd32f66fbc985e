//! Core types and traits for aos structured arrays.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by storage and the array engine: the error taxonomy,
//! slot positions, the field-copy contract, constructor specs, and the
//! element factory strategies that drive per-slot construction.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constructor;
pub mod element;
pub mod error;
pub mod factory;
pub mod position;
pub mod recycle;

pub use constructor::{ConstructFn, Constructor, ConstructorSpec};
pub use element::ShallowCopy;
pub use error::{ArrayError, ConstructError};
pub use factory::{ElementFactory, FixedFactory, IndexedFactory};
pub use position::{ElementType, IndexPath, Position};
pub use recycle::{LocalRecycler, NoRecycler, Recycler, SharedRecycler};
