//! Aos: multi-dimensional arrays of structs with predictable layout.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! aos sub-crates. For most users, adding `aos` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use aos::prelude::*;
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Particle {
//!     mass: f64,
//!     charge: i32,
//! }
//!
//! fn from_mass(mass: &f64) -> Result<Particle, ConstructError> {
//!     Ok(Particle { mass: *mass, charge: 0 })
//! }
//!
//! // Per-slot arguments derived from the element's position.
//! let factory = IndexedFactory::new(
//!     Constructor::new("from_mass", from_mass),
//!     |pos: &Position<'_>, mass: &mut f64| *mass = pos.ordinal() as f64,
//! );
//! let particles: StructuredArray<Particle> =
//!     StructuredArray::with_factory(&[4, 8], &factory).unwrap();
//!
//! assert_eq!(particles.total_element_count(), 32);
//! assert_eq!(particles.get(&[1, 2]).unwrap().mass, 10.0);
//!
//! // Deep copy of a sub-range.
//! let corner = StructuredArray::copy_range(&particles, &[2, 4], &[2, 4]).unwrap();
//! assert_eq!(corner.lengths(), &[2, 4]);
//! assert_eq!(corner.get(&[0, 0]).unwrap().mass, 20.0);
//! ```
//!
//! # Typed facades
//!
//! Domain code usually wraps a `StructuredArray<T>` in a small type that
//! names its dimensions:
//!
//! ```rust
//! use aos::prelude::*;
//!
//! struct Board {
//!     cells: StructuredArray<u8>,
//! }
//!
//! impl Board {
//!     fn new(rows: u64, cols: u64) -> Result<Self, ArrayError> {
//!         Ok(Self { cells: StructuredArray::new_instance(&[rows, cols])? })
//!     }
//!
//!     fn cell(&self, row: u64, col: u64) -> Result<&u8, ArrayError> {
//!         self.cells.get(&[row, col])
//!     }
//! }
//!
//! let board = Board::new(3, 3).unwrap();
//! assert_eq!(*board.cell(2, 2).unwrap(), 0);
//! assert!(board.cell(3, 0).is_err());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `aos-core` | Constructors, factories, positions, errors |
//! | [`storage`] | `aos-storage` | Segmented element storage and sizing |
//! | [`array`] | `aos-array` | Structured arrays, builder, copies, cursor |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Constructors, element factories, positions, and errors (`aos-core`).
///
/// The [`types::ElementFactory`] trait is the main extension point for
/// per-element construction logic.
pub use aos_core as types;

/// Segmented element storage (`aos-storage`).
///
/// [`storage::StorageConfig`] controls how a dimension's elements are split
/// across [`storage::Segment`]s.
pub use aos_storage as storage;

/// Structured arrays and their construction (`aos-array`).
///
/// Build with [`array::ArrayBuilder`], copy with
/// [`array::StructuredArray::copy_range`], and inspect arrays of unknown
/// element type through [`array::AnyStructuredArray`].
pub use aos_array as array;

/// Common imports for typical aos usage.
///
/// ```rust
/// use aos::prelude::*;
/// ```
pub mod prelude {
    // Arrays
    pub use aos_array::{AnyStructuredArray, ArrayBuilder, ElementCursor, StructuredArray};

    // Construction
    pub use aos_core::{
        Constructor, ConstructorSpec, ElementFactory, FixedFactory, IndexedFactory, Position,
        ShallowCopy,
    };

    // Errors
    pub use aos_core::{ArrayError, ConstructError};

    // Storage
    pub use aos_storage::StorageConfig;
}
