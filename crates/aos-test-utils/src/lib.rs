//! Test fixtures for aos development.
//!
//! Provides small element types with known field layouts, factories that
//! record or sabotage construction, and [`PointGrid`], a typed facade over a
//! two-dimensional structured array.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{Anchored, Counter, FailingFactory, Point, PointGrid, RecordingFactory};
