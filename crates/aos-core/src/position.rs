//! Slot positions, index paths and element type descriptors.

use smallvec::SmallVec;
use std::any::{Any, TypeId};
use std::fmt;

/// Index vector identifying a slot, one index per dimension, outermost first.
///
/// Stack-allocated for up to four dimensions.
pub type IndexPath = SmallVec<[u64; 4]>;

/// Where an element is being constructed.
///
/// Handed to [`ElementFactory::resolve`](crate::factory::ElementFactory::resolve)
/// for every slot. The path always has one entry per dimension of the array
/// being built, so a factory can see the indices of every enclosing
/// sub-array as well as the slot's own index.
#[derive(Clone, Copy)]
pub struct Position<'a> {
    path: &'a [u64],
    ordinal: u64,
    context: Option<&'a dyn Any>,
}

impl<'a> Position<'a> {
    /// Create a position from a full index path and its row-major ordinal.
    pub fn new(path: &'a [u64], ordinal: u64) -> Self {
        Self {
            path,
            ordinal,
            context: None,
        }
    }

    /// Attach a build context value.
    pub fn with_context(mut self, context: Option<&'a dyn Any>) -> Self {
        self.context = context;
        self
    }

    /// Full index path, outermost dimension first.
    pub fn path(&self) -> &'a [u64] {
        self.path
    }

    /// Index within the innermost dimension (the slot's own index).
    ///
    /// Zero for an empty path, which the engine never produces.
    pub fn index(&self) -> u64 {
        self.path.last().copied().unwrap_or(0)
    }

    /// Indices of the enclosing sub-arrays, i.e. the path without its last entry.
    pub fn containing(&self) -> &'a [u64] {
        match self.path.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// Row-major ordinal of the slot across the whole array.
    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    /// The build context, if one was supplied and has type `C`.
    pub fn context<C: Any>(&self) -> Option<&'a C> {
        self.context.and_then(|c| c.downcast_ref::<C>())
    }
}

impl fmt::Debug for Position<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("path", &self.path)
            .field("ordinal", &self.ordinal)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}

/// Runtime descriptor of an array's element type.
///
/// Fixed for the lifetime of an array. Compared when arrays are accessed
/// through a type-erased view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementType {
    id: TypeId,
    name: &'static str,
}

impl ElementType {
    /// Descriptor for `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this descriptor names `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_splits_path() {
        let path = [3u64, 1, 4];
        let pos = Position::new(&path, 17);
        assert_eq!(pos.index(), 4);
        assert_eq!(pos.containing(), &[3, 1]);
        assert_eq!(pos.ordinal(), 17);
    }

    #[test]
    fn one_dimensional_position_has_no_containing_indices() {
        let path = [9u64];
        let pos = Position::new(&path, 9);
        assert_eq!(pos.index(), 9);
        assert!(pos.containing().is_empty());
    }

    #[test]
    fn context_downcasts_by_type() {
        let scale = 2.5f64;
        let path = [0u64];
        let pos = Position::new(&path, 0).with_context(Some(&scale));
        assert_eq!(pos.context::<f64>(), Some(&2.5));
        assert!(pos.context::<u32>().is_none());
        assert!(Position::new(&path, 0).context::<f64>().is_none());
    }

    #[test]
    fn element_type_identity() {
        let a = ElementType::of::<u32>();
        assert_eq!(a, ElementType::of::<u32>());
        assert_ne!(a, ElementType::of::<i32>());
        assert!(a.is::<u32>());
        assert_eq!(a.name(), "u32");
    }
}
