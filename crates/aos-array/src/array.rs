//! The [`StructuredArray`] type and its indexed access.
//!
//! A structured array of `D` dimensions is a tree of depth `D`: each outer
//! level stores child arrays covering the remaining dimensions, and the
//! innermost level stores elements. Every level keeps its slots in a
//! [`PartitionedStorage`].

use std::fmt;

use aos_core::{ArrayError, ElementType, IndexPath};
use aos_storage::{PartitionedStorage, StorageConfig};

use crate::cursor::ElementCursor;

/// Slots at one level of the tree.
pub(crate) enum Body<T> {
    /// Innermost dimension: the elements themselves.
    Leaf(PartitionedStorage<T>),
    /// Outer dimension: one sub-array per index.
    Nested(PartitionedStorage<StructuredArray<T>>),
}

/// A fixed-shape, multi-dimensional array of constructed elements.
///
/// Built once through an [`ArrayBuilder`](crate::ArrayBuilder) (or the
/// convenience constructors) and never resized. Slot contents may be mutated
/// in place through [`get_mut`](Self::get_mut) and the shallow-copy
/// operations.
///
/// # Examples
///
/// ```
/// use aos_array::StructuredArray;
///
/// let grid = StructuredArray::<u32>::new_instance(&[3, 4]).unwrap();
/// assert_eq!(grid.dimension_count(), 2);
/// assert_eq!(grid.total_element_count(), 12);
/// assert_eq!(*grid.get(&[2, 3]).unwrap(), 0);
/// assert!(grid.get(&[3, 0]).is_err());
/// ```
pub struct StructuredArray<T> {
    lengths: IndexPath,
    total: u64,
    config: StorageConfig,
    body: Body<T>,
}

impl<T> StructuredArray<T> {
    pub(crate) fn from_parts(
        lengths: &[u64],
        total: u64,
        config: StorageConfig,
        body: Body<T>,
    ) -> Self {
        Self {
            lengths: lengths.into(),
            total,
            config,
            body,
        }
    }

    /// Number of dimensions. Always at least one.
    pub fn dimension_count(&self) -> usize {
        self.lengths.len()
    }

    /// Per-dimension lengths, outermost first.
    pub fn lengths(&self) -> &[u64] {
        &self.lengths
    }

    /// Length of the outermost dimension.
    pub fn len(&self) -> u64 {
        self.lengths[0]
    }

    /// Whether the array holds no elements at all.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Product of all dimension lengths.
    pub fn total_element_count(&self) -> u64 {
        self.total
    }

    /// Storage partitioning used by every level of this array.
    pub fn storage_config(&self) -> &StorageConfig {
        &self.config
    }

    /// Descriptor of the element type.
    pub fn element_type(&self) -> ElementType
    where
        T: 'static,
    {
        ElementType::of::<T>()
    }

    /// Element at the given index path, one index per dimension.
    ///
    /// Returns `Err(ArrayError::InvalidArgument)` if `indices` does not have
    /// exactly [`dimension_count`](Self::dimension_count) entries, and
    /// `Err(ArrayError::IndexOutOfRange)` for any index outside its dimension.
    pub fn get(&self, indices: &[u64]) -> Result<&T, ArrayError> {
        self.check_arity(indices)?;
        self.get_from(indices, 0)
    }

    /// Mutable element at the given index path.
    pub fn get_mut(&mut self, indices: &[u64]) -> Result<&mut T, ArrayError> {
        self.check_arity(indices)?;
        self.get_mut_from(indices, 0)
    }

    /// Element at a flat index of a one-dimensional array.
    ///
    /// Returns `Err(ArrayError::InvalidArgument)` on a multi-dimensional array.
    pub fn get_at(&self, index: u64) -> Result<&T, ArrayError> {
        self.get(&[index])
    }

    /// Mutable element at a flat index of a one-dimensional array.
    pub fn get_at_mut(&mut self, index: u64) -> Result<&mut T, ArrayError> {
        self.get_mut(&[index])
    }

    /// The sub-array at `index` of the outermost dimension.
    ///
    /// Returns `Err(ArrayError::InvalidArgument)` on a one-dimensional array.
    pub fn sub_array(&self, index: u64) -> Result<&StructuredArray<T>, ArrayError> {
        match &self.body {
            Body::Leaf(_) => Err(no_sub_arrays(self.dimension_count())),
            Body::Nested(children) => {
                ArrayError::check_index(0, index, self.len())?;
                children.get(index)
            }
        }
    }

    /// Mutable sub-array at `index` of the outermost dimension.
    pub fn sub_array_mut(&mut self, index: u64) -> Result<&mut StructuredArray<T>, ArrayError> {
        let length = self.len();
        let dimensions = self.dimension_count();
        match &mut self.body {
            Body::Leaf(_) => Err(no_sub_arrays(dimensions)),
            Body::Nested(children) => {
                ArrayError::check_index(0, index, length)?;
                children.get_mut(index)
            }
        }
    }

    /// Resettable cursor over all elements in row-major order.
    pub fn iter(&self) -> ElementCursor<'_, T> {
        ElementCursor::new(self)
    }

    /// Visit every element mutably, with its index path, in row-major order.
    pub fn for_each_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(&[u64], &mut T),
    {
        let mut path = IndexPath::new();
        self.visit_mut(&mut path, &mut visit);
    }

    pub(crate) fn leaf(&self) -> Option<&PartitionedStorage<T>> {
        match &self.body {
            Body::Leaf(elements) => Some(elements),
            Body::Nested(_) => None,
        }
    }

    pub(crate) fn leaf_mut(&mut self) -> Option<&mut PartitionedStorage<T>> {
        match &mut self.body {
            Body::Leaf(elements) => Some(elements),
            Body::Nested(_) => None,
        }
    }

    fn get_from(&self, indices: &[u64], level: usize) -> Result<&T, ArrayError> {
        let (&index, rest) = indices
            .split_first()
            .ok_or_else(|| path_ended(level))?;
        ArrayError::check_index(level, index, self.len())?;
        match &self.body {
            Body::Leaf(elements) => elements.get(index),
            Body::Nested(children) => children.get(index)?.get_from(rest, level + 1),
        }
    }

    fn get_mut_from(&mut self, indices: &[u64], level: usize) -> Result<&mut T, ArrayError> {
        let (&index, rest) = indices
            .split_first()
            .ok_or_else(|| path_ended(level))?;
        ArrayError::check_index(level, index, self.len())?;
        match &mut self.body {
            Body::Leaf(elements) => elements.get_mut(index),
            Body::Nested(children) => children.get_mut(index)?.get_mut_from(rest, level + 1),
        }
    }

    fn visit_mut<F>(&mut self, path: &mut IndexPath, visit: &mut F)
    where
        F: FnMut(&[u64], &mut T),
    {
        match &mut self.body {
            Body::Leaf(elements) => {
                for (index, element) in elements.iter_mut().enumerate() {
                    path.push(index as u64);
                    visit(path.as_slice(), element);
                    path.pop();
                }
            }
            Body::Nested(children) => {
                for (index, child) in children.iter_mut().enumerate() {
                    path.push(index as u64);
                    child.visit_mut(path, visit);
                    path.pop();
                }
            }
        }
    }

    fn check_arity(&self, indices: &[u64]) -> Result<(), ArrayError> {
        if indices.len() != self.dimension_count() {
            return Err(ArrayError::invalid_argument(format!(
                "expected {} indices, got {}",
                self.dimension_count(),
                indices.len()
            )));
        }
        Ok(())
    }
}

fn path_ended(level: usize) -> ArrayError {
    ArrayError::invalid_argument(format!("index path ended at dimension {level}"))
}

fn no_sub_arrays(dimensions: usize) -> ArrayError {
    ArrayError::invalid_argument(format!(
        "{dimensions}-dimensional array has no sub-arrays"
    ))
}

impl<'a, T> IntoIterator for &'a StructuredArray<T> {
    type Item = &'a T;
    type IntoIter = ElementCursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for StructuredArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.lengths == other.lengths && self.iter().eq(other.iter())
    }
}

impl<T> fmt::Debug for StructuredArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredArray")
            .field("element_type", &std::any::type_name::<T>())
            .field("lengths", &self.lengths.as_slice())
            .finish_non_exhaustive()
    }
}
