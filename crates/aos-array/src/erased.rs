//! Type-erased view over structured arrays of any element type.
//!
//! [`AnyStructuredArray`] lets arrays with different element types live in
//! one collection. Getting a typed array back, copying from it, or comparing
//! against it checks the element type and fails with
//! [`ArrayError::TypeMismatch`] when it differs.

use std::any::Any;

use aos_core::{ArrayError, ElementType, ShallowCopy};

use crate::array::StructuredArray;

/// Object-safe, element-type-agnostic view of a [`StructuredArray`].
pub trait AnyStructuredArray: Any {
    /// Descriptor of the element type.
    fn element_type(&self) -> ElementType;

    /// Number of dimensions.
    fn dimension_count(&self) -> usize;

    /// Per-dimension lengths, outermost first.
    fn lengths(&self) -> &[u64];

    /// Product of all dimension lengths.
    fn total_element_count(&self) -> u64;

    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> AnyStructuredArray for StructuredArray<T> {
    fn element_type(&self) -> ElementType {
        ElementType::of::<T>()
    }

    fn dimension_count(&self) -> usize {
        StructuredArray::dimension_count(self)
    }

    fn lengths(&self) -> &[u64] {
        StructuredArray::lengths(self)
    }

    fn total_element_count(&self) -> u64 {
        StructuredArray::total_element_count(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: 'static> StructuredArray<T> {
    /// Recover a typed array from an erased one.
    ///
    /// Returns `Err(ArrayError::TypeMismatch)` if its element type is not `T`.
    pub fn downcast_ref(array: &dyn AnyStructuredArray) -> Result<&Self, ArrayError> {
        let found = array.element_type();
        array
            .as_any()
            .downcast_ref::<Self>()
            .ok_or_else(|| mismatch::<T>(found))
    }

    /// Recover a mutable typed array from an erased one.
    pub fn downcast_mut(array: &mut dyn AnyStructuredArray) -> Result<&mut Self, ArrayError> {
        let found = array.element_type();
        array
            .as_any_mut()
            .downcast_mut::<Self>()
            .ok_or_else(|| mismatch::<T>(found))
    }

    /// Compare contents against an erased array.
    ///
    /// `Ok(true)` if the shapes match and every element is equal.
    /// Returns `Err(ArrayError::TypeMismatch)` if the element types differ.
    pub fn content_eq(&self, other: &dyn AnyStructuredArray) -> Result<bool, ArrayError>
    where
        T: PartialEq,
    {
        let other = Self::downcast_ref(other)?;
        Ok(self == other)
    }
}

impl<T: ShallowCopy + 'static> StructuredArray<T> {
    /// [`shallow_copy`](Self::shallow_copy) from an erased source.
    ///
    /// The element type is checked first and yields
    /// `Err(ArrayError::TypeMismatch)` when it differs from `T`.
    pub fn shallow_copy_from_any(
        source: &dyn AnyStructuredArray,
        source_offset: u64,
        target: &mut StructuredArray<T>,
        target_offset: u64,
        count: u64,
        allow_final_overwrite: bool,
    ) -> Result<(), ArrayError> {
        let source = Self::downcast_ref(source)?;
        Self::shallow_copy(
            source,
            source_offset,
            target,
            target_offset,
            count,
            allow_final_overwrite,
        )
    }
}

fn mismatch<T>(found: ElementType) -> ArrayError {
    ArrayError::TypeMismatch {
        expected: std::any::type_name::<T>(),
        found: found.name(),
    }
}
