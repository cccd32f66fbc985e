//! Copy construction and shallow (field-level) copies.
//!
//! Copy construction builds a new array whose elements come from each
//! source element's copy constructor ([`Clone`]), optionally over a
//! sub-range. Shallow copy overwrites the fields of existing elements in
//! place through [`ShallowCopy`] and never changes which element lives in a
//! slot.

use aos_core::{
    ArrayError, Constructor, ConstructorSpec, ElementFactory, IndexPath, Position, ShallowCopy,
};
use aos_storage::PartitionedStorage;

use crate::array::StructuredArray;
use crate::builder::ArrayBuilder;

/// Factory constructing each slot as a copy of a source element.
///
/// The element at path `p` is copied from the source element at
/// `p + offsets`. The translated path is bounds-checked against the source
/// before anything is constructed for that slot.
pub struct CopyFactory<'s, T> {
    source: &'s StructuredArray<T>,
    offsets: IndexPath,
}

impl<'s, T> CopyFactory<'s, T> {
    /// Copy from `source` starting at per-dimension `offsets`.
    ///
    /// Returns `Err(ArrayError::InvalidArgument)` if `offsets` does not have
    /// one entry per source dimension.
    pub fn new(source: &'s StructuredArray<T>, offsets: &[u64]) -> Result<Self, ArrayError> {
        if offsets.len() != source.dimension_count() {
            return Err(ArrayError::invalid_argument(format!(
                "expected {} offsets, got {}",
                source.dimension_count(),
                offsets.len()
            )));
        }
        Ok(Self {
            source,
            offsets: offsets.into(),
        })
    }

    /// Map a requested path into the source.
    fn translate(&self, path: &[u64]) -> Result<IndexPath, ArrayError> {
        if path.len() != self.offsets.len() {
            return Err(ArrayError::invalid_argument(format!(
                "expected {} indices, got {}",
                self.offsets.len(),
                path.len()
            )));
        }
        let lengths = self.source.lengths();
        let mut translated = IndexPath::with_capacity(path.len());
        for (dim, (&index, &offset)) in path.iter().zip(&self.offsets).enumerate() {
            let target = index
                .checked_add(offset)
                .ok_or(ArrayError::IndexOutOfRange {
                    dimension: dim,
                    index: u64::MAX,
                    length: lengths[dim],
                })?;
            ArrayError::check_index(dim, target, lengths[dim])?;
            translated.push(target);
        }
        Ok(translated)
    }
}

impl<'s, T: Clone> ElementFactory<T> for CopyFactory<'s, T> {
    type Args = &'s T;

    fn resolve(&self, position: &Position<'_>) -> Result<ConstructorSpec<T, &'s T>, ArrayError> {
        let translated = self.translate(position.path())?;
        let source = self.source.get(&translated)?;
        Ok(ConstructorSpec::new(Constructor::copy_constructor(), source))
    }
}

/// Reject `[offset, offset + count)` not lying within `[0, length)`.
fn check_range(dimension: usize, offset: u64, count: u64, length: u64) -> Result<(), ArrayError> {
    match offset.checked_add(count) {
        Some(end) if end <= length => Ok(()),
        _ => Err(ArrayError::IndexOutOfRange {
            dimension,
            index: if count == 0 {
                offset
            } else {
                offset.saturating_add(count - 1)
            },
            length,
        }),
    }
}

impl<T: Clone> StructuredArray<T> {
    /// Build a new array with the same shape, copy-constructing every element.
    pub fn copy_instance(source: &StructuredArray<T>) -> Result<Self, ArrayError> {
        let offsets = IndexPath::from_elem(0, source.dimension_count());
        Self::copy_range(source, &offsets, source.lengths())
    }

    /// Build a new array of shape `counts` from the source sub-range starting
    /// at `offsets`.
    ///
    /// The element at `p` of the result is a copy of the source element at
    /// `p + offsets`. The whole range is validated before any element is
    /// constructed.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `offsets` or `counts` do not have one entry per
    ///   source dimension.
    /// - `IndexOutOfRange` if `offsets[d] + counts[d]` exceeds the source
    ///   length at any dimension `d`.
    pub fn copy_range(
        source: &StructuredArray<T>,
        offsets: &[u64],
        counts: &[u64],
    ) -> Result<Self, ArrayError> {
        if counts.len() != source.dimension_count() {
            return Err(ArrayError::invalid_argument(format!(
                "expected {} counts, got {}",
                source.dimension_count(),
                counts.len()
            )));
        }
        let factory = CopyFactory::new(source, offsets)?;
        for (dim, ((&offset, &count), &length)) in offsets
            .iter()
            .zip(counts)
            .zip(source.lengths())
            .enumerate()
        {
            check_range(dim, offset, count, length)?;
        }
        ArrayBuilder::new(counts)
            .storage(*source.storage_config())
            .build(&factory)
    }
}

impl<T: ShallowCopy> StructuredArray<T> {
    /// Copy the fields of `count` source elements into `count` target
    /// elements, slot by slot, in ascending order.
    ///
    /// The target elements keep their identity; only their field values
    /// change. `source` and `target` are necessarily distinct arrays; use
    /// [`shallow_copy_within`](Self::shallow_copy_within) to copy inside
    /// one array.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if either array is multi-dimensional.
    /// - `InvalidState` if `T` has construction-only fields and
    ///   `allow_final_overwrite` is `false`.
    /// - `IndexOutOfRange` if either range exceeds its array.
    pub fn shallow_copy(
        source: &StructuredArray<T>,
        source_offset: u64,
        target: &mut StructuredArray<T>,
        target_offset: u64,
        count: u64,
        allow_final_overwrite: bool,
    ) -> Result<(), ArrayError> {
        check_one_dimensional(source)?;
        check_one_dimensional(target)?;
        check_final_overwrite::<T>(allow_final_overwrite)?;
        check_range(0, source_offset, count, source.len())?;
        check_range(0, target_offset, count, target.len())?;

        let (Some(from), Some(to)) = (source.leaf(), target.leaf_mut()) else {
            return Err(ArrayError::invalid_argument(
                "shallow copy requires one-dimensional arrays",
            ));
        };
        for i in 0..count {
            to.get_mut(target_offset + i)?
                .copy_fields_from(from.get(source_offset + i)?);
        }
        Ok(())
    }

    /// Shallow-copy `count` elements from `source_offset` to `target_offset`
    /// inside this array.
    ///
    /// When the target range overlaps the source range and starts at or
    /// after it, elements are copied in descending index order so that no
    /// source element is overwritten before it has been read; otherwise in
    /// ascending order. The result is as if the source range had first been
    /// copied to a temporary buffer.
    ///
    /// Errors are as for [`shallow_copy`](Self::shallow_copy).
    pub fn shallow_copy_within(
        &mut self,
        source_offset: u64,
        target_offset: u64,
        count: u64,
        allow_final_overwrite: bool,
    ) -> Result<(), ArrayError> {
        check_one_dimensional(self)?;
        check_final_overwrite::<T>(allow_final_overwrite)?;
        let length = self.len();
        check_range(0, source_offset, count, length)?;
        check_range(0, target_offset, count, length)?;

        if count == 0 || source_offset == target_offset {
            return Ok(());
        }
        let storage = self.leaf_mut().ok_or_else(|| {
            ArrayError::invalid_argument("shallow copy requires a one-dimensional array")
        })?;
        let overlaps = target_offset >= source_offset && target_offset < source_offset + count;
        if overlaps {
            for i in (0..count).rev() {
                copy_slot(storage, source_offset + i, target_offset + i)?;
            }
        } else {
            for i in 0..count {
                copy_slot(storage, source_offset + i, target_offset + i)?;
            }
        }
        Ok(())
    }
}

fn copy_slot<T: ShallowCopy>(
    storage: &mut PartitionedStorage<T>,
    source: u64,
    target: u64,
) -> Result<(), ArrayError> {
    let (from, to) = storage.get_pair_mut(source, target)?;
    to.copy_fields_from(from);
    Ok(())
}

fn check_one_dimensional<T>(array: &StructuredArray<T>) -> Result<(), ArrayError> {
    if array.dimension_count() != 1 {
        return Err(ArrayError::invalid_argument(format!(
            "shallow copy requires one-dimensional arrays, got {} dimensions",
            array.dimension_count()
        )));
    }
    Ok(())
}

fn check_final_overwrite<T: ShallowCopy>(allow_final_overwrite: bool) -> Result<(), ArrayError> {
    if T::HAS_FINAL_FIELDS && !allow_final_overwrite {
        return Err(ArrayError::invalid_state(format!(
            "{} has construction-only fields; shallow copy needs allow_final_overwrite",
            std::any::type_name::<T>()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aos_core::{ConstructError, IndexedFactory};

    #[derive(Clone, Debug, PartialEq)]
    struct Slot {
        value: u64,
    }

    impl ShallowCopy for Slot {
        fn copy_fields_from(&mut self, source: &Self) {
            self.value = source.value;
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Sealed {
        value: u64,
    }

    impl ShallowCopy for Sealed {
        const HAS_FINAL_FIELDS: bool = true;

        fn copy_fields_from(&mut self, source: &Self) {
            self.value = source.value;
        }
    }

    fn slot(args: &u64) -> Result<Slot, ConstructError> {
        Ok(Slot { value: *args })
    }

    fn sealed(args: &u64) -> Result<Sealed, ConstructError> {
        Ok(Sealed { value: *args })
    }

    fn slots(lengths: &[u64]) -> StructuredArray<Slot> {
        let factory = IndexedFactory::new(
            Constructor::new("slot", slot),
            |pos: &Position<'_>, args: &mut u64| *args = pos.ordinal(),
        );
        StructuredArray::with_factory(lengths, &factory).unwrap()
    }

    fn values(array: &StructuredArray<Slot>) -> Vec<u64> {
        array.iter().map(|s| s.value).collect()
    }

    #[test]
    fn check_range_boundaries() {
        assert!(check_range(0, 0, 5, 5).is_ok());
        assert!(check_range(0, 5, 0, 5).is_ok());
        assert_eq!(
            check_range(1, 3, 3, 5),
            Err(ArrayError::IndexOutOfRange {
                dimension: 1,
                index: 5,
                length: 5,
            })
        );
        assert!(check_range(0, u64::MAX, 2, 5).is_err());
    }

    #[test]
    fn copy_factory_translates_by_offset() {
        let source = slots(&[3, 4]);
        let factory = CopyFactory::new(&source, &[1, 2]).unwrap();
        let spec = factory.resolve(&Position::new(&[1, 1], 0)).unwrap();
        assert_eq!(spec.args().value, 2 * 4 + 3);
        assert!(matches!(
            factory.resolve(&Position::new(&[0, 2], 0)),
            Err(ArrayError::IndexOutOfRange { dimension: 1, index: 4, length: 4 })
        ));
    }

    #[test]
    fn copy_factory_rejects_offset_arity() {
        let source = slots(&[3, 4]);
        assert!(matches!(
            CopyFactory::new(&source, &[1]),
            Err(ArrayError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn copy_range_validates_before_building() {
        let source = slots(&[3, 4]);
        assert!(matches!(
            StructuredArray::copy_range(&source, &[2, 0], &[2, 4]),
            Err(ArrayError::IndexOutOfRange { dimension: 0, .. })
        ));
        assert!(matches!(
            StructuredArray::copy_range(&source, &[0, 0], &[3]),
            Err(ArrayError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn copy_instance_is_element_wise_equal() {
        let source = slots(&[2, 3, 2]);
        let copy = StructuredArray::copy_instance(&source).unwrap();
        assert_eq!(copy, source);
    }

    #[test]
    fn shallow_copy_between_arrays() {
        let source = slots(&[6]);
        let mut target = slots(&[6]);
        target.for_each_mut(|_, s| s.value = 100);
        StructuredArray::shallow_copy(&source, 1, &mut target, 3, 3, false).unwrap();
        assert_eq!(values(&target), vec![100, 100, 100, 1, 2, 3]);
    }

    #[test]
    fn shallow_copy_keeps_target_identity() {
        let source = slots(&[2]);
        let mut target = slots(&[2]);
        *target.get_at_mut(0).unwrap() = Slot { value: 50 };
        let before: *const Slot = target.get_at(0).unwrap();
        StructuredArray::shallow_copy(&source, 1, &mut target, 0, 1, false).unwrap();
        let after: *const Slot = target.get_at(0).unwrap();
        assert_eq!(before, after);
        assert_eq!(target.get_at(0).unwrap().value, 1);
    }

    #[test]
    fn shallow_copy_rejects_multi_dimensional() {
        let source = slots(&[2, 2]);
        let mut target = slots(&[4]);
        assert!(matches!(
            StructuredArray::shallow_copy(&source, 0, &mut target, 0, 1, false),
            Err(ArrayError::InvalidArgument { .. })
        ));
        let mut grid = slots(&[2, 2]);
        assert!(matches!(
            grid.shallow_copy_within(0, 1, 1, false),
            Err(ArrayError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn shallow_copy_rejects_out_of_range() {
        let source = slots(&[4]);
        let mut target = slots(&[4]);
        assert!(matches!(
            StructuredArray::shallow_copy(&source, 2, &mut target, 0, 3, false),
            Err(ArrayError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            target.shallow_copy_within(0, 2, 3, false),
            Err(ArrayError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn final_fields_need_permission() {
        let factory = IndexedFactory::new(
            Constructor::new("sealed", sealed),
            |pos: &Position<'_>, args: &mut u64| *args = pos.index(),
        );
        let source = StructuredArray::with_factory(&[3], &factory).unwrap();
        let mut target = StructuredArray::with_factory(&[3], &factory).unwrap();
        assert!(matches!(
            StructuredArray::shallow_copy(&source, 0, &mut target, 1, 2, false),
            Err(ArrayError::InvalidState { .. })
        ));
        StructuredArray::shallow_copy(&source, 0, &mut target, 1, 2, true).unwrap();
        let copied: Vec<u64> = target.iter().map(|s| s.value).collect();
        assert_eq!(copied, vec![0, 0, 1]);
        assert!(matches!(
            target.shallow_copy_within(0, 1, 1, false),
            Err(ArrayError::InvalidState { .. })
        ));
    }

    #[test]
    fn overlapping_copy_left() {
        let mut a = slots(&[11]);
        a.shallow_copy_within(4, 3, 2, false).unwrap();
        assert_eq!(&values(&a)[3..6], &[4, 5, 5]);
    }

    #[test]
    fn overlapping_copy_right() {
        let mut a = slots(&[11]);
        a.shallow_copy_within(5, 6, 2, false).unwrap();
        assert_eq!(&values(&a)[5..8], &[5, 5, 6]);
    }

    #[test]
    fn overlapping_copy_right_by_one_shifts_whole_range() {
        let mut a = slots(&[6]);
        a.shallow_copy_within(0, 1, 5, false).unwrap();
        assert_eq!(values(&a), vec![0, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn disjoint_copy_within() {
        let mut a = slots(&[8]);
        a.shallow_copy_within(0, 5, 3, false).unwrap();
        assert_eq!(values(&a), vec![0, 1, 2, 3, 4, 0, 1, 2]);
    }

    #[test]
    fn copy_onto_itself_is_a_no_op() {
        let mut a = slots(&[4]);
        a.shallow_copy_within(1, 1, 3, false).unwrap();
        assert_eq!(values(&a), vec![0, 1, 2, 3]);
    }
}
