//! Integration test: indexed access, cursors, deep copies and shallow copies
//! over arrays of one to three dimensions.

use aos_array::{AnyStructuredArray, StructuredArray};
use aos_core::ArrayError;
use aos_test_utils::{Anchored, Counter, Point, PointGrid};
use proptest::prelude::*;

fn values(array: &StructuredArray<Counter>) -> Vec<u64> {
    array.iter().map(|c| c.value).collect()
}

// ── Bounds and arity ─────────────────────────────────────────────────

#[test]
fn index_equal_to_length_is_out_of_range_at_every_dimension() {
    let lengths = [3u64, 4, 5];
    let array = Counter::numbered_with(&lengths);

    for dim in 0..lengths.len() {
        let mut path = vec![0u64; lengths.len()];
        path[dim] = lengths[dim];
        assert_eq!(
            array.get(&path).unwrap_err(),
            ArrayError::IndexOutOfRange {
                dimension: dim,
                index: lengths[dim],
                length: lengths[dim],
            }
        );
    }
    assert_eq!(array.get(&[2, 3, 4]).unwrap().value, 59);
}

#[test]
fn flat_access_is_bounds_checked_in_one_dimension() {
    let array = Counter::numbered(7);
    assert_eq!(array.get_at(6).unwrap().value, 6);
    assert_eq!(
        array.get_at(7).unwrap_err(),
        ArrayError::IndexOutOfRange {
            dimension: 0,
            index: 7,
            length: 7,
        }
    );
}

#[test]
fn index_count_must_match_dimension_count() {
    let array = Counter::numbered_with(&[2, 2]);
    assert!(matches!(array.get(&[1]), Err(ArrayError::InvalidArgument { .. })));
    assert!(matches!(array.get(&[1, 1, 1]), Err(ArrayError::InvalidArgument { .. })));
    assert!(matches!(array.get_at(1), Err(ArrayError::InvalidArgument { .. })));

    let cube = Counter::numbered_with(&[2, 2, 2]);
    assert!(matches!(cube.get(&[1, 1]), Err(ArrayError::InvalidArgument { .. })));

    let flat = Counter::numbered(3);
    assert!(matches!(flat.sub_array(0), Err(ArrayError::InvalidArgument { .. })));
}

#[test]
fn mutation_through_paths_and_visitors() {
    let mut grid = PointGrid::new(2, 3).unwrap();
    grid.point_mut(1, 2).unwrap().x = 40;
    assert_eq!(grid.point(1, 2).unwrap().x, 40);

    let mut array = grid.into_inner();
    array.for_each_mut(|path, point| point.y = (path[0] * 10 + path[1]) as i64);
    assert_eq!(array.get(&[1, 2]).unwrap().y, 12);

    array.sub_array_mut(0).unwrap().get_at_mut(1).unwrap().x = -1;
    assert_eq!(array.get(&[0, 1]).unwrap().x, -1);
}

// ── Cursor ───────────────────────────────────────────────────────────

#[test]
fn cursor_reset_replays_the_same_sequence() {
    let array = Counter::numbered_with(&[3, 2, 2]);
    let mut cursor = array.iter();

    let first: Vec<u64> = cursor.by_ref().map(|c| c.value).collect();
    assert_eq!(cursor.next(), None);
    assert_eq!(cursor.position(), Some(&[2u64, 1, 1][..]));

    cursor.reset();
    cursor.reset();
    assert_eq!(cursor.position(), None);
    let second: Vec<u64> = cursor.map(|c| c.value).collect();

    assert_eq!(first, (0..12).collect::<Vec<_>>());
    assert_eq!(first, second);
}

#[test]
fn cursor_stops_after_a_partial_pass_and_reset() {
    let array = Counter::numbered(5);
    let mut cursor = array.iter();
    assert_eq!(cursor.nth(2).map(|c| c.value), Some(2));
    assert_eq!(cursor.yielded(), 3);
    assert_eq!(cursor.size_hint(), (2, Some(2)));

    cursor.reset();
    assert_eq!(cursor.next().map(|c| c.value), Some(0));
}

// ── Deep copies ──────────────────────────────────────────────────────

#[test]
fn copy_instance_reproduces_arrays_of_every_rank() {
    for lengths in [&[6u64][..], &[3, 4][..], &[2, 3, 4][..]] {
        let source = Counter::numbered_with(lengths);
        let copy = StructuredArray::copy_instance(&source).unwrap();
        assert_eq!(copy.lengths(), lengths);
        assert_eq!(copy, source);
    }
}

#[test]
fn copies_are_independent_of_their_source() {
    let source = PointGrid::new(2, 2).unwrap().into_inner();
    let mut copy = StructuredArray::copy_instance(&source).unwrap();
    copy.get_mut(&[0, 0]).unwrap().x = 99;
    assert_eq!(source.get(&[0, 0]).unwrap().x, 0);
}

#[test]
fn copy_range_rejects_ranges_past_the_source() {
    let source = Counter::numbered_with(&[4, 4]);
    assert!(matches!(
        StructuredArray::copy_range(&source, &[2, 1], &[3, 1]),
        Err(ArrayError::IndexOutOfRange { dimension: 0, .. })
    ));
    assert!(matches!(
        StructuredArray::copy_range(&source, &[0, 0], &[1]),
        Err(ArrayError::InvalidArgument { .. })
    ));
}

// ── Shallow copies ───────────────────────────────────────────────────

#[test]
fn overlapping_copy_toward_lower_indices() {
    let mut array = Counter::numbered(11);
    array.shallow_copy_within(4, 3, 2, false).unwrap();
    assert_eq!(values(&array)[3..6], [4, 5, 5]);
}

#[test]
fn overlapping_copy_toward_higher_indices() {
    let mut array = Counter::numbered(11);
    array.shallow_copy_within(5, 6, 2, false).unwrap();
    assert_eq!(values(&array)[5..8], [5, 5, 6]);
}

#[test]
fn overlapping_copy_matches_a_buffered_copy() {
    for (from, to, count) in [(0, 3, 6), (3, 0, 6), (2, 2, 5), (0, 10, 1)] {
        let mut array = Counter::numbered(11);
        let mut expected = values(&array);
        let buffer = expected[from..from + count].to_vec();
        expected[to..to + count].copy_from_slice(&buffer);

        array
            .shallow_copy_within(from as u64, to as u64, count as u64, false)
            .unwrap();
        assert_eq!(values(&array), expected);
    }
}

#[test]
fn shallow_copy_between_arrays_keeps_target_slots() {
    let source: StructuredArray<Point> =
        StructuredArray::with_args(&[4], Point::XY, (7, 8)).unwrap();
    let mut target: StructuredArray<Point> = StructuredArray::new_instance(&[6]).unwrap();
    let slot = target.get_at(2).unwrap() as *const Point;

    StructuredArray::shallow_copy(&source, 1, &mut target, 2, 3, false).unwrap();

    assert!(std::ptr::eq(slot, target.get_at(2).unwrap()));
    let points: Vec<Point> = target.iter().copied().collect();
    assert_eq!(points[..2], [Point::default(); 2]);
    assert_eq!(points[2..5], [Point::new(7, 8); 3]);
    assert_eq!(points[5], Point::default());
}

#[test]
fn shallow_copy_refuses_construction_only_fields_unless_allowed() {
    let source: StructuredArray<Anchored> =
        StructuredArray::with_args(&[2], Anchored::NEW, (1, 0.5)).unwrap();
    let mut target: StructuredArray<Anchored> =
        StructuredArray::with_args(&[2], Anchored::NEW, (2, 1.5)).unwrap();

    assert!(matches!(
        StructuredArray::shallow_copy(&source, 0, &mut target, 0, 2, false),
        Err(ArrayError::InvalidState { .. })
    ));
    assert_eq!(target.get_at(0).unwrap().id, 2);

    StructuredArray::shallow_copy(&source, 0, &mut target, 0, 2, true).unwrap();
    assert_eq!(target, source);
}

#[test]
fn shallow_copy_rejects_bad_ranges_and_ranks() {
    let source = Counter::numbered(4);
    let mut target = Counter::numbered(4);
    assert!(matches!(
        StructuredArray::shallow_copy(&source, 2, &mut target, 0, 3, false),
        Err(ArrayError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        target.shallow_copy_within(0, 2, 3, false),
        Err(ArrayError::IndexOutOfRange { .. })
    ));

    let mut grid = Counter::numbered_with(&[2, 2]);
    assert!(matches!(
        grid.shallow_copy_within(0, 1, 1, false),
        Err(ArrayError::InvalidArgument { .. })
    ));
}

// ── Type-erased view ─────────────────────────────────────────────────

#[test]
fn erased_arrays_are_checked_before_copying() {
    let counters = Counter::numbered(4);
    let points = PointGrid::new(1, 4).unwrap().into_inner();
    let shelf: [&dyn AnyStructuredArray; 2] = [&counters, &points];

    let mut target = Counter::numbered(4);
    assert!(matches!(
        StructuredArray::shallow_copy_from_any(shelf[1], 0, &mut target, 0, 1, false),
        Err(ArrayError::TypeMismatch { .. })
    ));
    StructuredArray::shallow_copy_from_any(shelf[0], 3, &mut target, 0, 1, false).unwrap();
    assert_eq!(target.get_at(0).unwrap().value, 3);

    assert!(counters.content_eq(shelf[0]).unwrap());
    assert!(matches!(counters.content_eq(shelf[1]), Err(ArrayError::TypeMismatch { .. })));
}

// ── Properties ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn copy_range_maps_each_element_to_its_offset(
        lengths in prop::collection::vec(1u64..6, 1..4),
        seed in prop::collection::vec((0u64..6, 0u64..6), 3),
    ) {
        let source = Counter::numbered_with(&lengths);
        let (offsets, counts): (Vec<u64>, Vec<u64>) = lengths
            .iter()
            .zip(&seed)
            .map(|(&len, &(a, b))| {
                let offset = a % len;
                (offset, b % (len - offset + 1))
            })
            .unzip();

        let copy = StructuredArray::copy_range(&source, &offsets, &counts).unwrap();
        prop_assert_eq!(copy.lengths(), counts.as_slice());

        let mut cursor = copy.iter();
        while let Some(element) = cursor.next() {
            let path = cursor.position().unwrap();
            let shifted: Vec<u64> = path.iter().zip(&offsets).map(|(p, o)| p + o).collect();
            prop_assert_eq!(element, source.get(&shifted).unwrap());
        }
    }

    #[test]
    fn shallow_copy_within_equals_buffered_copy(
        from in 0usize..12,
        to in 0usize..12,
        count in 0usize..12,
    ) {
        prop_assume!(from + count <= 12 && to + count <= 12);
        let mut array = Counter::numbered(12);
        let mut expected = values(&array);
        let buffer = expected[from..from + count].to_vec();
        expected[to..to + count].copy_from_slice(&buffer);

        array.shallow_copy_within(from as u64, to as u64, count as u64, false).unwrap();
        prop_assert_eq!(values(&array), expected);
    }
}
