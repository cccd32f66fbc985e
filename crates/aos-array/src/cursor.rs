//! Resettable forward cursor over a structured array's elements.

use aos_core::IndexPath;

use crate::array::StructuredArray;

/// Forward iterator over every element in row-major order.
///
/// Unlike a plain iterator it can be [`reset`](Self::reset) to the first
/// element and reports the index path of the element it last yielded.
///
/// ```
/// use aos_array::StructuredArray;
///
/// let array = StructuredArray::<u8>::new_instance(&[2, 3]).unwrap();
/// let mut cursor = array.iter();
/// assert_eq!(cursor.by_ref().count(), 6);
/// assert_eq!(cursor.position(), Some(&[1u64, 2][..]));
/// cursor.reset();
/// assert_eq!(cursor.count(), 6);
/// ```
pub struct ElementCursor<'a, T> {
    array: &'a StructuredArray<T>,
    /// Path of the next element to yield.
    next: IndexPath,
    /// Path of the element last yielded, if any.
    last: Option<IndexPath>,
    yielded: u64,
}

impl<'a, T> ElementCursor<'a, T> {
    pub(crate) fn new(array: &'a StructuredArray<T>) -> Self {
        Self {
            array,
            next: start_path(array),
            last: None,
            yielded: 0,
        }
    }

    /// Rewind to the first element.
    pub fn reset(&mut self) {
        self.next = start_path(self.array);
        self.last = None;
        self.yielded = 0;
    }

    /// Index path of the most recently yielded element.
    pub fn position(&self) -> Option<&[u64]> {
        self.last.as_deref()
    }

    /// Number of elements yielded since creation or the last reset.
    pub fn yielded(&self) -> u64 {
        self.yielded
    }

    /// Advance `next` one slot in row-major order.
    fn advance(&mut self) {
        let lengths = self.array.lengths();
        for dim in (0..self.next.len()).rev() {
            self.next[dim] += 1;
            if self.next[dim] < lengths[dim] || dim == 0 {
                return;
            }
            self.next[dim] = 0;
        }
    }
}

fn start_path<T>(array: &StructuredArray<T>) -> IndexPath {
    IndexPath::from_elem(0, array.dimension_count())
}

impl<'a, T> Iterator for ElementCursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.yielded >= self.array.total_element_count() {
            return None;
        }
        let array = self.array;
        let element = array.get(&self.next).ok()?;
        self.last = Some(self.next.clone());
        self.yielded += 1;
        self.advance();
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.array.total_element_count() - self.yielded;
        match usize::try_from(left) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
