//! Reusable element types and factories.
//!
//! - [`Point`]: two integer fields, built from `(x, y)`.
//! - [`Counter`]: one integer field, built from a value.
//! - [`Anchored`]: has a construction-only `id` field.
//! - [`RecordingFactory`]: builds counters and records every position.
//! - [`FailingFactory`]: fails deterministically after N elements.
//! - [`PointGrid`]: typed 2-D facade over `StructuredArray<Point>`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use aos_array::{ArrayBuilder, StructuredArray};
use aos_core::{
    ArrayError, ConstructError, Constructor, ConstructorSpec, ElementFactory, IndexedFactory,
    Position, ShallowCopy,
};

// ── Element types ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const XY: Constructor<Point, (i64, i64)> = Constructor::new("xy", point_from_xy);

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

fn point_from_xy(args: &(i64, i64)) -> Result<Point, ConstructError> {
    Ok(Point::new(args.0, args.1))
}

impl ShallowCopy for Point {
    fn copy_fields_from(&mut self, source: &Self) {
        self.x = source.x;
        self.y = source.y;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counter {
    pub value: u64,
}

impl Counter {
    pub const FROM_VALUE: Constructor<Counter, u64> = Constructor::new("from_value", counter_from_value);

    /// 1-D array of `len` counters, each holding its own index.
    pub fn numbered(len: u64) -> StructuredArray<Counter> {
        Self::numbered_with(&[len])
    }

    /// Counters holding their row-major ordinal.
    pub fn numbered_with(lengths: &[u64]) -> StructuredArray<Counter> {
        let factory = IndexedFactory::new(Self::FROM_VALUE, |pos: &Position<'_>, v: &mut u64| {
            *v = pos.ordinal()
        });
        StructuredArray::with_factory(lengths, &factory).expect("valid lengths")
    }
}

fn counter_from_value(args: &u64) -> Result<Counter, ConstructError> {
    Ok(Counter { value: *args })
}

impl ShallowCopy for Counter {
    fn copy_fields_from(&mut self, source: &Self) {
        self.value = source.value;
    }
}

/// Element whose `id` is meant to be fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchored {
    pub id: u64,
    pub weight: f64,
}

impl Anchored {
    pub const NEW: Constructor<Anchored, (u64, f64)> = Constructor::new("new", anchored_new);
}

fn anchored_new(args: &(u64, f64)) -> Result<Anchored, ConstructError> {
    if args.1.is_nan() {
        return Err(ConstructError::new("weight is NaN"));
    }
    Ok(Anchored {
        id: args.0,
        weight: args.1,
    })
}

impl ShallowCopy for Anchored {
    const HAS_FINAL_FIELDS: bool = true;

    fn copy_fields_from(&mut self, source: &Self) {
        self.id = source.id;
        self.weight = source.weight;
    }
}

// ── Factories ────────────────────────────────────────────────────────

/// Builds [`Counter`]s holding their ordinal and records each resolved path.
///
/// Uses a `Mutex` so the factory is `Sync` and can be shared across threads.
pub struct RecordingFactory {
    seen: Mutex<Vec<Vec<u64>>>,
    recycled: AtomicUsize,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            recycled: AtomicUsize::new(0),
        }
    }

    /// Paths resolved so far, in resolution order.
    pub fn seen(&self) -> Vec<Vec<u64>> {
        self.seen.lock().expect("recording lock").clone()
    }

    /// Number of specs handed back through `recycle`.
    pub fn recycled(&self) -> usize {
        self.recycled.load(Ordering::Relaxed)
    }
}

impl Default for RecordingFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementFactory<Counter> for RecordingFactory {
    type Args = u64;

    fn resolve(&self, position: &Position<'_>) -> Result<ConstructorSpec<Counter, u64>, ArrayError> {
        self.seen
            .lock()
            .expect("recording lock")
            .push(position.path().to_vec());
        Ok(ConstructorSpec::new(Counter::FROM_VALUE, position.ordinal()))
    }

    fn recycle(&self, _spec: ConstructorSpec<Counter, u64>) {
        self.recycled.fetch_add(1, Ordering::Relaxed);
    }
}

/// Builds [`Anchored`] elements, passing a NaN weight after `succeed_count`
/// elements so the constructor fails.
pub struct FailingFactory {
    succeed_count: usize,
    calls: AtomicUsize,
}

impl FailingFactory {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl ElementFactory<Anchored> for FailingFactory {
    type Args = (u64, f64);

    fn resolve(
        &self,
        position: &Position<'_>,
    ) -> Result<ConstructorSpec<Anchored, (u64, f64)>, ArrayError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        let weight = if n < self.succeed_count { 1.0 } else { f64::NAN };
        Ok(ConstructorSpec::new(Anchored::NEW, (position.ordinal(), weight)))
    }
}

// ── Typed facade ─────────────────────────────────────────────────────

/// A `rows x cols` grid of points, each initialised to its own coordinates.
pub struct PointGrid {
    inner: StructuredArray<Point>,
}

impl PointGrid {
    pub fn new(rows: u64, cols: u64) -> Result<Self, ArrayError> {
        let factory = IndexedFactory::new(Point::XY, |pos: &Position<'_>, xy: &mut (i64, i64)| {
            *xy = (pos.containing()[0] as i64, pos.index() as i64);
        });
        let inner = ArrayBuilder::new(&[rows, cols]).build(&factory)?;
        Ok(Self { inner })
    }

    pub fn rows(&self) -> u64 {
        self.inner.lengths()[0]
    }

    pub fn cols(&self) -> u64 {
        self.inner.lengths()[1]
    }

    pub fn point(&self, row: u64, col: u64) -> Result<&Point, ArrayError> {
        self.inner.get(&[row, col])
    }

    pub fn point_mut(&mut self, row: u64, col: u64) -> Result<&mut Point, ArrayError> {
        self.inner.get_mut(&[row, col])
    }

    pub fn row(&self, row: u64) -> Result<&StructuredArray<Point>, ArrayError> {
        self.inner.sub_array(row)
    }

    pub fn as_array(&self) -> &StructuredArray<Point> {
        &self.inner
    }

    pub fn into_inner(self) -> StructuredArray<Point> {
        self.inner
    }
}
