//! Best-effort reuse caches for factory-produced values.
//!
//! A factory that hands out [`ConstructorSpec`](crate::ConstructorSpec)s can
//! park a returned spec in a [`Recycler`] and take it back on the next
//! resolve instead of allocating a fresh one. Reuse is a hint: a `take` that
//! finds nothing (or a `give` that finds the slot occupied) simply falls back
//! to allocation or drop. No call ever blocks.
//!
//! Three flavours, chosen by whoever builds the factory:
//!
//! - [`NoRecycler`]: never retains anything.
//! - [`LocalRecycler`]: single-slot `Cell`; fastest, but `!Sync`, so the
//!   factory can only be used from one thread.
//! - [`SharedRecycler`]: single-slot bounded channel; lock-free and `Sync`,
//!   for factories shared by threads building distinct arrays concurrently.

use std::cell::Cell;

use crossbeam_channel::{bounded, Receiver, Sender};

/// A single-slot cache of reusable values.
pub trait Recycler<S> {
    /// Take the cached value, if any.
    fn take(&self) -> Option<S>;

    /// Offer a value for reuse. May drop it.
    fn give(&self, item: S);
}

/// A recycler that retains nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRecycler;

impl<S> Recycler<S> for NoRecycler {
    fn take(&self) -> Option<S> {
        None
    }

    fn give(&self, _item: S) {}
}

/// Non-thread-safe single-slot recycler.
pub struct LocalRecycler<S> {
    slot: Cell<Option<S>>,
}

impl<S> LocalRecycler<S> {
    /// Create an empty recycler.
    pub fn new() -> Self {
        Self {
            slot: Cell::new(None),
        }
    }
}

impl<S> Default for LocalRecycler<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Recycler<S> for LocalRecycler<S> {
    fn take(&self) -> Option<S> {
        self.slot.take()
    }

    fn give(&self, item: S) {
        self.slot.set(Some(item));
    }
}

/// Thread-safe single-slot recycler backed by a bounded channel of capacity 1.
///
/// `take` and `give` use the non-blocking `try_` operations: a concurrent
/// taker that loses the race gets `None`, and a giver that finds the slot
/// full drops its value.
pub struct SharedRecycler<S> {
    tx: Sender<S>,
    rx: Receiver<S>,
}

impl<S> SharedRecycler<S> {
    /// Create an empty recycler.
    pub fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self { tx, rx }
    }
}

impl<S> Default for SharedRecycler<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Recycler<S> for SharedRecycler<S> {
    fn take(&self) -> Option<S> {
        self.rx.try_recv().ok()
    }

    fn give(&self, item: S) {
        // Slot full: the value is dropped.
        let _ = self.tx.try_send(item);
    }
}
