//! Element factories: per-slot constructor resolution.
//!
//! During a build the array engine asks its [`ElementFactory`] for a
//! [`ConstructorSpec`] at every slot, instantiates the element from it, and
//! hands the spec back through [`recycle`](ElementFactory::recycle).
//! Slots are resolved in ascending row-major order, outer dimensions before
//! inner ones, so a factory may track the last position it saw.
//!
//! Factories take `&self`: one built without interior mutability can be
//! shared by threads building distinct arrays. Stateful factories pick
//! their own synchronisation.

use std::fmt;
use std::marker::PhantomData;

use crate::constructor::{Constructor, ConstructorSpec};
use crate::error::ArrayError;
use crate::position::Position;
use crate::recycle::{LocalRecycler, NoRecycler, Recycler, SharedRecycler};

/// Strategy supplying the constructor and arguments for each slot.
pub trait ElementFactory<T> {
    /// Argument payload of the specs this factory produces.
    type Args;

    /// Resolve the spec used to construct the element at `position`.
    ///
    /// Errors abort the build and are returned to the caller unchanged.
    fn resolve(&self, position: &Position<'_>) -> Result<ConstructorSpec<T, Self::Args>, ArrayError>;

    /// Return a spec obtained from [`resolve`](Self::resolve) once the element
    /// has been built. Implementations may ignore it.
    fn recycle(&self, spec: ConstructorSpec<T, Self::Args>) {
        drop(spec);
    }
}

impl<T, F: ElementFactory<T> + ?Sized> ElementFactory<T> for &F {
    type Args = F::Args;

    fn resolve(&self, position: &Position<'_>) -> Result<ConstructorSpec<T, Self::Args>, ArrayError> {
        (**self).resolve(position)
    }

    fn recycle(&self, spec: ConstructorSpec<T, Self::Args>) {
        (**self).recycle(spec)
    }
}

// ── FixedFactory ───────────────────────────────────────────────────

/// Returns the same constructor and arguments for every slot.
pub struct FixedFactory<T, A> {
    spec: ConstructorSpec<T, A>,
}

impl<T, A: Clone> FixedFactory<T, A> {
    /// Construct every element with `constructor(args)`.
    pub fn new(constructor: Constructor<T, A>, args: A) -> Self {
        Self {
            spec: ConstructorSpec::new(constructor, args),
        }
    }

    /// Wrap an existing spec.
    pub fn from_spec(spec: ConstructorSpec<T, A>) -> Self {
        Self { spec }
    }

    /// The spec handed out for every slot.
    pub fn spec(&self) -> &ConstructorSpec<T, A> {
        &self.spec
    }
}

impl<T: Default> FixedFactory<T, ()> {
    /// Default-construct every element.
    pub fn default_construct() -> Self {
        Self::from_spec(ConstructorSpec::default_for())
    }
}

impl<T, A: Clone> ElementFactory<T> for FixedFactory<T, A> {
    type Args = A;

    fn resolve(&self, _position: &Position<'_>) -> Result<ConstructorSpec<T, A>, ArrayError> {
        Ok(self.spec.clone())
    }
}

impl<T, A: fmt::Debug> fmt::Debug for FixedFactory<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedFactory")
            .field("spec", &self.spec)
            .finish()
    }
}

// ── IndexedFactory ─────────────────────────────────────────────────

/// Generates per-slot arguments from the slot's position.
///
/// The generator fills an argument payload in place. When a spec comes back
/// through [`recycle`](ElementFactory::recycle) it is parked in the
/// recycler `R` and its payload is overwritten for the next slot, so
/// payloads that own heap storage (e.g. `Vec`) keep their allocation.
pub struct IndexedFactory<T, A, G, R = LocalRecycler<ConstructorSpec<T, A>>> {
    constructor: Constructor<T, A>,
    generator: G,
    recycler: R,
    _marker: PhantomData<fn() -> A>,
}

impl<T, A, G> IndexedFactory<T, A, G>
where
    A: Default,
    G: Fn(&Position<'_>, &mut A),
{
    /// Factory with a non-thread-safe recycle cache.
    pub fn new(constructor: Constructor<T, A>, generator: G) -> Self {
        Self::with_recycler(constructor, generator, LocalRecycler::new())
    }
}

impl<T, A, G> IndexedFactory<T, A, G, SharedRecycler<ConstructorSpec<T, A>>>
where
    A: Default,
    G: Fn(&Position<'_>, &mut A),
{
    /// Factory with a lock-free recycle cache, usable from several threads.
    pub fn shared(constructor: Constructor<T, A>, generator: G) -> Self {
        Self::with_recycler(constructor, generator, SharedRecycler::new())
    }
}

impl<T, A, G> IndexedFactory<T, A, G, NoRecycler>
where
    A: Default,
    G: Fn(&Position<'_>, &mut A),
{
    /// Factory that allocates a fresh spec for every slot.
    pub fn without_recycling(constructor: Constructor<T, A>, generator: G) -> Self {
        Self::with_recycler(constructor, generator, NoRecycler)
    }
}

impl<T, A, G, R> IndexedFactory<T, A, G, R>
where
    A: Default,
    G: Fn(&Position<'_>, &mut A),
    R: Recycler<ConstructorSpec<T, A>>,
{
    /// Factory using an explicit recycler.
    pub fn with_recycler(constructor: Constructor<T, A>, generator: G, recycler: R) -> Self {
        Self {
            constructor,
            generator,
            recycler,
            _marker: PhantomData,
        }
    }

    /// The constructor invoked for every slot.
    pub fn constructor(&self) -> &Constructor<T, A> {
        &self.constructor
    }
}

impl<T, A, G, R> ElementFactory<T> for IndexedFactory<T, A, G, R>
where
    A: Default,
    G: Fn(&Position<'_>, &mut A),
    R: Recycler<ConstructorSpec<T, A>>,
{
    type Args = A;

    fn resolve(&self, position: &Position<'_>) -> Result<ConstructorSpec<T, A>, ArrayError> {
        let mut spec = match self.recycler.take() {
            Some(mut spec) => {
                spec.set_constructor(self.constructor);
                spec
            }
            None => ConstructorSpec::new(self.constructor, A::default()),
        };
        (self.generator)(position, spec.args_mut());
        Ok(spec)
    }

    fn recycle(&self, spec: ConstructorSpec<T, A>) {
        self.recycler.give(spec);
    }
}

impl<T, A, G, R> fmt::Debug for IndexedFactory<T, A, G, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedFactory")
            .field("constructor", &self.constructor)
            .finish_non_exhaustive()
    }
}
