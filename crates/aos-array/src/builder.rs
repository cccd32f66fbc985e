//! Array construction.
//!
//! A build runs in one synchronous pass:
//!
//! ```text
//! validate lengths ─► outer dimension: allocate storage, then for i in 0..len
//!                     build the sub-array over lengths[1..] with path [.., i]
//!                 └─► leaf dimension:  allocate storage, then for i in 0..len
//!                     resolve(path + [i]) ─► instantiate ─► store ─► recycle
//! ```
//!
//! Slots are visited in ascending index order, outer dimensions before inner
//! ones. The first error from the factory or from a constructor aborts the
//! whole build; the partially built tree is dropped and never observable.

use std::any::Any;

use aos_core::{
    ArrayError, Constructor, ElementFactory, FixedFactory, IndexPath, Position,
};
use aos_storage::{PartitionedStorage, StorageConfig};

use crate::array::{Body, StructuredArray};

/// Parameters for building a [`StructuredArray`].
///
/// Carries the lengths, the storage partitioning and an optional context
/// value that every [`Position`] handed to the factory exposes.
///
/// # Examples
///
/// ```
/// use aos_array::ArrayBuilder;
/// use aos_core::{Constructor, ConstructError, IndexedFactory, Position};
///
/// fn scaled(args: &(u64, f64)) -> Result<f64, ConstructError> {
///     Ok(args.0 as f64 * args.1)
/// }
///
/// let factory = IndexedFactory::new(
///     Constructor::new("scaled", scaled),
///     |pos: &Position<'_>, args: &mut (u64, f64)| {
///         *args = (pos.index(), *pos.context::<f64>().unwrap_or(&1.0));
///     },
/// );
/// let scale = 0.5f64;
/// let array = ArrayBuilder::new(&[4]).context(&scale).build(&factory).unwrap();
/// assert_eq!(*array.get_at(3).unwrap(), 1.5);
/// ```
#[derive(Clone, Copy)]
pub struct ArrayBuilder<'c> {
    lengths: &'c [u64],
    config: StorageConfig,
    context: Option<&'c dyn Any>,
}

impl<'c> ArrayBuilder<'c> {
    /// Start a build over the given per-dimension lengths, outermost first.
    pub fn new(lengths: &'c [u64]) -> Self {
        Self {
            lengths,
            config: StorageConfig::default(),
            context: None,
        }
    }

    /// Use a non-default storage partitioning.
    pub fn storage(mut self, config: StorageConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach a context value visible to the factory at every slot.
    pub fn context(mut self, context: &'c dyn Any) -> Self {
        self.context = Some(context);
        self
    }

    /// The lengths this builder will build.
    pub fn lengths(&self) -> &'c [u64] {
        self.lengths
    }

    /// Build the array, resolving every slot through `factory`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if there are no dimensions, the element count
    ///   overflows `u64`, or the storage config is invalid.
    /// - `ConstructionFailure` if a constructor fails.
    /// - Any error returned by the factory.
    pub fn build<T, F>(&self, factory: &F) -> Result<StructuredArray<T>, ArrayError>
    where
        F: ElementFactory<T> + ?Sized,
    {
        self.config.validate()?;
        total_element_count(self.lengths)?;
        let mut build = Build {
            factory,
            config: &self.config,
            context: self.context,
            path: IndexPath::new(),
            ordinal: 0,
        };
        build.level(self.lengths)
    }

    /// Build with every element default-constructed.
    pub fn build_default<T: Default>(&self) -> Result<StructuredArray<T>, ArrayError> {
        self.build(&FixedFactory::<T, ()>::default_construct())
    }

    /// Build with every element constructed from the same arguments.
    pub fn build_with_args<T, A: Clone>(
        &self,
        constructor: Constructor<T, A>,
        args: A,
    ) -> Result<StructuredArray<T>, ArrayError> {
        self.build(&FixedFactory::new(constructor, args))
    }
}

/// Product of `lengths`, or `InvalidArgument` if there are no dimensions or
/// the product overflows. Any zero length makes the product zero.
pub(crate) fn total_element_count(lengths: &[u64]) -> Result<u64, ArrayError> {
    if lengths.is_empty() {
        return Err(ArrayError::invalid_argument(
            "an array needs at least one dimension",
        ));
    }
    if lengths.contains(&0) {
        return Ok(0);
    }
    lengths
        .iter()
        .try_fold(1u64, |acc, &len| acc.checked_mul(len))
        .ok_or_else(|| {
            ArrayError::invalid_argument(format!("element count of {lengths:?} overflows u64"))
        })
}

/// State of one in-progress build.
struct Build<'b, F: ?Sized> {
    factory: &'b F,
    config: &'b StorageConfig,
    context: Option<&'b dyn Any>,
    /// Indices of the enclosing sub-arrays, plus the current slot while a
    /// leaf element is being resolved.
    path: IndexPath,
    /// Row-major ordinal of the next leaf element.
    ordinal: u64,
}

impl<F: ?Sized> Build<'_, F> {
    fn level<T>(&mut self, lengths: &[u64]) -> Result<StructuredArray<T>, ArrayError>
    where
        F: ElementFactory<T>,
    {
        let total = total_element_count(lengths)?;
        let (&length, inner) = lengths
            .split_first()
            .ok_or_else(|| ArrayError::invalid_argument("an array needs at least one dimension"))?;
        let body = if inner.is_empty() {
            Body::Leaf(self.leaf(length)?)
        } else {
            Body::Nested(self.outer(length, inner)?)
        };
        Ok(StructuredArray::from_parts(lengths, total, *self.config, body))
    }

    fn outer<T>(
        &mut self,
        length: u64,
        inner: &[u64],
    ) -> Result<PartitionedStorage<StructuredArray<T>>, ArrayError>
    where
        F: ElementFactory<T>,
    {
        let mut children = PartitionedStorage::allocate(length, self.config)?;
        for index in 0..length {
            self.path.push(index);
            let child = self.level(inner);
            self.path.pop();
            children.push(child?)?;
        }
        Ok(children)
    }

    fn leaf<T>(&mut self, length: u64) -> Result<PartitionedStorage<T>, ArrayError>
    where
        F: ElementFactory<T>,
    {
        let mut elements = PartitionedStorage::allocate(length, self.config)?;
        for index in 0..length {
            self.path.push(index);
            let element = self.element();
            self.path.pop();
            elements.push(element?)?;
            self.ordinal += 1;
        }
        Ok(elements)
    }

    fn element<T>(&self) -> Result<T, ArrayError>
    where
        F: ElementFactory<T>,
    {
        let position = Position::new(&self.path, self.ordinal).with_context(self.context);
        let spec = self.factory.resolve(&position)?;
        let element = spec
            .instantiate()
            .map_err(|reason| ArrayError::ConstructionFailure {
                path: self.path.to_vec(),
                constructor: spec.constructor().name(),
                reason,
            })?;
        self.factory.recycle(spec);
        Ok(element)
    }
}

impl<T> StructuredArray<T> {
    /// Build an array with every element default-constructed.
    pub fn new_instance(lengths: &[u64]) -> Result<Self, ArrayError>
    where
        T: Default,
    {
        ArrayBuilder::new(lengths).build_default()
    }

    /// Build an array with every element constructed from the same arguments.
    pub fn with_args<A: Clone>(
        lengths: &[u64],
        constructor: Constructor<T, A>,
        args: A,
    ) -> Result<Self, ArrayError> {
        ArrayBuilder::new(lengths).build_with_args(constructor, args)
    }

    /// Build an array with per-slot construction driven by `factory`.
    pub fn with_factory<F>(lengths: &[u64], factory: &F) -> Result<Self, ArrayError>
    where
        F: ElementFactory<T> + ?Sized,
    {
        ArrayBuilder::new(lengths).build(factory)
    }
}
