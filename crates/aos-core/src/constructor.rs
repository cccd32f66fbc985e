//! Constructor identities and reusable constructor-plus-arguments specs.
//!
//! A [`Constructor`] names one way of building a `T` from an argument payload
//! `A`. A [`ConstructorSpec`] pairs a constructor with the payload to pass it,
//! and can be re-targeted in place so bulk construction does not allocate a
//! new spec per element.

use std::fmt;

use crate::error::{ArrayError, ConstructError};

/// Signature of a constructor function.
pub type ConstructFn<T, A> = fn(&A) -> Result<T, ConstructError>;

/// A named constructor for `T` taking arguments `A`.
///
/// The name identifies the constructor in diagnostics and in
/// [`ArrayError::ConstructionFailure`].
pub struct Constructor<T, A> {
    name: &'static str,
    func: ConstructFn<T, A>,
}

impl<T, A> Constructor<T, A> {
    /// Wrap a constructor function under a name.
    pub const fn new(name: &'static str, func: ConstructFn<T, A>) -> Self {
        Self { name, func }
    }

    /// The constructor's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invoke the constructor.
    pub fn invoke(&self, args: &A) -> Result<T, ConstructError> {
        (self.func)(args)
    }
}

impl<T: Default> Constructor<T, ()> {
    /// The no-argument constructor, backed by [`Default`].
    pub fn default_constructor() -> Self {
        Self::new("default", construct_default::<T>)
    }
}

impl<'s, T: Clone> Constructor<T, &'s T> {
    /// The copy constructor: builds a `T` from a reference to another `T`.
    pub fn copy_constructor() -> Self {
        Self::new("copy", construct_copy::<T>)
    }
}

fn construct_default<T: Default>(_: &()) -> Result<T, ConstructError> {
    Ok(T::default())
}

fn construct_copy<T: Clone>(source: &&T) -> Result<T, ConstructError> {
    Ok((*source).clone())
}

impl<T, A> Clone for Constructor<T, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, A> Copy for Constructor<T, A> {}

impl<T, A> fmt::Debug for Constructor<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Constructor").field(&self.name).finish()
    }
}

/// A constructor together with the arguments to invoke it with.
///
/// Both parts are always present. The argument payload is mutable in place
/// ([`set_args`](Self::set_args), [`args_mut`](Self::args_mut)) so a factory
/// can hand the same spec out again after it has been recycled.
/// Mismatches between arguments and what the constructor expects surface only
/// when [`instantiate`](Self::instantiate) runs.
pub struct ConstructorSpec<T, A> {
    constructor: Constructor<T, A>,
    args: A,
}

impl<T, A> ConstructorSpec<T, A> {
    /// Pair a constructor with its arguments.
    pub fn new(constructor: Constructor<T, A>, args: A) -> Self {
        Self { constructor, args }
    }

    /// Assemble a spec from parts that may be missing.
    ///
    /// Returns `Err(ArrayError::InvalidArgument)` if either the constructor
    /// or the arguments are `None`.
    pub fn try_from_parts(
        constructor: Option<Constructor<T, A>>,
        args: Option<A>,
    ) -> Result<Self, ArrayError> {
        let constructor =
            constructor.ok_or_else(|| ArrayError::invalid_argument("constructor is not set"))?;
        let args = args.ok_or_else(|| {
            ArrayError::invalid_argument(format!(
                "arguments for constructor '{}' are not set",
                constructor.name()
            ))
        })?;
        Ok(Self::new(constructor, args))
    }

    /// The constructor this spec invokes.
    pub fn constructor(&self) -> &Constructor<T, A> {
        &self.constructor
    }

    /// Re-target the spec at another constructor of the same signature.
    pub fn set_constructor(&mut self, constructor: Constructor<T, A>) {
        self.constructor = constructor;
    }

    /// The arguments passed to the constructor.
    pub fn args(&self) -> &A {
        &self.args
    }

    /// Mutable access to the arguments, for in-place reuse.
    pub fn args_mut(&mut self) -> &mut A {
        &mut self.args
    }

    /// Replace the arguments, returning the previous ones.
    pub fn set_args(&mut self, args: A) -> A {
        std::mem::replace(&mut self.args, args)
    }

    /// Split the spec back into its parts.
    pub fn into_parts(self) -> (Constructor<T, A>, A) {
        (self.constructor, self.args)
    }

    /// Build a `T` by invoking the constructor with the arguments.
    pub fn instantiate(&self) -> Result<T, ConstructError> {
        self.constructor.invoke(&self.args)
    }
}

impl<T: Default> ConstructorSpec<T, ()> {
    /// Spec invoking the default constructor with an empty argument list.
    pub fn default_for() -> Self {
        Self::new(Constructor::default_constructor(), ())
    }
}

impl<T, A: Clone> Clone for ConstructorSpec<T, A> {
    fn clone(&self) -> Self {
        Self {
            constructor: self.constructor,
            args: self.args.clone(),
        }
    }
}

impl<T, A: fmt::Debug> fmt::Debug for ConstructorSpec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorSpec")
            .field("constructor", &self.constructor.name)
            .field("args", &self.args)
            .finish()
    }
}
