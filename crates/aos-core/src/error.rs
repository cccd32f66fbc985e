//! Error types for structured array construction and access.
//!
//! Every failure in the workspace surfaces synchronously as one of the
//! [`ArrayError`] kinds below. Nothing is retried internally and nothing is
//! downgraded to a log line.

use std::error::Error;
use std::fmt;

/// Failure reported by a user-supplied element constructor.
///
/// Returned from the function wrapped by a
/// [`Constructor`](crate::constructor::Constructor). The array engine wraps it
/// in [`ArrayError::ConstructionFailure`] together with the index path of the
/// slot being built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructError {
    /// Human-readable description of the failure.
    pub reason: String,
}

impl ConstructError {
    /// Create a construction error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl Error for ConstructError {}

/// Errors from structured array construction, indexing and copying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// Malformed parameters: an empty lengths vector, an index vector whose
    /// length differs from the dimension count, a missing constructor or
    /// argument payload, or a shallow copy over a multi-dimensional array.
    InvalidArgument {
        /// What was wrong with the argument.
        reason: String,
    },
    /// An index outside `[0, length)` at some dimension.
    IndexOutOfRange {
        /// Dimension (0 = outermost) at which the index was rejected.
        dimension: usize,
        /// The offending index.
        index: u64,
        /// Length of that dimension.
        length: u64,
    },
    /// Two arrays with different element types were copied or compared.
    TypeMismatch {
        /// Element type of the array the operation was invoked on.
        expected: &'static str,
        /// Element type of the other array.
        found: &'static str,
    },
    /// The operation is not permitted in the current state, e.g. a shallow
    /// copy that would overwrite construction-time-only fields.
    InvalidState {
        /// Why the operation was refused.
        reason: String,
    },
    /// An element constructor failed; the enclosing build was abandoned.
    ConstructionFailure {
        /// Index path of the slot being constructed, outermost first.
        path: Vec<u64>,
        /// Name of the constructor that failed.
        constructor: &'static str,
        /// The underlying constructor error.
        reason: ConstructError,
    },
}

impl ArrayError {
    /// Shorthand for [`ArrayError::InvalidArgument`].
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`ArrayError::InvalidState`].
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    /// Check `index` against `length` at `dimension`.
    ///
    /// Rejects `index >= length`; never clamps or wraps.
    pub fn check_index(dimension: usize, index: u64, length: u64) -> Result<(), Self> {
        if index >= length {
            return Err(Self::IndexOutOfRange {
                dimension,
                index,
                length,
            });
        }
        Ok(())
    }
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::IndexOutOfRange {
                dimension,
                index,
                length,
            } => {
                write!(
                    f,
                    "index {index} out of range for dimension {dimension} of length {length}"
                )
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "element type mismatch: expected {expected}, found {found}")
            }
            Self::InvalidState { reason } => write!(f, "invalid state: {reason}"),
            Self::ConstructionFailure {
                path,
                constructor,
                reason,
            } => {
                write!(
                    f,
                    "constructor '{constructor}' failed at {path:?}: {reason}"
                )
            }
        }
    }
}

impl Error for ArrayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ConstructionFailure { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
