//! Error types for sparr

use crate::kind::Kind;
use thiserror::Error;

/// Result type alias using sparr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sparr operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Element kind outside the supported set, or a bulk element
    /// operation across two incompatible kinds
    #[error("unsupported element kind: {what}")]
    UnsupportedKind {
        /// The offending kind token or kind pair
        what: String,
    },

    /// Value kind differs from the array's kind
    #[error("kind mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// The array's element kind
        expected: Kind,
        /// The kind that was supplied
        got: Kind,
    },

    /// Shape or length contract violation
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected dimensions or lengths
        expected: Vec<usize>,
        /// Actual dimensions or lengths
        got: Vec<usize>,
    },

    /// Coordinate or linear index outside its valid range
    #[error("index {index} out of bounds for extent {bound}")]
    IndexOutOfBounds {
        /// The invalid 1-based index
        index: i64,
        /// The extent it was checked against
        bound: u64,
    },

    /// Index entry that is not a valid 1-based index at all
    #[error("invalid index: {reason}")]
    InvalidIndex {
        /// Why the entry was rejected
        reason: &'static str,
    },

    /// Too many nonzero values for a 32-bit indexed materialization
    #[error("too many nonzero values for a 32-bit indexed form: {nnz}")]
    TooManyNonzeros {
        /// The nonzero count that overflowed
        nnz: u64,
    },

    /// More writes landing on a single slice than a leaf can hold
    #[error("cannot assign {len} values to a single slice (limit {max})", max = i32::MAX)]
    TooManyAssignments {
        /// Number of writes destined for one leaf
        len: u64,
    },

    /// Internal sanity failure; indicates a bug in the engine
    #[error("internal invariant violated: {0}")]
    InvariantViolated(&'static str),
}

impl Error {
    /// Create an unsupported-kind error from a token or description
    pub fn unsupported_kind(what: impl Into<String>) -> Self {
        Self::UnsupportedKind { what: what.into() }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an out-of-bounds error for a 1-based index
    pub fn out_of_bounds(index: i64, bound: u64) -> Self {
        Self::IndexOutOfBounds { index, bound }
    }

    /// Create an invalid-index error
    pub fn invalid_index(reason: &'static str) -> Self {
        Self::InvalidIndex { reason }
    }
}
