//! # sparr
//!
//! **Sparse N-dimensional arrays backed by a Sparse Vector Tree (SVT).**
//!
//! An SVT stores an array whose vast majority of elements equal the
//! element kind's zero value as a tree of depth `ndim - 1`: interior
//! nodes route one dimension each, and the leaves hold the
//! `(position, value)` pairs of a single 1-D slice. Empty subtrees are
//! never allocated, leaves are always sorted, and stored zeros are
//! always purged.
//!
//! ## What the engine does
//!
//! - **Construction** from coordinate lists ([`coo::CooArray`]),
//!   compressed sparse column matrices ([`csc::CscMatrix`]) and dense
//!   buffers ([`dense::DenseArray`])
//! - **Materialization** back to each of those forms
//! - **Scattered subassignment**: writing arbitrary batches of indexed
//!   values with last-write-wins semantics, zero erasure and structural
//!   sharing between input and result
//!
//! Element kinds are selected at runtime from a closed set
//! ([`kind::Kind`]): logical, integer, double, complex, character, raw
//! and list.
//!
//! ## Quick start
//!
//! ```
//! use sparr::prelude::*;
//!
//! // a 3 x 2 integer matrix with three nonzeros
//! let coo = CooArray::new(
//!     vec![3, 2],
//!     IndexMatrix::from_rows(&[&[1, 1], &[3, 1], &[2, 2]])?,
//!     ValueVec::from(vec![5, 6, 7]),
//! )?;
//! let svt = coo.to_svt()?;
//! assert_eq!(svt.nnz(), 3);
//!
//! // overwrite two entries through linear indices; zero erases
//! let out = svt.subassign_by_lindex(LinearIndex::Int(&[2, 5]), &ValueVec::from(vec![9, 0]))?;
//! assert_eq!(out.to_dense()?.data().as_ints().unwrap(), &[5, 9, 6, 0, 0, 0]);
//! # Ok::<(), sparr::error::Error>(())
//! ```
//!
//! ## Execution model
//!
//! The engine is single-threaded and synchronous. Operations either
//! return a finished structure or an error; a failed call leaves its
//! inputs untouched. Arrays are immutable values: subassignment
//! produces a new array that shares every unchanged subtree with its
//! input.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coo;
pub mod csc;
pub mod dense;
pub mod error;
pub mod index;
pub mod kind;
mod subassign;
pub mod svt;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coo::CooArray;
    pub use crate::csc::CscMatrix;
    pub use crate::dense::DenseArray;
    pub use crate::error::{Error, Result};
    pub use crate::index::{IndexMatrix, LinearIndex};
    pub use crate::kind::{Complex128, Kind, Opaque, Scalar, ValueVec};
    pub use crate::svt::{Leaf, SvtArray};
}
