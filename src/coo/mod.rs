//! Coordinate-list (COO) form
//!
//! A COO array is an index matrix with one row per nonzero (1-based
//! coordinates, one column per dimension) plus a parallel value vector.
//! It is the bulk construction and materialization format for sparse
//! vector trees.

mod conversion;

use crate::error::{Error, Result};
use crate::index::{check_dim, IndexMatrix};
use crate::kind::{Kind, ValueVec};

/// A sparse array in coordinate-list form
///
/// The rows of `(nzindex, nzdata)` are expected in column-major order
/// of the coordinates they address — lexicographic by the outermost
/// column first, with the innermost column (the leaf positions)
/// strictly ascending within each group. [`CooArray::to_svt`] relies on
/// this and rejects rows that arrive out of order.
#[derive(Clone, Debug, PartialEq)]
pub struct CooArray {
    dim: Vec<usize>,
    nzindex: IndexMatrix,
    nzdata: ValueVec,
}

impl CooArray {
    /// Create a COO array from its parts
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] when the index matrix row count
    /// differs from the data length or its column count differs from
    /// the number of dimensions; [`Error::TooManyNonzeros`] for more
    /// than `i32::MAX` rows.
    pub fn new(dim: Vec<usize>, nzindex: IndexMatrix, nzdata: ValueVec) -> Result<Self> {
        check_dim(&dim)?;
        if nzindex.nrow() != nzdata.len() {
            return Err(Error::shape_mismatch(&[nzindex.nrow()], &[nzdata.len()]));
        }
        if nzindex.ncol() != dim.len() {
            return Err(Error::shape_mismatch(&[dim.len()], &[nzindex.ncol()]));
        }
        if nzindex.nrow() > i32::MAX as usize {
            return Err(Error::TooManyNonzeros {
                nnz: nzindex.nrow() as u64,
            });
        }
        Ok(Self {
            dim,
            nzindex,
            nzdata,
        })
    }

    /// The array's dimensions, inner-first
    pub fn dim(&self) -> &[usize] {
        &self.dim
    }

    /// The index matrix: one row per nonzero, one column per dimension
    pub fn nzindex(&self) -> &IndexMatrix {
        &self.nzindex
    }

    /// The nonzero values, parallel to the index rows
    pub fn nzdata(&self) -> &ValueVec {
        &self.nzdata
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.nzdata.len()
    }

    /// The element kind of the stored values
    pub fn kind(&self) -> Kind {
        self.nzdata.kind()
    }
}
