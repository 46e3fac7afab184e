//! Dense column-major arrays
//!
//! The materialized counterpart of a sparse vector tree: one value per
//! element, first dimension varying fastest. Used as a conversion
//! endpoint; no arithmetic lives here.

mod conversion;

use crate::error::{Error, Result};
use crate::index::{check_dim, total_len};
use crate::kind::{Kind, Scalar, ValueVec};

/// A dense N-dimensional array in column-major layout
#[derive(Clone, Debug, PartialEq)]
pub struct DenseArray {
    dim: Vec<usize>,
    data: ValueVec,
}

impl DenseArray {
    /// Create a dense array over an existing buffer
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] when the buffer length does not equal
    /// the product of the extents.
    pub fn new(dim: Vec<usize>, data: ValueVec) -> Result<Self> {
        check_dim(&dim)?;
        let expected = total_len(&dim);
        if data.len() as u64 != expected {
            return Err(Error::shape_mismatch(&[expected as usize], &[data.len()]));
        }
        Ok(Self { dim, data })
    }

    /// Create a zero-filled dense array
    pub fn zeros(dim: Vec<usize>, kind: Kind) -> Result<Self> {
        check_dim(&dim)?;
        let len = total_len(&dim) as usize;
        Ok(Self {
            dim,
            data: ValueVec::zeros(kind, len),
        })
    }

    /// The array's dimensions, inner-first
    pub fn dim(&self) -> &[usize] {
        &self.dim
    }

    /// The column-major element buffer
    pub fn data(&self) -> &ValueVec {
        &self.data
    }

    /// The element kind of the buffer
    pub fn kind(&self) -> Kind {
        self.data.kind()
    }

    /// Number of elements (zero or not)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the array has no elements at all
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of non-zero elements
    pub fn count_nonzero(&self) -> u64 {
        self.data.count_nonzero_run(0, self.data.len()) as u64
    }

    /// Look up one element by its full 1-based multi-index
    pub fn get(&self, index: &[i32]) -> Result<Scalar> {
        if index.len() != self.dim.len() {
            return Err(Error::shape_mismatch(&[self.dim.len()], &[index.len()]));
        }
        let mut offset = 0usize;
        let mut stride = 1usize;
        for (&c, &d) in index.iter().zip(&self.dim) {
            crate::index::coord_to_index(c, d)?;
            offset += (c as usize - 1) * stride;
            stride *= d;
        }
        Ok(self.data.get(offset))
    }
}
