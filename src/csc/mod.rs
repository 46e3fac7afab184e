//! Compressed sparse column (CSC) form
//!
//! The 2-D interchange format: column pointers `p`, 0-based row indices
//! `i` and values `x`. Conversions to and from the tree are direct
//! per-column copies; only two-dimensional arrays participate.

mod conversion;

use crate::error::{Error, Result};
use crate::index::check_dim;
use crate::kind::{Kind, ValueVec};

/// A sparse matrix in compressed sparse column form
#[derive(Clone, Debug, PartialEq)]
pub struct CscMatrix {
    dim: [usize; 2],
    col_ptrs: Vec<i32>,
    row_indices: Vec<i32>,
    values: ValueVec,
}

impl CscMatrix {
    /// Create a CSC matrix from its three slots
    ///
    /// Validates the whole contract: `p` has `ncols + 1` monotone
    /// entries starting at zero and ending at the nonzero count, and
    /// each column's row indices are 0-based, in range and strictly
    /// ascending.
    pub fn new(
        dim: [usize; 2],
        col_ptrs: Vec<i32>,
        row_indices: Vec<i32>,
        values: ValueVec,
    ) -> Result<Self> {
        check_dim(&dim)?;
        let (nrow, ncol) = (dim[0], dim[1]);
        if col_ptrs.len() != ncol + 1 {
            return Err(Error::shape_mismatch(&[ncol + 1], &[col_ptrs.len()]));
        }
        if row_indices.len() != values.len() {
            return Err(Error::shape_mismatch(&[row_indices.len()], &[values.len()]));
        }
        if col_ptrs[0] != 0 {
            return Err(Error::invalid_index("column pointers must start at zero"));
        }
        if col_ptrs[ncol] as usize != row_indices.len() {
            return Err(Error::shape_mismatch(
                &[col_ptrs[ncol] as usize],
                &[row_indices.len()],
            ));
        }
        for j in 0..ncol {
            let (lo, hi) = (col_ptrs[j], col_ptrs[j + 1]);
            if hi < lo {
                return Err(Error::invalid_index(
                    "column pointers must be non-decreasing",
                ));
            }
            let mut prev = -1i32;
            for k in lo..hi {
                let r = row_indices[k as usize];
                if r < 0 || r as usize >= nrow {
                    return Err(Error::out_of_bounds(r as i64, nrow as u64));
                }
                if r <= prev {
                    return Err(Error::invalid_index(
                        "row indices must be strictly ascending within a column",
                    ));
                }
                prev = r;
            }
        }
        Ok(Self {
            dim,
            col_ptrs,
            row_indices,
            values,
        })
    }

    /// The matrix dimensions, `[nrow, ncol]`
    pub fn dim(&self) -> [usize; 2] {
        self.dim
    }

    /// Number of rows
    pub fn nrow(&self) -> usize {
        self.dim[0]
    }

    /// Number of columns
    pub fn ncol(&self) -> usize {
        self.dim[1]
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// The column pointer slot: `ncol + 1` monotone offsets
    pub fn col_ptrs(&self) -> &[i32] {
        &self.col_ptrs
    }

    /// The 0-based row index slot, parallel to the values
    pub fn row_indices(&self) -> &[i32] {
        &self.row_indices
    }

    /// The stored values
    pub fn values(&self) -> &ValueVec {
        &self.values
    }

    /// The element kind of the stored values
    pub fn kind(&self) -> Kind {
        self.values.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        let ok = CscMatrix::new(
            [3, 2],
            vec![0, 2, 3],
            vec![0, 2, 1],
            ValueVec::from(vec![5, 6, 7]),
        );
        assert!(ok.is_ok());

        // pointer slot of the wrong length
        assert!(CscMatrix::new([3, 2], vec![0, 2], vec![0, 2], ValueVec::from(vec![5, 6])).is_err());
        // decreasing pointers
        assert!(CscMatrix::new(
            [3, 2],
            vec![0, 2, 1],
            vec![0, 2, 1],
            ValueVec::from(vec![5, 6, 7])
        )
        .is_err());
        // row index out of range
        assert!(CscMatrix::new(
            [3, 2],
            vec![0, 2, 3],
            vec![0, 3, 1],
            ValueVec::from(vec![5, 6, 7])
        )
        .is_err());
        // duplicate row within a column
        assert!(CscMatrix::new(
            [3, 2],
            vec![0, 2, 3],
            vec![0, 0, 1],
            ValueVec::from(vec![5, 6, 7])
        )
        .is_err());
    }
}
