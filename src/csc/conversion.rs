//! CSC conversion: per-column copies between the tree and the slots

use super::CscMatrix;
use crate::error::{Error, Result};
use crate::kind::ValueVec;
use crate::svt::{Leaf, Svt, SvtArray};
use std::sync::Arc;

impl SvtArray {
    /// Materialize a two-dimensional array in compressed sparse column
    /// form
    ///
    /// Each nonempty column slot of the tree is a leaf whose 1-based
    /// positions become 0-based row indices; empty columns repeat the
    /// previous pointer.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] unless the array has exactly two
    /// dimensions, [`Error::TooManyNonzeros`] when the array stores
    /// more than `i32::MAX` entries.
    pub fn to_csc(&self) -> Result<CscMatrix> {
        if self.ndim() != 2 {
            return Err(Error::shape_mismatch(&[2], &[self.ndim()]));
        }
        let nnz64 = self.nnz();
        if nnz64 > i32::MAX as u64 {
            return Err(Error::TooManyNonzeros { nnz: nnz64 });
        }
        let nnz = nnz64 as usize;
        let ncol = self.dim()[1];

        let mut col_ptrs = vec![0i32; ncol + 1];
        let mut row_indices = vec![0i32; nnz];
        let mut values = ValueVec::zeros(self.kind(), nnz);

        let mut offset = 0usize;
        match self.root() {
            Svt::Empty => {}
            Svt::Node(slots) => {
                for (j, slot) in slots.iter().enumerate() {
                    match slot {
                        Svt::Empty => {}
                        Svt::Leaf(leaf) => {
                            leaf.values().copy_run(0, &mut values, offset, leaf.len())?;
                            for &pos in leaf.positions() {
                                row_indices[offset] = pos - 1;
                                offset += 1;
                            }
                        }
                        _ => return Err(Error::InvariantViolated("malformed tree")),
                    }
                    col_ptrs[j + 1] = offset as i32;
                }
            }
            _ => return Err(Error::InvariantViolated("malformed tree")),
        }

        CscMatrix::new([self.dim()[0], ncol], col_ptrs, row_indices, values)
    }
}

impl CscMatrix {
    /// Build a sparse vector tree from this matrix
    ///
    /// The exact inverse of [`SvtArray::to_csc`]: every column with
    /// entries becomes a leaf with positions `row + 1`.
    pub fn to_svt(&self) -> Result<SvtArray> {
        let dim = vec![self.nrow(), self.ncol()];
        if self.nnz() == 0 {
            return SvtArray::new(dim, self.kind());
        }

        let mut slots = Vec::with_capacity(self.ncol());
        for j in 0..self.ncol() {
            let lo = self.col_ptrs()[j] as usize;
            let hi = self.col_ptrs()[j + 1] as usize;
            if hi == lo {
                slots.push(Svt::Empty);
                continue;
            }
            let len = hi - lo;
            let positions = self.row_indices()[lo..hi].iter().map(|&r| r + 1).collect();
            let mut values = ValueVec::zeros(self.kind(), len);
            self.values().copy_run(lo, &mut values, 0, len)?;
            slots.push(Svt::Leaf(Arc::new(Leaf::from_parts(positions, values))));
        }

        Ok(SvtArray::from_parts(
            dim,
            self.kind(),
            Svt::Node(Arc::new(slots)),
        ))
    }
}
