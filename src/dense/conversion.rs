//! Dense conversion: zero-suppressing scan and scattered fill

use super::DenseArray;
use crate::error::{Error, Result};
use crate::kind::ValueVec;
use crate::svt::{Leaf, Svt, SvtArray};
use std::sync::Arc;

impl DenseArray {
    /// Build a sparse vector tree by scanning this buffer
    ///
    /// Recursive descent over the strided subarrays: at the innermost
    /// dimension each run of `dim[0]` elements is scanned twice, once
    /// to count its nonzeros and once to fill a leaf of exactly that
    /// length. An interior level whose children are all empty collapses
    /// to the empty subtree, so the result never holds empty branches.
    pub fn to_svt(&self) -> Result<SvtArray> {
        if self.is_empty() {
            // at least one extent is zero
            return SvtArray::new(self.dim().to_vec(), self.kind());
        }
        let root = scan(self.data(), 0, self.len(), self.dim(), self.dim().len())?;
        Ok(SvtArray::from_parts(self.dim().to_vec(), self.kind(), root))
    }
}

/// Build the subtree for the subarray of `len` elements at `offset`
fn scan(data: &ValueVec, offset: usize, len: usize, dim: &[usize], ndim: usize) -> Result<Svt> {
    if ndim == 1 {
        let d0 = dim[0];
        let nz = data.count_nonzero_run(offset, d0);
        if nz == 0 {
            return Ok(Svt::Empty);
        }
        let mut positions = Vec::with_capacity(nz);
        let mut values = ValueVec::zeros(data.kind(), nz);
        let mut k = 0;
        for i in 0..d0 {
            if !data.is_zero(offset + i) {
                positions.push((i + 1) as i32);
                data.copy_one(offset + i, &mut values, k)?;
                k += 1;
            }
        }
        return Ok(Svt::Leaf(Arc::new(Leaf::from_parts(positions, values))));
    }

    let extent = dim[ndim - 1];
    let sub_len = len / extent;
    let mut slots = Vec::with_capacity(extent);
    let mut empty = true;
    for k in 0..extent {
        let child = scan(data, offset + k * sub_len, sub_len, dim, ndim - 1)?;
        if !child.is_empty() {
            empty = false;
        }
        slots.push(child);
    }
    if empty {
        Ok(Svt::Empty)
    } else {
        Ok(Svt::Node(Arc::new(slots)))
    }
}

impl SvtArray {
    /// Materialize this array as a dense column-major buffer
    ///
    /// The buffer starts zero-filled; each leaf scatters its values to
    /// `base + position - 1` within its slice.
    pub fn to_dense(&self) -> Result<DenseArray> {
        let mut dense = DenseArray::zeros(self.dim().to_vec(), self.kind())?;
        let len = dense.len();
        fill(self.root(), &mut dense.data, 0, len)?;
        Ok(dense)
    }
}

fn fill(node: &Svt, data: &mut ValueVec, offset: usize, len: usize) -> Result<()> {
    match node {
        Svt::Empty => Ok(()),
        Svt::Leaf(leaf) => {
            for (k, &pos) in leaf.positions().iter().enumerate() {
                leaf.values().copy_one(k, data, offset + pos as usize - 1)?;
            }
            Ok(())
        }
        Svt::Node(slots) => {
            let sub_len = len / slots.len();
            for (k, child) in slots.iter().enumerate() {
                fill(child, data, offset + k * sub_len, sub_len)?;
            }
            Ok(())
        }
        _ => Err(Error::InvariantViolated("malformed tree")),
    }
}
