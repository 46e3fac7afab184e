//! COO conversion: the two-pass tree build and the recursive extraction

use super::CooArray;
use crate::error::{Error, Result};
use crate::index::{coord_to_index, IndexMatrix};
use crate::kind::{Kind, ValueVec};
use crate::svt::{AppendableLeaf, Leaf, Svt, SvtArray};
use smallvec::{smallvec, SmallVec};
use std::sync::Arc;

impl CooArray {
    /// Build a sparse vector tree from this coordinate list
    ///
    /// Two passes over the rows: the first grows the interior levels
    /// and records per-leaf counts in a scaffold at the penultimate
    /// level, the second replaces each nonzero count with a pre-sized
    /// leaf and fills it by appending. The row-ordering contract (see
    /// [`CooArray`]) is what makes appending produce sorted leaves.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] for a coordinate outside its
    /// dimension, [`Error::InvalidIndex`] for rows that violate the
    /// ordering contract.
    pub fn to_svt(&self) -> Result<SvtArray> {
        let dim = self.dim();
        let ndim = dim.len();
        let nnz = self.nnz();

        if nnz == 0 {
            return SvtArray::new(dim.to_vec(), self.kind());
        }

        if ndim == 1 {
            let positions = self.nzindex().col(0).to_vec();
            for &p in &positions {
                coord_to_index(p, dim[0])?;
            }
            let leaf = Leaf::new(positions, self.nzdata().clone())?;
            return Ok(SvtArray::from_parts(
                dim.to_vec(),
                self.kind(),
                Svt::Leaf(Arc::new(leaf)),
            ));
        }

        // 1st pass: grow the branches, only counting the leaves
        let mut root = if ndim == 2 {
            Svt::Counts(vec![0; dim[1]])
        } else {
            Svt::new_node(dim[ndim - 1])
        };
        for row in 0..nnz {
            grow(&mut root, dim, self.nzindex(), row)?;
        }

        // 2nd pass: allocate the leaves and fill them
        for row in 0..nnz {
            store(&mut root, dim, self.nzindex(), self.nzdata(), row)?;
        }

        Ok(SvtArray::from_parts(dim.to_vec(), self.kind(), root))
    }
}

/// Pass 1 for one row: create interior nodes along the row's path and
/// bump the leaf count at the penultimate level
fn grow(root: &mut Svt, dim: &[usize], m: &IndexMatrix, row: usize) -> Result<()> {
    let ndim = dim.len();
    coord_to_index(m.get(row, 0), dim[0])?;

    if ndim == 2 {
        // the scaffold is the root itself
        let k = coord_to_index(m.get(row, 1), dim[1])?;
        return match root {
            Svt::Counts(counts) => {
                counts[k] += 1;
                Ok(())
            }
            _ => Err(Error::InvariantViolated("count scaffold missing")),
        };
    }

    let mut slots = root.as_node_mut()?;
    for j in (3..ndim).rev() {
        let k = coord_to_index(m.get(row, j), dim[j])?;
        let cur = slots;
        let slot = &mut cur[k];
        if slot.is_empty() {
            *slot = Svt::new_node(dim[j - 1]);
        }
        slots = slot.as_node_mut()?;
    }

    let k = coord_to_index(m.get(row, 2), dim[2])?;
    let slot = &mut slots[k];
    if slot.is_empty() {
        *slot = Svt::Counts(vec![0; dim[1]]);
    }
    let kk = coord_to_index(m.get(row, 1), dim[1])?;
    match slot {
        Svt::Counts(counts) => {
            counts[kk] += 1;
            Ok(())
        }
        _ => Err(Error::InvariantViolated("count scaffold missing")),
    }
}

/// Pass 2 for one row: walk the grown branches, turning each count
/// scaffold into appendable leaves on first visit, and append the row's
/// position/value pair
fn store(root: &mut Svt, dim: &[usize], m: &IndexMatrix, nzdata: &ValueVec, row: usize) -> Result<()> {
    let ndim = dim.len();

    let container: &mut Svt = if ndim == 2 {
        root
    } else {
        let mut slots = root.as_node_mut()?;
        for j in (3..ndim).rev() {
            let k = coord_to_index(m.get(row, j), dim[j])?;
            let cur = slots;
            slots = cur[k].as_node_mut()?;
        }
        let k = coord_to_index(m.get(row, 2), dim[2])?;
        &mut slots[k]
    };

    if let Svt::Counts(counts) = container {
        let node = appendable_slots(counts, nzdata.kind());
        *container = node;
    }

    let slots = container.as_node_mut()?;
    let k = coord_to_index(m.get(row, 1), dim[1])?;
    let slot = &mut slots[k];
    let full = match slot {
        Svt::Appendable(leaf) => leaf.append(m.get(row, 0), nzdata, row)?,
        _ => return Err(Error::InvariantViolated("expected an appendable leaf")),
    };
    if full {
        if let Svt::Appendable(leaf) = std::mem::replace(slot, Svt::Empty) {
            *slot = Svt::Leaf(Arc::new(leaf.finish()));
        }
    }
    Ok(())
}

fn appendable_slots(counts: &[i32], kind: Kind) -> Svt {
    let slots = counts
        .iter()
        .map(|&c| {
            if c == 0 {
                Svt::Empty
            } else {
                Svt::Appendable(AppendableLeaf::with_len(c as usize, kind))
            }
        })
        .collect();
    Svt::Node(Arc::new(slots))
}

impl SvtArray {
    /// Materialize this array as a coordinate list
    ///
    /// The produced rows are in column-major order of their
    /// coordinates, so they satisfy the [`CooArray`] ordering contract
    /// and round-trip through [`CooArray::to_svt`].
    ///
    /// # Errors
    ///
    /// [`Error::TooManyNonzeros`] when the array stores more than
    /// `i32::MAX` entries.
    pub fn to_coo(&self) -> Result<CooArray> {
        let nnz64 = self.nnz();
        if nnz64 > i32::MAX as u64 {
            return Err(Error::TooManyNonzeros { nnz: nnz64 });
        }
        let nnz = nnz64 as usize;
        let ndim = self.ndim();

        let mut index = vec![0i32; nnz * ndim];
        let mut nzdata = ValueVec::zeros(self.kind(), nnz);
        let mut rowbuf: SmallVec<[i32; 8]> = smallvec![0; ndim];
        let mut off = 0usize;
        extract(
            self.root(),
            ndim - 1,
            &mut index,
            nnz,
            ndim,
            &mut nzdata,
            &mut rowbuf,
            &mut off,
        )?;
        if off != nnz {
            return Err(Error::InvariantViolated("extracted row count mismatch"));
        }

        CooArray::new(
            self.dim().to_vec(),
            IndexMatrix::new(index, nnz, ndim)?,
            nzdata,
        )
    }
}

/// Emit one coordinate row per stored pair, depth first
///
/// `rowbuf[level]` carries the 1-based coordinate of the slot currently
/// being walked at each interior level; a leaf completes the row with
/// its positions.
#[allow(clippy::too_many_arguments)]
fn extract(
    node: &Svt,
    level: usize,
    index: &mut [i32],
    nrow: usize,
    ncol: usize,
    nzdata: &mut ValueVec,
    rowbuf: &mut [i32],
    off: &mut usize,
) -> Result<()> {
    match node {
        Svt::Empty => Ok(()),
        Svt::Node(slots) => {
            if level == 0 {
                return Err(Error::InvariantViolated("malformed tree"));
            }
            for (k, child) in slots.iter().enumerate() {
                rowbuf[level] = (k + 1) as i32;
                extract(child, level - 1, index, nrow, ncol, nzdata, rowbuf, off)?;
            }
            Ok(())
        }
        Svt::Leaf(leaf) => {
            leaf.values().copy_run(0, nzdata, *off, leaf.len())?;
            for &pos in leaf.positions() {
                rowbuf[0] = pos;
                for j in 0..ncol {
                    index[j * nrow + *off] = rowbuf[j];
                }
                *off += 1;
            }
            Ok(())
        }
        _ => Err(Error::InvariantViolated("malformed tree")),
    }
}
