//! Scattered subassignment
//!
//! Writing an arbitrary batch of `(index, value)` pairs into a sparse
//! vector tree runs in two passes:
//!
//! 1. **Dispatch.** Every write descends from the outermost dimension
//!    to the penultimate level, shallow-copying interior nodes that are
//!    still shared with the input (copy-on-descend), and appends its
//!    offset-along-the-incoming-data to an *incoming data subset* (IDS)
//!    attached to the destination bottom slot. An empty slot becomes a
//!    bare IDS, an existing leaf becomes an extended leaf.
//! 2. **Absorb.** A recursive walk resolves each IDS: the offsets are
//!    stably sorted by leaf position, duplicates collapse to their last
//!    occurrence (last write wins), the result is merged with the
//!    existing leaf if there was one (incoming values win collisions),
//!    and zero values are stripped. Interior nodes whose children all
//!    ended up empty collapse to the empty subtree.
//!
//! The input array is never mutated: unchanged subtrees are shared
//! between input and result.

mod sort;

use crate::error::{Error, Result};
use crate::index::{coord_to_index, cumprod, total_len, IndexMatrix, LinearIndex};
use crate::kind::ValueVec;
use crate::svt::{Leaf, Svt, SvtArray};
use std::sync::Arc;

/// An incoming data subset: offsets along the write batch, destined for
/// one bottom slot
///
/// Two widths mirror the two index forms: multi-index batches are
/// bounded by `i32::MAX` rows, linear-index batches may be longer and
/// carry 64-bit offsets.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Ids {
    /// Offsets into a multi-index batch
    Int(Vec<i32>),
    /// Offsets into a linear-index batch
    Long(Vec<i64>),
}

impl Ids {
    fn new(long: bool) -> Ids {
        if long {
            Ids::Long(Vec::new())
        } else {
            Ids::Int(Vec::new())
        }
    }

    fn len(&self) -> usize {
        match self {
            Ids::Int(v) => v.len(),
            Ids::Long(v) => v.len(),
        }
    }

    fn push(&mut self, atid: u64) {
        match self {
            Ids::Int(v) => v.push(atid as i32),
            Ids::Long(v) => v.push(atid as i64),
        }
    }

    fn atid(&self, k: usize) -> u64 {
        match self {
            Ids::Int(v) => v[k] as u64,
            Ids::Long(v) => v[k] as u64,
        }
    }
}

/// Scratch buffers for the absorb pass, allocated once per call
///
/// `order` holds the permutation being sorted (up to the longest IDS);
/// `offs` holds resolved leaf offsets and doubles as the zero-strip
/// position scratch, so it is sized to the worst post-merge leaf
/// length, which is never below the longest IDS.
struct SortBufs {
    order: Vec<i32>,
    offs: Vec<i32>,
}

impl SortBufs {
    fn new(max_ids_len: usize, max_postmerge_len: usize) -> Self {
        Self {
            order: Vec::with_capacity(max_ids_len),
            offs: Vec::with_capacity(max_postmerge_len),
        }
    }
}

/// The write batch being absorbed, with the innermost extent needed to
/// resolve leaf offsets
enum Batch<'a> {
    Multi { mindex: &'a IndexMatrix, d1: usize },
    Linear { lindex: LinearIndex<'a>, d1: u64 },
}

impl SvtArray {
    /// Write a batch of values at multi-index positions, returning a
    /// new array
    ///
    /// `mindex` has one row of 1-based coordinates per value in `vals`.
    /// If an index repeats within the batch the last occurrence wins;
    /// zero values erase the addressed entries. The input array is
    /// untouched; unchanged subtrees are shared with the result.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when `vals` is of a different kind than
    /// the array, [`Error::ShapeMismatch`] for a malformed batch,
    /// [`Error::IndexOutOfBounds`] for coordinates outside their
    /// dimension, and [`Error::TooManyAssignments`] when more than
    /// `i32::MAX` writes land on one innermost slice.
    pub fn subassign_by_mindex(&self, mindex: &IndexMatrix, vals: &ValueVec) -> Result<SvtArray> {
        if vals.kind() != self.kind() {
            return Err(Error::TypeMismatch {
                expected: self.kind(),
                got: vals.kind(),
            });
        }
        if mindex.ncol() != self.ndim() {
            return Err(Error::shape_mismatch(&[self.ndim()], &[mindex.ncol()]));
        }
        if mindex.nrow() != vals.len() {
            return Err(Error::shape_mismatch(&[vals.len()], &[mindex.nrow()]));
        }
        let n = vals.len();
        if n == 0 {
            return Ok(self.clone());
        }
        if total_len(self.dim()) == 0 {
            return Err(Error::out_of_bounds(1, 0));
        }
        if self.ndim() == 1 {
            return subassign_1d(self, LinearIndex::Int(mindex.col(0)), vals);
        }

        // 1st pass: dispatch the writes onto the tree
        let mut root = match self.root() {
            Svt::Empty => Svt::new_node(self.dim()[self.ndim() - 1]),
            other => other.clone(),
        };
        let mut max_ids_len = 0usize;
        let mut max_postmerge_len = 0usize;
        for atid in 0..n {
            dispatch_mindex_row(
                &mut root,
                self.dim(),
                mindex,
                atid,
                &mut max_ids_len,
                &mut max_postmerge_len,
            )?;
        }
        check_pass1(max_ids_len, max_postmerge_len)?;

        // 2nd pass: absorb the dispatched writes
        let mut bufs = SortBufs::new(max_ids_len, max_postmerge_len);
        let batch = Batch::Multi {
            mindex,
            d1: self.dim()[0],
        };
        let root = absorb(root, &batch, vals, &mut bufs)?;
        Ok(SvtArray::from_parts(self.dim().to_vec(), self.kind(), root))
    }

    /// Write a batch of values at 1-based linear positions, returning a
    /// new array
    ///
    /// Linear indices run column-major over `[1, prod(dim)]` and may be
    /// supplied as integers or as floats with integer values (for
    /// arrays longer than `i32::MAX`). Same batch semantics as
    /// [`SvtArray::subassign_by_mindex`].
    ///
    /// # Errors
    ///
    /// As for [`SvtArray::subassign_by_mindex`], plus
    /// [`Error::InvalidIndex`] for entries that are not positive
    /// integers.
    pub fn subassign_by_lindex(&self, lindex: LinearIndex<'_>, vals: &ValueVec) -> Result<SvtArray> {
        if vals.kind() != self.kind() {
            return Err(Error::TypeMismatch {
                expected: self.kind(),
                got: vals.kind(),
            });
        }
        if lindex.len() != vals.len() {
            return Err(Error::shape_mismatch(&[vals.len()], &[lindex.len()]));
        }
        let n = vals.len();
        if n == 0 {
            return Ok(self.clone());
        }
        if total_len(self.dim()) == 0 {
            return Err(Error::out_of_bounds(1, 0));
        }
        if self.ndim() == 1 {
            return subassign_1d(self, lindex, vals);
        }

        let cum = cumprod(self.dim());
        let total = cum[self.ndim() - 1];

        // 1st pass
        let mut root = match self.root() {
            Svt::Empty => Svt::new_node(self.dim()[self.ndim() - 1]),
            other => other.clone(),
        };
        let mut max_ids_len = 0usize;
        let mut max_postmerge_len = 0usize;
        for atid in 0..n {
            let lidx = lindex.get(atid)?;
            if lidx > total {
                return Err(Error::out_of_bounds(lidx as i64, total));
            }
            dispatch_lindex_entry(
                &mut root,
                self.dim(),
                &cum,
                lidx,
                atid as u64,
                &mut max_ids_len,
                &mut max_postmerge_len,
            )?;
        }
        check_pass1(max_ids_len, max_postmerge_len)?;

        // 2nd pass
        let mut bufs = SortBufs::new(max_ids_len, max_postmerge_len);
        let batch = Batch::Linear {
            lindex,
            d1: cum[0],
        };
        let root = absorb(root, &batch, vals, &mut bufs)?;
        Ok(SvtArray::from_parts(self.dim().to_vec(), self.kind(), root))
    }
}

fn check_pass1(max_ids_len: usize, max_postmerge_len: usize) -> Result<()> {
    if max_ids_len > i32::MAX as usize {
        return Err(Error::TooManyAssignments {
            len: max_ids_len as u64,
        });
    }
    if max_postmerge_len < max_ids_len {
        return Err(Error::InvariantViolated(
            "post-merge bound below the IDS bound",
        ));
    }
    Ok(())
}

/// Dispatch one multi-index write: copy-on-descend to the penultimate
/// level, then attach the offset to the bottom slot's IDS
fn dispatch_mindex_row(
    root: &mut Svt,
    dim: &[usize],
    mindex: &IndexMatrix,
    atid: usize,
    max_ids_len: &mut usize,
    max_postmerge_len: &mut usize,
) -> Result<()> {
    let ndim = dim.len();
    let mut slots = root.as_node_mut()?;
    for along in (2..ndim).rev() {
        let k = coord_to_index(mindex.get(atid, along), dim[along])?;
        let cur = slots;
        let slot = &mut cur[k];
        if slot.is_empty() {
            *slot = Svt::new_node(dim[along - 1]);
        }
        slots = slot.as_node_mut()?;
    }
    let k = coord_to_index(mindex.get(atid, 1), dim[1])?;
    attach(&mut slots[k], false, atid as u64, max_ids_len, max_postmerge_len)
}

/// Dispatch one linear-index write, peeling off one coordinate per
/// level with the cumulative extent products
fn dispatch_lindex_entry(
    root: &mut Svt,
    dim: &[usize],
    cum: &[u64],
    lidx: u64,
    atid: u64,
    max_ids_len: &mut usize,
    max_postmerge_len: &mut usize,
) -> Result<()> {
    let ndim = dim.len();
    let total = cum[ndim - 1];
    let mut idx0 = lidx - 1;
    let mut slots = root.as_node_mut()?;
    for along in (2..ndim).rev() {
        let p = cum[along - 1];
        let k = (idx0 / p) as usize;
        if k >= dim[along] {
            return Err(Error::out_of_bounds(lidx as i64, total));
        }
        idx0 %= p;
        let cur = slots;
        let slot = &mut cur[k];
        if slot.is_empty() {
            *slot = Svt::new_node(dim[along - 1]);
        }
        slots = slot.as_node_mut()?;
    }
    let k = (idx0 / cum[0]) as usize;
    if k >= dim[1] {
        return Err(Error::out_of_bounds(lidx as i64, total));
    }
    attach(&mut slots[k], true, atid, max_ids_len, max_postmerge_len)
}

/// Put an IDS on a bottom slot if it has none yet, append the write's
/// offset, and keep the two scratch-sizing maxima current
fn attach(
    slot: &mut Svt,
    long: bool,
    atid: u64,
    max_ids_len: &mut usize,
    max_postmerge_len: &mut usize,
) -> Result<()> {
    match slot {
        Svt::Empty => *slot = Svt::Ids(Ids::new(long)),
        Svt::Leaf(leaf) => {
            let leaf = Arc::clone(leaf);
            *slot = Svt::Extended(leaf, Ids::new(long));
        }
        Svt::Ids(_) | Svt::Extended(..) => {}
        _ => return Err(Error::InvariantViolated("unexpected bottom slot")),
    }
    let (leaf_len, ids) = match slot {
        Svt::Ids(ids) => (0usize, ids),
        Svt::Extended(leaf, ids) => (leaf.len(), ids),
        _ => return Err(Error::InvariantViolated("unexpected bottom slot")),
    };
    ids.push(atid);
    let ids_len = ids.len();
    if ids_len > *max_ids_len {
        *max_ids_len = ids_len;
    }
    let worst = (leaf_len + ids_len).min(i32::MAX as usize);
    if worst > *max_postmerge_len {
        *max_postmerge_len = worst;
    }
    Ok(())
}

/// Pass 2: resolve every IDS into a leaf and prune emptied branches
///
/// Interior nodes still shared with the input tree were not descended
/// by pass 1, so they hold no IDS and are returned as-is; that is what
/// keeps untouched subtrees shared between input and result.
fn absorb(node: Svt, batch: &Batch<'_>, vals: &ValueVec, bufs: &mut SortBufs) -> Result<Svt> {
    match node {
        Svt::Empty => Ok(Svt::Empty),
        Svt::Leaf(leaf) => Ok(Svt::Leaf(leaf)),
        Svt::Ids(ids) => {
            let built = build_leaf_from_ids(&ids, batch, vals, bufs)?;
            Ok(match built.remove_zeros(&mut bufs.offs)? {
                Some(leaf) => Svt::Leaf(Arc::new(leaf)),
                None => Svt::Empty,
            })
        }
        Svt::Extended(existing, ids) => {
            let incoming = build_leaf_from_ids(&ids, batch, vals, bufs)?;
            // zeros are stripped after the merge, not before
            let merged = existing.merge(&incoming)?;
            Ok(match merged.remove_zeros(&mut bufs.offs)? {
                Some(leaf) => Svt::Leaf(Arc::new(leaf)),
                None => Svt::Empty,
            })
        }
        Svt::Node(arc) => match Arc::try_unwrap(arc) {
            Err(shared) => Ok(Svt::Node(shared)),
            Ok(mut slots) => {
                let mut empty = true;
                for slot in slots.iter_mut() {
                    let child = std::mem::replace(slot, Svt::Empty);
                    let child = absorb(child, batch, vals, bufs)?;
                    if !child.is_empty() {
                        empty = false;
                    }
                    *slot = child;
                }
                if empty {
                    Ok(Svt::Empty)
                } else {
                    Ok(Svt::Node(Arc::new(slots)))
                }
            }
        },
        _ => Err(Error::InvariantViolated("unexpected node during absorb")),
    }
}

/// Turn one IDS into a leaf: resolve offsets, stable-sort, collapse
/// duplicates to their last occurrence, gather the values
///
/// Zero values are kept; the caller strips them at the right moment.
fn build_leaf_from_ids(
    ids: &Ids,
    batch: &Batch<'_>,
    vals: &ValueVec,
    bufs: &mut SortBufs,
) -> Result<Leaf> {
    bufs.offs.clear();
    match (ids, batch) {
        (Ids::Int(atids), Batch::Multi { mindex, d1 }) => {
            for &a in atids {
                let off = coord_to_index(mindex.get(a as usize, 0), *d1)?;
                bufs.offs.push(off as i32);
            }
        }
        (Ids::Long(atids), Batch::Linear { lindex, d1 }) => {
            for &a in atids {
                let lidx = lindex.get(a as usize)?;
                bufs.offs.push(((lidx - 1) % *d1) as i32);
            }
        }
        _ => {
            return Err(Error::InvariantViolated(
                "IDS width does not match the batch",
            ))
        }
    }
    let n = bufs.offs.len();
    bufs.order.clear();
    bufs.order.extend(0..n as i32);
    sort::stable_order(&mut bufs.order, &bufs.offs);
    sort::dedup_last(&mut bufs.order, &bufs.offs);

    let mut positions = Vec::with_capacity(bufs.order.len());
    let mut values = ValueVec::zeros(vals.kind(), bufs.order.len());
    for (j, &ord) in bufs.order.iter().enumerate() {
        positions.push(bufs.offs[ord as usize] + 1);
        vals.copy_one(ids.atid(ord as usize) as usize, &mut values, j)?;
    }
    Ok(Leaf::from_parts(positions, values))
}

/// The one-dimensional fast path: the whole batch lands on the single
/// leaf, so it is built, merged and stripped directly
fn subassign_1d(x: &SvtArray, lindex: LinearIndex<'_>, vals: &ValueVec) -> Result<SvtArray> {
    let d = x.dim()[0] as u64;
    let n = vals.len();
    if n > i32::MAX as usize {
        return Err(Error::TooManyAssignments { len: n as u64 });
    }
    let leaf_len = match x.root() {
        Svt::Leaf(leaf) => leaf.len(),
        Svt::Empty => 0,
        _ => return Err(Error::InvariantViolated("malformed tree")),
    };
    let worst = (leaf_len + n).min(i32::MAX as usize);
    let mut bufs = SortBufs::new(n, worst);

    for k in 0..n {
        let lidx = lindex.get(k)?;
        if lidx > d {
            return Err(Error::out_of_bounds(lidx as i64, d));
        }
        bufs.offs.push((lidx - 1) as i32);
    }
    bufs.order.extend(0..n as i32);
    sort::stable_order(&mut bufs.order, &bufs.offs);
    sort::dedup_last(&mut bufs.order, &bufs.offs);

    let mut positions = Vec::with_capacity(bufs.order.len());
    let mut values = ValueVec::zeros(vals.kind(), bufs.order.len());
    for (j, &ord) in bufs.order.iter().enumerate() {
        positions.push(bufs.offs[ord as usize] + 1);
        vals.copy_one(ord as usize, &mut values, j)?;
    }
    let incoming = Leaf::from_parts(positions, values);

    let merged = match x.root() {
        Svt::Leaf(existing) => existing.merge(&incoming)?,
        _ => incoming,
    };
    let root = match merged.remove_zeros(&mut bufs.offs)? {
        Some(leaf) => Svt::Leaf(Arc::new(leaf)),
        None => Svt::Empty,
    };
    Ok(SvtArray::from_parts(x.dim().to_vec(), x.kind(), root))
}
