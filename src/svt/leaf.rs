//! Leaves: single-dimension sparse slices
//!
//! A leaf is a pair of parallel vectors of equal length: sorted 1-based
//! positions and the values stored at them. Leaves are the only place a
//! sparse array keeps values; every other node of the tree is routing.
//!
//! Leaf invariants, maintained by every engine operation:
//! - `1 <= len <= i32::MAX`
//! - positions are strictly ascending
//! - no stored value is the element kind's zero

use crate::error::{Error, Result};
use crate::kind::{Kind, ValueVec};

/// A sparse 1-D slice: parallel sorted positions and nonzero values
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf {
    positions: Vec<i32>,
    values: ValueVec,
}

impl Leaf {
    /// Create a leaf from positions and values
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] when the two vectors differ in length,
    /// [`Error::InvalidIndex`] when the positions are not strictly
    /// ascending starting at one or above, and
    /// [`Error::InvariantViolated`] for an empty or over-long leaf.
    pub fn new(positions: Vec<i32>, values: ValueVec) -> Result<Self> {
        if positions.len() != values.len() {
            return Err(Error::shape_mismatch(&[positions.len()], &[values.len()]));
        }
        if positions.is_empty() {
            return Err(Error::InvariantViolated("a leaf cannot be empty"));
        }
        if positions.len() > i32::MAX as usize {
            return Err(Error::InvariantViolated("leaf longer than i32::MAX"));
        }
        let mut prev = 0;
        for &p in &positions {
            if p <= prev {
                return Err(Error::invalid_index("leaf positions are not strictly ascending"));
            }
            prev = p;
        }
        Ok(Self { positions, values })
    }

    /// Construct without validation; the caller guarantees the
    /// invariants hold
    pub(crate) fn from_parts(positions: Vec<i32>, values: ValueVec) -> Self {
        debug_assert!(!positions.is_empty());
        debug_assert_eq!(positions.len(), values.len());
        debug_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        Self { positions, values }
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Leaves are never empty; provided for completeness
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The stored 1-based positions, strictly ascending
    pub fn positions(&self) -> &[i32] {
        &self.positions
    }

    /// The stored values
    pub fn values(&self) -> &ValueVec {
        &self.values
    }

    /// The element kind of the stored values
    pub fn kind(&self) -> Kind {
        self.values.kind()
    }

    /// Cheap projection into the two parallel vectors
    pub fn split(&self) -> (&[i32], &ValueVec) {
        (&self.positions, &self.values)
    }

    /// Merge with another leaf over the same dimension
    ///
    /// The result holds the sorted union of the two position sets; on a
    /// position collision the value from `incoming` wins. Zero values
    /// are not purged here: the caller strips them after merging.
    pub fn merge(&self, incoming: &Leaf) -> Result<Leaf> {
        let (apos, avals) = self.split();
        let (bpos, bvals) = incoming.split();

        let mut n = 0usize;
        let (mut i, mut j) = (0usize, 0usize);
        while i < apos.len() && j < bpos.len() {
            match apos[i].cmp(&bpos[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
            n += 1;
        }
        n += apos.len() - i + bpos.len() - j;

        let mut positions = Vec::with_capacity(n);
        let mut values = ValueVec::zeros(self.kind(), n);
        let (mut i, mut j, mut k) = (0usize, 0usize, 0usize);
        while i < apos.len() && j < bpos.len() {
            match apos[i].cmp(&bpos[j]) {
                std::cmp::Ordering::Less => {
                    positions.push(apos[i]);
                    avals.copy_one(i, &mut values, k)?;
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    positions.push(bpos[j]);
                    bvals.copy_one(j, &mut values, k)?;
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    positions.push(bpos[j]);
                    bvals.copy_one(j, &mut values, k)?;
                    i += 1;
                    j += 1;
                }
            }
            k += 1;
        }
        while i < apos.len() {
            positions.push(apos[i]);
            avals.copy_one(i, &mut values, k)?;
            i += 1;
            k += 1;
        }
        while j < bpos.len() {
            positions.push(bpos[j]);
            bvals.copy_one(j, &mut values, k)?;
            j += 1;
            k += 1;
        }
        Ok(Leaf::from_parts(positions, values))
    }

    /// Strip the pairs whose value is the kind's zero
    ///
    /// `scratch` is a caller-provided position buffer with capacity for
    /// at least `self.len()` entries; it is cleared and reused. Returns
    /// `None` when every value was zero, and the leaf unchanged when no
    /// value was.
    pub fn remove_zeros(self, scratch: &mut Vec<i32>) -> Result<Option<Leaf>> {
        scratch.clear();
        for k in 0..self.len() {
            if !self.values.is_zero(k) {
                scratch.push(self.positions[k]);
            }
        }
        let kept = scratch.len();
        if kept == 0 {
            return Ok(None);
        }
        if kept == self.len() {
            return Ok(Some(self));
        }
        let mut values = ValueVec::zeros(self.kind(), kept);
        let mut j = 0;
        for k in 0..self.len() {
            if !self.values.is_zero(k) {
                self.values.copy_one(k, &mut values, j)?;
                j += 1;
            }
        }
        Ok(Some(Leaf::from_parts(scratch.as_slice().to_vec(), values)))
    }
}

/// A pre-sized leaf being filled in order during COO construction
///
/// Positions and values are allocated to the exact final length up
/// front; `nelt` counts how many slots are filled so far.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AppendableLeaf {
    positions: Vec<i32>,
    values: ValueVec,
    nelt: usize,
}

impl AppendableLeaf {
    pub(crate) fn with_len(len: usize, kind: Kind) -> Self {
        Self {
            positions: vec![0; len],
            values: ValueVec::zeros(kind, len),
            nelt: 0,
        }
    }

    /// Append one pair; returns `true` when this write fills the leaf
    ///
    /// Positions must arrive strictly ascending (the COO row-ordering
    /// contract); a non-ascending position is rejected with
    /// [`Error::InvalidIndex`].
    pub(crate) fn append(&mut self, pos: i32, src: &ValueVec, src_off: usize) -> Result<bool> {
        if self.nelt >= self.positions.len() {
            return Err(Error::InvariantViolated("append to a full leaf"));
        }
        if self.nelt > 0 && pos <= self.positions[self.nelt - 1] {
            return Err(Error::invalid_index(
                "coordinate rows are not in sorted order",
            ));
        }
        self.positions[self.nelt] = pos;
        src.copy_one(src_off, &mut self.values, self.nelt)?;
        self.nelt += 1;
        Ok(self.nelt == self.positions.len())
    }

    /// Finalize into a leaf, trimming the unfilled tail
    pub(crate) fn finish(mut self) -> Leaf {
        self.positions.truncate(self.nelt);
        self.values.truncate(self.nelt);
        Leaf::from_parts(self.positions, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(positions: &[i32], values: &[i32]) -> Leaf {
        Leaf::new(positions.to_vec(), ValueVec::from(values.to_vec())).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert!(Leaf::new(vec![1, 2], ValueVec::from(vec![5])).is_err());
        assert!(Leaf::new(vec![], ValueVec::from(Vec::<i32>::new())).is_err());
        assert!(Leaf::new(vec![2, 2], ValueVec::from(vec![1, 2])).is_err());
        assert!(Leaf::new(vec![3, 1], ValueVec::from(vec![1, 2])).is_err());
        assert!(Leaf::new(vec![0, 1], ValueVec::from(vec![1, 2])).is_err());
    }

    #[test]
    fn test_merge_incoming_wins() {
        let a = leaf(&[1, 3, 5], &[10, 30, 50]);
        let b = leaf(&[2, 3], &[20, 99]);
        let m = a.merge(&b).unwrap();
        assert_eq!(m.positions(), &[1, 2, 3, 5]);
        assert_eq!(m.values().as_ints().unwrap(), &[10, 20, 99, 50]);
    }

    #[test]
    fn test_merge_disjoint_tails() {
        let a = leaf(&[1], &[1]);
        let b = leaf(&[7, 9], &[7, 9]);
        let m = a.merge(&b).unwrap();
        assert_eq!(m.positions(), &[1, 7, 9]);
        let m = b.merge(&a).unwrap();
        assert_eq!(m.positions(), &[1, 7, 9]);
    }

    #[test]
    fn test_remove_zeros() {
        let mut scratch = Vec::with_capacity(4);
        let l = leaf(&[1, 2, 4], &[5, 0, 6]);
        let stripped = l.remove_zeros(&mut scratch).unwrap().unwrap();
        assert_eq!(stripped.positions(), &[1, 4]);
        assert_eq!(stripped.values().as_ints().unwrap(), &[5, 6]);

        let l = leaf(&[2, 3], &[0, 0]);
        assert!(l.remove_zeros(&mut scratch).unwrap().is_none());

        let l = leaf(&[2, 3], &[1, 2]);
        let same = l.clone().remove_zeros(&mut scratch).unwrap().unwrap();
        assert_eq!(same, l);
    }

    #[test]
    fn test_appendable() {
        let mut al = AppendableLeaf::with_len(2, Kind::Integer);
        let src = ValueVec::from(vec![7, 8, 9]);
        assert!(!al.append(2, &src, 0).unwrap());
        // out-of-order position violates the ordering contract
        assert!(al.clone().append(2, &src, 1).is_err());
        assert!(al.append(5, &src, 2).unwrap());
        let l = al.finish();
        assert_eq!(l.positions(), &[2, 5]);
        assert_eq!(l.values().as_ints().unwrap(), &[7, 9]);
    }
}
