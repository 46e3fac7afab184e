//! The sparse vector tree array type
//!
//! [`SvtArray`] is the central type of this crate: an N-dimensional
//! array whose vast majority of elements equal the element kind's zero
//! value, stored as a tree of depth `ndim - 1` whose leaves hold the
//! `(position, value)` pairs of one 1-D slice each.
//!
//! Arrays are built from COO triplets ([`crate::coo::CooArray::to_svt`]),
//! from a compressed sparse column matrix
//! ([`crate::csc::CscMatrix::to_svt`]) or from a dense buffer
//! ([`crate::dense::DenseArray::to_svt`]), and materialized back through
//! the inverse methods on `SvtArray`. Scattered writes go through
//! [`SvtArray::subassign_by_mindex`] and
//! [`SvtArray::subassign_by_lindex`], which return a new array sharing
//! all unchanged subtrees with the input.

mod leaf;
mod node;

pub use leaf::Leaf;
pub(crate) use leaf::AppendableLeaf;
pub(crate) use node::Svt;

use crate::error::{Error, Result};
use crate::index::{check_dim, coord_to_index};
use crate::kind::{Kind, Scalar};

/// A sparse N-dimensional array backed by a sparse vector tree
///
/// Equality is structural: two arrays are equal when they have the same
/// dimensions, the same element kind, and the same stored pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct SvtArray {
    dim: Vec<usize>,
    kind: Kind,
    root: Svt,
}

impl SvtArray {
    /// Create an empty array of the given dimensions and element kind
    ///
    /// Dimensions are ordered inner-first: `dim[0]` is the extent along
    /// which leaf positions run, `dim[ndim - 1]` is the outermost
    /// dimension. Zero extents are allowed and describe an array with
    /// no elements.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] when `dim` is empty or an extent
    /// exceeds `i32::MAX`.
    pub fn new(dim: Vec<usize>, kind: Kind) -> Result<Self> {
        check_dim(&dim)?;
        Ok(Self {
            dim,
            kind,
            root: Svt::Empty,
        })
    }

    /// Assemble an array from a finished tree; the caller guarantees
    /// the tree invariants hold
    pub(crate) fn from_parts(dim: Vec<usize>, kind: Kind, root: Svt) -> Self {
        Self { dim, kind, root }
    }

    pub(crate) fn root(&self) -> &Svt {
        &self.root
    }

    /// The array's dimensions, inner-first
    pub fn dim(&self) -> &[usize] {
        &self.dim
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.dim.len()
    }

    /// The element kind stored by this array
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// True when the array stores no nonzero element
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of stored (structurally nonzero) entries
    pub fn nnz(&self) -> u64 {
        self.root.nnz()
    }

    /// Follow a multi-index path from the outermost dimension inward
    /// and return the addressed leaf, if any
    ///
    /// `path` holds one 1-based coordinate per non-innermost dimension:
    /// `path[j]` addresses dimension `j + 1`, so `path` has length
    /// `ndim - 1` and an `ndim == 1` array takes an empty path.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] for a path of the wrong length,
    /// [`Error::IndexOutOfBounds`] for a coordinate outside its
    /// dimension.
    pub fn descend(&self, path: &[i32]) -> Result<Option<&Leaf>> {
        if path.len() + 1 != self.ndim() {
            return Err(Error::shape_mismatch(&[self.ndim() - 1], &[path.len()]));
        }
        let mut cur = &self.root;
        for j in (1..self.ndim()).rev() {
            let slot = coord_to_index(path[j - 1], self.dim[j])?;
            cur = match cur {
                Svt::Empty => return Ok(None),
                Svt::Node(slots) => &slots[slot],
                _ => return Err(Error::InvariantViolated("malformed tree")),
            };
        }
        match cur {
            Svt::Empty => Ok(None),
            Svt::Leaf(leaf) => Ok(Some(leaf)),
            _ => Err(Error::InvariantViolated("malformed tree")),
        }
    }

    /// Look up one element by its full 1-based multi-index
    ///
    /// Returns the kind's zero for positions the array does not store.
    pub fn get(&self, index: &[i32]) -> Result<Scalar> {
        if index.len() != self.ndim() {
            return Err(Error::shape_mismatch(&[self.ndim()], &[index.len()]));
        }
        coord_to_index(index[0], self.dim[0])?;
        let leaf = match self.descend(&index[1..])? {
            Some(leaf) => leaf,
            None => return Ok(self.kind.zero()),
        };
        match leaf.positions().binary_search(&index[0]) {
            Ok(k) => Ok(leaf.values().get(k)),
            Err(_) => Ok(self.kind.zero()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ValueVec;

    fn two_col_array() -> SvtArray {
        // dim (3, 2): column 1 holds {1 -> 5, 3 -> 6}, column 2 is empty
        let leaf = Leaf::new(vec![1, 3], ValueVec::from(vec![5, 6])).unwrap();
        let root = Svt::Node(std::sync::Arc::new(vec![
            Svt::Leaf(std::sync::Arc::new(leaf)),
            Svt::Empty,
        ]));
        SvtArray::from_parts(vec![3, 2], Kind::Integer, root)
    }

    #[test]
    fn test_empty_array() {
        let a = SvtArray::new(vec![4, 5], Kind::Double).unwrap();
        assert!(a.is_empty());
        assert_eq!(a.nnz(), 0);
        assert_eq!(a.descend(&[3]).unwrap(), None);
    }

    #[test]
    fn test_bad_dim() {
        assert!(SvtArray::new(vec![], Kind::Double).is_err());
        assert!(SvtArray::new(vec![3, i32::MAX as usize + 1], Kind::Double).is_err());
        // zero extents are fine
        assert!(SvtArray::new(vec![0, 2], Kind::Double).unwrap().is_empty());
    }

    #[test]
    fn test_descend_and_get() {
        let a = two_col_array();
        assert_eq!(a.nnz(), 2);
        let leaf = a.descend(&[1]).unwrap().unwrap();
        assert_eq!(leaf.positions(), &[1, 3]);
        assert_eq!(a.descend(&[2]).unwrap(), None);
        assert!(a.descend(&[3]).is_err());
        assert!(a.descend(&[]).is_err());

        assert_eq!(a.get(&[3, 1]).unwrap(), Scalar::Integer(6));
        assert_eq!(a.get(&[2, 1]).unwrap(), Scalar::Integer(0));
        assert_eq!(a.get(&[1, 2]).unwrap(), Scalar::Integer(0));
        assert!(a.get(&[4, 1]).is_err());
    }
}
