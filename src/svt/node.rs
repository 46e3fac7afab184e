//! Tree nodes
//!
//! A sparse array of `ndim` dimensions is a tree of depth `ndim - 1`:
//! interior nodes hold one slot per extent of their dimension, leaves
//! sit at the innermost level, and an empty subtree is represented by
//! the dedicated `Empty` variant, never by an allocated node with no
//! nonzeros below it.
//!
//! Interior slot vectors sit behind an `Arc`, so cloning a node is a
//! reference bump. Subassignment exploits this for structural sharing:
//! `Arc::make_mut` clones a slot vector only while it is still shared
//! with the input tree (copy-on-descend) and mutates in place once the
//! call owns it.
//!
//! Four variants are transient and exist only inside a single engine
//! call: `Counts` and `Appendable` during COO construction, `Ids` and
//! `Extended` during subassignment. A finished array never contains
//! them.

use super::leaf::{AppendableLeaf, Leaf};
use crate::error::{Error, Result};
use crate::subassign::Ids;
use std::sync::Arc;

/// One node of a sparse vector tree
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Svt {
    /// A subtree with no nonzero elements
    Empty,
    /// An interior level: one slot per extent of its dimension
    Node(Arc<Vec<Svt>>),
    /// An innermost slice
    Leaf(Arc<Leaf>),
    /// COO pass 1: per-slot nonzero counts at the penultimate level
    Counts(Vec<i32>),
    /// COO pass 2: a leaf being filled in order
    Appendable(AppendableLeaf),
    /// Subassignment pass 1: writes destined for a previously empty slot
    Ids(Ids),
    /// Subassignment pass 1: an existing leaf with attached writes
    Extended(Arc<Leaf>, Ids),
}

impl Svt {
    /// Allocate an interior node of `len` empty slots
    pub(crate) fn new_node(len: usize) -> Svt {
        Svt::Node(Arc::new(vec![Svt::Empty; len]))
    }

    /// Whether this is the empty subtree
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Svt::Empty)
    }

    /// Recursive sum of leaf lengths
    pub(crate) fn nnz(&self) -> u64 {
        match self {
            Svt::Empty => 0,
            Svt::Leaf(leaf) => leaf.len() as u64,
            Svt::Node(slots) => slots.iter().map(Svt::nnz).sum(),
            // transient variants never appear in a finished tree
            _ => {
                debug_assert!(false, "nnz on a transient node");
                0
            }
        }
    }

    /// Mutably borrow this node's slots, cloning them first if they are
    /// still shared with another tree
    pub(crate) fn as_node_mut(&mut self) -> Result<&mut Vec<Svt>> {
        match self {
            Svt::Node(slots) => Ok(Arc::make_mut(slots)),
            _ => Err(Error::InvariantViolated("expected an interior node")),
        }
    }
}
