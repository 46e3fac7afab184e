//! Kind-homogeneous value vectors
//!
//! [`ValueVec`] is the engine's only value container: leaf values, COO
//! data, CSC data, dense buffers and incoming assignment values are all
//! `ValueVec`s. The enum arm fixes the element kind; the element-level
//! operations (`is_zero`, `copy_one`, `copy_run`) dispatch on it.

use super::{Complex128, Kind, Opaque, Scalar};
use crate::error::{Error, Result};
use std::sync::Arc;

/// A vector of values of a single element kind
///
/// `Logical` keeps its values in 32-bit integer words like `Integer`;
/// the two arms differ only in the kind they report.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueVec {
    /// Logical words, `0` is false
    Logical(Vec<i32>),
    /// 32-bit integers
    Integer(Vec<i32>),
    /// 64-bit floats
    Double(Vec<f64>),
    /// Double-precision complex values
    Complex(Vec<Complex128>),
    /// String handles
    Character(Vec<Arc<str>>),
    /// Raw bytes
    Raw(Vec<u8>),
    /// Optional opaque handles
    List(Vec<Option<Opaque>>),
}

impl ValueVec {
    /// Allocate a zero-initialized vector of `len` elements of `kind`
    pub fn zeros(kind: Kind, len: usize) -> ValueVec {
        match kind {
            Kind::Logical => ValueVec::Logical(vec![0; len]),
            Kind::Integer => ValueVec::Integer(vec![0; len]),
            Kind::Double => ValueVec::Double(vec![0.0; len]),
            Kind::Complex => ValueVec::Complex(vec![Complex128::ZERO; len]),
            Kind::Character => ValueVec::Character(vec![Arc::from(""); len]),
            Kind::Raw => ValueVec::Raw(vec![0; len]),
            Kind::List => ValueVec::List(vec![None; len]),
        }
    }

    /// The element kind stored in this vector
    pub fn kind(&self) -> Kind {
        match self {
            ValueVec::Logical(_) => Kind::Logical,
            ValueVec::Integer(_) => Kind::Integer,
            ValueVec::Double(_) => Kind::Double,
            ValueVec::Complex(_) => Kind::Complex,
            ValueVec::Character(_) => Kind::Character,
            ValueVec::Raw(_) => Kind::Raw,
            ValueVec::List(_) => Kind::List,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            ValueVec::Logical(v) | ValueVec::Integer(v) => v.len(),
            ValueVec::Double(v) => v.len(),
            ValueVec::Complex(v) => v.len(),
            ValueVec::Character(v) => v.len(),
            ValueVec::Raw(v) => v.len(),
            ValueVec::List(v) => v.len(),
        }
    }

    /// True when the vector holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether element `i` is the kind's zero value
    #[inline]
    pub fn is_zero(&self, i: usize) -> bool {
        match self {
            ValueVec::Logical(v) | ValueVec::Integer(v) => v[i] == 0,
            ValueVec::Double(v) => v[i] == 0.0,
            ValueVec::Complex(v) => v[i] == Complex128::ZERO,
            ValueVec::Character(v) => v[i].is_empty(),
            ValueVec::Raw(v) => v[i] == 0,
            ValueVec::List(v) => v[i].is_none(),
        }
    }

    /// Number of non-zero elements in `offset..offset + len`
    pub fn count_nonzero_run(&self, offset: usize, len: usize) -> usize {
        (offset..offset + len).filter(|&i| !self.is_zero(i)).count()
    }

    /// Read element `i` as a scalar
    pub fn get(&self, i: usize) -> Scalar {
        match self {
            ValueVec::Logical(v) => Scalar::Logical(v[i]),
            ValueVec::Integer(v) => Scalar::Integer(v[i]),
            ValueVec::Double(v) => Scalar::Double(v[i]),
            ValueVec::Complex(v) => Scalar::Complex(v[i]),
            ValueVec::Character(v) => Scalar::Character(Arc::clone(&v[i])),
            ValueVec::Raw(v) => Scalar::Raw(v[i]),
            ValueVec::List(v) => Scalar::List(v[i].clone()),
        }
    }

    /// Copy one element from `self[src_off]` to `dst[dst_off]`
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedKind`] when the two vectors are of different
    /// kinds, [`Error::InvariantViolated`] when an offset is out of
    /// range.
    pub fn copy_one(&self, src_off: usize, dst: &mut ValueVec, dst_off: usize) -> Result<()> {
        if src_off >= self.len() || dst_off >= dst.len() {
            return Err(Error::InvariantViolated("element copy out of range"));
        }
        match (self, dst) {
            (ValueVec::Logical(s), ValueVec::Logical(d)) => d[dst_off] = s[src_off],
            (ValueVec::Integer(s), ValueVec::Integer(d)) => d[dst_off] = s[src_off],
            (ValueVec::Double(s), ValueVec::Double(d)) => d[dst_off] = s[src_off],
            (ValueVec::Complex(s), ValueVec::Complex(d)) => d[dst_off] = s[src_off],
            (ValueVec::Character(s), ValueVec::Character(d)) => {
                d[dst_off] = Arc::clone(&s[src_off]);
            }
            (ValueVec::Raw(s), ValueVec::Raw(d)) => d[dst_off] = s[src_off],
            (ValueVec::List(s), ValueVec::List(d)) => d[dst_off] = s[src_off].clone(),
            (s, d) => {
                return Err(Error::unsupported_kind(format!(
                    "cannot copy {} elements into a {} vector",
                    s.kind(),
                    d.kind()
                )))
            }
        }
        Ok(())
    }

    /// Copy `len` contiguous elements from `self[src_off..]` to
    /// `dst[dst_off..]`
    ///
    /// Equivalent to `len` calls of [`ValueVec::copy_one`], but uses a
    /// single memory copy for the fixed-width kinds. Handle kinds
    /// (`character`, `list`) copy element by element.
    pub fn copy_run(
        &self,
        src_off: usize,
        dst: &mut ValueVec,
        dst_off: usize,
        len: usize,
    ) -> Result<()> {
        if src_off + len > self.len() || dst_off + len > dst.len() {
            return Err(Error::InvariantViolated("bulk element copy out of range"));
        }
        match (self, dst) {
            (ValueVec::Logical(s), ValueVec::Logical(d)) => {
                d[dst_off..dst_off + len].copy_from_slice(&s[src_off..src_off + len]);
            }
            (ValueVec::Integer(s), ValueVec::Integer(d)) => {
                d[dst_off..dst_off + len].copy_from_slice(&s[src_off..src_off + len]);
            }
            (ValueVec::Double(s), ValueVec::Double(d)) => {
                d[dst_off..dst_off + len].copy_from_slice(&s[src_off..src_off + len]);
            }
            (ValueVec::Complex(s), ValueVec::Complex(d)) => {
                d[dst_off..dst_off + len].copy_from_slice(&s[src_off..src_off + len]);
            }
            (ValueVec::Raw(s), ValueVec::Raw(d)) => {
                d[dst_off..dst_off + len].copy_from_slice(&s[src_off..src_off + len]);
            }
            (ValueVec::Character(s), ValueVec::Character(d)) => {
                d[dst_off..dst_off + len].clone_from_slice(&s[src_off..src_off + len]);
            }
            (ValueVec::List(s), ValueVec::List(d)) => {
                d[dst_off..dst_off + len].clone_from_slice(&s[src_off..src_off + len]);
            }
            (s, d) => {
                return Err(Error::unsupported_kind(format!(
                    "cannot copy {} elements into a {} vector",
                    s.kind(),
                    d.kind()
                )))
            }
        }
        Ok(())
    }

    /// Shorten the vector to `len` elements
    ///
    /// Has no effect when `len` is not below the current length.
    pub fn truncate(&mut self, len: usize) {
        match self {
            ValueVec::Logical(v) | ValueVec::Integer(v) => v.truncate(len),
            ValueVec::Double(v) => v.truncate(len),
            ValueVec::Complex(v) => v.truncate(len),
            ValueVec::Character(v) => v.truncate(len),
            ValueVec::Raw(v) => v.truncate(len),
            ValueVec::List(v) => v.truncate(len),
        }
    }

    /// Build a logical vector from booleans
    pub fn from_bools(values: &[bool]) -> ValueVec {
        ValueVec::Logical(values.iter().map(|&b| i32::from(b)).collect())
    }

    /// Build a character vector from string slices
    pub fn from_strs(values: &[&str]) -> ValueVec {
        ValueVec::Character(values.iter().map(|&s| Arc::from(s)).collect())
    }

    /// Borrow the integer words of a `logical` or `integer` vector
    pub fn as_ints(&self) -> Option<&[i32]> {
        match self {
            ValueVec::Logical(v) | ValueVec::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the floats of a `double` vector
    pub fn as_doubles(&self) -> Option<&[f64]> {
        match self {
            ValueVec::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the values of a `complex` vector
    pub fn as_complex(&self) -> Option<&[Complex128]> {
        match self {
            ValueVec::Complex(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the bytes of a `raw` vector
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ValueVec::Raw(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the handles of a `character` vector
    pub fn as_strs(&self) -> Option<&[Arc<str>]> {
        match self {
            ValueVec::Character(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Vec<i32>> for ValueVec {
    fn from(values: Vec<i32>) -> Self {
        ValueVec::Integer(values)
    }
}

impl From<Vec<f64>> for ValueVec {
    fn from(values: Vec<f64>) -> Self {
        ValueVec::Double(values)
    }
}

impl From<Vec<Complex128>> for ValueVec {
    fn from(values: Vec<Complex128>) -> Self {
        ValueVec::Complex(values)
    }
}

impl From<Vec<u8>> for ValueVec {
    fn from(values: Vec<u8>) -> Self {
        ValueVec::Raw(values)
    }
}

impl From<Vec<Option<Opaque>>> for ValueVec {
    fn from(values: Vec<Option<Opaque>>) -> Self {
        ValueVec::List(values)
    }
}
