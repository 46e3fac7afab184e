//! Element kind registry
//!
//! Every sparse array stores values of exactly one *element kind*. The
//! set of kinds is closed: the seven variants of [`Kind`] are all there
//! is, and every copy, allocation and zero test in the engine dispatches
//! on it at runtime.
//!
//! Kinds are identified externally by a short string token
//! (`"integer"`, `"double"`, ...). `"logical"` and `"integer"` share the
//! 32-bit integer representation; they differ only in how callers
//! interpret the stored words.

mod complex;
mod scalar;
mod vector;

pub use complex::Complex128;
pub use scalar::{Opaque, Scalar};
pub use vector::ValueVec;

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Element kinds supported by sparse arrays
///
/// Using an enum (rather than generics) keeps the tree representation
/// monomorphic and allows the element kind to be selected at runtime
/// from its string token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Truth values, stored as 32-bit integers (`0` is false)
    Logical,
    /// 32-bit signed integers
    Integer,
    /// 64-bit floating point
    Double,
    /// Double-precision complex, two 64-bit lanes
    Complex,
    /// Interned string handles; the empty string is the zero
    Character,
    /// Raw bytes
    Raw,
    /// Opaque handles to arbitrary host values; absence is the zero
    List,
}

impl Kind {
    /// All supported kinds, in token order
    pub const ALL: [Kind; 7] = [
        Kind::Logical,
        Kind::Integer,
        Kind::Double,
        Kind::Complex,
        Kind::Character,
        Kind::Raw,
        Kind::List,
    ];

    /// Parse a kind from its string token
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedKind`] for any token outside the
    /// closed set.
    pub fn parse(token: &str) -> Result<Kind> {
        match token {
            "logical" => Ok(Kind::Logical),
            "integer" => Ok(Kind::Integer),
            "double" => Ok(Kind::Double),
            "complex" => Ok(Kind::Complex),
            "character" => Ok(Kind::Character),
            "raw" => Ok(Kind::Raw),
            "list" => Ok(Kind::List),
            other => Err(Error::unsupported_kind(other)),
        }
    }

    /// The kind's string token
    pub const fn token(self) -> &'static str {
        match self {
            Kind::Logical => "logical",
            Kind::Integer => "integer",
            Kind::Double => "double",
            Kind::Complex => "complex",
            Kind::Character => "character",
            Kind::Raw => "raw",
            Kind::List => "list",
        }
    }

    /// Size of one stored element in bytes
    ///
    /// For `Character` and `List` this is the size of the handle, not
    /// of the value behind it.
    pub fn size_of(self) -> usize {
        match self {
            Kind::Logical | Kind::Integer => std::mem::size_of::<i32>(),
            Kind::Double => std::mem::size_of::<f64>(),
            Kind::Complex => std::mem::size_of::<Complex128>(),
            Kind::Character => std::mem::size_of::<Arc<str>>(),
            Kind::Raw => 1,
            Kind::List => std::mem::size_of::<Option<Opaque>>(),
        }
    }

    /// The kind's zero value
    ///
    /// This is the value a sparse array reports for every position it
    /// does not store, and the value that gets purged from leaves.
    pub fn zero(self) -> Scalar {
        match self {
            Kind::Logical => Scalar::Logical(0),
            Kind::Integer => Scalar::Integer(0),
            Kind::Double => Scalar::Double(0.0),
            Kind::Complex => Scalar::Complex(Complex128::ZERO),
            Kind::Character => Scalar::Character(Arc::from("")),
            Kind::Raw => Scalar::Raw(0),
            Kind::List => Scalar::List(None),
        }
    }

    /// True for kinds whose elements are plain fixed-width values
    /// rather than handles
    pub const fn is_fixed_width(self) -> bool {
        !matches!(self, Kind::Character | Kind::List)
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Kind::parse(s)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        for kind in Kind::ALL {
            assert_eq!(Kind::parse(kind.token()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_token() {
        let err = Kind::parse("float").unwrap_err();
        assert!(matches!(err, Error::UnsupportedKind { .. }));
    }

    #[test]
    fn test_sizes() {
        assert_eq!(Kind::Logical.size_of(), 4);
        assert_eq!(Kind::Integer.size_of(), 4);
        assert_eq!(Kind::Double.size_of(), 8);
        assert_eq!(Kind::Complex.size_of(), 16);
        assert_eq!(Kind::Raw.size_of(), 1);
    }

    #[test]
    fn test_zero_is_zero() {
        for kind in Kind::ALL {
            assert!(kind.zero().is_zero());
            assert_eq!(kind.zero().kind(), kind);
        }
    }
}
