//! Scalar values and opaque handles

use super::{Complex128, Kind};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque handle to an arbitrary host value
///
/// This is the element of the `list` kind: the engine never looks at
/// the value behind the handle, it only copies and compares handles.
/// Equality is handle identity, so two independently created `Opaque`s
/// wrapping equal values are still distinct.
#[derive(Clone)]
pub struct Opaque(Arc<dyn Any + Send + Sync>);

impl Opaque {
    /// Wrap a value in an opaque handle
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Try to borrow the wrapped value as a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Opaque(..)")
    }
}

/// One value of one element kind
///
/// Returned by lookups and by [`Kind::zero`]. The `Logical` payload
/// keeps the shared 32-bit integer representation; any nonzero word is
/// a stored truth value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// A logical word
    Logical(i32),
    /// A 32-bit integer
    Integer(i32),
    /// A 64-bit float
    Double(f64),
    /// A double-precision complex
    Complex(Complex128),
    /// A string handle
    Character(Arc<str>),
    /// A byte
    Raw(u8),
    /// An optional opaque handle; `None` is the kind's zero
    List(Option<Opaque>),
}

impl Scalar {
    /// The kind this scalar belongs to
    pub fn kind(&self) -> Kind {
        match self {
            Scalar::Logical(_) => Kind::Logical,
            Scalar::Integer(_) => Kind::Integer,
            Scalar::Double(_) => Kind::Double,
            Scalar::Complex(_) => Kind::Complex,
            Scalar::Character(_) => Kind::Character,
            Scalar::Raw(_) => Kind::Raw,
            Scalar::List(_) => Kind::List,
        }
    }

    /// Whether this value is its kind's zero
    pub fn is_zero(&self) -> bool {
        match self {
            Scalar::Logical(v) | Scalar::Integer(v) => *v == 0,
            Scalar::Double(v) => *v == 0.0,
            Scalar::Complex(v) => *v == Complex128::ZERO,
            Scalar::Character(s) => s.is_empty(),
            Scalar::Raw(v) => *v == 0,
            Scalar::List(h) => h.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_identity() {
        let a = Opaque::new(vec![1, 2, 3]);
        let b = a.clone();
        let c = Opaque::new(vec![1, 2, 3]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2, 3]));
        assert!(a.downcast_ref::<String>().is_none());
    }

    #[test]
    fn test_scalar_zero_test() {
        assert!(Scalar::Double(0.0).is_zero());
        assert!(!Scalar::Double(f64::NAN).is_zero());
        assert!(Scalar::Character(Arc::from("")).is_zero());
        assert!(!Scalar::Character(Arc::from("x")).is_zero());
        assert!(Scalar::List(None).is_zero());
        assert!(!Scalar::List(Some(Opaque::new(0u8))).is_zero());
    }
}
