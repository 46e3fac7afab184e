//! Double-precision complex element type

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// 128-bit complex number with f64 real and imaginary parts
///
/// Memory layout is two interleaved `f64` lanes, matching the numpy and
/// FFTW conventions, so value buffers can be reinterpreted by embedders
/// without copying.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Complex128 {
    /// Real part
    pub re: f64,
    /// Imaginary part
    pub im: f64,
}

impl Complex128 {
    /// Zero complex number
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// Create a new complex number
    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl fmt::Display for Complex128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < 0.0 {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(Complex128::new(0.0, 0.0), Complex128::ZERO);
        assert_ne!(Complex128::new(0.0, 1.0), Complex128::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(Complex128::new(1.5, 2.0).to_string(), "1.5+2i");
        assert_eq!(Complex128::new(1.0, -2.0).to_string(), "1-2i");
    }
}
