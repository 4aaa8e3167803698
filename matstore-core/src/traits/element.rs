//! Scalar element trait for matrix storage.

use core::fmt::{Debug, Display};

/// A scalar usable as a matrix element.
///
/// The sentinel is a value returned when a read addresses an entry the
/// storage does not hold (a structurally-absent sparse entry). It is
/// chosen so arithmetic on it stays visibly wrong rather than silently
/// plausible, which is why floats use a quiet NaN.
pub trait MatrixElement: Copy + PartialEq + PartialOrd + Display + Debug {
    /// Comparison tolerance base for sign classification.
    const EPSILON: f64;

    fn zero() -> Self;

    /// Marker value handed out for absent entries.
    fn sentinel() -> Self;

    /// True if this value is the absent-entry marker.
    fn is_sentinel(self) -> bool;

    fn from_f64(v: f64) -> Self;

    fn to_f64(self) -> f64;
}

impl MatrixElement for f64 {
    const EPSILON: f64 = f64::EPSILON;

    fn zero() -> Self {
        0.0
    }

    fn sentinel() -> Self {
        f64::NAN
    }

    fn is_sentinel(self) -> bool {
        self.is_nan()
    }

    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl MatrixElement for f32 {
    const EPSILON: f64 = f32::EPSILON as f64;

    fn zero() -> Self {
        0.0
    }

    fn sentinel() -> Self {
        f32::NAN
    }

    fn is_sentinel(self) -> bool {
        self.is_nan()
    }

    fn from_f64(v: f64) -> Self {
        v as f32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_not_a_number() {
        assert!(<f64 as MatrixElement>::sentinel().is_sentinel());
        assert!(<f32 as MatrixElement>::sentinel().is_sentinel());
        assert!(!1.5f64.is_sentinel());
        assert!(!<f64 as MatrixElement>::zero().is_sentinel());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(<f32 as MatrixElement>::from_f64(2.5).to_f64(), 2.5);
        assert_eq!(<f64 as MatrixElement>::from_f64(-1.0), -1.0);
    }
}
