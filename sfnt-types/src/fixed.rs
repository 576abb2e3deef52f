//! The 16.16 fixed-point type.

/// A 32-bit signed fixed-point number with 16 fractional bits.
///
/// This is used for font and table version numbers and for a handful of
/// metrics (`head.fontRevision`, `post.italicAngle`).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Fixed(i32);

impl Fixed {
    /// Minimum value.
    pub const MIN: Fixed = Fixed(i32::MIN);
    /// Maximum value.
    pub const MAX: Fixed = Fixed(i32::MAX);
    /// This type's smallest representable value.
    pub const EPSILON: Fixed = Fixed(1);
    /// Representation of 0.0.
    pub const ZERO: Fixed = Fixed(0);
    /// Representation of 1.0.
    pub const ONE: Fixed = Fixed(0x10000);

    /// Create a new fixed-point value from the underlying bit representation.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// The underlying bit representation of this value.
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Create a fixed-point value from a whole-number major and fractional
    /// minor part, as used for table version fields.
    pub const fn from_major_minor(major: i16, minor: u16) -> Self {
        Self(((major as i32) << 16) | minor as i32)
    }

    /// The whole-number part of this value.
    pub const fn major(self) -> i16 {
        (self.0 >> 16) as i16
    }

    /// Create a fixed-point value from a float, with rounding.
    pub fn from_f64(value: f64) -> Self {
        Self((value * 65536.0).round() as i32)
    }

    /// This value as an `f64`.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }
}

crate::raw::newtype_scalar!(Fixed, [u8; 4]);

impl std::fmt::Debug for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Fixed({})", self.to_f64())
    }
}

impl std::fmt::Display for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.to_f64().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_and_floats() {
        assert_eq!(Fixed::ONE.to_f64(), 1.0);
        assert_eq!(Fixed::from_f64(-1.5).to_bits(), -98304);
        assert_eq!(Fixed::from_major_minor(1, 0).to_bits(), 0x00010000);
        assert_eq!(Fixed::from_major_minor(2, 0x5000).major(), 2);
    }

    #[test]
    fn raw_round_trip() {
        use crate::{ReadScalar, Scalar};
        let value = Fixed::from_f64(1.25);
        assert_eq!(Fixed::read(value.to_raw().as_slice()), Some(value));
    }
}
