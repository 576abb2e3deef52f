/// An unsigned 24-bit integer.
///
/// Used by the Macintosh resource fork, where resource data offsets are
/// stored as three bytes.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Uint24(u32);

impl Uint24 {
    /// The smallest value that can be represented by this integer type.
    pub const MIN: Self = Uint24(0);

    /// The largest value that can be represented by this integer type.
    pub const MAX: Self = Uint24(0xFFFFFF);

    /// Create from a u32, clamping to the valid range.
    pub const fn new(raw: u32) -> Uint24 {
        if raw > Self::MAX.0 {
            Self::MAX
        } else {
            Uint24(raw)
        }
    }

    /// Create from a u32, returning `None` if the value is out of range.
    pub const fn checked_new(raw: u32) -> Option<Uint24> {
        if raw > Self::MAX.0 {
            None
        } else {
            Some(Uint24(raw))
        }
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

impl From<Uint24> for u32 {
    fn from(src: Uint24) -> u32 {
        src.0
    }
}

impl From<Uint24> for usize {
    fn from(src: Uint24) -> usize {
        src.0 as usize
    }
}

impl crate::raw::Scalar for Uint24 {
    type Raw = [u8; 3];

    fn to_raw(self) -> Self::Raw {
        let bytes = self.0.to_be_bytes();
        [bytes[1], bytes[2], bytes[3]]
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Uint24(u32::from_be_bytes([0, raw[0], raw[1], raw[2]]))
    }
}

impl crate::raw::FixedSize for Uint24 {
    const RAW_BYTE_LEN: usize = 3;
}

impl std::fmt::Display for Uint24 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReadScalar;

    #[test]
    fn be_bytes() {
        assert_eq!(Uint24::read(&[0x01, 0x02, 0x03]), Some(Uint24(0x010203)));
        assert_eq!(Uint24::read(&[0x01, 0x02]), None);
        assert_eq!(Uint24::new(0x123456).to_u32(), 0x123456);
    }

    #[test]
    fn clamping() {
        assert_eq!(Uint24::new(0x0100_0000), Uint24::MAX);
        assert!(Uint24::checked_new(0x0100_0000).is_none());
    }
}
