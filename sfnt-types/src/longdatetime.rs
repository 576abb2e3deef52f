/// A simple datetime type.
///
/// This represented as a signed 64-bit number of seconds since
/// 12:00 midnight, January 1, 1904, UTC (the Macintosh epoch).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct LongDateTime(i64);

impl LongDateTime {
    /// Create with a number of seconds relative to 1904-01-01 00:00.
    pub const fn new(secs: i64) -> Self {
        Self(secs)
    }

    /// The number of seconds since the Macintosh epoch.
    pub const fn as_secs(self) -> i64 {
        self.0
    }
}

crate::raw::newtype_scalar!(LongDateTime, [u8; 8]);
