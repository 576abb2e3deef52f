//! Common [scalar data types][data types] used in sfnt font files
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

// The only unsafe code are the bytemuck impls for `BigEndian<T>`.
#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixed;
mod longdatetime;
mod raw;
mod tag;
mod uint24;

pub use fixed::Fixed;
pub use longdatetime::LongDateTime;
pub use raw::{BigEndian, FixedSize, ReadScalar, Scalar};
pub use tag::{InvalidTag, Tag};
pub use uint24::Uint24;

/// The header tag for a font collection file.
pub const TTC_HEADER_TAG: Tag = Tag::new(b"ttcf");

/// The SFNT version for fonts containing TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;
/// The SFNT version for fonts containing CFF outlines.
pub const CFF_SFNT_VERSION: u32 = u32::from_be_bytes(*b"OTTO");
/// The SFNT version used by Apple for fonts containing TrueType outlines.
pub const TRUE_SFNT_VERSION: u32 = u32::from_be_bytes(*b"true");
/// The SFNT version used by Apple for PostScript fonts in sfnt wrappers.
pub const TYP1_SFNT_VERSION: u32 = u32::from_be_bytes(*b"typ1");
