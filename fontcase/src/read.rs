//! Traits and errors for interpreting font data

use types::Tag;

use crate::font_data::FontData;

/// A type that can be read from raw table data.
///
/// This trait is implemented for tables that are self-describing: that is,
/// tables that do not require any external state in order to interpret their
/// underlying bytes. Tables with cross-table dependencies (`loca`, `hmtx`,
/// `vmtx`, …) have custom `read` constructors taking those dependencies as
/// arguments, and are wired up through the decoder registry.
pub trait FontRead: Sized {
    /// Read an instance of `Self` from the provided data, performing
    /// validation.
    fn read(data: FontData) -> Result<Self, ReadError>;
}

/// An error that occurs when reading font data
#[derive(Debug)]
pub enum ReadError {
    /// An underlying read failure while loading the file.
    Io(std::io::Error),
    /// A bounded read would have exceeded the end of the input.
    OutOfBounds {
        /// Absolute offset of the attempted read.
        offset: usize,
        /// Length of the attempted read.
        len: usize,
    },
    /// A byte range was not a multiple of the item size.
    InvalidArrayLen,
    /// The font did not start with a recognized sfnt version.
    InvalidSfnt(u32),
    /// The collection did not start with the `ttcf` tag.
    InvalidTtc(Tag),
    /// A font index was out of range for the collection.
    InvalidCollectionIndex(u32),
    /// The outer container (suitcase, collection) was structurally invalid.
    MalformedContainer(&'static str),
    /// The table directory was structurally invalid.
    MalformedDirectory(String),
    /// A table required by the caller or by another table was absent.
    TableIsMissing(Tag),
    /// A table-specific constraint was violated.
    Decode { tag: Tag, reason: String },
    /// A directory entry's checksum did not match the table data.
    ///
    /// Only produced by explicit integrity checking.
    ChecksumMismatch(Tag),
}

impl ReadError {
    /// Convenience constructor for [`ReadError::Decode`].
    pub(crate) fn decode(tag: Tag, reason: impl Into<String>) -> Self {
        ReadError::Decode {
            tag,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Io(err) => write!(f, "io error: {err}"),
            ReadError::OutOfBounds { offset, len } => {
                write!(f, "A read of {len} bytes at offset {offset} was out of bounds")
            }
            ReadError::InvalidArrayLen => {
                write!(f, "Specified array length not a multiple of item size")
            }
            ReadError::InvalidSfnt(ver) => write!(f, "Invalid sfnt version 0x{ver:08X}"),
            ReadError::InvalidTtc(tag) => write!(f, "Invalid ttc tag {tag}"),
            ReadError::InvalidCollectionIndex(ix) => {
                write!(f, "Invalid index {ix} for font collection")
            }
            ReadError::MalformedContainer(reason) => write!(f, "Malformed container: {reason}"),
            ReadError::MalformedDirectory(reason) => write!(f, "Malformed directory: {reason}"),
            ReadError::TableIsMissing(tag) => write!(f, "the {tag} table is missing"),
            ReadError::Decode { tag, reason } => write!(f, "error decoding '{tag}': {reason}"),
            ReadError::ChecksumMismatch(tag) => {
                write!(f, "checksum mismatch for the {tag} table")
            }
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        ReadError::Io(err)
    }
}
