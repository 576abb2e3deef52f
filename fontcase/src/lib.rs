//! Reading OpenType font containers.
//!
//! This crate opens the three container shapes an sfnt font ships in:
//!
//! - a standalone font file (`.ttf`, `.otf`),
//! - a TrueType collection (`.ttc`), where several table directories share
//!   one pool of table data,
//! - a Macintosh font suitcase, with fonts stored as `sfnt` resources in a
//!   resource map, either in a `.dfont` data fork or in a real resource
//!   fork.
//!
//! [`Collection`] is the entry point. It owns the byte image and hands out
//! [`Font`] handles; requesting a table decodes it (and anything it depends
//! on) on first use, and caches the result by byte span, so fonts in a
//! collection that share table data share the decoded tables too.
//!
//! ```no_run
//! use fontcase::{Collection, tables::Head};
//!
//! # fn main() -> Result<(), fontcase::ReadError> {
//! let collection = Collection::open("some_font.ttf")?;
//! let font = collection.font(0)?;
//! let head = font.table(Head::TAG)?;
//! println!("{} glyphs", font.glyph_count()?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Scalar types and their big-endian wire representations.
pub extern crate sfnt_types as types;

mod collection;
mod font_data;
mod mac;
mod read;
mod registry;
mod table_directory;
pub mod tables;
mod ttc;
pub mod write;

pub use collection::{Collection, Font, OpenOptions};
pub use font_data::FontData;
pub use mac::{ResourceFork, ResourceHeader, ResourceRef, ResourceType};
pub use read::{FontRead, ReadError};
pub use table_directory::{TableDirectory, TableRecord};
pub use tables::Table;
pub use ttc::{TtcDsig, TtcHeader};
