//! The [loca](https://learn.microsoft.com/en-us/typography/opentype/spec/loca) table

use std::ops::Range;

use types::Tag;

use crate::font_data::FontData;
use crate::read::ReadError;

/// The storage format of a `loca` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaFormat {
    /// 16-bit entries holding `offset / 2`.
    Short = 0,
    /// 32-bit entries holding offsets verbatim.
    Long = 1,
}

/// The index-to-location table.
///
/// Offsets are stored unpacked: short-form entries are doubled during
/// decode, so [`get`](Loca::get) always returns a byte offset into `glyf`.
#[derive(Debug, Clone, PartialEq)]
pub struct Loca {
    format: LocaFormat,
    offsets: Vec<u32>,
}

impl Loca {
    pub const TAG: Tag = Tag::new(b"loca");

    /// `short` comes from `head.indexToLocFormat`, `num_glyphs` from `maxp`.
    ///
    /// The table holds `num_glyphs + 1` entries. Offsets are expected to be
    /// non-decreasing; with `strict` unset a descending step is logged and
    /// the raw values kept, with it set decoding fails.
    pub fn read(
        data: FontData,
        short: bool,
        num_glyphs: u16,
        strict: bool,
    ) -> Result<Self, ReadError> {
        let count = num_glyphs as usize + 1;
        let mut cursor = data.cursor();
        let mut offsets = Vec::with_capacity(count);
        if short {
            for _ in 0..count {
                offsets.push(cursor.read::<u16>()? as u32 * 2);
            }
        } else {
            for _ in 0..count {
                offsets.push(cursor.read::<u32>()?);
            }
        }
        if let Some(ix) = offsets.windows(2).position(|pair| pair[0] > pair[1]) {
            if strict {
                return Err(ReadError::decode(
                    Self::TAG,
                    format!("non-monotonic at i={}", ix + 1),
                ));
            }
            log::warn!("loca: offsets non-monotonic at i={}", ix + 1);
        }
        let format = if short {
            LocaFormat::Short
        } else {
            LocaFormat::Long
        };
        Ok(Loca { format, offsets })
    }

    /// The format the table was decoded from (or last selected by
    /// [`update_format`](Loca::update_format)).
    pub fn format(&self) -> LocaFormat {
        self.format
    }

    /// The number of entries, `num_glyphs + 1`.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The byte offset of glyph `ix` within `glyf`.
    pub fn get(&self, ix: usize) -> Option<u32> {
        self.offsets.get(ix).copied()
    }

    /// All offsets, unpacked to byte positions.
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// The byte range of a glyph's data within `glyf`.
    ///
    /// An empty range means the glyph has no outline (a valid state for
    /// whitespace glyphs).
    pub fn glyph_range(&self, glyph_id: u16) -> Option<Range<usize>> {
        let start = self.get(glyph_id as usize)? as usize;
        let end = self.get(glyph_id as usize + 1)? as usize;
        (start <= end).then_some(start..end)
    }

    /// Re-select the storage format ahead of serialization.
    ///
    /// The short form can only represent even offsets up to `2 * 0xFFFF`;
    /// any offset exceeding that bound, or any odd offset, forces the long
    /// form.
    pub fn update_format(&mut self) -> LocaFormat {
        let needs_long = self
            .offsets
            .iter()
            .any(|&offset| offset > 2 * 0xFFFF || offset % 2 != 0);
        self.format = if needs_long {
            LocaFormat::Long
        } else {
            LocaFormat::Short
        };
        self.format
    }
}
