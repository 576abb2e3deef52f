//! The [cmap](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap) table

use types::Tag;

use crate::font_data::FontData;
use crate::read::ReadError;

/// The character to glyph index mapping table.
#[derive(Debug, Clone, PartialEq)]
pub struct Cmap {
    version: u16,
    encodings: Vec<Encoding>,
    subtables: Vec<CmapSubtable>,
}

/// One encoding record from the `cmap` header.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    pub platform_id: u16,
    pub encoding_id: u16,
    /// Offset of the mapping subtable from the start of `cmap`.
    pub offset: u32,
    /// Index into the decoded subtables; `None` if the subtable's format was
    /// skipped in lenient mode.
    subtable: Option<usize>,
}

/// An inclusive range of character codes covered by a mapping subtable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRange {
    pub start: u32,
    pub end: u32,
}

impl Cmap {
    pub const TAG: Tag = Tag::new(b"cmap");

    /// With `strict` unset, an encoding record pointing at a subtable format
    /// we don't decode is skipped with a warning; with it set, decoding
    /// fails.
    pub fn read(data: FontData, strict: bool) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: u16 = cursor.read()?;
        let num_tables: u16 = cursor.read()?;

        let mut headers = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            let platform_id: u16 = cursor.read()?;
            let encoding_id: u16 = cursor.read()?;
            let offset: u32 = cursor.read()?;
            headers.push((platform_id, encoding_id, offset));
        }

        // records commonly share subtables; decode each offset once
        let mut subtables = Vec::new();
        let mut decoded: Vec<(u32, Option<usize>)> = Vec::new();
        let mut encodings = Vec::with_capacity(headers.len());
        for (platform_id, encoding_id, offset) in headers {
            let subtable = match decoded.iter().find(|(off, _)| *off == offset) {
                Some((_, ix)) => *ix,
                None => {
                    let ix = match CmapSubtable::read(data, offset as usize, strict)? {
                        Some(subtable) => {
                            subtables.push(subtable);
                            Some(subtables.len() - 1)
                        }
                        None => None,
                    };
                    decoded.push((offset, ix));
                    ix
                }
            };
            encodings.push(Encoding {
                platform_id,
                encoding_id,
                offset,
                subtable,
            });
        }

        Ok(Cmap {
            version,
            encodings,
            subtables,
        })
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    /// The encoding records, in header order.
    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    /// The decoded mapping subtable of an encoding record.
    pub fn subtable(&self, encoding: &Encoding) -> Option<&CmapSubtable> {
        encoding.subtable.map(|ix| &self.subtables[ix])
    }

    /// The subtable for a (platform, encoding) pair, if present and decoded.
    pub fn find(&self, platform_id: u16, encoding_id: u16) -> Option<&CmapSubtable> {
        self.encodings
            .iter()
            .find(|enc| enc.platform_id == platform_id && enc.encoding_id == encoding_id)
            .and_then(|enc| self.subtable(enc))
    }

    /// Map a character code using the first decoded subtable.
    ///
    /// Callers that care about a particular platform should select a
    /// subtable with [`find`](Cmap::find) instead.
    pub fn map(&self, char_code: u32) -> u16 {
        self.subtables
            .first()
            .map(|sub| sub.map(char_code))
            .unwrap_or(0)
    }
}

/// A decoded `cmap` mapping subtable.
#[derive(Debug, Clone, PartialEq)]
pub enum CmapSubtable {
    Format0(Format0),
    Format2(Format2),
    Format4(Format4),
    Format6(Format6),
    Format10(Format10),
    Format12(Format12),
}

impl CmapSubtable {
    /// The subtable format number.
    pub fn format(&self) -> u16 {
        match self {
            CmapSubtable::Format0(_) => 0,
            CmapSubtable::Format2(_) => 2,
            CmapSubtable::Format4(_) => 4,
            CmapSubtable::Format6(_) => 6,
            CmapSubtable::Format10(_) => 10,
            CmapSubtable::Format12(_) => 12,
        }
    }

    /// Map a character code to a glyph id; 0 (`.notdef`) when unmapped.
    pub fn map(&self, char_code: u32) -> u16 {
        match self {
            CmapSubtable::Format0(sub) => sub.map(char_code),
            CmapSubtable::Format2(sub) => sub.map(char_code),
            CmapSubtable::Format4(sub) => sub.map(char_code),
            CmapSubtable::Format6(sub) => sub.map(char_code),
            CmapSubtable::Format10(sub) => sub.map(char_code),
            CmapSubtable::Format12(sub) => sub.map(char_code),
        }
    }

    /// The character ranges this subtable covers.
    pub fn ranges(&self) -> Vec<CodeRange> {
        match self {
            CmapSubtable::Format0(_) => vec![CodeRange { start: 0, end: 255 }],
            CmapSubtable::Format2(sub) => sub.ranges(),
            CmapSubtable::Format4(sub) => sub.ranges(),
            CmapSubtable::Format6(sub) => sub.ranges(),
            CmapSubtable::Format10(sub) => sub.ranges(),
            CmapSubtable::Format12(sub) => sub.ranges(),
        }
    }

    fn read(
        cmap_data: FontData,
        offset: usize,
        strict: bool,
    ) -> Result<Option<Self>, ReadError> {
        let data = cmap_data
            .split_off(offset)
            .ok_or_else(|| ReadError::decode(Cmap::TAG, "subtable offset out of bounds"))?;
        let format: u16 = data.read_at(0)?;
        let subtable = match format {
            0 => CmapSubtable::Format0(Format0::read(data)?),
            2 => CmapSubtable::Format2(Format2::read(data)?),
            4 => CmapSubtable::Format4(Format4::read(data)?),
            6 => CmapSubtable::Format6(Format6::read(data)?),
            10 => CmapSubtable::Format10(Format10::read(data)?),
            12 => CmapSubtable::Format12(Format12::read(data)?),
            _ => {
                if strict {
                    return Err(ReadError::decode(
                        Cmap::TAG,
                        format!("unsupported subtable format {format}"),
                    ));
                }
                log::warn!("cmap: skipping subtable with unsupported format {format}");
                return Ok(None);
            }
        };
        Ok(Some(subtable))
    }
}

/// Byte encoding table: 256 single-byte codes.
#[derive(Debug, Clone, PartialEq)]
pub struct Format0 {
    pub language: u16,
    glyph_ids: Vec<u8>,
}

impl Format0 {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance_by(4); // format, length
        let language = cursor.read()?;
        let glyph_ids = cursor.read_bytes(256)?.to_vec();
        Ok(Format0 {
            language,
            glyph_ids,
        })
    }

    pub fn map(&self, char_code: u32) -> u16 {
        self.glyph_ids
            .get(char_code as usize)
            .copied()
            .unwrap_or(0) as u16
    }
}

/// High-byte mapping table for mixed 8/16-bit CJK encodings.
#[derive(Debug, Clone, PartialEq)]
pub struct Format2 {
    pub language: u16,
    /// Per high byte: subheader index * 8.
    sub_header_keys: Vec<u16>,
    sub_headers: Vec<SubHeader>,
}

#[derive(Debug, Clone, PartialEq)]
struct SubHeader {
    first_code: u16,
    entry_count: u16,
    id_delta: i16,
    /// Glyph ids resolved from this subheader's range-offset window.
    glyph_ids: Vec<u16>,
}

impl Format2 {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance_by(4);
        let language = cursor.read()?;
        let mut sub_header_keys = Vec::with_capacity(256);
        for _ in 0..256 {
            sub_header_keys.push(cursor.read::<u16>()?);
        }
        let sub_header_count = sub_header_keys
            .iter()
            .map(|key| (key / 8) as usize)
            .max()
            .unwrap_or(0)
            + 1;

        let mut sub_headers = Vec::with_capacity(sub_header_count);
        for i in 0..sub_header_count {
            let base = 6 + 512 + i * 8;
            cursor.seek(base);
            let first_code: u16 = cursor.read()?;
            let entry_count: u16 = cursor.read()?;
            let id_delta: i16 = cursor.read()?;
            let id_range_offset: u16 = cursor.read()?;
            // the offset is relative to the position of the field itself
            let glyphs_at = base + 6 + id_range_offset as usize;
            cursor.seek(glyphs_at);
            let mut glyph_ids = Vec::with_capacity(entry_count as usize);
            for _ in 0..entry_count {
                glyph_ids.push(cursor.read::<u16>()?);
            }
            sub_headers.push(SubHeader {
                first_code,
                entry_count,
                id_delta,
                glyph_ids,
            });
        }
        Ok(Format2 {
            language,
            sub_header_keys,
            sub_headers,
        })
    }

    pub fn map(&self, char_code: u32) -> u16 {
        if char_code > 0xFFFF {
            return 0;
        }
        let (header_ix, low) = if char_code < 0x100 {
            // single byte codes map through subheader 0
            if self.sub_header_keys[char_code as usize] != 0 {
                return 0;
            }
            (0, char_code as u16)
        } else {
            let high = (char_code >> 8) as usize;
            let ix = (self.sub_header_keys[high] / 8) as usize;
            if ix == 0 {
                return 0;
            }
            (ix, (char_code & 0xFF) as u16)
        };
        let Some(header) = self.sub_headers.get(header_ix) else {
            return 0;
        };
        if (low as u32) < header.first_code as u32
            || low as u32 >= header.first_code as u32 + header.entry_count as u32
        {
            return 0;
        }
        let glyph = header.glyph_ids[(low - header.first_code) as usize];
        if glyph == 0 {
            0
        } else {
            glyph.wrapping_add(header.id_delta as u16)
        }
    }

    pub fn ranges(&self) -> Vec<CodeRange> {
        let mut ranges = Vec::new();
        if let Some(first) = self.sub_headers.first() {
            if first.entry_count > 0 {
                ranges.push(CodeRange {
                    start: first.first_code as u32,
                    end: first.first_code as u32 + first.entry_count as u32 - 1,
                });
            }
        }
        for (high, key) in self.sub_header_keys.iter().enumerate() {
            let ix = (key / 8) as usize;
            if ix == 0 {
                continue;
            }
            if let Some(header) = self.sub_headers.get(ix) {
                if header.entry_count > 0 {
                    let base = (high as u32) << 8;
                    ranges.push(CodeRange {
                        start: base | header.first_code as u32,
                        end: base | (header.first_code as u32 + header.entry_count as u32 - 1),
                    });
                }
            }
        }
        ranges
    }
}

/// Segment mapping to delta values: the standard BMP table.
#[derive(Debug, Clone, PartialEq)]
pub struct Format4 {
    pub language: u16,
    end_codes: Vec<u16>,
    start_codes: Vec<u16>,
    id_deltas: Vec<i16>,
    id_range_offsets: Vec<u16>,
    glyph_ids: Vec<u16>,
}

impl Format4 {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance_by(2);
        let length: u16 = cursor.read()?;
        let language = cursor.read()?;
        let seg_count_x2: u16 = cursor.read()?;
        let seg_count = (seg_count_x2 / 2) as usize;
        cursor.advance_by(6); // searchRange, entrySelector, rangeShift

        let mut end_codes = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            end_codes.push(cursor.read::<u16>()?);
        }
        cursor.advance_by(2); // reservedPad
        let mut start_codes = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            start_codes.push(cursor.read::<u16>()?);
        }
        let mut id_deltas = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            id_deltas.push(cursor.read::<i16>()?);
        }
        let mut id_range_offsets = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            id_range_offsets.push(cursor.read::<u16>()?);
        }
        // everything up to the declared length is the glyph id array
        let header_len = 16 + seg_count * 8;
        let glyph_words = (length as usize).saturating_sub(header_len) / 2;
        let mut glyph_ids = Vec::with_capacity(glyph_words);
        for _ in 0..glyph_words {
            glyph_ids.push(cursor.read::<u16>()?);
        }
        Ok(Format4 {
            language,
            end_codes,
            start_codes,
            id_deltas,
            id_range_offsets,
            glyph_ids,
        })
    }

    pub fn map(&self, char_code: u32) -> u16 {
        if char_code > 0xFFFF {
            return 0;
        }
        let c = char_code as u16;
        let seg_count = self.end_codes.len();
        for i in 0..seg_count {
            if self.end_codes[i] < c {
                continue;
            }
            if self.start_codes[i] > c {
                return 0;
            }
            let range_offset = self.id_range_offsets[i];
            if range_offset == 0 {
                return c.wrapping_add(self.id_deltas[i] as u16);
            }
            // range offset is in bytes from the offset field's own position
            let ix = range_offset as usize / 2 + (c - self.start_codes[i]) as usize
                - (seg_count - i);
            let glyph = self.glyph_ids.get(ix).copied().unwrap_or(0);
            return if glyph == 0 {
                0
            } else {
                glyph.wrapping_add(self.id_deltas[i] as u16)
            };
        }
        0
    }

    pub fn ranges(&self) -> Vec<CodeRange> {
        self.start_codes
            .iter()
            .zip(&self.end_codes)
            .filter(|(start, end)| !(**start == 0xFFFF && **end == 0xFFFF))
            .map(|(start, end)| CodeRange {
                start: *start as u32,
                end: *end as u32,
            })
            .collect()
    }
}

/// Trimmed table mapping: a dense range of 16-bit codes.
#[derive(Debug, Clone, PartialEq)]
pub struct Format6 {
    pub language: u16,
    first_code: u16,
    glyph_ids: Vec<u16>,
}

impl Format6 {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance_by(4);
        let language = cursor.read()?;
        let first_code = cursor.read()?;
        let entry_count: u16 = cursor.read()?;
        let mut glyph_ids = Vec::with_capacity(entry_count as usize);
        for _ in 0..entry_count {
            glyph_ids.push(cursor.read::<u16>()?);
        }
        Ok(Format6 {
            language,
            first_code,
            glyph_ids,
        })
    }

    pub fn map(&self, char_code: u32) -> u16 {
        char_code
            .checked_sub(self.first_code as u32)
            .and_then(|ix| self.glyph_ids.get(ix as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn ranges(&self) -> Vec<CodeRange> {
        if self.glyph_ids.is_empty() {
            return Vec::new();
        }
        vec![CodeRange {
            start: self.first_code as u32,
            end: self.first_code as u32 + self.glyph_ids.len() as u32 - 1,
        }]
    }
}

/// Trimmed array: a dense range of 32-bit codes.
#[derive(Debug, Clone, PartialEq)]
pub struct Format10 {
    pub language: u32,
    start_char: u32,
    glyph_ids: Vec<u16>,
}

impl Format10 {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance_by(8); // format + reserved, length
        let language = cursor.read()?;
        let start_char = cursor.read()?;
        let num_chars: u32 = cursor.read()?;
        // cap the reserve at what the table can actually hold
        let mut glyph_ids =
            Vec::with_capacity((num_chars as usize).min(cursor.remaining_bytes() / 2));
        for _ in 0..num_chars {
            glyph_ids.push(cursor.read::<u16>()?);
        }
        Ok(Format10 {
            language,
            start_char,
            glyph_ids,
        })
    }

    pub fn map(&self, char_code: u32) -> u16 {
        char_code
            .checked_sub(self.start_char)
            .and_then(|ix| self.glyph_ids.get(ix as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn ranges(&self) -> Vec<CodeRange> {
        if self.glyph_ids.is_empty() {
            return Vec::new();
        }
        vec![CodeRange {
            start: self.start_char,
            end: self.start_char + self.glyph_ids.len() as u32 - 1,
        }]
    }
}

/// Segmented coverage: sequential map groups over the full Unicode range.
#[derive(Debug, Clone, PartialEq)]
pub struct Format12 {
    pub language: u32,
    groups: Vec<SequentialGroup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SequentialGroup {
    start_char: u32,
    end_char: u32,
    start_glyph: u32,
}

impl Format12 {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance_by(8);
        let language = cursor.read()?;
        let num_groups: u32 = cursor.read()?;
        // cap the reserve at what the table can actually hold
        let mut groups =
            Vec::with_capacity((num_groups as usize).min(cursor.remaining_bytes() / 12));
        for _ in 0..num_groups {
            groups.push(SequentialGroup {
                start_char: cursor.read()?,
                end_char: cursor.read()?,
                start_glyph: cursor.read()?,
            });
        }
        Ok(Format12 { language, groups })
    }

    pub fn map(&self, char_code: u32) -> u16 {
        let ix = self
            .groups
            .partition_point(|group| group.end_char < char_code);
        match self.groups.get(ix) {
            Some(group) if group.start_char <= char_code => {
                (group.start_glyph + (char_code - group.start_char)) as u16
            }
            _ => 0,
        }
    }

    pub fn ranges(&self) -> Vec<CodeRange> {
        self.groups
            .iter()
            .map(|group| CodeRange {
                start: group.start_char,
                end: group.end_char,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcase_test_data::payload;

    #[test]
    fn format_0() {
        let data = payload::cmap_format0();
        let cmap = Cmap::read(FontData::new(&data), true).unwrap();
        let sub = cmap.find(1, 0).unwrap();
        assert_eq!(sub.format(), 0);
        assert_eq!(sub.map(b'A' as u32), 1);
        assert_eq!(sub.map(b'B' as u32), 2);
        assert_eq!(sub.map(0x1F600), 0);
        assert_eq!(sub.ranges(), [CodeRange { start: 0, end: 255 }]);
    }

    #[test]
    fn format_4_delta_segments() {
        let data = payload::cmap_format4(&[(0x41, 0x5A, -0x40), (0x61, 0x7A, -0x5A)]);
        let cmap = Cmap::read(FontData::new(&data), true).unwrap();
        let sub = cmap.find(3, 1).unwrap();
        assert_eq!(sub.format(), 4);
        assert_eq!(sub.map('A' as u32), 1);
        assert_eq!(sub.map('Z' as u32), 26);
        assert_eq!(sub.map('a' as u32), 7);
        assert_eq!(sub.map('@' as u32), 0);
        assert_eq!(
            sub.ranges(),
            [
                CodeRange { start: 0x41, end: 0x5A },
                CodeRange { start: 0x61, end: 0x7A },
            ]
        );
    }

    #[test]
    fn format_12_groups() {
        let data = payload::cmap_format12(&[(0x1F600, 0x1F64F, 5)]);
        let cmap = Cmap::read(FontData::new(&data), true).unwrap();
        let sub = cmap.find(3, 10).unwrap();
        assert_eq!(sub.map(0x1F600), 5);
        assert_eq!(sub.map(0x1F601), 6);
        assert_eq!(sub.map(0x20), 0);
    }

    #[test]
    fn format_2_range_at_top_of_code_space() {
        use fontcase_test_data::BeBuffer;
        let mut keys = [0u16; 256];
        keys[0x41] = 8; // high byte 0x41 -> subheader 1
        let data: Vec<u8> = BeBuffer::new()
            .push(0u16) // cmap version
            .push(1u16)
            .push(1u16) // platform
            .push(0u16) // encoding
            .push(12u32) // offset
            .push(2u16) // format
            .push(538u16) // length
            .push(0u16) // language
            .extend(keys)
            // subheader 0 (single-byte codes), empty
            .push(0u16)
            .push(0u16)
            .push(0i16)
            .push(0u16)
            // subheader 1: range touches the top of the code space
            .push(0xFFFFu16) // firstCode
            .push(2u16) // entryCount
            .push(0i16) // idDelta
            .push(2u16) // idRangeOffset
            .push(1u16)
            .push(2u16)
            .into();
        let cmap = Cmap::read(FontData::new(&data), true).unwrap();
        let sub = cmap.find(1, 0).unwrap();
        // firstCode + entryCount exceeds u16; must not wrap
        assert_eq!(sub.ranges().last().unwrap().end, 0x4100 | 0x10000);
        assert_eq!(sub.map(0x41FF), 0);
    }

    #[test]
    fn oversized_counts_error_out() {
        use fontcase_test_data::BeBuffer;
        // format 12 claiming far more groups than the table holds
        let data: Vec<u8> = BeBuffer::new()
            .push(0u16)
            .push(1u16)
            .push(3u16)
            .push(10u16)
            .push(12u32)
            .push(12u16) // format
            .push(0u16) // reserved
            .push(16u32) // length
            .push(0u32) // language
            .push(u32::MAX) // numGroups
            .into();
        assert!(matches!(
            Cmap::read(FontData::new(&data), false),
            Err(ReadError::OutOfBounds { .. })
        ));

        // format 10 claiming far more chars than the table holds
        let data: Vec<u8> = BeBuffer::new()
            .push(0u16)
            .push(1u16)
            .push(0u16)
            .push(6u16)
            .push(12u32)
            .push(10u16) // format
            .push(0u16) // reserved
            .push(20u32) // length
            .push(0u32) // language
            .push(0u32) // startChar
            .push(u32::MAX) // numChars
            .into();
        assert!(matches!(
            Cmap::read(FontData::new(&data), false),
            Err(ReadError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn unknown_format() {
        let data = payload::cmap_unknown_format(14);
        // lenient: record kept, subtable skipped
        let cmap = Cmap::read(FontData::new(&data), false).unwrap();
        assert_eq!(cmap.encodings().len(), 1);
        assert!(cmap.subtable(&cmap.encodings()[0]).is_none());
        assert_eq!(cmap.map(b'A' as u32), 0);
        // strict: error
        assert!(Cmap::read(FontData::new(&data), true).is_err());
    }

    #[test]
    fn shared_subtable_decoded_once() {
        let data = payload::cmap_shared_offsets();
        let cmap = Cmap::read(FontData::new(&data), true).unwrap();
        assert_eq!(cmap.encodings().len(), 2);
        let a = cmap.subtable(&cmap.encodings()[0]).unwrap();
        let b = cmap.subtable(&cmap.encodings()[1]).unwrap();
        assert!(std::ptr::eq(a, b));
    }
}
