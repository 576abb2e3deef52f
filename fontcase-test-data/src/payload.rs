//! Hand-built payloads for individual tables.

use sfnt_types::{Fixed, LongDateTime, Tag};

use crate::bebuffer::BeBuffer;

/// A `head` table with the given unitsPerEm and indexToLocFormat.
pub fn head(units_per_em: u16, loc_format: i16) -> Vec<u8> {
    BeBuffer::new()
        .push(Fixed::from_major_minor(1, 0)) // version
        .push(Fixed::from_major_minor(1, 0)) // fontRevision
        .push(0u32) // checksumAdjustment
        .push(0x5F0F3CF5u32) // magicNumber
        .push(0u16) // flags
        .push(units_per_em)
        .push(LongDateTime::new(0)) // created
        .push(LongDateTime::new(0)) // modified
        .push(-100i16) // xMin
        .push(-200i16) // yMin
        .push(1000i16) // xMax
        .push(800i16) // yMax
        .push(0u16) // macStyle
        .push(8u16) // lowestRecPPEM
        .push(2i16) // fontDirectionHint
        .push(loc_format)
        .push(0i16) // glyphDataFormat
        .into()
}

/// A version 1.0 `maxp` table.
pub fn maxp(num_glyphs: u16) -> Vec<u8> {
    BeBuffer::new()
        .push(Fixed::from_major_minor(1, 0))
        .push(num_glyphs)
        .push(8u16) // maxPoints
        .push(2u16) // maxContours
        .push(0u16) // maxCompositePoints
        .push(0u16) // maxCompositeContours
        .push(2u16) // maxZones
        .push(0u16) // maxTwilightPoints
        .push(0u16) // maxStorage
        .push(0u16) // maxFunctionDefs
        .push(0u16) // maxInstructionDefs
        .push(8u16) // maxStackElements
        .push(0u16) // maxSizeOfInstructions
        .push(0u16) // maxComponentElements
        .push(0u16) // maxComponentDepth
        .into()
}

fn metrics_header(ascender: i16, descender: i16, num_long_metrics: u16) -> BeBuffer {
    BeBuffer::new()
        .push(Fixed::from_major_minor(1, 0))
        .push(ascender)
        .push(descender)
        .push(200i16) // lineGap
        .push(1200u16) // advance max
        .push(-50i16) // min leading bearing
        .push(-60i16) // min trailing bearing
        .push(1100i16) // max extent
        .push(1i16) // caretSlopeRise
        .push(0i16) // caretSlopeRun
        .push(0i16) // caretOffset
        .pad(8) // reserved
        .push(0i16) // metricDataFormat
        .push(num_long_metrics)
}

/// An `hhea` table declaring `num_long_metrics` entries in `hmtx`.
pub fn hhea(num_long_metrics: u16) -> Vec<u8> {
    metrics_header(800, -200, num_long_metrics).into()
}

/// A `vhea` table declaring `num_long_metrics` entries in `vmtx`.
pub fn vhea(num_long_metrics: u16) -> Vec<u8> {
    metrics_header(500, -500, num_long_metrics).into()
}

/// An `hmtx`/`vmtx` payload: long metrics followed by trailing bearings.
pub fn metrics(long_metrics: &[(u16, i16)], trailing_bearings: &[i16]) -> Vec<u8> {
    let mut buf = BeBuffer::new();
    for &(advance, side_bearing) in long_metrics {
        buf = buf.push(advance).push(side_bearing);
    }
    buf.extend(trailing_bearings.iter().copied()).into()
}

/// A short-form `loca`: values are stored halved.
pub fn loca_short(offsets: &[u16]) -> Vec<u8> {
    BeBuffer::new().extend(offsets.iter().copied()).into()
}

/// A long-form `loca`: byte offsets, verbatim.
pub fn loca_long(offsets: &[u32]) -> Vec<u8> {
    BeBuffer::new().extend(offsets.iter().copied()).into()
}

fn cmap_header(records: &[(u16, u16, u32)]) -> BeBuffer {
    let mut buf = BeBuffer::new().push(0u16).push(records.len() as u16);
    for &(platform_id, encoding_id, offset) in records {
        buf = buf.push(platform_id).push(encoding_id).push(offset);
    }
    buf
}

/// A `cmap` with one Macintosh format 0 subtable mapping 'A' -> 1, 'B' -> 2.
pub fn cmap_format0() -> Vec<u8> {
    let mut glyph_ids = [0u8; 256];
    glyph_ids[b'A' as usize] = 1;
    glyph_ids[b'B' as usize] = 2;
    cmap_header(&[(1, 0, 12)])
        .push(0u16) // format
        .push(262u16) // length
        .push(0u16) // language
        .push_bytes(&glyph_ids)
        .into()
}

/// A `cmap` with one Windows BMP format 4 subtable built from
/// `(start, end, delta)` segments; a sentinel 0xFFFF segment is appended.
pub fn cmap_format4(segments: &[(u16, u16, i16)]) -> Vec<u8> {
    let seg_count = segments.len() + 1;
    let length = 16 + seg_count * 8;
    let mut buf = cmap_header(&[(3, 1, 12)])
        .push(4u16)
        .push(length as u16)
        .push(0u16) // language
        .push((seg_count * 2) as u16)
        .push(0u16) // searchRange, unused by readers
        .push(0u16) // entrySelector
        .push(0u16); // rangeShift
    buf = buf
        .extend(segments.iter().map(|seg| seg.1))
        .push(0xFFFFu16)
        .push(0u16) // reservedPad
        .extend(segments.iter().map(|seg| seg.0))
        .push(0xFFFFu16)
        .extend(segments.iter().map(|seg| seg.2))
        .push(1i16);
    // all segments use delta mapping
    buf.extend(std::iter::repeat(0u16).take(seg_count)).into()
}

/// A `cmap` with one format 12 subtable built from
/// `(start_char, end_char, start_glyph)` groups.
pub fn cmap_format12(groups: &[(u32, u32, u32)]) -> Vec<u8> {
    let length = 16 + groups.len() * 12;
    let mut buf = cmap_header(&[(3, 10, 12)])
        .push(12u16)
        .push(0u16) // reserved
        .push(length as u32)
        .push(0u32) // language
        .push(groups.len() as u32);
    for &(start_char, end_char, start_glyph) in groups {
        buf = buf.push(start_char).push(end_char).push(start_glyph);
    }
    buf.into()
}

/// A `cmap` whose only subtable declares an undecoded format.
pub fn cmap_unknown_format(format: u16) -> Vec<u8> {
    cmap_header(&[(0, 5, 12)])
        .push(format)
        .pad(10)
        .into()
}

/// A `cmap` with two encoding records pointing at one shared subtable.
pub fn cmap_shared_offsets() -> Vec<u8> {
    let mut glyph_ids = [0u8; 256];
    glyph_ids[b'A' as usize] = 1;
    cmap_header(&[(0, 3, 20), (1, 0, 20)])
        .push(0u16)
        .push(262u16)
        .push(0u16)
        .push_bytes(&glyph_ids)
        .into()
}

/// A `name` table from `(platform_id, encoding_id, name_id, string)`
/// records.
pub fn name(records: &[(u16, u16, u16, &str)]) -> Vec<u8> {
    let encoded: Vec<Vec<u8>> = records
        .iter()
        .map(|&(platform_id, _, _, string)| match platform_id {
            0 | 3 => string
                .encode_utf16()
                .flat_map(u16::to_be_bytes)
                .collect(),
            _ => string.bytes().collect(),
        })
        .collect();

    let string_offset = 6 + records.len() * 12;
    let mut buf = BeBuffer::new()
        .push(0u16) // format
        .push(records.len() as u16)
        .push(string_offset as u16);
    let mut offset = 0u16;
    for (&(platform_id, encoding_id, name_id, _), bytes) in records.iter().zip(&encoded) {
        let language_id: u16 = if platform_id == 3 { 0x409 } else { 0 };
        buf = buf
            .push(platform_id)
            .push(encoding_id)
            .push(language_id)
            .push(name_id)
            .push(bytes.len() as u16)
            .push(offset);
        offset += bytes.len() as u16;
    }
    for bytes in &encoded {
        buf = buf.push_bytes(bytes);
    }
    buf.into()
}

fn post_header(version: Fixed) -> BeBuffer {
    BeBuffer::new()
        .push(version)
        .push(Fixed::from_major_minor(0, 0)) // italicAngle
        .push(-75i16) // underlinePosition
        .push(50i16) // underlineThickness
        .push(0u32) // isFixedPitch
        .push(0u32) // minMemType42
        .push(0u32) // maxMemType42
        .push(0u32) // minMemType1
        .push(0u32) // maxMemType1
}

/// A version 3.0 `post` table (no glyph names).
pub fn post_v3() -> Vec<u8> {
    post_header(Fixed::from_major_minor(3, 0)).into()
}

/// A version 2.0 `post` table with the given name indices and custom
/// names.
pub fn post_v2(glyph_name_index: &[u16], names: &[&str]) -> Vec<u8> {
    let mut buf = post_header(Fixed::from_major_minor(2, 0))
        .push(glyph_name_index.len() as u16)
        .extend(glyph_name_index.iter().copied());
    for name in names {
        buf = buf.push(name.len() as u8).push_bytes(name.as_bytes());
    }
    buf.into()
}

/// An `OS/2` table of the given version.
pub fn os2(version: u16) -> Vec<u8> {
    let mut buf = BeBuffer::new()
        .push(version)
        .push(600i16) // xAvgCharWidth
        .push(400u16) // usWeightClass
        .push(5u16) // usWidthClass
        .push(0u16) // fsType
        .push(650i16) // ySubscriptXSize
        .push(600i16)
        .push(0i16)
        .push(75i16)
        .push(650i16) // ySuperscriptXSize
        .push(600i16)
        .push(0i16)
        .push(350i16)
        .push(50i16) // yStrikeoutSize
        .push(250i16) // yStrikeoutPosition
        .push(0i16) // sFamilyClass
        .pad(10) // panose
        .push(1u32) // ulUnicodeRange1
        .push(0u32)
        .push(0u32)
        .push(0u32)
        .push(Tag::new(b"TEST")) // achVendID
        .push(0x40u16) // fsSelection: REGULAR
        .push(0x20u16) // usFirstCharIndex
        .push(0x7Eu16) // usLastCharIndex
        .push(800i16) // sTypoAscender
        .push(-200i16) // sTypoDescender
        .push(200i16) // sTypoLineGap
        .push(1000u16) // usWinAscent
        .push(200u16); // usWinDescent
    if version >= 1 {
        buf = buf.push(1u32).push(0u32);
    }
    if version >= 2 {
        buf = buf
            .push(500i16) // sxHeight
            .push(700i16) // sCapHeight
            .push(0u16) // usDefaultChar
            .push(0x20u16) // usBreakChar
            .push(2u16); // usMaxContext
    }
    if version >= 5 {
        buf = buf.push(0u16).push(0xFFFFu16);
    }
    buf.into()
}

/// A `DSIG` table carrying the given signature blocks verbatim.
pub fn dsig(blocks: &[&[u8]]) -> Vec<u8> {
    let mut buf = BeBuffer::new()
        .push(1u32) // version
        .push(blocks.len() as u16)
        .push(0u16); // flags
    let mut offset = 8 + blocks.len() * 12;
    for block in blocks {
        buf = buf
            .push(1u32) // format
            .push(block.len() as u32)
            .push(offset as u32);
        offset += block.len();
    }
    for block in blocks {
        buf = buf.push_bytes(block);
    }
    buf.into()
}

/// A `cvt ` payload from FWORD values.
pub fn cvt(values: &[i16]) -> Vec<u8> {
    BeBuffer::new().extend(values.iter().copied()).into()
}
