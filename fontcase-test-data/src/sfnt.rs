//! Building complete standalone sfnt images.

use sfnt_types::{Tag, TT_SFNT_VERSION};

use crate::bebuffer::BeBuffer;
use crate::payload;

/// The OpenType checksum of a table payload, with the `head` adjustment
/// field summed as zero.
pub fn checksum(tag: Tag, data: &[u8]) -> u32 {
    let mut sum = 0u32;
    for (i, chunk) in data.chunks(4).enumerate() {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        if tag == Tag::new(b"head") && i == 2 {
            word = [0; 4];
        }
        sum = sum.wrapping_add(u32::from_be_bytes(word));
    }
    sum
}

pub(crate) fn search_params(num_tables: u16) -> (u16, u16, u16) {
    let mut entry_selector = 0u16;
    let mut search_range = 16u16;
    while search_range * 2 <= num_tables * 16 {
        search_range *= 2;
        entry_selector += 1;
    }
    (search_range, entry_selector, num_tables * 16 - search_range)
}

/// Serialize a table directory whose entries carry precomputed offsets.
pub(crate) fn directory(records: &[(Tag, u32, u32, u32)]) -> Vec<u8> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|rec| rec.0);
    let (search_range, entry_selector, range_shift) = search_params(sorted.len() as u16);
    let mut buf = BeBuffer::new()
        .push(TT_SFNT_VERSION)
        .push(sorted.len() as u16)
        .push(search_range)
        .push(entry_selector)
        .push(range_shift);
    for (tag, checksum, offset, len) in sorted {
        buf = buf.push(tag).push(checksum).push(offset).push(len);
    }
    buf.into()
}

/// Build a standalone sfnt from `(tag, payload)` pairs.
///
/// The directory is sorted, offsets are sfnt-relative and 4-byte aligned,
/// and checksums are valid.
pub fn build(tables: &[(Tag, Vec<u8>)]) -> Vec<u8> {
    let dir_len = 12 + tables.len() * 16;
    let mut offset = dir_len as u32;
    let mut records = Vec::with_capacity(tables.len());
    for (tag, data) in tables {
        records.push((*tag, checksum(*tag, data), offset, data.len() as u32));
        offset += (data.len() as u32 + 3) & !3;
    }
    let mut image = directory(&records);
    for (_, data) in tables {
        image.extend(data);
        while image.len() % 4 != 0 {
            image.push(0);
        }
    }
    image
}

/// A plausible little TrueType font: 4 glyphs, 12 tables.
pub fn simple_font() -> Vec<u8> {
    build(&simple_font_tables())
}

/// The `(tag, payload)` pairs behind [`simple_font`], for tests that want
/// to swap a table out before building.
pub fn simple_font_tables() -> Vec<(Tag, Vec<u8>)> {
    vec![
        (Tag::new(b"head"), payload::head(1000, 0)),
        (Tag::new(b"maxp"), payload::maxp(4)),
        (Tag::new(b"hhea"), payload::hhea(2)),
        (
            Tag::new(b"hmtx"),
            payload::metrics(&[(500, 10), (600, 20)], &[30, 40]),
        ),
        (Tag::new(b"loca"), payload::loca_short(&[0, 2, 2, 5, 6])),
        (
            Tag::new(b"glyf"),
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        ),
        (Tag::new(b"cmap"), payload::cmap_format4(&[(0x41, 0x44, -0x40)])),
        (
            Tag::new(b"name"),
            payload::name(&[(3, 1, 1, "Test Sans"), (3, 1, 4, "Test Sans Regular")]),
        ),
        (Tag::new(b"post"), payload::post_v3()),
        (Tag::new(b"OS/2"), payload::os2(4)),
        (Tag::new(b"cvt "), payload::cvt(&[10, -10, 25])),
        (Tag::new(b"prep"), vec![0xB0, 0x01, 0x2D]),
    ]
}
