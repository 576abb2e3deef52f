//! Building TrueType collection images.

use sfnt_types::{Tag, TTC_HEADER_TAG};

use crate::bebuffer::BeBuffer;
use crate::sfnt;

/// Build a version 1 TTC from per-font table sets.
///
/// Directory entry offsets are file-absolute. Identical payload bytes are
/// pooled, so two fonts listing the same table content share one byte span,
/// as real collections do.
pub fn build(fonts: &[Vec<(Tag, Vec<u8>)>]) -> Vec<u8> {
    let header_len = 12 + 4 * fonts.len();
    let mut dir_offsets = Vec::with_capacity(fonts.len());
    let mut offset = header_len;
    for font in fonts {
        dir_offsets.push(offset as u32);
        offset += 12 + 16 * font.len();
    }

    // pool identical payloads
    let pool_base = offset as u32;
    let mut pool: Vec<u8> = Vec::new();
    let mut spans: Vec<(Vec<u8>, u32)> = Vec::new();
    let mut directories = Vec::with_capacity(fonts.len());
    for font in fonts {
        let mut records = Vec::with_capacity(font.len());
        for (tag, data) in font {
            let table_offset = match spans.iter().find(|(bytes, _)| bytes == data) {
                Some((_, off)) => *off,
                None => {
                    let off = pool_base + pool.len() as u32;
                    pool.extend(data);
                    while pool.len() % 4 != 0 {
                        pool.push(0);
                    }
                    spans.push((data.clone(), off));
                    off
                }
            };
            records.push((*tag, sfnt::checksum(*tag, data), table_offset, data.len() as u32));
        }
        directories.push(sfnt::directory(&records));
    }

    let mut image: Vec<u8> = BeBuffer::new()
        .push(TTC_HEADER_TAG)
        .push(0x00010000u32)
        .push(fonts.len() as u32)
        .extend(dir_offsets)
        .into();
    for dir in directories {
        image.extend(dir);
    }
    image.extend(pool);
    image
}

/// Two fonts sharing every table except `name`.
pub fn shared_pair() -> Vec<u8> {
    let first = sfnt::simple_font_tables();
    let mut second = first.clone();
    for (tag, data) in &mut second {
        if *tag == Tag::new(b"name") {
            *data = crate::payload::name(&[(3, 1, 1, "Test Serif")]);
        }
    }
    build(&[first, second])
}
