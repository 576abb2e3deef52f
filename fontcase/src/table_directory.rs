//! The sfnt table directory

use types::{
    Tag, CFF_SFNT_VERSION, TRUE_SFNT_VERSION, TT_SFNT_VERSION, TYP1_SFNT_VERSION,
};

use crate::font_data::FontData;
use crate::read::ReadError;

/// A single entry in the [table directory][dir].
///
/// `offset` is relative to the start of the sfnt, not the file; the absolute
/// position of the table data is `table_data_base + offset`.
///
/// [dir]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    pub offset: u32,
    pub len: u32,
}

/// The [table directory][dir] of a single font.
///
/// [dir]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
#[derive(Debug, Clone)]
pub struct TableDirectory {
    sfnt_version: u32,
    records: Vec<TableRecord>,
    // In principle fonts are required to have a sorted table directory, and
    // a sorted directory gets binary search; certain fonts don't follow that
    // requirement, and get a linear scan.
    sorted: bool,
}

impl TableDirectory {
    /// Parse a table directory from data positioned at the sfnt base.
    ///
    /// With `strict` unset, a duplicate tag keeps the first record and drops
    /// later ones with a warning; with it set, duplicates are an error.
    pub fn read(data: FontData, strict: bool) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let sfnt_version: u32 = cursor.read()?;
        if ![
            TT_SFNT_VERSION,
            CFF_SFNT_VERSION,
            TRUE_SFNT_VERSION,
            TYP1_SFNT_VERSION,
        ]
        .contains(&sfnt_version)
        {
            return Err(ReadError::InvalidSfnt(sfnt_version));
        }
        let num_tables: u16 = cursor.read()?;
        // search_range, entry_selector, range_shift: derivable, unused
        cursor.advance_by(6);

        let mut records = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            let record = TableRecord {
                tag: cursor.read()?,
                checksum: cursor.read()?,
                offset: cursor.read()?,
                len: cursor.read()?,
            };
            if records.iter().any(|prev: &TableRecord| prev.tag == record.tag) {
                if strict {
                    return Err(ReadError::MalformedDirectory(format!(
                        "duplicate table tag {}",
                        record.tag
                    )));
                }
                log::warn!("duplicate table tag {}, keeping the first entry", record.tag);
                continue;
            }
            records.push(record);
        }

        let sorted = records.windows(2).all(|pair| pair[0].tag < pair[1].tag);
        Ok(TableDirectory {
            sfnt_version,
            records,
            sorted,
        })
    }

    /// The sfnt version, discriminating the outline flavor of the font.
    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    /// The number of tables in the directory.
    pub fn num_tables(&self) -> u16 {
        self.records.len() as u16
    }

    /// All directory records, in file order (minus dropped duplicates).
    pub fn records(&self) -> &[TableRecord] {
        &self.records
    }

    /// Returns the record for the table with the specified tag, if present.
    ///
    /// Lookup is case-sensitive on the 4-byte tag identity.
    pub fn record(&self, tag: Tag) -> Option<&TableRecord> {
        if self.sorted {
            self.records
                .binary_search_by(|rec| rec.tag.cmp(&tag))
                .ok()
                .map(|ix| &self.records[ix])
        } else {
            self.records.iter().find(|rec| rec.tag == tag)
        }
    }

    /// `true` if the directory has an entry for this tag.
    pub fn contains(&self, tag: Tag) -> bool {
        self.record(tag).is_some()
    }
}

/// Compute the OpenType checksum of a table's bytes.
///
/// Bytes past the last full u32 are treated as if the table were
/// zero-padded to a four byte boundary. For the `head` table, the
/// `checksumAdjustment` field (bytes 8..12) must be zeroed by the caller
/// before summing.
pub(crate) fn table_checksum(bytes: &[u8]) -> u32 {
    let mut sum = 0u32;
    let mut chunks = bytes.chunks_exact(4);
    for chunk in &mut chunks {
        let word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        sum = sum.wrapping_add(word);
    }
    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        let mut last = [0u8; 4];
        last[..remainder.len()].copy_from_slice(remainder);
        sum = sum.wrapping_add(u32::from_be_bytes(last));
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_directory(tags: &[&[u8; 4]]) -> Vec<u8> {
        let mut buf = TT_SFNT_VERSION.to_be_bytes().to_vec();
        buf.extend((tags.len() as u16).to_be_bytes());
        buf.extend([0u8; 6]);
        for (i, tag) in tags.iter().enumerate() {
            buf.extend(*(*tag));
            buf.extend(0u32.to_be_bytes()); // checksum
            buf.extend((0x100 + i as u32 * 0x10).to_be_bytes());
            buf.extend(4u32.to_be_bytes());
        }
        buf
    }

    #[test]
    fn sorted_lookup() {
        let buf = sample_directory(&[b"cmap", b"glyf", b"head"]);
        let dir = TableDirectory::read(FontData::new(&buf), false).unwrap();
        assert_eq!(dir.num_tables(), 3);
        assert_eq!(dir.record(Tag::new(b"glyf")).unwrap().offset, 0x110);
        assert!(dir.record(Tag::new(b"GLYF")).is_none());
    }

    #[test]
    fn unsorted_lookup() {
        let buf = sample_directory(&[b"head", b"cmap", b"glyf"]);
        let dir = TableDirectory::read(FontData::new(&buf), false).unwrap();
        assert!(!dir.sorted);
        assert_eq!(dir.record(Tag::new(b"cmap")).unwrap().offset, 0x110);
    }

    #[test]
    fn duplicate_tags() {
        let buf = sample_directory(&[b"head", b"head"]);
        let dir = TableDirectory::read(FontData::new(&buf), false).unwrap();
        assert_eq!(dir.num_tables(), 1);
        assert_eq!(dir.record(Tag::new(b"head")).unwrap().offset, 0x100);

        let err = TableDirectory::read(FontData::new(&buf), true).unwrap_err();
        assert!(matches!(err, ReadError::MalformedDirectory(_)));
    }

    #[test]
    fn bad_magic() {
        let buf = [0xBA, 0xDF, 0x00, 0x0D, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            TableDirectory::read(FontData::new(&buf), false),
            Err(ReadError::InvalidSfnt(0xBADF000D))
        ));
    }

    #[test]
    fn checksums() {
        assert_eq!(table_checksum(&[0, 0, 0, 1, 0, 0, 0, 2]), 3);
        // trailing bytes are zero-padded
        assert_eq!(table_checksum(&[0, 0, 0, 1, 0x80]), 0x80000001);
    }
}
