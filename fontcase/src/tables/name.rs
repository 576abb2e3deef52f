//! The [name](https://learn.microsoft.com/en-us/typography/opentype/spec/name) table

use types::Tag;

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// Well-known name ids.
pub mod name_id {
    pub const FAMILY_NAME: u16 = 1;
    pub const SUBFAMILY_NAME: u16 = 2;
    pub const UNIQUE_ID: u16 = 3;
    pub const FULL_NAME: u16 = 4;
    pub const VERSION_STRING: u16 = 5;
    pub const POSTSCRIPT_NAME: u16 = 6;
}

/// The naming table.
#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    pub format: u16,
    records: Vec<NameRecord>,
}

/// One naming record, with its string bytes copied out of the string
/// storage area.
#[derive(Debug, Clone, PartialEq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    bytes: Vec<u8>,
}

impl NameRecord {
    /// The raw string bytes, in the record's platform encoding.
    pub fn string_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the string: UTF-16BE for Unicode and Windows platforms,
    /// a Latin-1 approximation of MacRoman otherwise.
    pub fn to_string_lossy(&self) -> String {
        match self.platform_id {
            0 | 3 => {
                let units: Vec<u16> = self
                    .bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16_lossy(&units)
            }
            _ => self.bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

impl Name {
    pub const TAG: Tag = Tag::new(b"name");

    /// All records, in table order.
    pub fn records(&self) -> &[NameRecord] {
        &self.records
    }

    /// The first record with this name id, decoded.
    pub fn name(&self, name_id: u16) -> Option<String> {
        self.records
            .iter()
            .find(|rec| rec.name_id == name_id)
            .map(NameRecord::to_string_lossy)
    }
}

impl FontRead for Name {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        let count: u16 = cursor.read()?;
        let string_offset: u16 = cursor.read()?;

        let mut records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let platform_id: u16 = cursor.read()?;
            let encoding_id: u16 = cursor.read()?;
            let language_id: u16 = cursor.read()?;
            let name_id: u16 = cursor.read()?;
            let length: u16 = cursor.read()?;
            let offset: u16 = cursor.read()?;
            let start = string_offset as usize + offset as usize;
            let bytes = data
                .slice(start..start + length as usize)
                .ok_or_else(|| ReadError::decode(Self::TAG, "string storage out of bounds"))?
                .as_bytes()
                .to_vec();
            records.push(NameRecord {
                platform_id,
                encoding_id,
                language_id,
                name_id,
                bytes,
            });
        }
        Ok(Name { format, records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcase_test_data::payload;

    #[test]
    fn decode_strings() {
        let data = payload::name(&[
            (3, 1, name_id::FAMILY_NAME, "Test Sans"),
            (1, 0, name_id::FULL_NAME, "Test Sans Regular"),
        ]);
        let name = Name::read(FontData::new(&data)).unwrap();
        assert_eq!(name.records().len(), 2);
        assert_eq!(name.name(name_id::FAMILY_NAME).as_deref(), Some("Test Sans"));
        assert_eq!(
            name.name(name_id::FULL_NAME).as_deref(),
            Some("Test Sans Regular")
        );
        assert!(name.name(name_id::POSTSCRIPT_NAME).is_none());
    }
}
