//! The [DSIG](https://learn.microsoft.com/en-us/typography/opentype/spec/dsig) table

use types::Tag;

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// The digital signature table.
///
/// Signature verification is out of scope; blocks are carried as opaque
/// bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Dsig {
    pub version: u32,
    pub flags: u16,
    records: Vec<SignatureRecord>,
}

/// One signature record: its declared format plus the block bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureRecord {
    pub format: u32,
    block: Vec<u8>,
}

impl SignatureRecord {
    /// The raw signature block, including its reserved header words.
    pub fn block(&self) -> &[u8] {
        &self.block
    }
}

impl Dsig {
    pub const TAG: Tag = Tag::new(b"DSIG");

    /// The number of signatures in the table.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[SignatureRecord] {
        &self.records
    }
}

impl FontRead for Dsig {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: u32 = cursor.read()?;
        let num_signatures: u16 = cursor.read()?;
        let flags: u16 = cursor.read()?;
        let mut headers = Vec::with_capacity(num_signatures as usize);
        for _ in 0..num_signatures {
            let format: u32 = cursor.read()?;
            let length: u32 = cursor.read()?;
            let offset: u32 = cursor.read()?;
            headers.push((format, length, offset));
        }
        let mut records = Vec::with_capacity(headers.len());
        for (format, length, offset) in headers {
            let block = data
                .slice(offset as usize..offset as usize + length as usize)
                .ok_or_else(|| ReadError::decode(Self::TAG, "signature block out of bounds"))?
                .as_bytes()
                .to_vec();
            records.push(SignatureRecord { format, block });
        }
        Ok(Dsig {
            version,
            flags,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcase_test_data::payload;

    #[test]
    fn read_blocks() {
        let data = payload::dsig(&[&[0xDE, 0xAD, 0xBE, 0xEF]]);
        let dsig = Dsig::read(FontData::new(&data)).unwrap();
        assert_eq!(dsig.count(), 1);
        assert_eq!(dsig.records()[0].format, 1);
        assert_eq!(dsig.records()[0].block(), [0xDE, 0xAD, 0xBE, 0xEF]);
    }
}
