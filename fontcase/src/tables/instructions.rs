//! The hinting support tables: [fpgm], [prep], and [cvt].
//!
//! The instruction streams are carried verbatim; disassembly belongs to an
//! interpreter, not the container layer.
//!
//! [fpgm]: https://learn.microsoft.com/en-us/typography/opentype/spec/fpgm
//! [prep]: https://learn.microsoft.com/en-us/typography/opentype/spec/prep
//! [cvt]: https://learn.microsoft.com/en-us/typography/opentype/spec/cvt

use types::Tag;

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// The font program, run once when the font is first used.
#[derive(Debug, Clone, PartialEq)]
pub struct Fpgm {
    instructions: Vec<u8>,
}

impl Fpgm {
    pub const TAG: Tag = Tag::new(b"fpgm");

    pub fn instructions(&self) -> &[u8] {
        &self.instructions
    }
}

impl FontRead for Fpgm {
    fn read(data: FontData) -> Result<Self, ReadError> {
        Ok(Fpgm {
            instructions: data.as_bytes().to_vec(),
        })
    }
}

/// The control value program, run on every size or transform change.
#[derive(Debug, Clone, PartialEq)]
pub struct Prep {
    instructions: Vec<u8>,
}

impl Prep {
    pub const TAG: Tag = Tag::new(b"prep");

    pub fn instructions(&self) -> &[u8] {
        &self.instructions
    }
}

impl FontRead for Prep {
    fn read(data: FontData) -> Result<Self, ReadError> {
        Ok(Prep {
            instructions: data.as_bytes().to_vec(),
        })
    }
}

/// The control value table: an array of FWORDs referenced by instructions.
#[derive(Debug, Clone, PartialEq)]
pub struct Cvt {
    values: Vec<i16>,
}

impl Cvt {
    pub const TAG: Tag = Tag::new(b"cvt ");

    pub fn values(&self) -> &[i16] {
        &self.values
    }
}

impl FontRead for Cvt {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let count = data.len() / 2;
        let mut cursor = data.cursor();
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(cursor.read::<i16>()?);
        }
        Ok(Cvt { values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbatim_instructions() {
        let bytes = [0xB0, 0x01, 0x2D];
        let fpgm = Fpgm::read(FontData::new(&bytes)).unwrap();
        assert_eq!(fpgm.instructions(), bytes);
        let prep = Prep::read(FontData::new(&bytes)).unwrap();
        assert_eq!(prep.instructions(), bytes);
    }

    #[test]
    fn cvt_values() {
        let cvt = Cvt::read(FontData::new(&[0, 10, 0xFF, 0xF6])).unwrap();
        assert_eq!(cvt.values(), [10, -10]);
    }
}
