//! Typed decoders for the supported sfnt tables

pub mod cmap;
pub mod dsig;
pub mod glyf;
pub mod head;
pub mod hhea;
pub mod hmtx;
pub mod instructions;
pub mod loca;
pub mod maxp;
pub mod name;
pub mod os2;
pub mod post;
pub mod vhea;
pub mod vmtx;

pub use cmap::Cmap;
pub use dsig::Dsig;
pub use glyf::Glyf;
pub use head::Head;
pub use hhea::Hhea;
pub use hmtx::{Hmtx, LongMetric};
pub use instructions::{Cvt, Fpgm, Prep};
pub use loca::{Loca, LocaFormat};
pub use maxp::Maxp;
pub use name::Name;
pub use os2::Os2;
pub use post::Post;
pub use vhea::Vhea;
pub use vmtx::Vmtx;

use types::Tag;

/// A table we have no decoder for, kept addressable as raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherTable {
    pub tag: Tag,
    pub data: Vec<u8>,
}

/// A decoded table, keyed by its directory tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Table {
    Cmap(Cmap),
    Cvt(Cvt),
    Dsig(Dsig),
    Fpgm(Fpgm),
    Glyf(Glyf),
    Head(Head),
    Hhea(Hhea),
    Hmtx(Hmtx),
    Loca(Loca),
    Maxp(Maxp),
    Name(Name),
    Os2(Os2),
    Post(Post),
    Prep(Prep),
    Vhea(Vhea),
    Vmtx(Vmtx),
    Other(OtherTable),
}

macro_rules! accessor {
    ($method:ident, $variant:ident, $ty:ty) => {
        pub fn $method(&self) -> Option<&$ty> {
            match self {
                Table::$variant(table) => Some(table),
                _ => None,
            }
        }
    };
}

impl Table {
    /// The directory tag this table decodes from.
    pub fn tag(&self) -> Tag {
        match self {
            Table::Cmap(_) => Cmap::TAG,
            Table::Cvt(_) => Cvt::TAG,
            Table::Dsig(_) => Dsig::TAG,
            Table::Fpgm(_) => Fpgm::TAG,
            Table::Glyf(_) => Glyf::TAG,
            Table::Head(_) => Head::TAG,
            Table::Hhea(_) => Hhea::TAG,
            Table::Hmtx(_) => Hmtx::TAG,
            Table::Loca(_) => Loca::TAG,
            Table::Maxp(_) => Maxp::TAG,
            Table::Name(_) => Name::TAG,
            Table::Os2(_) => Os2::TAG,
            Table::Post(_) => Post::TAG,
            Table::Prep(_) => Prep::TAG,
            Table::Vhea(_) => Vhea::TAG,
            Table::Vmtx(_) => Vmtx::TAG,
            Table::Other(other) => other.tag,
        }
    }

    accessor!(as_cmap, Cmap, Cmap);
    accessor!(as_cvt, Cvt, Cvt);
    accessor!(as_dsig, Dsig, Dsig);
    accessor!(as_fpgm, Fpgm, Fpgm);
    accessor!(as_glyf, Glyf, Glyf);
    accessor!(as_head, Head, Head);
    accessor!(as_hhea, Hhea, Hhea);
    accessor!(as_hmtx, Hmtx, Hmtx);
    accessor!(as_loca, Loca, Loca);
    accessor!(as_maxp, Maxp, Maxp);
    accessor!(as_name, Name, Name);
    accessor!(as_os2, Os2, Os2);
    accessor!(as_post, Post, Post);
    accessor!(as_prep, Prep, Prep);
    accessor!(as_vhea, Vhea, Vhea);
    accessor!(as_vmtx, Vmtx, Vmtx);
    accessor!(as_other, Other, OtherTable);
}
