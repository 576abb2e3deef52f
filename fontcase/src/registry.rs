//! The table decoder registry and shared materialization cache
//!
//! Decoding is table-driven: [`TABLE_DEFS`] maps each supported tag to its
//! decoder and to the tags it depends on. The dependency edges form a DAG
//! (asserted by test), so depth-first resolution terminates.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use types::Tag;

use crate::font_data::FontData;
use crate::read::ReadError;
use crate::tables::{
    Cmap, Cvt, Dsig, Fpgm, Glyf, Head, Hhea, Hmtx, Loca, Maxp, Name, Os2, Post, Prep, Table,
    Vhea, Vmtx,
};

/// A decoder registration: the tag, its cross-table dependencies, and the
/// decode function.
pub(crate) struct TableDef {
    pub tag: Tag,
    /// Tags materialized (in order) before this table's decoder runs.
    pub deps: &'static [Tag],
    pub decode: fn(FontData, &DecodeCtx) -> Result<Table, ReadError>,
}

/// Context handed to a decoder: the strictness flag plus its resolved
/// dependencies.
pub(crate) struct DecodeCtx {
    pub strict: bool,
    pub deps: Vec<Arc<Table>>,
}

impl DecodeCtx {
    fn dep<'a, T>(&'a self, tag: Tag, get: fn(&'a Table) -> Option<&'a T>) -> Result<&'a T, ReadError> {
        self.deps
            .iter()
            .find_map(|table| get(table))
            .ok_or(ReadError::TableIsMissing(tag))
    }

    fn head(&self) -> Result<&Head, ReadError> {
        self.dep(Head::TAG, Table::as_head)
    }

    fn maxp(&self) -> Result<&Maxp, ReadError> {
        self.dep(Maxp::TAG, Table::as_maxp)
    }

    fn hhea(&self) -> Result<&Hhea, ReadError> {
        self.dep(Hhea::TAG, Table::as_hhea)
    }

    fn vhea(&self) -> Result<&Vhea, ReadError> {
        self.dep(Vhea::TAG, Table::as_vhea)
    }
}

/// All registered decoders.
///
/// `glyf` depends on `loca` rather than on `head`/`maxp` directly; resolving
/// `loca` pulls those in first, which fixes the materialization order for a
/// cold cache to head, maxp, loca, glyf.
pub(crate) static TABLE_DEFS: &[TableDef] = &[
    TableDef {
        tag: Head::TAG,
        deps: &[],
        decode: |data, ctx| Head::read(data, ctx.strict).map(Table::Head),
    },
    TableDef {
        tag: Maxp::TAG,
        deps: &[],
        decode: |data, _| crate::read::FontRead::read(data).map(Table::Maxp),
    },
    TableDef {
        tag: Hhea::TAG,
        deps: &[],
        decode: |data, _| crate::read::FontRead::read(data).map(Table::Hhea),
    },
    TableDef {
        tag: Vhea::TAG,
        deps: &[],
        decode: |data, _| crate::read::FontRead::read(data).map(Table::Vhea),
    },
    TableDef {
        tag: Hmtx::TAG,
        deps: &[Hhea::TAG, Maxp::TAG],
        decode: |data, ctx| {
            let n = ctx.hhea()?.number_of_long_metrics();
            let num_glyphs = ctx.maxp()?.num_glyphs;
            Hmtx::read(data, n, num_glyphs).map(Table::Hmtx)
        },
    },
    TableDef {
        tag: Vmtx::TAG,
        deps: &[Vhea::TAG, Maxp::TAG],
        decode: |data, ctx| {
            let n = ctx.vhea()?.number_of_long_metrics();
            let num_glyphs = ctx.maxp()?.num_glyphs;
            Vmtx::read(data, n, num_glyphs).map(Table::Vmtx)
        },
    },
    TableDef {
        tag: Loca::TAG,
        deps: &[Head::TAG, Maxp::TAG],
        decode: |data, ctx| {
            let short = ctx.head()?.use_short_entries();
            let num_glyphs = ctx.maxp()?.num_glyphs;
            Loca::read(data, short, num_glyphs, ctx.strict).map(Table::Loca)
        },
    },
    TableDef {
        tag: Glyf::TAG,
        deps: &[Loca::TAG, Maxp::TAG],
        decode: |data, _| crate::read::FontRead::read(data).map(Table::Glyf),
    },
    TableDef {
        tag: Cmap::TAG,
        deps: &[],
        decode: |data, ctx| Cmap::read(data, ctx.strict).map(Table::Cmap),
    },
    TableDef {
        tag: Name::TAG,
        deps: &[],
        decode: |data, _| crate::read::FontRead::read(data).map(Table::Name),
    },
    TableDef {
        tag: Post::TAG,
        deps: &[],
        decode: |data, _| crate::read::FontRead::read(data).map(Table::Post),
    },
    TableDef {
        tag: Os2::TAG,
        deps: &[],
        decode: |data, _| crate::read::FontRead::read(data).map(Table::Os2),
    },
    TableDef {
        tag: Dsig::TAG,
        deps: &[],
        decode: |data, _| crate::read::FontRead::read(data).map(Table::Dsig),
    },
    TableDef {
        tag: Fpgm::TAG,
        deps: &[],
        decode: |data, _| crate::read::FontRead::read(data).map(Table::Fpgm),
    },
    TableDef {
        tag: Prep::TAG,
        deps: &[],
        decode: |data, _| crate::read::FontRead::read(data).map(Table::Prep),
    },
    TableDef {
        tag: Cvt::TAG,
        deps: &[],
        decode: |data, _| crate::read::FontRead::read(data).map(Table::Cvt),
    },
];

/// The registration for a tag, if we have a decoder for it.
pub(crate) fn def_for(tag: Tag) -> Option<&'static TableDef> {
    TABLE_DEFS.iter().find(|def| def.tag == tag)
}

/// Cache key: the table's absolute byte span within the file image.
///
/// TTC fonts whose directories point at the same span share the decoded
/// table through this key.
pub(crate) type SpanKey = (u32, u32);

struct CacheSlot {
    table: Mutex<Option<Arc<Table>>>,
}

/// The shared table cache.
///
/// The outer mutex is held only across slot lookup/insert; the per-slot
/// mutex makes decoding at-most-once per span. Dependencies must be
/// resolved before a slot lock is taken, so nested materialization never
/// holds two slot locks at once.
#[derive(Default)]
pub(crate) struct TableCache {
    slots: Mutex<HashMap<SpanKey, Arc<CacheSlot>>>,
}

impl TableCache {
    /// Fetch the cached table for a span, or decode and insert it.
    ///
    /// `decode` runs at most once per span across all fonts sharing this
    /// cache; concurrent callers for the same span block until the first
    /// finishes.
    pub(crate) fn get_or_decode(
        &self,
        key: SpanKey,
        decode: impl FnOnce() -> Result<(Table, Tag), ReadError>,
        on_decode: impl FnOnce(Tag),
    ) -> Result<Arc<Table>, ReadError> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(key).or_insert_with(|| {
                Arc::new(CacheSlot {
                    table: Mutex::new(None),
                })
            }))
        };
        let mut guard = slot.table.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = guard.as_ref() {
            return Ok(Arc::clone(table));
        }
        let (table, tag) = decode()?;
        let table = Arc::new(table);
        *guard = Some(Arc::clone(&table));
        on_decode(tag);
        Ok(table)
    }

    /// The cached table for a span, if already materialized.
    pub(crate) fn get(&self, key: SpanKey) -> Option<Arc<Table>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.get(&key)?;
        let guard = slot.table.lock().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_graph_is_acyclic() {
        fn visit(tag: Tag, stack: &mut Vec<Tag>) {
            assert!(!stack.contains(&tag), "dependency cycle through {tag}");
            stack.push(tag);
            if let Some(def) = def_for(tag) {
                for dep in def.deps {
                    visit(*dep, stack);
                }
            }
            stack.pop();
        }
        for def in TABLE_DEFS {
            visit(def.tag, &mut Vec::new());
        }
    }

    #[test]
    fn every_dep_is_registered() {
        for def in TABLE_DEFS {
            for dep in def.deps {
                assert!(def_for(*dep).is_some(), "{} depends on unregistered {dep}", def.tag);
            }
        }
    }

    #[test]
    fn no_duplicate_registrations() {
        for (i, def) in TABLE_DEFS.iter().enumerate() {
            assert!(
                TABLE_DEFS[i + 1..].iter().all(|other| other.tag != def.tag),
                "{} registered twice",
                def.tag
            );
        }
    }

    #[test]
    fn cache_decodes_once() {
        let cache = TableCache::default();
        let mut decodes = 0;
        for _ in 0..3 {
            let table = cache
                .get_or_decode(
                    (0x100, 0x10),
                    || {
                        decodes += 1;
                        Ok((
                            Table::Cvt(crate::read::FontRead::read(
                                crate::font_data::FontData::new(&[0, 1]),
                            )?),
                            Cvt::TAG,
                        ))
                    },
                    |_| {},
                )
                .unwrap();
            assert_eq!(table.tag(), Cvt::TAG);
        }
        assert_eq!(decodes, 1);
        assert!(cache.get((0x100, 0x10)).is_some());
        assert!(cache.get((0x200, 0x10)).is_none());
    }
}
