//! cmap table merging

use indexmap::IndexMap;
use read_fonts::{
    FontRef, TableProvider,
    tables::cmap::{Cmap as ReadCmap, CmapSubtable, PlatformId},
};
use write_fonts::tables::cmap::Cmap;

use crate::{error::Result, glyph_map::GlyphMap};

/// Merge cmap tables from multiple fonts.
///
/// Codepoints are collected in font order; when the same codepoint is mapped
/// by several fonts, the earliest font wins.
pub(crate) fn merge_cmap(fonts: &[FontRef], glyph_map: &GlyphMap) -> Result<Cmap> {
    let mut mappings: IndexMap<u32, u32> = IndexMap::new();

    for (font_idx, font) in fonts.iter().enumerate() {
        let cmap = font.cmap()?;
        let Some(subtable) = find_best_subtable(&cmap) else {
            continue;
        };
        for (codepoint, gid) in iter_cmap_subtable(&subtable) {
            if mappings.contains_key(&codepoint) {
                continue;
            }
            if let Some(mega) = glyph_map.mega(font_idx, gid) {
                mappings.insert(codepoint, mega);
            }
        }
    }

    let char_mappings = mappings
        .iter()
        .filter_map(|(cp, gid)| char::from_u32(*cp).map(|c| (c, font_types::GlyphId::new(*gid))));

    Ok(Cmap::from_mappings(char_mappings)?)
}

fn find_best_subtable<'a>(cmap: &'a ReadCmap<'a>) -> Option<CmapSubtable<'a>> {
    // Priority: format 12 (full Unicode) > format 4 (BMP) > anything else
    let records = cmap.encoding_records();

    for record in records {
        if (record.platform_id() == PlatformId::Unicode
            || (record.platform_id() == PlatformId::Windows && record.encoding_id() == 10))
            && let Ok(subtable) = record.subtable(cmap.offset_data())
            && matches!(subtable, CmapSubtable::Format12(_))
        {
            return Some(subtable);
        }
    }

    for record in records {
        if (record.platform_id() == PlatformId::Unicode
            || (record.platform_id() == PlatformId::Windows && record.encoding_id() == 1))
            && let Ok(subtable) = record.subtable(cmap.offset_data())
            && matches!(subtable, CmapSubtable::Format4(_))
        {
            return Some(subtable);
        }
    }

    records.iter().find_map(|r| r.subtable(cmap.offset_data()).ok())
}

/// Flattens a cmap subtable into (codepoint, gid) pairs.
pub(crate) fn iter_cmap_subtable(subtable: &CmapSubtable) -> Vec<(u32, u16)> {
    let mut mappings = Vec::new();

    match subtable {
        CmapSubtable::Format4(f4) => {
            let end_codes = f4.end_code();
            let start_codes = f4.start_code();
            let id_deltas = f4.id_delta();
            let id_range_offsets = f4.id_range_offsets();
            let glyph_id_array = f4.glyph_id_array();

            let seg_count = f4.seg_count_x2() as usize / 2;
            for seg in 0..seg_count {
                let end_code = end_codes.get(seg).map(|v| v.get()).unwrap_or(0xFFFF);
                let start_code = start_codes.get(seg).map(|v| v.get()).unwrap_or(0);
                let id_delta = id_deltas.get(seg).map(|v| v.get()).unwrap_or(0);
                let id_range_offset = id_range_offsets.get(seg).map(|v| v.get()).unwrap_or(0);

                if start_code == 0xFFFF {
                    continue;
                }

                for cp in start_code..=end_code {
                    let gid = if id_range_offset == 0 {
                        ((cp as i32 + id_delta as i32) & 0xFFFF) as u16
                    } else {
                        let glyph_idx = (id_range_offset as usize / 2) + (cp - start_code) as usize
                            - (seg_count - seg);
                        if let Some(gid) = glyph_id_array.get(glyph_idx) {
                            let gid = gid.get();
                            if gid != 0 {
                                ((gid as i32 + id_delta as i32) & 0xFFFF) as u16
                            } else {
                                0
                            }
                        } else {
                            0
                        }
                    };

                    if gid != 0 {
                        mappings.push((cp as u32, gid));
                    }
                }
            }
        }
        CmapSubtable::Format12(f12) => {
            for group in f12.groups() {
                let start = group.start_char_code();
                let end = group.end_char_code();
                let mut gid = group.start_glyph_id();
                for cp in start..=end {
                    if gid != 0 {
                        mappings.push((cp, gid as u16));
                    }
                    gid += 1;
                }
            }
        }
        CmapSubtable::Format6(f6) => {
            let first = f6.first_code() as u32;
            for (i, gid) in f6.glyph_id_array().iter().enumerate() {
                let gid = gid.get();
                if gid != 0 {
                    mappings.push((first + i as u32, gid));
                }
            }
        }
        _ => {}
    }

    mappings
}
