//! hmtx table merging

use read_fonts::{FontRef, TableProvider};
use write_fonts::tables::hmtx::{Hmtx, LongMetric};

use crate::{error::Result, glyph_map::GlyphMap};

/// Merge hmtx tables from multiple fonts.
///
/// Every merged glyph gets a full long metric, so the resulting table must be
/// written with `numberOfHMetrics == numGlyphs`.
pub(crate) fn merge_hmtx(fonts: &[FontRef], glyph_map: &GlyphMap) -> Result<Hmtx> {
    let mut h_metrics = Vec::with_capacity(glyph_map.sources().len());

    for &(font_idx, gid) in glyph_map.sources() {
        let font = &fonts[font_idx];
        let hhea = font.hhea()?;
        let hmtx = font.hmtx()?;
        let num_h_metrics = hhea.number_of_h_metrics() as usize;
        let gid = gid as usize;

        let (advance, side_bearing) = if let Some(lm) = hmtx.h_metrics().get(gid) {
            (lm.advance.get(), lm.side_bearing.get())
        } else {
            // Glyphs beyond numberOfHMetrics reuse the last advance width
            let last_advance = if num_h_metrics > 0 {
                hmtx.h_metrics()
                    .get(num_h_metrics - 1)
                    .map(|lm| lm.advance.get())
                    .unwrap_or(0)
            } else {
                0
            };
            let lsb = hmtx
                .left_side_bearings()
                .get(gid.saturating_sub(num_h_metrics))
                .map(|b| b.get())
                .unwrap_or(0);
            (last_advance, lsb)
        };

        h_metrics.push(LongMetric { advance, side_bearing });
    }

    Ok(Hmtx { h_metrics, left_side_bearings: Vec::new() })
}
