//! The unified glyph ordering across all fonts being merged.

use read_fonts::{FontRef, TableProvider};

use crate::error::{MergeError, Result};

/// Maps every (font, local gid) pair to its glyph id in the merged font.
///
/// Font 0 contributes all of its glyphs in order, so its gids are stable.
/// Later fonts contribute everything except gid 0: each font's `.notdef`
/// collapses onto merged gid 0.
#[derive(Debug)]
pub(crate) struct GlyphMap {
    per_font: Vec<Vec<u32>>,
    sources: Vec<(usize, u16)>,
}

impl GlyphMap {
    pub(crate) fn compute(fonts: &[FontRef]) -> Result<Self> {
        let counts = fonts
            .iter()
            .map(|font| Ok(font.maxp()?.num_glyphs()))
            .collect::<Result<Vec<u16>>>()?;
        Self::from_counts(&counts)
    }

    pub(crate) fn from_counts(counts: &[u16]) -> Result<Self> {
        let mut per_font = Vec::with_capacity(counts.len());
        let mut sources: Vec<(usize, u16)> = Vec::new();

        for (font_idx, &count) in counts.iter().enumerate() {
            let mut mapping = Vec::with_capacity(count as usize);
            for gid in 0..count {
                if font_idx > 0 && gid == 0 {
                    mapping.push(0);
                    continue;
                }
                // An sfnt glyph count is a u16, so the merged font can hold
                // at most 65,535 glyphs.
                if sources.len() == u16::MAX as usize {
                    return Err(MergeError::TooManyGlyphs);
                }
                mapping.push(sources.len() as u32);
                sources.push((font_idx, gid));
            }
            per_font.push(mapping);
        }

        Ok(Self { per_font, sources })
    }

    /// The merged gid for a (font, local gid) pair, if the gid is in range.
    pub(crate) fn mega(&self, font_idx: usize, gid: u16) -> Option<u32> {
        self.per_font.get(font_idx)?.get(gid as usize).copied()
    }

    /// The (font, local gid) source of each merged glyph, in merged order.
    pub(crate) fn sources(&self) -> &[(usize, u16)] {
        &self.sources
    }

    pub(crate) fn num_glyphs(&self) -> u16 {
        self.sources.len() as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_font_is_identity() {
        let map = GlyphMap::from_counts(&[3]).unwrap();
        assert_eq!(map.num_glyphs(), 3);
        assert_eq!(map.mega(0, 0), Some(0));
        assert_eq!(map.mega(0, 2), Some(2));
        assert_eq!(map.mega(0, 3), None);
    }

    #[test]
    fn later_notdefs_collapse() {
        let map = GlyphMap::from_counts(&[3, 2, 2]).unwrap();
        assert_eq!(map.num_glyphs(), 3 + 1 + 1);
        assert_eq!(map.mega(1, 0), Some(0));
        assert_eq!(map.mega(1, 1), Some(3));
        assert_eq!(map.mega(2, 0), Some(0));
        assert_eq!(map.mega(2, 1), Some(4));
        assert_eq!(map.sources()[3], (1, 1));
        assert_eq!(map.sources()[4], (2, 1));
    }

    #[test]
    fn out_of_range_font_is_none() {
        let map = GlyphMap::from_counts(&[1]).unwrap();
        assert_eq!(map.mega(1, 0), None);
    }

    #[test]
    fn glyph_count_is_capped_at_u16() {
        // The second font's gid 0 collapses, so this sits exactly at the cap.
        let map = GlyphMap::from_counts(&[u16::MAX, 1]).unwrap();
        assert_eq!(map.num_glyphs(), u16::MAX);

        // One more real glyph would overflow the sfnt glyph count.
        assert!(matches!(
            GlyphMap::from_counts(&[u16::MAX, 2]),
            Err(MergeError::TooManyGlyphs)
        ));
    }
}
