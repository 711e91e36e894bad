//! Font subsetting wrapper around hb-subset with builder pattern.
//!
//! This crate provides a high-level interface for reducing a font to a fixed
//! set of Unicode codepoints using HarfBuzz's hb-subset library. It operates
//! purely on byte slices with no file I/O dependencies.
//!
//! # Example
//!
//! ```no_run
//! use fasub_font_subsetter::Subsetter;
//!
//! let font_data: &[u8] = &[];
//! let subset = Subsetter::new()
//!     .with_codepoints([0xf007, 0xf09e])
//!     .subset(font_data);
//! ```

use std::collections::BTreeSet;

use anyhow::Result;
use hb_subset::{Blob, FontFace, SubsetInput};

/// Font subsetter with builder pattern.
///
/// Collects the codepoints to keep before performing the subset operation.
/// Glyphs reachable from the requested codepoints are retained, along with
/// whatever baseline glyphs HarfBuzz itself mandates (e.g. `.notdef`).
#[derive(Debug, Default)]
pub struct Subsetter {
    codepoints: BTreeSet<u32>,
    retain_glyph_names: bool,
}

impl Subsetter {
    /// Creates a new subsetter with an empty codepoint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds Unicode codepoints to include in the subset.
    ///
    /// Duplicates collapse; codepoints outside the Unicode scalar range are
    /// ignored when the subset is performed.
    pub fn with_codepoints(mut self, codepoints: impl IntoIterator<Item = u32>) -> Self {
        self.codepoints.extend(codepoints);
        self
    }

    /// Sets whether to retain glyph names in the subset.
    ///
    /// Glyph names can be useful for debugging but increase file size.
    pub fn retain_glyph_names(mut self, retain: bool) -> Self {
        self.retain_glyph_names = retain;
        self
    }

    /// Subsets the font data and returns the result.
    ///
    /// # Arguments
    ///
    /// * `data` - The raw font file data
    ///
    /// # Returns
    ///
    /// The subset font data as a byte vector, or an error if subsetting fails.
    pub fn subset(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut input = SubsetInput::new()?;

        if self.retain_glyph_names {
            input.flags().retain_glyph_names();
        }

        {
            let mut unicode_set = input.unicode_set();
            for cp in &self.codepoints {
                if let Some(c) = char::from_u32(*cp) {
                    unicode_set.insert(c);
                }
            }
        }

        let font = FontFace::new(Blob::from_bytes(data)?)?;
        let subset_font = input.subset_font(&font)?;
        Ok(subset_font.underlying_blob().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let subsetter = Subsetter::new()
            .with_codepoints([0xf007, 0xf09e, 0xf007])
            .retain_glyph_names(true);

        assert!(subsetter.retain_glyph_names);
        assert_eq!(subsetter.codepoints.len(), 2);
    }

    #[test]
    fn test_default_is_empty() {
        let subsetter = Subsetter::new();
        assert!(subsetter.codepoints.is_empty());
        assert!(!subsetter.retain_glyph_names);
    }
}
