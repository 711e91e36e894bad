//! Static TrueType font merging for icon-font subsets.
//!
//! This crate combines multiple already-subset TrueType fonts into a single
//! font containing the union of their glyph repertoires. It is deliberately
//! narrow: fonts are expected to be static (no variation tables) with glyf
//! outlines, which is what an icon-font subsetting pipeline feeds it.
//!
//! Merge semantics follow fontTools' `merge.Merger` where they apply:
//! - every font's gid 0 collapses onto the merged `.notdef`;
//! - when the same codepoint is mapped by several fonts, the earliest font in
//!   the input order wins;
//! - per-glyph hinting is stripped from all fonts except the first, since
//!   instructions may reference `fpgm`/`cvt` data only copied from the first.
//!
//! # Example
//!
//! ```no_run
//! use fasub_font_merger::merge_fonts;
//!
//! let font1 = std::fs::read("font1.ttf").unwrap();
//! let font2 = std::fs::read("font2.ttf").unwrap();
//! let merged = merge_fonts(&[&font1, &font2]).unwrap();
//! ```

mod error;
mod glyph_map;
mod merger;
mod tables;

pub use error::{MergeError, Result};
pub use merger::Merger;

/// Merge multiple fonts from raw byte slices.
///
/// This is a convenience wrapper around [`Merger`] for the common case.
pub fn merge_fonts(fonts: &[&[u8]]) -> Result<Vec<u8>> {
    Merger::default().merge(fonts)
}
