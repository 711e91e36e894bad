//! The binary-font capability behind the pipeline.
//!
//! Subsetting, merging and container encoding are opaque to the pipeline:
//! it hands bytes in and gets bytes out. Keeping the capability behind a
//! trait lets the pipeline stages be tested with a fake that records calls
//! instead of manipulating real fonts.

use std::collections::BTreeSet;

use fasub_font_subsetter::Subsetter;

use crate::flavor::Flavor;

/// Subset, merge and encode operations over raw font bytes.
///
/// `Sync` is required so the per-font subset fan-out can run in parallel.
pub trait FontEngine: Sync {
    /// Reduce a font to the glyphs reachable from the given codepoints
    /// (plus whatever baseline glyphs the subsetter itself mandates).
    fn subset(&self, font: &[u8], codepoints: &BTreeSet<u32>) -> anyhow::Result<Vec<u8>>;

    /// Merge reduced fonts into one, earliest font winning duplicate
    /// codepoints.
    fn merge(&self, fonts: &[Vec<u8>]) -> anyhow::Result<Vec<u8>>;

    /// Encode a merged font into the given output flavor.
    fn encode(&self, font: &[u8], flavor: Flavor) -> anyhow::Result<Vec<u8>>;
}

/// The real engine: hb-subset for subsetting, our static TrueType merger,
/// and the WOFF container encoders.
#[derive(Debug, Default)]
pub struct HarfBuzzEngine;

impl HarfBuzzEngine {
    pub fn new() -> Self {
        Self
    }
}

impl FontEngine for HarfBuzzEngine {
    fn subset(&self, font: &[u8], codepoints: &BTreeSet<u32>) -> anyhow::Result<Vec<u8>> {
        Subsetter::new().with_codepoints(codepoints.iter().copied()).subset(font)
    }

    fn merge(&self, fonts: &[Vec<u8>]) -> anyhow::Result<Vec<u8>> {
        let fonts: Vec<&[u8]> = fonts.iter().map(Vec::as_slice).collect();
        Ok(fasub_font_merger::merge_fonts(&fonts)?)
    }

    fn encode(&self, font: &[u8], flavor: Flavor) -> anyhow::Result<Vec<u8>> {
        match flavor {
            Flavor::Ttf => Ok(font.to_vec()),
            Flavor::Woff => fasub_font_woff::to_woff(font),
            Flavor::Woff2 => fasub_font_woff::to_woff2(font),
        }
    }
}
