//! The end-to-end subsetting pipeline.

use std::{fs, path::Path};

use crate::{
    codepoints::load_codepoints,
    config::DEFAULT_FONT_DIR_PREFIX,
    engine::FontEngine,
    error::{Error, Result},
    flavor::Flavor,
    locate::{ReleaseLayout, Weight, find_input_fonts},
    stylesheet::generate_css,
    subset::generate_subset_font,
};

/// Options controlling a pipeline run.
#[derive(Debug, Clone)]
pub struct SubsetOptions {
    /// Output encodings to produce, in output order.
    pub flavors: Vec<Flavor>,
    /// Suffix of the input fonts inside the release (`ttf` in practice).
    pub input_format: String,
    /// Font weights to include, in merge-precedence order.
    pub weights: Vec<Weight>,
    /// Relative path from the generated stylesheet to the font files.
    pub font_dir_prefix: String,
}

impl Default for SubsetOptions {
    fn default() -> Self {
        Self {
            flavors: vec![Flavor::Woff2, Flavor::Woff],
            input_format: "ttf".to_string(),
            weights: Weight::ALL.to_vec(),
            font_dir_prefix: DEFAULT_FONT_DIR_PREFIX.to_string(),
        }
    }
}

/// Run the whole pipeline: discover the release layout, resolve codepoints,
/// subset/merge/encode the fonts, and write the stylesheet.
///
/// Steps run strictly in order and fail fast. Font files are only written
/// once subsetting and every encode succeeded, and the stylesheet is written
/// last, so an error leaves either no outputs or complete ones.
pub fn generate_font_subset(
    engine: &impl FontEngine,
    fa_dir: &Path,
    css_out: &Path,
    font_out: &Path,
    glyphs: &[String],
    options: &SubsetOptions,
) -> Result<()> {
    let layout = ReleaseLayout::discover(fa_dir)?;
    let input_fonts = find_input_fonts(&layout, &options.input_format, &options.weights);

    let css_path = layout.stylesheet();
    let css_text = fs::read_to_string(&css_path)
        .map_err(|source| Error::Io { path: css_path.clone(), source })?;
    let codepoints = load_codepoints(&css_text, glyphs)?;
    log::info!("resolved {} glyphs from {}", codepoints.len(), css_path.display());

    let outputs =
        generate_subset_font(engine, &input_fonts, &codepoints, font_out, &options.flavors)?;

    let css = generate_css(&codepoints, &outputs, &options.font_dir_prefix);
    fs::write(css_out, css)
        .map_err(|source| Error::Io { path: css_out.to_path_buf(), source })?;
    log::info!("wrote stylesheet {}", css_out.display());

    Ok(())
}
