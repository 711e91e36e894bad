//! Configuration constants for the subsetting pipeline.

/// Font family name shared between the `@font-face` block and the base rules.
pub const FONT_FAMILY: &str = "FontAwesomeSubset";

/// Stylesheet file parsed for icon codepoints, relative to the css directory.
pub const CSS_FILE_NAME: &str = "all.css";

/// Font binary directory, a sibling of the css directory in every release.
pub const FONT_DIR_NAME: &str = "webfonts";

/// Default relative path from the generated stylesheet to the font files.
pub const DEFAULT_FONT_DIR_PREFIX: &str = "../fonts";

/// Static base rules emitted ahead of the per-icon rules.
pub const CSS_PREAMBLE: &str = r".fa,
.fas,
.far,
.fal,
.fab {
  -moz-osx-font-smoothing: grayscale;
  -webkit-font-smoothing: antialiased;
  display: inline-block;
  font-style: normal;
  font-variant: normal;
  text-rendering: auto;
  line-height: 1;
  font-family: 'FontAwesomeSubset'; }
";
