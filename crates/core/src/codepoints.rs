//! Stylesheet codepoint extraction.
//!
//! Font Awesome's `all.css` binds every icon to its codepoint through rules
//! of the form:
//!
//! ```css
//! .fa-user:before {
//!   content: "\f007"; }
//! ```
//!
//! The parser searches for that structural pattern per requested icon rather
//! than parsing CSS properly; the upstream format is not under our control,
//! so the match is kept deliberately tolerant (arbitrary whitespace, either
//! quote style, one or two colons before `before`). The first match wins.

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{Error, Result};

/// A codepoint extracted from the stylesheet.
///
/// Keeps both the hex text exactly as captured (the generated stylesheet
/// must emit it unchanged) and the parsed scalar value (the subset filter
/// needs numbers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codepoint {
    hex: String,
    scalar: u32,
}

impl Codepoint {
    /// Parse a bare hex codepoint (no `\` or `U+` prefix). Returns `None`
    /// when the text is not a valid Unicode scalar value.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let scalar = u32::from_str_radix(hex, 16).ok()?;
        char::from_u32(scalar)?;
        Some(Self { hex: hex.to_string(), scalar })
    }

    /// The hex text as it appeared in the stylesheet.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// The Unicode scalar value.
    pub fn scalar(&self) -> u32 {
        self.scalar
    }
}

fn extract_codepoint(icon: &str, css: &str) -> Result<Codepoint> {
    let pattern = format!(
        r#"\.fa-{}:+before\s*\{{\s*content:\s*['"]+(?P<codepoint>[^'"]+)"#,
        regex::escape(icon)
    );
    // The pattern is built from a fixed template plus an escaped icon name,
    // so compilation cannot fail on caller input.
    let re = Regex::new(&pattern).map_err(|_| Error::UnknownGlyph(icon.to_string()))?;

    let captures = re.captures(css).ok_or_else(|| Error::UnknownGlyph(icon.to_string()))?;
    let mut value = &captures["codepoint"];
    if let Some(stripped) = value.strip_prefix('\\') {
        value = stripped;
    }

    Codepoint::from_hex(value).ok_or_else(|| Error::UnknownGlyph(icon.to_string()))
}

/// Resolve each requested icon name to its codepoint.
///
/// The returned map preserves the request order. If `rss` was requested, it
/// is renamed to `rss-mod` in the result (same codepoint); some ad blockers
/// hide elements styled with `.fa-rss`.
pub fn load_codepoints<S: AsRef<str>>(css: &str, glyphs: &[S]) -> Result<IndexMap<String, Codepoint>> {
    let mut codepoints = IndexMap::with_capacity(glyphs.len());
    for glyph in glyphs {
        let glyph = glyph.as_ref();
        let codepoint = extract_codepoint(glyph, css)?;
        codepoints.insert(glyph.to_string(), codepoint);
    }

    if let Some(codepoint) = codepoints.shift_remove("rss") {
        codepoints.insert("rss-mod".to_string(), codepoint);
    }

    Ok(codepoints)
}
