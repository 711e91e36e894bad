//! Glyph-name list reading.

use std::{fs, io, path::Path};

use crate::error::{Error, Result};

/// Parse a glyph list: one name per line, `#` starts a comment (full-line or
/// inline), surrounding whitespace is trimmed, empty lines are dropped.
/// Order is preserved.
pub fn read_glyphs(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let line = line.split('#').next().unwrap_or(line).trim();
            (!line.is_empty()).then(|| line.to_string())
        })
        .collect()
}

/// Read a glyph list from a file. Non-text content is rejected with
/// [`Error::InvalidInput`].
pub fn read_glyphs_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::InvalidData {
            Error::InvalidInput { path: path.to_path_buf(), source }
        } else {
            Error::Io { path: path.to_path_buf(), source }
        }
    })?;
    Ok(read_glyphs(&text))
}
