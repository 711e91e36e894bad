//! Merge error definitions.

use read_fonts::types::Tag;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = MergeError> = std::result::Result<T, E>;

/// Errors that can occur while merging fonts.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MergeError {
    /// No input fonts were provided.
    #[error("no fonts to merge")]
    NoFonts,
    /// An input font could not be parsed.
    #[error("failed to read font table data")]
    Parse(#[from] read_fonts::ReadError),
    /// A required table is missing or too short to patch.
    #[error("required table '{0}' is missing or malformed")]
    MissingTable(Tag),
    /// The combined glyph repertoire exceeds the sfnt glyph limit.
    #[error("merged font would contain more than 65535 glyphs")]
    TooManyGlyphs,
    /// Two fonts map the same codepoint to conflicting merged glyphs.
    #[error(transparent)]
    CmapConflict(#[from] write_fonts::tables::cmap::CmapConflict),
    /// A merged table failed to compile.
    #[error("failed to compile merged table: {0}")]
    Compile(#[from] write_fonts::error::Error),
    /// The final font could not be assembled.
    #[error(transparent)]
    Build(#[from] write_fonts::BuilderError),
}
