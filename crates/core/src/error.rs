//! Error taxonomy for the subsetting pipeline.

use std::{io, path::PathBuf};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by the subsetting pipeline. All are fail-fast: the pipeline
/// writes no output files once any of these has been raised.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The stylesheet has no rule for a requested icon name.
    #[error("unknown icon: {0}")]
    UnknownGlyph(String),
    /// The release directory does not contain exactly one css directory.
    #[error("expected exactly one css directory under {}, found {found}", base.display())]
    Layout { base: PathBuf, found: usize },
    /// A font weight identifier outside brands/regular/solid/v4compat.
    #[error("unknown font weight: {0}")]
    UnknownWeight(String),
    /// An output flavor identifier outside ttf/woff/woff2.
    #[error("unknown output flavor: {0}")]
    UnknownFlavor(String),
    /// An input font file could not be read.
    #[error("failed to read input font {}", path.display())]
    InputFont {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The subset/merge/encode capability reported a failure.
    #[error("font subsetting failed")]
    Subset(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The glyph list source is not readable text.
    #[error("glyph list {} is not readable text", path.display())]
    InvalidInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A filesystem read or write outside the cases above failed.
    #[error("i/o error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
