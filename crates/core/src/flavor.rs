//! Output font encodings.

use std::{fmt, str::FromStr};

use crate::error::Error;

/// An output binary font encoding.
///
/// Each flavor maps to an output filename suffix and a CSS `format()` tag;
/// for the flavors here the two are the same string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Raw TrueType outlines, written as produced by the merge.
    Ttf,
    /// WOFF 1.0 container (per-table zlib).
    Woff,
    /// WOFF 2.0 container (brotli).
    Woff2,
}

impl Flavor {
    pub const ALL: [Flavor; 3] = [Flavor::Ttf, Flavor::Woff, Flavor::Woff2];

    /// Output filename suffix, without the dot.
    pub fn suffix(self) -> &'static str {
        match self {
            Flavor::Ttf => "ttf",
            Flavor::Woff => "woff",
            Flavor::Woff2 => "woff2",
        }
    }

    /// The tag used in `format('...')` annotations in the stylesheet.
    pub fn format_tag(self) -> &'static str {
        self.suffix()
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for Flavor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ttf" => Ok(Flavor::Ttf),
            "woff" => Ok(Flavor::Woff),
            "woff2" => Ok(Flavor::Woff2),
            other => Err(Error::UnknownFlavor(other.to_string())),
        }
    }
}
