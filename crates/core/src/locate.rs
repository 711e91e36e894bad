//! Input font location within an expanded release directory.

use std::{
    fmt, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use glob::glob;

use crate::{
    config::{CSS_FILE_NAME, FONT_DIR_NAME},
    error::{Error, Result},
};

/// One of the four bundled icon font weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weight {
    Brands,
    Solid,
    Regular,
    V4Compat,
}

impl Weight {
    pub const ALL: [Weight; 4] = [Weight::Brands, Weight::Solid, Weight::Regular, Weight::V4Compat];

    /// Canonical base filename stem for this weight's font binary.
    pub fn stem(self) -> &'static str {
        match self {
            Weight::Brands => "fa-brands-400",
            Weight::Regular => "fa-regular-400",
            Weight::Solid => "fa-solid-900",
            Weight::V4Compat => "fa-v4compatibility",
        }
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Weight::Brands => "brands",
            Weight::Regular => "regular",
            Weight::Solid => "solid",
            Weight::V4Compat => "v4compat",
        })
    }
}

impl FromStr for Weight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brands" => Ok(Weight::Brands),
            "regular" => Ok(Weight::Regular),
            "solid" => Ok(Weight::Solid),
            "v4compat" => Ok(Weight::V4Compat),
            other => Err(Error::UnknownWeight(other.to_string())),
        }
    }
}

/// The resolved layout of an expanded release directory.
///
/// The release's top-level folder name varies by version, so the layout is
/// discovered structurally: exactly one `css` directory somewhere under the
/// base, with the font binaries in a sibling `webfonts` directory.
#[derive(Debug, Clone)]
pub struct ReleaseLayout {
    css_dir: PathBuf,
}

impl ReleaseLayout {
    pub fn discover(base: &Path) -> Result<Self> {
        let pattern = base.join("**").join("css");
        let pattern = pattern.to_str().ok_or_else(|| Error::Io {
            path: base.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "non-UTF-8 base path"),
        })?;

        let candidates: Vec<PathBuf> = glob(pattern)
            .map_err(|e| Error::Io {
                path: base.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, e),
            })?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_dir())
            .collect();

        match candidates.len() {
            1 => {
                let css_dir = candidates.into_iter().next().ok_or(Error::Layout {
                    base: base.to_path_buf(),
                    found: 0,
                })?;
                log::debug!("release css directory: {}", css_dir.display());
                Ok(Self { css_dir })
            }
            found => Err(Error::Layout { base: base.to_path_buf(), found }),
        }
    }

    /// Path of the stylesheet to parse for codepoints.
    pub fn stylesheet(&self) -> PathBuf {
        self.css_dir.join(CSS_FILE_NAME)
    }

    /// Path of the directory holding the input font binaries.
    pub fn font_dir(&self) -> PathBuf {
        match self.css_dir.parent() {
            Some(parent) => parent.join(FONT_DIR_NAME),
            None => PathBuf::from(FONT_DIR_NAME),
        }
    }
}

/// Resolve the input font paths for the requested weights, in request order.
///
/// Existence is not checked here; a missing font surfaces when the file is
/// read for subsetting.
pub fn find_input_fonts(
    layout: &ReleaseLayout,
    input_format: &str,
    weights: &[Weight],
) -> Vec<PathBuf> {
    let font_dir = layout.font_dir();
    weights
        .iter()
        .map(|weight| font_dir.join(format!("{}.{input_format}", weight.stem())))
        .collect()
}
