//! CLI definitions and the run wrapper around the core pipeline.

use std::{
    env, fs, io,
    io::Read,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use fasub_core::{Flavor, HarfBuzzEngine, SubsetOptions, Weight, read_glyphs, read_glyphs_file};

use crate::{download, unzip};

#[derive(Debug, Parser)]
#[command(name = "fa-subset", version)]
#[command(about = "Create subsets of the Font Awesome icon framework")]
#[command(long_about = "Create subsets of the Font Awesome icon framework.\n\n\
    If none of the --font-awesome* flags are given, the latest release is\n\
    downloaded. Otherwise, exactly one of them picks the release to use.")]
pub struct Cli {
    /// Newline-delimited text file listing the glyphs to include; read from
    /// stdin when omitted. Comments start with `#`.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory receiving the outputs (css under `css/`, fonts under
    /// `fonts/`) [default: ./fontawesome-subset]. Mutually exclusive with
    /// --css-output/--font-output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for the generated stylesheet. Requires --font-output and
    /// excludes --output.
    #[arg(long)]
    pub css_output: Option<PathBuf>,

    /// Directory for the generated font files. Requires --css-output and
    /// excludes --output.
    #[arg(long)]
    pub font_output: Option<PathBuf>,

    /// An existing copy of Font Awesome, either a zip archive or a directory.
    #[arg(long)]
    pub font_awesome: Option<PathBuf>,

    /// Download Font Awesome from this URL.
    #[arg(long)]
    pub font_awesome_url: Option<String>,

    /// Download this Font Awesome version.
    #[arg(long)]
    pub font_awesome_version: Option<String>,

    /// Output font flavors (ttf, woff, woff2); repeatable.
    #[arg(short = 'f', long = "flavor", value_parser = Flavor::from_str, default_values_t = [Flavor::Woff, Flavor::Woff2])]
    pub flavors: Vec<Flavor>,

    /// Font weights to include (brands, regular, solid, v4compat); repeatable.
    #[arg(long = "weight", value_parser = Weight::from_str, default_values_t = Weight::ALL)]
    pub weights: Vec<Weight>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        self.validate()?;

        let fa_dir = self.resolve_release()?;
        let glyphs = self.read_glyph_list()?;
        let (css_dir, fonts_dir) = self.output_locations();
        let css_out = css_dir.join("fontawesome-subset.css");
        let font_out = fonts_dir.join("fontawesome-subset");

        let options = SubsetOptions {
            flavors: self.flavors.clone(),
            weights: self.weights.clone(),
            ..SubsetOptions::default()
        };

        let mut created_dirs = Vec::new();
        let result = create_dir_tracked(&css_dir, &mut created_dirs)
            .and_then(|()| create_dir_tracked(&fonts_dir, &mut created_dirs))
            .and_then(|()| {
                fasub_core::generate_font_subset(
                    &HarfBuzzEngine::new(),
                    &fa_dir,
                    &css_out,
                    &font_out,
                    &glyphs,
                    &options,
                )
                .map_err(anyhow::Error::from)
            });

        if let Err(err) = result {
            // Remove the directories this run created, best effort
            for dir in created_dirs.iter().rev() {
                let _ = fs::remove_dir_all(dir);
            }
            return Err(err);
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.output.is_some() && (self.css_output.is_some() || self.font_output.is_some()) {
            bail!("may specify either --output OR --css-output and --font-output, but not both");
        }
        if self.css_output.is_some() != self.font_output.is_some() {
            bail!("both or neither of --css-output and --font-output must be specified");
        }

        let release_sources = [
            self.font_awesome.is_some(),
            self.font_awesome_url.is_some(),
            self.font_awesome_version.is_some(),
        ]
        .iter()
        .filter(|given| **given)
        .count();
        if release_sources > 1 {
            bail!(
                "may specify either 0 or 1 of --font-awesome, --font-awesome-url, \
                --font-awesome-version, but specified {release_sources}"
            );
        }

        Ok(())
    }

    /// Resolve the expanded release directory, downloading and extracting as
    /// needed.
    fn resolve_release(&self) -> Result<PathBuf> {
        let cache_dir = env::temp_dir();

        let archive_or_dir = if let Some(existing) = &self.font_awesome {
            existing.clone()
        } else if let Some(version) = &self.font_awesome_version {
            download::download_version(version, &cache_dir)?
        } else if let Some(url) = &self.font_awesome_url {
            download::download_url(url, &cache_dir)?
        } else {
            download::download_latest(&cache_dir)?
        };

        if archive_or_dir.extension().is_some_and(|ext| ext == "zip") {
            unzip::unzip(&archive_or_dir)
        } else {
            Ok(archive_or_dir)
        }
    }

    fn read_glyph_list(&self) -> Result<Vec<String>> {
        match &self.input {
            Some(path) => Ok(read_glyphs_file(path)?),
            None => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text).context("Failed to read stdin")?;
                Ok(read_glyphs(&text))
            }
        }
    }

    fn output_locations(&self) -> (PathBuf, PathBuf) {
        if let (Some(css), Some(fonts)) = (&self.css_output, &self.font_output) {
            return (css.clone(), fonts.clone());
        }
        let output = match &self.output {
            Some(output) => output.clone(),
            None => PathBuf::from("fontawesome-subset"),
        };
        (output.join("css"), output.join("fonts"))
    }
}

/// Create `dir` and remember the outermost directory that did not exist yet,
/// so a failed run can remove everything it created.
fn create_dir_tracked(dir: &Path, created: &mut Vec<PathBuf>) -> Result<()> {
    if dir.exists() {
        return Ok(());
    }

    let mut outermost = dir.to_path_buf();
    while let Some(parent) = outermost.parent() {
        if parent.as_os_str().is_empty() || parent.exists() {
            break;
        }
        outermost = parent.to_path_buf();
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    created.push(outermost);
    Ok(())
}
