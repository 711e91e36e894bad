//! fasub core - the Font Awesome subsetting pipeline.
//!
//! Parses a release stylesheet to resolve icon names to codepoints, locates
//! the input font binaries, subsets and merges them, and emits the reduced
//! fonts plus a stylesheet referencing them.

pub mod codepoints;
pub mod config;
pub mod engine;
pub mod error;
pub mod flavor;
pub mod input;
pub mod locate;
pub mod pipeline;
pub mod stylesheet;
pub mod subset;

pub use codepoints::{Codepoint, load_codepoints};
pub use engine::{FontEngine, HarfBuzzEngine};
pub use error::{Error, Result};
pub use flavor::Flavor;
pub use input::{read_glyphs, read_glyphs_file};
pub use locate::{ReleaseLayout, Weight, find_input_fonts};
pub use pipeline::{SubsetOptions, generate_font_subset};
pub use stylesheet::generate_css;
pub use subset::{FontOutput, generate_subset_font};
