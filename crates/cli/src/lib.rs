//! fa-subset CLI: argument handling, release download and extraction around
//! the core subsetting pipeline.

pub mod cli;
pub mod download;
pub mod unzip;
