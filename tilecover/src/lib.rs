//! Command line front end of [`tilecover_core`].
//!
//! The library part holds the view configuration the commands load: a tiler configuration
//! plus the screen to cover.

pub mod config;

pub use tilecover_core as core;
