//! Tile coverage for map viewports.
//!
//! Given a screen (position, zoom, rotation), this crate decides which map tiles, at which
//! levels of detail, cover the screen and in which order they should be fetched and drawn.

mod config;
pub use config::*;

mod geometry;
pub use geometry::*;

mod ordering;
pub use ordering::*;

mod projection;
pub use projection::*;

mod rect_info;
pub use rect_info::*;

mod scale;
pub use scale::*;

mod screen;
pub use screen::*;

mod tiler;
pub use tiler::*;
