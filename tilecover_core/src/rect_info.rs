//! Tile identifiers of the coverage engine.
//!
//! A [`RectInfo`] names one tile by two levels of detail and its grid position:
//! - `draw_scale` selects which density of map features is rendered into the tile
//! - `tile_scale` selects the grid, `2^tile_scale` cells per axis
//! - `x`, `y` are the cell indices in that grid
//!
//! The projected-space rectangle of the tile is derived once at construction.
//!
//! # Examples
//!
//! ```
//! use tilecover_core::{ProjectionBounds, RectInfo};
//!
//! let tile = RectInfo::new(3, 2, 1, 3, &ProjectionBounds::UNIT).unwrap();
//! assert_eq!(tile.rect().x_min, 0.25);
//! assert_eq!(tile.rect().y_max, 1.0);
//!
//! // Indices must lie inside the grid.
//! assert!(RectInfo::new(3, 2, 4, 0, &ProjectionBounds::UNIT).is_err());
//! ```

use crate::{GlobalRect, MAX_TILE_SCALE, ProjectionBounds};
use anyhow::{Result, ensure};
use geo::Coord;
use std::{
	cmp::Ordering,
	fmt::{self, Debug},
	hash::{Hash, Hasher},
};

/// Identifier of one tile at one level of detail.
///
/// Equality, hashing and ordering only look at the four scalars; the rectangle is derived from
/// them.
#[derive(Clone, Copy)]
pub struct RectInfo {
	draw_scale: u8,
	tile_scale: u8,
	x: u32,
	y: u32,
	rect: GlobalRect,
}

impl RectInfo {
	/// Creates a tile identifier and derives its rectangle from `bounds`.
	///
	/// # Errors
	/// Returns an error if `tile_scale` > 31 or if `x` or `y` lie outside the grid.
	pub fn new(draw_scale: u8, tile_scale: u8, x: u32, y: u32, bounds: &ProjectionBounds) -> Result<RectInfo> {
		ensure!(
			tile_scale <= MAX_TILE_SCALE,
			"tile_scale ({tile_scale}) must be <= {MAX_TILE_SCALE}"
		);
		let count = 1u64 << tile_scale;
		ensure!(u64::from(x) < count, "x ({x}) out of bounds for tile_scale {tile_scale}");
		ensure!(u64::from(y) < count, "y ({y}) out of bounds for tile_scale {tile_scale}");
		Ok(RectInfo::from_cell(draw_scale, tile_scale, x, y, bounds))
	}

	/// Builds an identifier for a cell already known to lie inside the grid.
	pub(crate) fn from_cell(draw_scale: u8, tile_scale: u8, x: u32, y: u32, bounds: &ProjectionBounds) -> RectInfo {
		RectInfo {
			draw_scale,
			tile_scale,
			x,
			y,
			rect: bounds.cell_rect(tile_scale, x, y),
		}
	}

	pub fn draw_scale(&self) -> u8 {
		self.draw_scale
	}

	pub fn tile_scale(&self) -> u8 {
		self.tile_scale
	}

	pub fn x(&self) -> u32 {
		self.x
	}

	pub fn y(&self) -> u32 {
		self.y
	}

	/// The tile's rectangle in projected space.
	pub fn rect(&self) -> GlobalRect {
		self.rect
	}

	pub fn center(&self) -> Coord<f64> {
		self.rect.center()
	}

	fn key(&self) -> (u8, u8, u32, u32) {
		(self.draw_scale, self.tile_scale, self.y, self.x)
	}
}

impl PartialEq for RectInfo {
	fn eq(&self, other: &Self) -> bool {
		self.key() == other.key()
	}
}

impl Eq for RectInfo {}

impl Hash for RectInfo {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.key().hash(state);
	}
}

/// Canonical order: `draw_scale`, then `tile_scale`, then `y`, then `x`.
impl Ord for RectInfo {
	fn cmp(&self, other: &Self) -> Ordering {
		self.key().cmp(&other.key())
	}
}

impl PartialOrd for RectInfo {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Custom `Debug` format as `RectInfo(d3, t4, [x, y])`.
impl Debug for RectInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"RectInfo(d{}, t{}, [{}, {}])",
			self.draw_scale, self.tile_scale, self.x, self.y
		)
	}
}
