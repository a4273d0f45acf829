//! Global bounds of the projected space and the tile grid laid over it.
//!
//! The grid at `tile_scale` divides the bounds into `2^tile_scale` cells per axis, anchored at
//! the minimum corner of the bounds.

use crate::GlobalRect;
use anyhow::{Result, ensure};
use serde::Deserialize;
use std::{
	fmt::{self, Debug},
	ops::Range,
};

/// Finest tile grid that can be addressed with `u32` indices.
pub const MAX_TILE_SCALE: u8 = 31;

const DEFAULT_UPPER_SCALE: u8 = 17;

/// The total addressable projected space.
#[derive(Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct ProjectionBounds {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl ProjectionBounds {
	/// The square Mercator plane, `[-180, 180]` on both axes.
	pub const MERCATOR: ProjectionBounds = ProjectionBounds {
		x_min: -180.0,
		y_min: -180.0,
		x_max: 180.0,
		y_max: 180.0,
	};

	/// A normalized unit square, `[0, 1]` on both axes.
	pub const UNIT: ProjectionBounds = ProjectionBounds {
		x_min: 0.0,
		y_min: 0.0,
		x_max: 1.0,
		y_max: 1.0,
	};

	/// # Errors
	/// Returns an error if a value is not finite or if the bounds have no area.
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<ProjectionBounds> {
		ensure!(
			[x_min, y_min, x_max, y_max].iter().all(|v| v.is_finite()),
			"projection bounds must be finite"
		);
		ensure!(x_min < x_max, "x_min ({x_min}) must be < x_max ({x_max})");
		ensure!(y_min < y_max, "y_min ({y_min}) must be < y_max ({y_max})");
		Ok(ProjectionBounds {
			x_min,
			y_min,
			x_max,
			y_max,
		})
	}

	/// Horizontal size of the projected space, the reference length for scale computation.
	pub fn extent_size(&self) -> f64 {
		self.x_max - self.x_min
	}

	/// Size `(width, height)` of one grid cell at `tile_scale`.
	pub fn cell_size(&self, tile_scale: u8) -> (f64, f64) {
		let count = 2f64.powi(i32::from(tile_scale));
		(
			(self.x_max - self.x_min) / count,
			(self.y_max - self.y_min) / count,
		)
	}

	/// Rectangle of cell `(x, y)` at `tile_scale`.
	pub fn cell_rect(&self, tile_scale: u8, x: u32, y: u32) -> GlobalRect {
		let (width, height) = self.cell_size(tile_scale);
		GlobalRect {
			x_min: self.x_min + f64::from(x) * width,
			y_min: self.y_min + f64::from(y) * height,
			x_max: self.x_min + (f64::from(x) + 1.0) * width,
			y_max: self.y_min + (f64::from(y) + 1.0) * height,
		}
	}

	/// Index ranges `(xs, ys)` of all cells at `tile_scale` that may touch `rect`.
	///
	/// Lower bounds are floored and upper bounds ceiled, then both are clamped to the grid, so
	/// ranges never reach outside `[0, 2^tile_scale)`.
	pub fn cell_range(&self, tile_scale: u8, rect: &GlobalRect) -> (Range<u32>, Range<u32>) {
		let (width, height) = self.cell_size(tile_scale);
		let count = 2f64.powi(i32::from(tile_scale));
		let span = |min: f64, max: f64, origin: f64, size: f64| {
			let first = ((min - origin) / size).floor().clamp(0.0, count);
			let last = ((max - origin) / size).ceil().clamp(0.0, count);
			(first as u32)..(last as u32)
		};
		(
			span(rect.x_min, rect.x_max, self.x_min, width),
			span(rect.y_min, rect.y_max, self.y_min, height),
		)
	}

	pub fn as_rect(&self) -> GlobalRect {
		GlobalRect {
			x_min: self.x_min,
			y_min: self.y_min,
			x_max: self.x_max,
			y_max: self.y_max,
		}
	}
}

impl Default for ProjectionBounds {
	fn default() -> Self {
		ProjectionBounds::MERCATOR
	}
}

impl TryFrom<Vec<f64>> for ProjectionBounds {
	type Error = anyhow::Error;

	fn try_from(input: Vec<f64>) -> Result<Self> {
		ensure!(
			input.len() == 4,
			"projection bounds need 4 values [x_min, y_min, x_max, y_max], got {}",
			input.len()
		);
		ProjectionBounds::new(input[0], input[1], input[2], input[3])
	}
}

impl Debug for ProjectionBounds {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"ProjectionBounds([{}, {}, {}, {}])",
			self.x_min, self.y_min, self.x_max, self.y_max
		)
	}
}

/// Limits on the level of detail for map features.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleLimits {
	/// Finest draw scale for which map data exists.
	#[serde(default = "default_upper_scale")]
	pub upper_scale: u8,
}

fn default_upper_scale() -> u8 {
	DEFAULT_UPPER_SCALE
}

impl Default for ScaleLimits {
	fn default() -> Self {
		ScaleLimits {
			upper_scale: DEFAULT_UPPER_SCALE,
		}
	}
}
