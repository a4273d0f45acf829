//! Delivery order of a coverage.
//!
//! The canonical order of [`RectInfo`] (its `Ord` impl) identifies tiles. The order defined here
//! decides in which sequence tiles are handed to the renderer: coarse levels first, and within a
//! level the tiles nearest to a focus point first.

use crate::{RectInfo, distance};
use geo::Coord;
use std::cmp::Ordering;

/// Orders tiles by `(draw_scale, tile_scale)` and then by the distance of the tile center to a
/// focus point.
///
/// Tiles at equal distance compare equal, so this is not a total order over tile identities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleAndDistanceOrder {
	center: Coord<f64>,
}

impl ScaleAndDistanceOrder {
	pub fn new(center: Coord<f64>) -> Self {
		ScaleAndDistanceOrder { center }
	}

	pub fn center(&self) -> Coord<f64> {
		self.center
	}

	pub fn compare(&self, a: &RectInfo, b: &RectInfo) -> Ordering {
		a.draw_scale()
			.cmp(&b.draw_scale())
			.then(a.tile_scale().cmp(&b.tile_scale()))
			.then_with(|| {
				let da = distance(a.center(), self.center);
				let db = distance(b.center(), self.center);
				da.total_cmp(&db)
			})
	}

	/// Sorts `tiles` in place. The sort is stable: tiles that compare equal keep their relative
	/// order.
	pub fn sort(&self, tiles: &mut [RectInfo]) {
		tiles.sort_by(|a, b| self.compare(a, b));
	}
}
