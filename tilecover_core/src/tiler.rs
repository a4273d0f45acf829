//! The coverage engine.
//!
//! A [`Tiler`] is seeded with a screen snapshot and a focus point. It then produces the tiles
//! covering that screen at several levels of detail, coarse levels included, so a renderer can
//! show something cheap right away while finer tiles are still on their way.
//!
//! # Examples
//!
//! ```
//! use geo::coord;
//! use tilecover_core::{ProjectionBounds, ScreenBase, Tiler, TilerConfig};
//!
//! let config = TilerConfig {
//! 	bounds: ProjectionBounds::UNIT,
//! 	..TilerConfig::default()
//! };
//! let screen = ScreenBase::new(400, 400, coord! { x: 0.35, y: 0.35 }, 0.00125).unwrap();
//!
//! let mut tiler = Tiler::new(config);
//! tiler.seed(&screen, screen.center());
//! assert_eq!(tiler.tile_scale(), 2);
//!
//! let tiles = tiler.tiles(2);
//! assert!(tiles.iter().any(|tile| tiler.is_leaf(tile)));
//! ```

use crate::{AnyRect, ProjectionBounds, RectInfo, ScaleAndDistanceOrder, Screen, TilerConfig, draw_scale, tile_scale};
use geo::{Coord, coord};
use itertools::iproduct;

/// Computes which tiles cover a screen, and in which order to deliver them.
///
/// The tiler only changes state in [`seed`](Self::seed). It does not notice viewport changes
/// by itself; seed it again after every change.
#[derive(Clone, Debug)]
pub struct Tiler<S: Screen> {
	config: TilerConfig,
	screen: Option<S>,
	center: Coord<f64>,
	draw_scale: u8,
	tile_scale: u8,
}

impl<S: Screen> Tiler<S> {
	pub fn new(config: TilerConfig) -> Self {
		Tiler {
			config,
			screen: None,
			center: coord! { x: 0.0, y: 0.0 },
			draw_scale: 0,
			tile_scale: 0,
		}
	}

	/// Stores `screen` and the focus point `center`, and computes the target level of detail
	/// for tiles of the configured size.
	pub fn seed(&mut self, screen: &S, center: Coord<f64>) {
		self.screen = Some(screen.clone());
		self.center = center;

		self.draw_scale = draw_scale(screen, self.config.tile_size, 1.0, &self.config);
		self.tile_scale = tile_scale(screen, self.config.tile_size, &self.config);

		log::debug!(
			"seeded tiler at {:?}: draw scale {}, tile scale {}",
			center,
			self.draw_scale,
			self.tile_scale
		);
	}

	/// Returns the coverage of the seeded screen over `depth` levels of detail, sorted by
	/// [`ScaleAndDistanceOrder`] around the focus point.
	///
	/// Level `i = 0` is the coarsest: its tiles are `2^(depth - 1)` times the configured tile
	/// size. The last level matches the seeded target scales. `depth` is clamped to the seeded
	/// tile scale; an unseeded tiler or a `depth <= 0` yields no tiles.
	///
	/// Tiles are not deduplicated: if two levels end up on the same scales, their tiles appear
	/// twice.
	pub fn tiles(&self, depth: i32) -> Vec<RectInfo> {
		let Some(screen) = self.screen.as_ref() else {
			return Vec::new();
		};
		if self.tile_scale == 0 {
			return Vec::new();
		}

		let depth = depth.min(i32::from(self.tile_scale));
		if depth <= 0 {
			return Vec::new();
		}

		let viewport = screen.global_rect();
		let bounds = &self.config.bounds;
		let mut tiles = Vec::new();

		for i in 0..depth {
			let pow = depth - 1 - i;
			let scale = 1u32 << pow;
			let tile_size = self.config.tile_size.saturating_mul(scale);

			let level_tile_scale = tile_scale(screen, tile_size, &self.config);
			let level_draw_scale = draw_scale(screen, tile_size, f64::from(scale), &self.config);

			let cells = level_cells(bounds, &viewport, level_tile_scale);
			log::trace!(
				"level {i}: {tile_size}px tiles, draw scale {level_draw_scale}, tile scale {level_tile_scale}, {} tiles",
				cells.len()
			);

			tiles.extend(
				cells
					.into_iter()
					.map(|(x, y)| RectInfo::from_cell(level_draw_scale, level_tile_scale, x, y, bounds)),
			);
		}

		ScaleAndDistanceOrder::new(self.center).sort(&mut tiles);
		tiles
	}

	/// Returns `true` if `tile` is at the seeded target scales and needs no further refinement.
	pub fn is_leaf(&self, tile: &RectInfo) -> bool {
		tile.draw_scale() == self.draw_scale && tile.tile_scale() == self.tile_scale
	}

	pub fn draw_scale(&self) -> u8 {
		self.draw_scale
	}

	pub fn tile_scale(&self) -> u8 {
		self.tile_scale
	}

	pub fn center(&self) -> Coord<f64> {
		self.center
	}

	pub fn screen(&self) -> Option<&S> {
		self.screen.as_ref()
	}

	pub fn config(&self) -> &TilerConfig {
		&self.config
	}
}

impl<S: Screen> Default for Tiler<S> {
	fn default() -> Self {
		Tiler::new(TilerConfig::default())
	}
}

/// Cells `(x, y)` of the grid at `tile_scale` that intersect the oriented `viewport`.
///
/// Candidates come from the viewport's bounding rectangle; each is then tested against the
/// rotated shape itself. Cells are returned row by row, `y` first.
pub fn level_cells(bounds: &ProjectionBounds, viewport: &AnyRect, tile_scale: u8) -> Vec<(u32, u32)> {
	let (xs, ys) = bounds.cell_range(tile_scale, &viewport.bound_rect());
	iproduct!(ys, xs)
		.filter(|&(y, x)| viewport.intersects_rect(&bounds.cell_rect(tile_scale, x, y)))
		.map(|(y, x)| (x, y))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{GlobalRect, ScaleLimits, ScreenBase, distance};
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use std::{
		collections::BTreeSet,
		f64::consts::{FRAC_PI_4, SQRT_2},
	};

	fn unit_config() -> TilerConfig {
		TilerConfig {
			tile_size: 256,
			limits: ScaleLimits { upper_scale: 17 },
			bounds: ProjectionBounds::UNIT,
		}
	}

	/// 400px square showing `[0.1, 0.6]` on both axes; its target tile scale is 2.
	fn example_screen() -> ScreenBase {
		ScreenBase::new(400, 400, coord! { x: 0.35, y: 0.35 }, 0.00125).unwrap()
	}

	/// An 800x600 screen with a target tile scale of 9.
	fn deep_screen(angle: f64) -> ScreenBase {
		ScreenBase::new(800, 600, coord! { x: 0.4321, y: 0.6234 }, 0.00001)
			.unwrap()
			.with_angle(angle)
	}

	fn seeded(screen: &ScreenBase) -> Tiler<ScreenBase> {
		let mut tiler = Tiler::new(unit_config());
		tiler.seed(screen, screen.center());
		tiler
	}

	fn set(cells: Vec<(u32, u32)>) -> BTreeSet<(u32, u32)> {
		cells.into_iter().collect()
	}

	#[test]
	fn unseeded_tiler_is_empty() {
		let tiler: Tiler<ScreenBase> = Tiler::default();
		assert_eq!(tiler.draw_scale(), 0);
		assert_eq!(tiler.tile_scale(), 0);
		assert!(tiler.screen().is_none());
		for depth in [-1, 0, 1, 5, 100] {
			assert!(tiler.tiles(depth).is_empty());
		}
	}

	#[test]
	fn seed_computes_target_scales() {
		let tiler = seeded(&example_screen());
		assert_eq!(tiler.tile_scale(), 2);
		assert_eq!(tiler.draw_scale(), 2);
		assert_eq!(tiler.center(), coord! { x: 0.35, y: 0.35 });
		assert_eq!(tiler.screen(), Some(&example_screen()));
	}

	#[test]
	fn seed_replaces_previous_state() {
		let mut tiler = seeded(&deep_screen(0.0));
		assert_eq!(tiler.tile_scale(), 9);
		tiler.seed(&example_screen(), coord! { x: 0.0, y: 0.0 });
		assert_eq!(tiler.tile_scale(), 2);
		assert_eq!(tiler.center(), coord! { x: 0.0, y: 0.0 });
	}

	#[test]
	fn whole_world_view_has_no_coverage() {
		let mut tiler = Tiler::new(TilerConfig::default());
		let screen = ScreenBase::new(256, 256, coord! { x: 0.0, y: 0.0 }, 100.0).unwrap();
		tiler.seed(&screen, screen.center());
		assert_eq!(tiler.tile_scale(), 0);
		assert!(tiler.tiles(3).is_empty());
	}

	#[rstest]
	#[case(0)]
	#[case(-3)]
	fn non_positive_depth_is_empty(#[case] depth: i32) {
		assert!(seeded(&example_screen()).tiles(depth).is_empty());
	}

	#[test]
	fn coverage_completeness_unrotated() {
		let screen = example_screen();
		let viewport = screen.global_rect();
		let cells = set(level_cells(&ProjectionBounds::UNIT, &viewport, 2));
		let expected = set(iproduct!(0..3, 0..3).collect());
		assert_eq!(cells, expected);

		// Every cell touching the viewport is in, every other cell is out.
		let view = viewport.bound_rect();
		for (x, y) in iproduct!(0..4, 0..4) {
			let cell = ProjectionBounds::UNIT.cell_rect(2, x, y);
			assert_eq!(cells.contains(&(x, y)), cell.is_intersect(&view), "cell ({x}, {y})");
		}
	}

	#[test]
	fn coverage_completeness_through_tiler() {
		let tiler = seeded(&example_screen());
		let tiles = tiler.tiles(1);
		assert_eq!(tiles.len(), 9);
		assert!(tiles.iter().all(|t| t.tile_scale() == 2 && t.draw_scale() == 2));
		let cells: BTreeSet<(u32, u32)> = tiles.iter().map(|t| (t.x(), t.y())).collect();
		assert_eq!(cells, set(iproduct!(0..3, 0..3).collect()));
		assert!(!cells.contains(&(3, 0)) && !cells.contains(&(0, 3)));
	}

	#[test]
	fn rotation_excludes_cells_inside_bounding_box_only() {
		// A square rotated by 45° around the world center: a diamond reaching 0.45 along both axes.
		let half = 0.45 / SQRT_2;
		let local = GlobalRect::new(-half, -half, half, half).unwrap();
		let diamond = AnyRect::new(coord! { x: 0.5, y: 0.5 }, FRAC_PI_4, local);

		let (xs, ys) = ProjectionBounds::UNIT.cell_range(2, &diamond.bound_rect());
		assert_eq!((xs, ys), (0..4, 0..4));

		let cells = set(level_cells(&ProjectionBounds::UNIT, &diamond, 2));
		for corner in [(0, 0), (3, 0), (0, 3), (3, 3)] {
			assert!(!cells.contains(&corner), "corner cell {corner:?} must be excluded");
		}
		assert_eq!(cells.len(), 12);
	}

	#[test]
	fn rotated_screen_excludes_corner_tiles() {
		// 400px square screen at the world center, rotated by 45°.
		let scale = 0.45 / SQRT_2 / 200.0;
		let screen = ScreenBase::new(400, 400, coord! { x: 0.5, y: 0.5 }, scale)
			.unwrap()
			.with_angle(FRAC_PI_4);
		let tiler = seeded(&screen);
		assert_eq!(tiler.tile_scale(), 2);

		let tiles = tiler.tiles(1);
		assert_eq!(tiles.len(), 12);
		for tile in &tiles {
			assert!(
				![(0, 0), (3, 0), (0, 3), (3, 3)].contains(&(tile.x(), tile.y())),
				"{tile:?} lies outside the rotated viewport"
			);
		}
	}

	#[test]
	fn depth_levels_get_finer() {
		let tiler = seeded(&deep_screen(0.0));
		let tiles = tiler.tiles(3);
		let levels: BTreeSet<(u8, u8)> = tiles.iter().map(|t| (t.draw_scale(), t.tile_scale())).collect();
		assert_eq!(levels, [(7, 7), (8, 8), (9, 9)].into_iter().collect());
	}

	#[test]
	fn clamp_law() {
		let tiler = seeded(&deep_screen(0.3));
		let full = i32::from(tiler.tile_scale());
		let expected = tiler.tiles(full);
		assert!(!expected.is_empty());
		for depth in [full + 1, full + 10, i32::MAX] {
			assert_eq!(tiler.tiles(depth), expected);
		}
	}

	#[rstest]
	#[case(0.0)]
	#[case(0.5)]
	fn determinism(#[case] angle: f64) {
		let tiler = seeded(&deep_screen(angle));
		let first = tiler.tiles(4);
		for _ in 0..3 {
			assert_eq!(tiler.tiles(4), first);
		}
	}

	#[rstest]
	#[case(1)]
	#[case(3)]
	#[case(6)]
	fn leaf_consistency(#[case] depth: i32) {
		let tiler = seeded(&deep_screen(0.2));
		let tiles = tiler.tiles(depth);
		for tile in &tiles {
			let at_target = (tile.draw_scale(), tile.tile_scale()) == (tiler.draw_scale(), tiler.tile_scale());
			assert_eq!(tiler.is_leaf(tile), at_target, "{tile:?}");
		}
		assert!(tiles.iter().any(|t| tiler.is_leaf(t)));
	}

	#[test]
	fn full_depth_contains_leaves() {
		let tiler = seeded(&deep_screen(0.0));
		let tiles = tiler.tiles(i32::from(tiler.tile_scale()));
		assert!(tiles.iter().any(|t| tiler.is_leaf(t)));
		assert!(tiles.iter().any(|t| !tiler.is_leaf(t)));
	}

	#[test]
	fn priority_ordering() {
		let screen = deep_screen(0.7);
		let mut tiler = Tiler::new(unit_config());
		let focus = coord! { x: 0.43, y: 0.62 };
		tiler.seed(&screen, focus);
		let tiles = tiler.tiles(4);

		for (i, a) in tiles.iter().enumerate() {
			for b in &tiles[i + 1..] {
				assert!(a.draw_scale() <= b.draw_scale(), "{a:?} before {b:?}");
			}
		}
		for pair in tiles.windows(2) {
			if (pair[0].draw_scale(), pair[0].tile_scale()) == (pair[1].draw_scale(), pair[1].tile_scale()) {
				assert!(distance(pair[0].center(), focus) <= distance(pair[1].center(), focus));
			}
		}
	}

	#[test]
	fn saturated_levels_keep_duplicates() {
		// At 1e-300 units per pixel every level hits both scale limits, so all levels
		// produce the same single cell.
		let screen = ScreenBase::new(400, 400, coord! { x: 0.0, y: 0.0 }, 1e-300).unwrap();
		let tiler = seeded(&screen);
		assert_eq!((tiler.draw_scale(), tiler.tile_scale()), (17, 31));

		let cells = level_cells(&ProjectionBounds::UNIT, &screen.global_rect(), 31);
		assert_eq!(cells, vec![(0, 0)]);

		let tiles = tiler.tiles(3);
		let tile = RectInfo::new(17, 31, 0, 0, &ProjectionBounds::UNIT).unwrap();
		assert_eq!(tiles.len(), 3 * cells.len());
		assert_eq!(tiles, vec![tile; 3]);
		assert!(tiles.iter().all(|t| tiler.is_leaf(t)));
	}

	#[test]
	fn leaves_cover_viewport_without_gaps() {
		let screen = deep_screen(0.0);
		let tiler = seeded(&screen);
		let view = screen.global_rect().bound_rect();
		let leaves: Vec<RectInfo> = tiler.tiles(1);
		let (xs, ys) = ProjectionBounds::UNIT.cell_range(tiler.tile_scale(), &view);
		assert_eq!(leaves.len(), xs.len() * ys.len());
		assert!(leaves.iter().all(|t| tiler.is_leaf(t)));
	}

	#[test]
	fn emitted_indices_stay_inside_grid() {
		// The screen hangs over the world edge.
		let screen = ScreenBase::new(800, 600, coord! { x: 0.999, y: 0.001 }, 0.00001).unwrap();
		let tiler = seeded(&screen);
		for tile in tiler.tiles(3) {
			let count = 1u64 << tile.tile_scale();
			assert!(u64::from(tile.x()) < count && u64::from(tile.y()) < count, "{tile:?}");
		}
	}
}
