//! Level-of-detail selection for a screen.
//!
//! Both scales answer the same geometric question: how many times does a square of about one
//! tile of pixels, placed at the screen center, fit into the width of the projected space? The
//! base-2 logarithm of that ratio, rounded up, is the scale.
//!
//! - [`draw_scale`] picks the density of map features. Its pixel square never exceeds
//!   `512 * k` pixels and the result is clamped to [`ScaleLimits::upper_scale`].
//! - [`tile_scale`] picks the tile grid. It is only limited by the grid itself.
//!
//! [`ScaleLimits::upper_scale`]: crate::ScaleLimits

use crate::{GlobalRect, MAX_TILE_SCALE, Screen, TilerConfig};
use geo::coord;
use std::f64::consts::LN_2;

/// Tiles are measured slightly smaller than their nominal size, so they end up magnified a
/// little on screen, which smooths them under bilinear filtering.
const MAGNIFICATION: f64 = 1.05;

/// Largest pixel square used for draw scale at scale factor 1.
const DRAW_CEILING: f64 = 512.0;

/// Measures the scale at which a square of `tile_size` pixels covers a proportionate share of
/// projected space.
///
/// The rotation of `screen` is removed before measuring. `ceiling` caps the pixel square,
/// `upper` caps the result. The square keeps at least one pixel on each side of the center.
/// A degenerate measurement (empty or non-finite projected square) yields `upper` instead of a
/// non-finite value.
pub fn measure_scale<S: Screen>(screen: &S, tile_size: u32, ceiling: Option<u32>, upper: u8, config: &TilerConfig) -> u8 {
	let screen = screen.without_rotation();

	let mut size = (f64::from(tile_size) / MAGNIFICATION) as u32;
	if let Some(ceiling) = ceiling {
		size = size.min(ceiling);
	}
	let half = f64::from((size / 2).max(1));

	let center = screen.pixel_center();
	let pixel_rect = GlobalRect::from_corners(
		center - coord! { x: half, y: half },
		center + coord! { x: half, y: half },
	);
	let glb_rect = screen.pixel_to_global_rect(&pixel_rect);
	let glb_size = glb_rect.width().min(glb_rect.height());

	let ratio = config.bounds.extent_size() / glb_size;
	if glb_size.is_nan() || glb_size <= 0.0 || !ratio.is_finite() {
		log::debug!("degenerate scale measurement for {size}px ({glb_rect:?}), using scale {upper}");
		return upper;
	}

	let scale = (ratio.ln() / LN_2).ceil();
	scale.clamp(0.0, f64::from(upper)) as u8
}

/// Draw scale for tiles of `tile_size` pixels at scale factor `k`.
pub fn draw_scale<S: Screen>(screen: &S, tile_size: u32, k: f64, config: &TilerConfig) -> u8 {
	let ceiling = (DRAW_CEILING * k) as u32;
	measure_scale(screen, tile_size, Some(ceiling), config.limits.upper_scale, config)
}

/// Tile grid scale for tiles of `tile_size` pixels.
pub fn tile_scale<S: Screen>(screen: &S, tile_size: u32, config: &TilerConfig) -> u8 {
	measure_scale(screen, tile_size, None, MAX_TILE_SCALE, config)
}
