//! Projected-space geometry primitives.
//!
//! This module provides the two rectangle shapes the coverage engine works with:
//! - [`GlobalRect`]: an axis-aligned rectangle in projected space
//! - [`AnyRect`]: an oriented rectangle, i.e. an axis-aligned rectangle in its own local frame,
//!   rotated around an origin
//!
//! Points are plain [`geo::Coord<f64>`] values. Exact intersection tests between rotated shapes
//! are delegated to the [`geo`] crate.
//!
//! # Examples
//!
//! ```
//! use geo::coord;
//! use tilecover_core::{AnyRect, GlobalRect};
//!
//! let local = GlobalRect::new(-1.0, -1.0, 1.0, 1.0).unwrap();
//! let diamond = AnyRect::new(coord! { x: 0.0, y: 0.0 }, std::f64::consts::FRAC_PI_4, local);
//!
//! // The bounding box of a square rotated by 45° is larger than the square itself.
//! let bounds = diamond.bound_rect();
//! assert!((bounds.x_max - 2f64.sqrt()).abs() < 1e-12);
//! ```

use anyhow::{Result, ensure};
use geo::{Coord, Intersects, LineString, Polygon, coord};
use std::fmt::{self, Debug};

/// Euclidean distance between two points.
pub fn distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
	(a.x - b.x).hypot(a.y - b.y)
}

/// An axis-aligned rectangle in projected space.
///
/// Intervals are treated as closed for intersection tests, so rectangles that share an edge
/// intersect.
#[derive(Clone, Copy, PartialEq)]
pub struct GlobalRect {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl GlobalRect {
	/// Creates a new `GlobalRect` from `x_min, y_min, x_max, y_max`.
	///
	/// # Errors
	/// Returns an error if a coordinate is not finite or if a minimum exceeds its maximum.
	///
	/// # Examples
	/// ```
	/// use tilecover_core::GlobalRect;
	///
	/// let rect = GlobalRect::new(0.0, 1.0, 4.0, 3.0).unwrap();
	/// assert_eq!(rect.width(), 4.0);
	/// assert_eq!(rect.height(), 2.0);
	///
	/// assert!(GlobalRect::new(4.0, 0.0, 0.0, 1.0).is_err());
	/// ```
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<GlobalRect> {
		let rect = GlobalRect {
			x_min,
			y_min,
			x_max,
			y_max,
		};
		ensure!(
			rect.as_array().iter().all(|v| v.is_finite()),
			"coordinates of {rect:?} must be finite"
		);
		ensure!(x_min <= x_max, "x_min ({x_min}) must be <= x_max ({x_max})");
		ensure!(y_min <= y_max, "y_min ({y_min}) must be <= y_max ({y_max})");
		Ok(rect)
	}

	/// Creates the rectangle spanned by two opposite corners, in any order.
	pub fn from_corners(a: Coord<f64>, b: Coord<f64>) -> GlobalRect {
		GlobalRect {
			x_min: a.x.min(b.x),
			y_min: a.y.min(b.y),
			x_max: a.x.max(b.x),
			y_max: a.y.max(b.y),
		}
	}

	/// Creates a rectangle centered on `center` with the given half extents.
	pub fn from_center(center: Coord<f64>, half_width: f64, half_height: f64) -> GlobalRect {
		let half = coord! { x: half_width, y: half_height };
		GlobalRect::from_corners(center - half, center + half)
	}

	/// Smallest rectangle containing all `points`.
	///
	/// An empty slice yields an inverted rectangle that intersects nothing.
	pub fn bounding(points: &[Coord<f64>]) -> GlobalRect {
		points.iter().fold(
			GlobalRect {
				x_min: f64::INFINITY,
				y_min: f64::INFINITY,
				x_max: f64::NEG_INFINITY,
				y_max: f64::NEG_INFINITY,
			},
			|r, p| GlobalRect {
				x_min: r.x_min.min(p.x),
				y_min: r.y_min.min(p.y),
				x_max: r.x_max.max(p.x),
				y_max: r.y_max.max(p.y),
			},
		)
	}

	pub fn width(&self) -> f64 {
		self.x_max - self.x_min
	}

	pub fn height(&self) -> f64 {
		self.y_max - self.y_min
	}

	pub fn center(&self) -> Coord<f64> {
		coord! {
			x: (self.x_min + self.x_max) / 2.0,
			y: (self.y_min + self.y_max) / 2.0,
		}
	}

	/// Returns `[x_min, y_min, x_max, y_max]`.
	pub fn as_array(&self) -> [f64; 4] {
		[self.x_min, self.y_min, self.x_max, self.y_max]
	}

	/// Returns `true` if both rectangles share at least one point.
	pub fn is_intersect(&self, other: &GlobalRect) -> bool {
		self.x_min <= other.x_max && other.x_min <= self.x_max && self.y_min <= other.y_max && other.y_min <= self.y_max
	}

	pub fn contains_point(&self, point: Coord<f64>) -> bool {
		(self.x_min..=self.x_max).contains(&point.x) && (self.y_min..=self.y_max).contains(&point.y)
	}

	/// Returns the four corners, counter-clockwise starting at the minimum corner.
	pub fn corners(&self) -> [Coord<f64>; 4] {
		[
			coord! { x: self.x_min, y: self.y_min },
			coord! { x: self.x_max, y: self.y_min },
			coord! { x: self.x_max, y: self.y_max },
			coord! { x: self.x_min, y: self.y_max },
		]
	}

	pub fn to_polygon(&self) -> Polygon<f64> {
		polygon_from_corners(self.corners())
	}
}

impl Debug for GlobalRect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "GlobalRect({:?})", self.as_array())
	}
}

/// An oriented rectangle in projected space.
///
/// The shape is described by a rectangle in a local frame; a local point `p` maps to the global
/// point `origin + rotate(p, angle)`. This is how a rotated viewport looks in projected space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnyRect {
	origin: Coord<f64>,
	angle: f64,
	local: GlobalRect,
}

impl AnyRect {
	/// Creates an oriented rectangle from its local rectangle, rotated by `angle` radians
	/// (counter-clockwise) around `origin`.
	pub fn new(origin: Coord<f64>, angle: f64, local: GlobalRect) -> AnyRect {
		AnyRect { origin, angle, local }
	}

	/// Wraps an axis-aligned rectangle without rotation.
	pub fn from_rect(rect: GlobalRect) -> AnyRect {
		AnyRect::new(coord! { x: 0.0, y: 0.0 }, 0.0, rect)
	}

	pub fn origin(&self) -> Coord<f64> {
		self.origin
	}

	pub fn angle(&self) -> f64 {
		self.angle
	}

	pub fn local_rect(&self) -> GlobalRect {
		self.local
	}

	/// Maps a point from the local frame into projected space.
	pub fn to_global(&self, point: Coord<f64>) -> Coord<f64> {
		let (sin, cos) = self.angle.sin_cos();
		coord! {
			x: self.origin.x + point.x * cos - point.y * sin,
			y: self.origin.y + point.x * sin + point.y * cos,
		}
	}

	/// Returns the four corners in projected space, in the winding order of the local rectangle.
	pub fn corners(&self) -> [Coord<f64>; 4] {
		self.local.corners().map(|p| self.to_global(p))
	}

	/// Axis-aligned bounding rectangle in projected space.
	pub fn bound_rect(&self) -> GlobalRect {
		GlobalRect::bounding(&self.corners())
	}

	pub fn to_polygon(&self) -> Polygon<f64> {
		polygon_from_corners(self.corners())
	}

	/// Exact intersection test between two oriented rectangles.
	pub fn is_intersect(&self, other: &AnyRect) -> bool {
		self.bound_rect().is_intersect(&other.bound_rect()) && self.to_polygon().intersects(&other.to_polygon())
	}

	/// Exact intersection test against an axis-aligned rectangle.
	///
	/// Unlike a test against [`bound_rect`](Self::bound_rect), this rejects rectangles that only
	/// touch the bounding box of a rotated shape.
	pub fn intersects_rect(&self, rect: &GlobalRect) -> bool {
		self.bound_rect().is_intersect(rect) && self.to_polygon().intersects(&rect.to_polygon())
	}
}

fn polygon_from_corners(corners: [Coord<f64>; 4]) -> Polygon<f64> {
	let mut ring: Vec<Coord<f64>> = corners.to_vec();
	ring.push(corners[0]);
	Polygon::new(LineString::new(ring), vec![])
}
