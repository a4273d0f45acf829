//! The screen: the transform between pixel space and projected space.
//!
//! The coverage engine only talks to the [`Screen`] trait. [`ScreenBase`] is a complete
//! implementation for a rectangular viewport with uniform scale and an optional rotation.

use crate::{AnyRect, GlobalRect};
use anyhow::{Result, ensure};
use geo::{Coord, coord};
use serde::Deserialize;

/// A snapshot of a viewport and its pixel to projected-space transform.
pub trait Screen: Clone {
	/// Center of the pixel viewport.
	fn pixel_center(&self) -> Coord<f64>;

	/// The viewport in projected space, rotated with the screen.
	fn global_rect(&self) -> AnyRect;

	/// Rotation angle in radians, counter-clockwise.
	fn angle(&self) -> f64;

	/// Projects a pixel rectangle into projected space and returns the bounding rectangle of
	/// the transformed corners.
	fn pixel_to_global_rect(&self, rect: &GlobalRect) -> GlobalRect;

	/// The same screen with its rotation removed.
	fn without_rotation(&self) -> Self;
}

/// A rectangular viewport of `width × height` pixels showing projected space around `center`.
///
/// Pixel y grows downwards, projected y grows upwards. One pixel covers `scale` projected units
/// on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "ScreenDefinition")]
pub struct ScreenBase {
	width: u32,
	height: u32,
	center: Coord<f64>,
	scale: f64,
	angle: f64,
}

impl ScreenBase {
	/// # Errors
	/// Returns an error if the pixel size is zero, or if `center` or `scale` are not finite or
	/// `scale` is not positive.
	pub fn new(width: u32, height: u32, center: Coord<f64>, scale: f64) -> Result<ScreenBase> {
		ensure!(width > 0 && height > 0, "screen size ({width}x{height}) must not be empty");
		ensure!(
			center.x.is_finite() && center.y.is_finite(),
			"screen center {center:?} must be finite"
		);
		ensure!(
			scale.is_finite() && scale > 0.0,
			"screen scale ({scale}) must be positive and finite"
		);
		Ok(ScreenBase {
			width,
			height,
			center,
			scale,
			angle: 0.0,
		})
	}

	/// Fits a screen of `width × height` pixels onto `rect`, keeping pixels square.
	///
	/// The whole of `rect` stays visible; the longer relative side decides the scale.
	pub fn from_global_rect(width: u32, height: u32, rect: &GlobalRect) -> Result<ScreenBase> {
		ensure!(width > 0 && height > 0, "screen size ({width}x{height}) must not be empty");
		let scale = (rect.width() / f64::from(width)).max(rect.height() / f64::from(height));
		ScreenBase::new(width, height, rect.center(), scale)
	}

	pub fn with_angle(mut self, angle: f64) -> ScreenBase {
		self.angle = angle;
		self
	}

	pub fn rotate(&mut self, delta: f64) {
		self.angle += delta;
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	pub fn center(&self) -> Coord<f64> {
		self.center
	}

	pub fn scale(&self) -> f64 {
		self.scale
	}

	pub fn pixel_rect(&self) -> GlobalRect {
		GlobalRect {
			x_min: 0.0,
			y_min: 0.0,
			x_max: f64::from(self.width),
			y_max: f64::from(self.height),
		}
	}

	pub fn pixel_to_global(&self, point: Coord<f64>) -> Coord<f64> {
		let center = self.pixel_center();
		let local = coord! {
			x: (point.x - center.x) * self.scale,
			y: (center.y - point.y) * self.scale,
		};
		let (sin, cos) = self.angle.sin_cos();
		coord! {
			x: self.center.x + local.x * cos - local.y * sin,
			y: self.center.y + local.x * sin + local.y * cos,
		}
	}

	pub fn global_to_pixel(&self, point: Coord<f64>) -> Coord<f64> {
		let offset = point - self.center;
		let (sin, cos) = self.angle.sin_cos();
		let local = coord! {
			x: offset.x * cos + offset.y * sin,
			y: -offset.x * sin + offset.y * cos,
		};
		let center = self.pixel_center();
		coord! {
			x: center.x + local.x / self.scale,
			y: center.y - local.y / self.scale,
		}
	}
}

impl Screen for ScreenBase {
	fn pixel_center(&self) -> Coord<f64> {
		self.pixel_rect().center()
	}

	fn global_rect(&self) -> AnyRect {
		let local = GlobalRect::from_center(
			coord! { x: 0.0, y: 0.0 },
			f64::from(self.width) * self.scale / 2.0,
			f64::from(self.height) * self.scale / 2.0,
		);
		AnyRect::new(self.center, self.angle, local)
	}

	fn angle(&self) -> f64 {
		self.angle
	}

	fn pixel_to_global_rect(&self, rect: &GlobalRect) -> GlobalRect {
		GlobalRect::bounding(&rect.corners().map(|p| self.pixel_to_global(p)))
	}

	fn without_rotation(&self) -> Self {
		self.with_angle(0.0)
	}
}

/// Serialized form of a [`ScreenBase`]; `angle` is given in degrees.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScreenDefinition {
	width: u32,
	height: u32,
	center: [f64; 2],
	scale: f64,
	#[serde(default)]
	angle: f64,
}

impl TryFrom<ScreenDefinition> for ScreenBase {
	type Error = anyhow::Error;

	fn try_from(def: ScreenDefinition) -> Result<Self> {
		let center = coord! { x: def.center[0], y: def.center[1] };
		Ok(ScreenBase::new(def.width, def.height, center, def.scale)?.with_angle(def.angle.to_radians()))
	}
}
