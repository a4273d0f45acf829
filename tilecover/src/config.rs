//! View configuration: a tiler, the screen it covers and how deep to refine.
//!
//! ```yaml
//! tiler:
//!   tile_size: 256
//!   bounds: [0, 0, 1, 1]
//! screen:
//!   width: 400
//!   height: 400
//!   center: [0.35, 0.35]
//!   scale: 0.00125
//!   angle: 0
//! focus: [0.35, 0.35]
//! depth: 2
//! ```

use anyhow::{Context, Result, bail};
use geo::{Coord, coord};
use serde::Deserialize;
use std::{fs::File, io::BufReader, io::Read, path::Path};
use tilecover_core::{Screen, ScreenBase, TilerConfig};

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
	#[serde(default)]
	pub tiler: TilerConfig,

	/// Screen to cover. May be left out if it is given on the command line.
	#[serde(default)]
	pub screen: Option<ScreenBase>,

	/// Focus point for the delivery order. Defaults to the screen center.
	#[serde(default)]
	pub focus: Option<[f64; 2]>,

	/// Number of levels of detail. Defaults to the full tile scale.
	#[serde(default)]
	pub depth: Option<i32>,
}

/// Screen values that replace those of the configuration file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScreenOverrides {
	pub width: Option<u32>,
	pub height: Option<u32>,
	pub center_x: Option<f64>,
	pub center_y: Option<f64>,
	pub scale: Option<f64>,
	/// Degrees, counter-clockwise.
	pub angle: Option<f64>,
}

impl ScreenOverrides {
	pub fn is_empty(&self) -> bool {
		*self == ScreenOverrides::default()
	}
}

impl ViewConfig {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		let config: ViewConfig = serde_yaml_ng::from_reader(reader)?;
		config.tiler.validate()?;
		Ok(config)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		let config: ViewConfig = serde_yaml_ng::from_str(text)?;
		config.tiler.validate()?;
		Ok(config)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("failed to open view config {path:?}"))?;
		ViewConfig::from_reader(BufReader::new(file)).with_context(|| format!("failed to parse view config {path:?}"))
	}

	/// Replaces the screen by one built from `overrides`, falling back to the configured
	/// screen for every value that is not overridden.
	///
	/// # Errors
	/// Fails if no screen is configured and `overrides` does not define a complete one, or if
	/// the resulting screen is invalid.
	pub fn apply_screen_overrides(&mut self, overrides: &ScreenOverrides) -> Result<()> {
		if overrides.is_empty() {
			return Ok(());
		}

		let screen = if let Some(base) = &self.screen {
			let center = coord! {
				x: overrides.center_x.unwrap_or(base.center().x),
				y: overrides.center_y.unwrap_or(base.center().y),
			};
			let angle = overrides.angle.map_or(base.angle(), f64::to_radians);
			ScreenBase::new(
				overrides.width.unwrap_or(base.width()),
				overrides.height.unwrap_or(base.height()),
				center,
				overrides.scale.unwrap_or(base.scale()),
			)?
			.with_angle(angle)
		} else {
			let ScreenOverrides {
				width: Some(width),
				height: Some(height),
				center_x: Some(x),
				center_y: Some(y),
				scale: Some(scale),
				angle,
			} = *overrides
			else {
				bail!("incomplete screen: without a configured screen, width, height, center and scale are all required")
			};
			ScreenBase::new(width, height, coord! { x: x, y: y }, scale)?.with_angle(angle.unwrap_or(0.0).to_radians())
		};

		self.screen = Some(screen);
		Ok(())
	}

	/// # Errors
	/// Fails if neither the configuration nor the command line defined a screen.
	pub fn screen(&self) -> Result<ScreenBase> {
		self.screen.context("no screen defined")
	}

	/// The configured focus point, or the screen center.
	pub fn focus(&self) -> Result<Coord<f64>> {
		Ok(match self.focus {
			Some([x, y]) => coord! { x: x, y: y },
			None => self.screen()?.center(),
		})
	}
}
