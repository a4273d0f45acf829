use crate::{MAX_TILE_SCALE, ProjectionBounds, ScaleLimits};
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::{fs::File, io::BufReader, io::Read, path::Path};

const DEFAULT_TILE_SIZE: u32 = 256;

/// Smallest tile size whose measured pixel square is not empty.
pub const MIN_TILE_SIZE: u32 = 3;

/// Platform and projection constants the tiler works with.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TilerConfig {
	/// Nominal pixel size of a tile at scale factor 1.
	#[serde(default = "default_tile_size")]
	pub tile_size: u32,

	/// Limits on the draw scale.
	#[serde(default)]
	pub limits: ScaleLimits,

	/// Bounds of the projected space as `[x_min, y_min, x_max, y_max]`.
	#[serde(default)]
	pub bounds: ProjectionBounds,
}

fn default_tile_size() -> u32 {
	DEFAULT_TILE_SIZE
}

impl Default for TilerConfig {
	fn default() -> Self {
		TilerConfig {
			tile_size: DEFAULT_TILE_SIZE,
			limits: ScaleLimits::default(),
			bounds: ProjectionBounds::default(),
		}
	}
}

impl TilerConfig {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		let config: TilerConfig = serde_yaml_ng::from_reader(reader)?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		let config: TilerConfig = serde_yaml_ng::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("failed to open tiler config {path:?}"))?;
		TilerConfig::from_reader(BufReader::new(file)).with_context(|| format!("failed to parse tiler config {path:?}"))
	}

	pub fn validate(&self) -> Result<()> {
		ensure!(
			self.tile_size >= MIN_TILE_SIZE,
			"tile_size ({}) must be >= {MIN_TILE_SIZE}",
			self.tile_size
		);
		ensure!(
			self.limits.upper_scale <= MAX_TILE_SCALE,
			"upper_scale ({}) must be <= {MAX_TILE_SCALE}",
			self.limits.upper_scale
		);
		ProjectionBounds::new(self.bounds.x_min, self.bounds.y_min, self.bounds.x_max, self.bounds.y_max)?;
		Ok(())
	}
}
