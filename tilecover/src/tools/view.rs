use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tilecover::config::{ScreenOverrides, ViewConfig};

/// Arguments shared by all commands that need a screen.
#[derive(Args, Debug)]
pub struct ViewArgs {
	/// YAML file with the tiler configuration and the screen.
	/// Screen values given as options replace those of the file.
	#[arg(verbatim_doc_comment)]
	config: Option<PathBuf>,

	/// screen width
	#[arg(long, value_name = "PIXELS", display_order = 1)]
	width: Option<u32>,

	/// screen height
	#[arg(long, value_name = "PIXELS", display_order = 1)]
	height: Option<u32>,

	/// x coordinate of the screen center in projected units
	#[arg(long, value_name = "X", allow_negative_numbers = true, display_order = 2)]
	center_x: Option<f64>,

	/// y coordinate of the screen center in projected units
	#[arg(long, value_name = "Y", allow_negative_numbers = true, display_order = 2)]
	center_y: Option<f64>,

	/// projected units per pixel
	#[arg(long, value_name = "UNITS", display_order = 2)]
	scale: Option<f64>,

	/// counter-clockwise rotation in degrees
	#[arg(long, value_name = "DEGREES", allow_negative_numbers = true, display_order = 2)]
	angle: Option<f64>,

	/// nominal tile size, replaces the configured one
	#[arg(long, value_name = "PIXELS", display_order = 3)]
	tile_size: Option<u32>,
}

impl ViewArgs {
	pub fn load(&self) -> Result<ViewConfig> {
		let mut config = match &self.config {
			Some(path) => ViewConfig::from_path(path)?,
			None => ViewConfig::default(),
		};

		config.apply_screen_overrides(&ScreenOverrides {
			width: self.width,
			height: self.height,
			center_x: self.center_x,
			center_y: self.center_y,
			scale: self.scale,
			angle: self.angle,
		})?;

		if let Some(tile_size) = self.tile_size {
			config.tiler.tile_size = tile_size;
			config.tiler.validate()?;
		}

		log::debug!("view config: {config:?}");
		Ok(config)
	}
}
