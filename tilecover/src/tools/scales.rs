use super::view::ViewArgs;
use anyhow::{Result, ensure};
use clap::Args;
use tilecover::core::{draw_scale, tile_scale};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	#[command(flatten)]
	view: ViewArgs,

	/// scale factor applied to the draw scale ceiling
	#[arg(long, short = 'k', value_name = "K", default_value_t = 1.0, display_order = 4)]
	factor: f64,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	ensure!(
		arguments.factor.is_finite() && arguments.factor > 0.0,
		"scale factor ({}) must be positive",
		arguments.factor
	);

	let config = arguments.view.load()?;
	let screen = config.screen()?;
	let tile_size = config.tiler.tile_size;

	println!("draw scale: {}", draw_scale(&screen, tile_size, arguments.factor, &config.tiler));
	println!("tile scale: {}", tile_scale(&screen, tile_size, &config.tiler));

	Ok(())
}
