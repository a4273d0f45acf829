use super::view::ViewArgs;
use anyhow::{Result, ensure};
use clap::Args;
use geo::coord;
use std::io::{Write, stdout};
use tilecover::core::{ScreenBase, Tiler};

#[derive(Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	#[command(flatten)]
	view: ViewArgs,

	/// number of levels of detail, coarsest first
	/// defaults to the configured depth, or to the tile scale of the screen
	#[arg(long, short, value_name = "LEVELS", verbatim_doc_comment, display_order = 4)]
	depth: Option<i32>,

	/// x coordinate of the focus point, defaults to the screen center
	#[arg(long, value_name = "X", allow_negative_numbers = true, requires = "focus_y", display_order = 4)]
	focus_x: Option<f64>,

	/// y coordinate of the focus point, defaults to the screen center
	#[arg(long, value_name = "Y", allow_negative_numbers = true, requires = "focus_x", display_order = 4)]
	focus_y: Option<f64>,

	/// print only the tiles at the target level of detail
	#[arg(long, short, display_order = 5)]
	leaves_only: bool,
}

/// Prints the tiles covering the screen, one per line in delivery order:
/// `draw_scale tile_scale x y leaf|node`.
pub fn run(arguments: &Subcommand) -> Result<()> {
	let config = arguments.view.load()?;
	let screen = config.screen()?;

	let focus = match (arguments.focus_x, arguments.focus_y) {
		(Some(x), Some(y)) => coord! { x: x, y: y },
		_ => config.focus()?,
	};
	ensure!(focus.x.is_finite() && focus.y.is_finite(), "focus point {focus:?} must be finite");

	let mut tiler: Tiler<ScreenBase> = Tiler::new(config.tiler.clone());
	tiler.seed(&screen, focus);

	let depth = arguments
		.depth
		.or(config.depth)
		.unwrap_or_else(|| i32::from(tiler.tile_scale()));
	let tiles = tiler.tiles(depth);

	log::info!(
		"{} tiles over {depth} levels, target draw scale {}, tile scale {}",
		tiles.len(),
		tiler.draw_scale(),
		tiler.tile_scale()
	);

	let mut out = stdout().lock();
	for tile in &tiles {
		let leaf = tiler.is_leaf(tile);
		if arguments.leaves_only && !leaf {
			continue;
		}
		writeln!(
			out,
			"{} {} {} {} {}",
			tile.draw_scale(),
			tile.tile_scale(),
			tile.x(),
			tile.y(),
			if leaf { "leaf" } else { "node" }
		)?;
	}
	out.flush()?;

	Ok(())
}
