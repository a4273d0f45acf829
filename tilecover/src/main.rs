// Subcommands and their arguments
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};

// Command line interface, metadata comes from Cargo.toml
#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true, // Enable version flag for subcommands
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>, // -v / -q
}

// Each variant delegates to a module in `tools`
#[derive(Subcommand, Debug)]
enum Commands {
	/// List the tiles covering a screen, in delivery order
	Cover(tools::cover::Subcommand),

	/// Show the draw scale and tile scale of a screen
	Scales(tools::scales::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	// Log level follows the verbosity flag
	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

// Runs the selected subcommand
fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Cover(arguments) => tools::cover::run(arguments),
		Commands::Scales(arguments) => tools::scales::run(arguments),
	}
}
