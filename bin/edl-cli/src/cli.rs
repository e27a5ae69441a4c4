use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "edl")]
#[command(about = "Run an EDL edit-description script against the filesystem")]
#[command(version)]
pub struct Cli {
	/// Script file to run. Reads from stdin if omitted.
	pub script: Option<PathBuf>,

	/// Working directory EDL path literals resolve against (default: current directory).
	#[arg(long)]
	pub cwd: Option<PathBuf>,

	/// Verbose logging (overridden by RUST_LOG if set).
	#[arg(short, long)]
	pub verbose: bool,
}
