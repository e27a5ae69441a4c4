mod cli;

use std::io::Read as _;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use edl_engine::fileio::fs::RealFileIo;
use edl_engine::{render_envelope, RegisterStore};
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::cli::Cli;

/// Runs a single script to completion, so a fresh register store is correct:
/// register persistence across invocations is the calling agent session's
/// job, not this binary's.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	let cli = Cli::parse();

	let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
	tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

	let script = match read_script(cli.script.as_deref()) {
		Ok(script) => script,
		Err(e) => {
			error!(error = %e, "failed to read script");
			return ExitCode::FAILURE;
		}
	};

	let cwd = match cli.cwd {
		Some(path) => path,
		None => match std::env::current_dir() {
			Ok(path) => path,
			Err(e) => {
				error!(error = %e, "failed to resolve current directory");
				return ExitCode::FAILURE;
			}
		},
	};

	let file_io = RealFileIo;
	let mut registers = RegisterStore::new();
	let cancel = CancellationToken::new();

	match edl_engine::run_script(&script, &cwd, &file_io, &mut registers, &cancel).await {
		Ok(output) => {
			println!("{}", render_envelope(&output));
			if output.is_clean_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
		}
		Err(e) => {
			eprintln!("{e}");
			ExitCode::FAILURE
		}
	}
}

fn read_script(path: Option<&Path>) -> std::io::Result<String> {
	match path {
		Some(path) => std::fs::read_to_string(path),
		None => {
			let mut buf = String::new();
			std::io::stdin().read_to_string(&mut buf)?;
			Ok(buf)
		}
	}
}
