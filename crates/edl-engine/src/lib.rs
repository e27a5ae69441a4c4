//! The EDL executor/commit runtime: parses a script with `edl_parser`, steps
//! it against an in-memory document map, and — if no fatal error occurred —
//! flushes the result through a [`FileIo`] collaborator. See spec.md §2.

mod commit;
mod executor;
/// The small file-I/O capability the engine consumes: a real filesystem
/// implementation and an in-memory test double.
pub mod fileio;
mod format;
/// `~`/relative path resolution against a caller-supplied working directory.
pub mod paths;
mod registers;
mod result;
mod selection_ops;

use std::path::Path;

use edl_base::EdlError;
pub use edl_parser::{Command, ParsedCommand, Pattern};
use tokio_util::sync::CancellationToken;

pub use fileio::{FileIo, FileIoError};
pub use registers::{RegisterEntry, RegisterStore};
pub use result::{FileErrorEntry, FileMutationSummary, FinalSelection, MutationEntry, RunOutput, TraceEntry, TraceOutcome};

pub use crate::format::{render_envelope, render_human, RESULT_MARKER};
use crate::executor::Executor;

/// Parse and run an EDL script to completion.
///
/// Runs `file_io` I/O serially in command order, per spec.md §5. On a fatal
/// error (including a pre-empted `cancel`), returns `Err` with no writes
/// performed. On success, `file_errors` inside the `Ok` payload may still be
/// non-empty — that is a "success with file errors" outcome, not an `Err`.
#[tracing::instrument(skip(script_text, file_io, registers, cancel))]
pub async fn run_script(
	script_text: &str,
	cwd: &Path,
	file_io: &dyn FileIo,
	registers: &mut RegisterStore,
	cancel: &CancellationToken,
) -> Result<RunOutput, EdlError> {
	let commands = edl_parser::parse(script_text)?;
	let mut executor = Executor::new(file_io, cwd.to_path_buf(), registers);

	for pc in &commands {
		if cancel.is_cancelled() {
			return Err(EdlError::Aborted);
		}
		executor.step(pc).await?;
	}
	if cancel.is_cancelled() {
		return Err(EdlError::Aborted);
	}

	let output = executor.finish();
	let mutations = commit::commit(file_io, &output).await?;

	let final_selection = output.final_path.as_ref().map(|path| {
		let ranges = match output.docs.get(path) {
			Some(doc) => output.final_selection.ranges().iter().map(|r| r.to_positions(doc.text())).collect(),
			None => Vec::new(),
		};
		FinalSelection { path: Some(path.clone()), ranges }
	});

	Ok(RunOutput { mutations, trace: output.trace, file_errors: output.file_errors, final_selection })
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::fileio::mem::MemFileIo;

	#[tokio::test]
	async fn parse_error_runs_no_commands_and_commits_nothing() {
		let io = MemFileIo::new();
		let mut registers = RegisterStore::new();
		let cancel = CancellationToken::new();
		let err = run_script("bogus_keyword\n", Path::new("/p"), &io, &mut registers, &cancel).await.unwrap_err();
		assert!(matches!(err, EdlError::Parse { .. }));
		assert!(io.written_paths().is_empty());
	}

	#[tokio::test]
	async fn already_cancelled_token_aborts_before_any_step() {
		let io = MemFileIo::with_files([("/p/a.ts", "x")]);
		let mut registers = RegisterStore::new();
		let cancel = CancellationToken::new();
		cancel.cancel();
		let err = run_script("file `/p/a.ts`\n", Path::new("/p"), &io, &mut registers, &cancel).await.unwrap_err();
		assert_eq!(err, EdlError::Aborted);
	}
}
