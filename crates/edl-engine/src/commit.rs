//! Atomic mutation commit: flushes every touched, modified document to disk
//! through [`FileIo`] and produces the per-file mutation summaries. Runs
//! only when the executor reached the end of the script without a fatal
//! error, per spec.md §4.5.

use std::collections::HashMap;
use std::path::PathBuf;

use edl_base::{Document, EdlError};

use crate::executor::ExecutorOutput;
use crate::fileio::FileIo;
use crate::result::{FileMutationSummary, MutationEntry};

/// Whether `doc` needs to be written: either it was created by `newfile`
/// (even an empty new file is a real commit — the script asked for it to
/// exist) or its text diverged from what it held at open time.
fn needs_commit(doc: &Document) -> bool {
	doc.is_new() || doc.is_modified()
}

#[tracing::instrument(skip(file_io, output))]
pub async fn commit(file_io: &dyn FileIo, output: &ExecutorOutput) -> Result<Vec<MutationEntry>, EdlError> {
	let mut paths: Vec<&PathBuf> = output.docs.keys().collect();
	paths.sort();

	let mut mutations = Vec::new();
	for path in paths {
		let doc = &output.docs[path];
		if !needs_commit(doc) {
			continue;
		}
		if doc.is_new() {
			if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
				file_io
					.mkdir_p(parent)
					.await
					.map_err(|e| EdlError::CommitFailed { path: path.clone(), message: e.to_string() })?;
			}
		}
		let content = doc.text().to_string();
		file_io
			.write_file(path, &content)
			.await
			.map_err(|e| EdlError::CommitFailed { path: path.clone(), message: e.to_string() })?;

		let mut summary = output.op_counts.get(path).copied().unwrap_or_default();
		let (added, removed) = doc.line_delta();
		summary.lines_added = added;
		summary.lines_removed = removed;
		mutations.push(MutationEntry { path: path.clone(), content, summary });
	}
	Ok(mutations)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::fileio::mem::MemFileIo;
	use crate::registers::RegisterStore;

	async fn run(io: &MemFileIo, script: &str) -> (Vec<MutationEntry>, Result<Vec<MutationEntry>, EdlError>) {
		let commands = edl_parser::parse(script).unwrap();
		let mut registers = RegisterStore::new();
		let mut executor = crate::executor::Executor::new(io, PathBuf::from("/p"), &mut registers);
		for pc in &commands {
			executor.step(pc).await.unwrap();
		}
		let output = executor.finish();
		let result = commit(io, &output).await;
		(result.clone().unwrap_or_default(), result)
	}

	#[tokio::test]
	async fn unmodified_documents_are_not_written() {
		let io = MemFileIo::with_files([("/p/a.ts", "const x = 1;\n")]);
		let (mutations, result) = run(&io, "file `/p/a.ts`\n").await;
		assert!(result.is_ok());
		assert!(mutations.is_empty());
		assert!(io.written_paths().is_empty());
	}

	#[tokio::test]
	async fn new_file_is_committed_even_if_empty_content_changes() {
		let io = MemFileIo::new();
		let script = "newfile `/p/greet.ts`\ninsert_after <<END\nexport const g = \"hi\";\nEND\n";
		let (mutations, _result) = run(&io, script).await;
		assert_eq!(mutations.len(), 1);
		assert_eq!(io.contents("/p/greet.ts").unwrap(), "export const g = \"hi\";");
		assert_eq!(mutations[0].summary.insertions, 1);
		assert_eq!(mutations[0].summary.lines_added, 1);
	}
}
