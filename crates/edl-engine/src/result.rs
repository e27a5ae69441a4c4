use std::path::PathBuf;

use edl_base::Position;
use serde::Serialize;

/// Per-file counts of applied operations and line deltas, per spec.md §4.3
/// "Mutation accounting".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileMutationSummary {
	pub replacements: usize,
	pub insertions: usize,
	pub deletions: usize,
	pub lines_added: usize,
	pub lines_removed: usize,
}

impl FileMutationSummary {
	pub fn total_ops(&self) -> usize {
		self.replacements + self.insertions + self.deletions
	}
}

/// One committed file: its path, final content, and mutation summary.
#[derive(Debug, Clone, Serialize)]
pub struct MutationEntry {
	pub path: PathBuf,
	pub content: String,
	pub summary: FileMutationSummary,
}

/// A non-fatal, per-file error captured during execution.
#[derive(Debug, Clone, Serialize)]
pub struct FileErrorEntry {
	pub path: PathBuf,
	/// Stable machine-readable error kind, e.g. `"no_match"`, `"ambiguous"`.
	pub kind: &'static str,
	pub message: String,
}

/// The outcome of one executed command, recorded whether or not it did
/// anything — including "no-op" entries for empty-selection mutations, per
/// spec.md §4.5.
#[derive(Debug, Clone, Serialize)]
pub struct TraceEntry {
	pub line: usize,
	pub command: &'static str,
	pub outcome: TraceOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TraceOutcome {
	Applied { detail: String },
	NoOp { reason: String },
	FileError { message: String },
}

/// The final selection's ranges, included for the caller to display.
#[derive(Debug, Clone, Serialize)]
pub struct FinalSelection {
	pub path: Option<PathBuf>,
	pub ranges: Vec<(Position, Position)>,
}

/// The complete result of a successful (possibly partially-errored) script
/// run: spec.md §6 "Result envelope" / §4.5 "Result payload".
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
	pub mutations: Vec<MutationEntry>,
	pub trace: Vec<TraceEntry>,
	pub file_errors: Vec<FileErrorEntry>,
	pub final_selection: Option<FinalSelection>,
}

impl RunOutput {
	/// Whether the overall run committed with no file-level errors at all.
	pub fn is_clean_success(&self) -> bool {
		self.file_errors.is_empty()
	}
}
