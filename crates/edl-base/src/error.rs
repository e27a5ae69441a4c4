use std::path::PathBuf;

use thiserror::Error;

/// Whether an [`EdlError`] aborts the whole script or is scoped to one file.
///
/// Mirrors the two-tier propagation policy in the executor's error model:
/// a `Fatal` error short-circuits the script and skips commit; a
/// `FileLevel` error marks the offending file errored and lets the rest of
/// the script proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	Fatal,
	FileLevel,
}

/// The complete error taxonomy shared by the parser, executor, and commit
/// phase.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EdlError {
	#[error("parse error at {line}:{column}: expected {expected}")]
	Parse { line: usize, column: usize, expected: String },

	#[error("no file is currently selected")]
	NoFile,

	#[error("no match for the given text")]
	NoMatch,

	#[error("ambiguous: {count} matches")]
	Ambiguous { count: usize },

	#[error("index {index} out of range (selection has {len} ranges)")]
	IndexOutOfRange { index: usize, len: usize },

	#[error("file already exists: {path}")]
	AlreadyExists { path: PathBuf },

	#[error("unknown register: {name}")]
	UnknownRegister { name: String },

	#[error("register {name} is stale: the document changed since it was saved")]
	StaleRegister { name: String },

	#[error("failed to read {path}: {message}")]
	ReadFailed { path: PathBuf, message: String },

	#[error("commit failed writing {path}: {message}")]
	CommitFailed { path: PathBuf, message: String },

	#[error("script execution was cancelled")]
	Aborted,
}

impl EdlError {
	pub fn severity(&self) -> Severity {
		match self {
			EdlError::Parse { .. }
			| EdlError::NoFile
			| EdlError::AlreadyExists { .. }
			| EdlError::CommitFailed { .. }
			| EdlError::Aborted => Severity::Fatal,
			EdlError::NoMatch
			| EdlError::Ambiguous { .. }
			| EdlError::IndexOutOfRange { .. }
			| EdlError::UnknownRegister { .. }
			| EdlError::StaleRegister { .. }
			| EdlError::ReadFailed { .. } => Severity::FileLevel,
		}
	}

	pub fn is_fatal(&self) -> bool {
		self.severity() == Severity::Fatal
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn file_read_failure_is_not_fatal() {
		assert_eq!(
			EdlError::ReadFailed { path: "a.ts".into(), message: "boom".into() }.severity(),
			Severity::FileLevel
		);
	}

	#[test]
	fn parse_and_commit_are_fatal() {
		assert!(EdlError::Parse { line: 1, column: 1, expected: "command".into() }.is_fatal());
		assert!(EdlError::CommitFailed { path: "a.ts".into(), message: "disk full".into() }.is_fatal());
	}
}
