use std::path::{Path, PathBuf};

use ropey::Rope;

use crate::edit::Edit;

/// An open file in the executor's in-memory workspace.
///
/// Created when a command first references a file — either [`Document::opened`]
/// for an existing file or [`Document::created`] for a `newfile` — and held
/// for the remainder of the script run. `original` is retained purely for
/// commit-time mutation accounting: comparing it against the current `text`
/// tells the commit phase whether this file needs to be written at all, and
/// lets the summary report line deltas.
#[derive(Debug, Clone)]
pub struct Document {
	path: PathBuf,
	text: Rope,
	original: Rope,
	/// True if this document was created via `newfile` rather than opened
	/// from an existing file (commit must `mkdir_p` its parent directory).
	is_new: bool,
}

impl Document {
	/// A document opened from existing file content.
	pub fn opened(path: impl Into<PathBuf>, content: &str) -> Self {
		let rope = Rope::from_str(content);
		Self { path: path.into(), text: rope.clone(), original: rope, is_new: false }
	}

	/// A document created fresh by `newfile`: empty text.
	pub fn created(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into(), text: Rope::new(), original: Rope::new(), is_new: true }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn text(&self) -> &Rope {
		&self.text
	}

	pub fn original(&self) -> &Rope {
		&self.original
	}

	pub fn is_new(&self) -> bool {
		self.is_new
	}

	/// Whether this document's text differs from what it held at open time.
	pub fn is_modified(&self) -> bool {
		self.text != self.original
	}

	/// Apply a single edit in place: remove `[edit.start, edit.end)` and
	/// insert `replacement` at `edit.start`.
	pub fn apply_edit(&mut self, edit: &Edit, replacement: &str) {
		if edit.end > edit.start {
			self.text.remove(edit.start..edit.end);
		}
		if !replacement.is_empty() {
			self.text.insert(edit.start, replacement);
		}
	}

	/// Absolute difference in line count between `original` and the current
	/// text, counted by newline as the mutation summary format requires.
	///
	/// Counts content lines rather than using `Rope::len_lines()`, which
	/// reports 1 for an empty rope — that would make a `newfile` with a
	/// single inserted line look like a no-op line-count change.
	pub fn line_delta(&self) -> (usize, usize) {
		let before = self.original.to_string().lines().count();
		let after = self.text.to_string().lines().count();
		if after >= before {
			(after - before, 0)
		} else {
			(0, before - after)
		}
	}
}
