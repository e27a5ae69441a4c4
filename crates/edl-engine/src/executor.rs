//! The command interpreter: steps through a parsed script against an
//! in-memory [`Document`] map, maintaining the current (path, selection)
//! pointer and the error/trace/mutation accumulators. See spec.md §4.3.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use edl_base::{Document, Edit, EdlError, Range, Selection};
use edl_parser::{Command, ParsedCommand, Pattern};

use crate::fileio::FileIo;
use crate::paths;
use crate::registers::RegisterStore;
use crate::result::{FileErrorEntry, FileMutationSummary, TraceEntry, TraceOutcome};
use crate::selection_ops::{self, Needle};

/// Everything the commit phase needs once a script has finished stepping.
pub struct ExecutorOutput {
	pub docs: HashMap<PathBuf, Document>,
	pub op_counts: HashMap<PathBuf, FileMutationSummary>,
	pub trace: Vec<TraceEntry>,
	pub file_errors: Vec<FileErrorEntry>,
	pub final_path: Option<PathBuf>,
	pub final_selection: Selection,
}

enum BatchOp<'a> {
	Replace(&'a str),
	InsertBefore(&'a str),
	InsertAfter(&'a str),
	Delete,
}

/// State: `current_path = None` is `Idle`; `Some(path)` is `Bound(path)`.
/// `errored_current` tracks whether the bound file is in the "errored"
/// state described in spec.md §4.3: subsequent selection-modifying commands
/// against it become no-ops until the next `file`/`newfile`.
pub struct Executor<'a> {
	file_io: &'a dyn FileIo,
	cwd: PathBuf,
	registers: &'a mut RegisterStore,
	docs: HashMap<PathBuf, Document>,
	current_path: Option<PathBuf>,
	current_selection: Selection,
	errored_current: bool,
	op_counts: HashMap<PathBuf, FileMutationSummary>,
	trace: Vec<TraceEntry>,
	file_errors: Vec<FileErrorEntry>,
}

impl<'a> Executor<'a> {
	pub fn new(file_io: &'a dyn FileIo, cwd: PathBuf, registers: &'a mut RegisterStore) -> Self {
		Self {
			file_io,
			cwd,
			registers,
			docs: HashMap::new(),
			current_path: None,
			current_selection: Selection::empty(),
			errored_current: false,
			op_counts: HashMap::new(),
			trace: Vec::new(),
			file_errors: Vec::new(),
		}
	}

	pub fn finish(self) -> ExecutorOutput {
		ExecutorOutput {
			docs: self.docs,
			op_counts: self.op_counts,
			trace: self.trace,
			file_errors: self.file_errors,
			final_path: self.current_path,
			final_selection: self.current_selection,
		}
	}

	#[tracing::instrument(skip(self, pc), fields(line = pc.line, command = pc.command.keyword()))]
	pub async fn step(&mut self, pc: &ParsedCommand) -> Result<(), EdlError> {
		let line = pc.line;
		match &pc.command {
			Command::File { path } => self.cmd_file(line, path).await,
			Command::NewFile { path } => self.cmd_newfile(line, path).await,
			Command::SelectOne { text } => self.cmd_select_one(line, text),
			Command::SelectAll { text } => self.cmd_select_all(line, text),
			Command::Narrow { pattern } => self.cmd_narrow(line, pattern),
			Command::WidenLines => self.cmd_widen_lines(line),
			Command::Replace { text } => self.cmd_batch(line, "replace", BatchOp::Replace(text)),
			Command::InsertBefore { text } => self.cmd_batch(line, "insert_before", BatchOp::InsertBefore(text)),
			Command::InsertAfter { text } => self.cmd_batch(line, "insert_after", BatchOp::InsertAfter(text)),
			Command::Delete => self.cmd_batch(line, "delete", BatchOp::Delete),
			Command::Save { name } => self.cmd_save(line, name),
			Command::Load { name } => self.cmd_load(line, name).await,
			Command::Nth { n } => self.cmd_nth(line, *n),
		}
	}

	async fn ensure_doc(&mut self, path: &Path) -> Result<(), EdlError> {
		if self.docs.contains_key(path) {
			return Ok(());
		}
		match self.file_io.read_file(path).await {
			Ok(content) => {
				self.docs.insert(path.to_path_buf(), Document::opened(path, &content));
				Ok(())
			}
			Err(e) => Err(EdlError::ReadFailed { path: path.to_path_buf(), message: e.to_string() }),
		}
	}

	async fn cmd_file(&mut self, line: usize, raw_path: &str) -> Result<(), EdlError> {
		let abs = paths::resolve(&self.cwd, raw_path);
		self.errored_current = false;
		match self.ensure_doc(&abs).await {
			Ok(()) => {
				let doc = self.docs.get(&abs).expect("just inserted");
				self.current_selection = Selection::full(doc.text());
				self.current_path = Some(abs.clone());
				self.push_applied(line, "file", format!("opened {}", abs.display()));
			}
			Err(err) => {
				self.current_path = Some(abs.clone());
				self.current_selection = Selection::empty();
				self.errored_current = true;
				self.push_file_error(line, "file", abs, &err);
			}
		}
		Ok(())
	}

	async fn cmd_newfile(&mut self, line: usize, raw_path: &str) -> Result<(), EdlError> {
		let abs = paths::resolve(&self.cwd, raw_path);
		if self.docs.contains_key(&abs) {
			return Err(EdlError::AlreadyExists { path: abs });
		}
		match self.file_io.file_exists(&abs).await {
			Ok(true) => return Err(EdlError::AlreadyExists { path: abs }),
			Ok(false) => {}
			Err(e) => {
				let err = EdlError::ReadFailed { path: abs.clone(), message: e.to_string() };
				self.current_path = Some(abs.clone());
				self.current_selection = Selection::empty();
				self.errored_current = true;
				self.push_file_error(line, "newfile", abs, &err);
				return Ok(());
			}
		}
		self.docs.insert(abs.clone(), Document::created(abs.clone()));
		let doc = self.docs.get(&abs).expect("just inserted");
		// `Selection::full` on an empty document yields one empty (point)
		// range, not the zero-range empty selection — matches spec.md §4.3's
		// "selection = full document (or empty for a new file)".
		self.current_selection = Selection::full(doc.text());
		self.current_path = Some(abs.clone());
		self.errored_current = false;
		self.push_applied(line, "newfile", format!("created {}", abs.display()));
		Ok(())
	}

	/// Returns `Ok(Some(path))` when a command may proceed against the
	/// current document, `Ok(None)` when it was silently turned into a
	/// no-op (errored current file), or `Err(NoFile)` when idle.
	fn require_usable_file(&mut self, line: usize, keyword: &'static str) -> Result<Option<PathBuf>, EdlError> {
		let Some(path) = self.current_path.clone() else {
			return Err(EdlError::NoFile);
		};
		if self.errored_current {
			self.push_no_op(line, keyword, "current file is in an errored state");
			return Ok(None);
		}
		Ok(Some(path))
	}

	fn cmd_select_one(&mut self, line: usize, text: &str) -> Result<(), EdlError> {
		let Some(path) = self.require_usable_file(line, "select_one")? else { return Ok(()) };
		let doc = self.docs.get(&path).expect("bound document must exist");
		match selection_ops::find_one(doc.text(), Needle::Literal(text)) {
			Ok(range) => {
				self.current_selection = Selection::single(range);
				self.push_applied(line, "select_one", format!("selected {}..{}", range.start, range.end));
			}
			Err(err) => {
				self.errored_current = true;
				self.push_file_error(line, "select_one", path, &err);
			}
		}
		Ok(())
	}

	fn cmd_select_all(&mut self, line: usize, text: &str) -> Result<(), EdlError> {
		let Some(path) = self.require_usable_file(line, "select_all")? else { return Ok(()) };
		let doc = self.docs.get(&path).expect("bound document must exist");
		let matches = selection_ops::find_all(doc.text(), Needle::Literal(text));
		let count = matches.len();
		self.current_selection = Selection::from_ranges(matches);
		self.push_applied(line, "select_all", format!("{count} matches"));
		Ok(())
	}

	fn cmd_narrow(&mut self, line: usize, pattern: &Pattern) -> Result<(), EdlError> {
		let Some(path) = self.require_usable_file(line, "narrow")? else { return Ok(()) };
		let doc = self.docs.get(&path).expect("bound document must exist");
		let needle = Needle::from(pattern);
		let narrowed = selection_ops::narrow(doc.text(), &self.current_selection, needle);
		let count = narrowed.len();
		self.current_selection = narrowed;
		self.push_applied(line, "narrow", format!("{count} ranges remain"));
		Ok(())
	}

	fn cmd_widen_lines(&mut self, line: usize) -> Result<(), EdlError> {
		let Some(path) = self.require_usable_file(line, "widen_lines")? else { return Ok(()) };
		let doc = self.docs.get(&path).expect("bound document must exist");
		self.current_selection = self.current_selection.widen_lines(doc.text());
		self.push_applied(line, "widen_lines", format!("{} ranges", self.current_selection.len()));
		Ok(())
	}

	fn cmd_nth(&mut self, line: usize, n: usize) -> Result<(), EdlError> {
		let Some(path) = self.require_usable_file(line, "nth")? else { return Ok(()) };
		match self.current_selection.nth(n) {
			Some(range) => {
				self.current_selection = Selection::single(range);
				self.push_applied(line, "nth", format!("selected range {n}"));
			}
			None => {
				let err = EdlError::IndexOutOfRange { index: n, len: self.current_selection.len() };
				self.errored_current = true;
				self.push_file_error(line, "nth", path, &err);
			}
		}
		Ok(())
	}

	fn cmd_batch(&mut self, line: usize, keyword: &'static str, op: BatchOp<'_>) -> Result<(), EdlError> {
		let Some(path) = self.require_usable_file(line, keyword)? else { return Ok(()) };
		if self.current_selection.is_empty() {
			self.push_no_op(line, keyword, "empty selection");
			return Ok(());
		}
		let original_ranges: Vec<Range> = self.current_selection.ranges().to_vec();
		let doc = self.docs.get_mut(&path).expect("bound document must exist");
		let mut running = self.current_selection.clone();
		for range in original_ranges.iter().rev() {
			let (edit, replacement): (Edit, &str) = match op {
				BatchOp::Replace(text) => (Edit::new(range.start, range.end, text.chars().count()), text),
				BatchOp::InsertBefore(text) => (Edit::new(range.start, range.start, text.chars().count()), text),
				BatchOp::InsertAfter(text) => (Edit::new(range.end, range.end, text.chars().count()), text),
				BatchOp::Delete => (Edit::new(range.start, range.end, 0), ""),
			};
			doc.apply_edit(&edit, replacement);
			running = running.apply_edit_to(&edit, range);
		}
		self.current_selection = running;

		let count = original_ranges.len();
		let summary = self.op_counts.entry(path).or_default();
		match op {
			BatchOp::Replace(_) => summary.replacements += count,
			BatchOp::InsertBefore(_) | BatchOp::InsertAfter(_) => summary.insertions += count,
			BatchOp::Delete => summary.deletions += count,
		}
		self.push_applied(line, keyword, format!("{count} ranges"));
		Ok(())
	}

	fn cmd_save(&mut self, line: usize, name: &str) -> Result<(), EdlError> {
		let Some(path) = self.require_usable_file(line, "save")? else { return Ok(()) };
		let doc = self.docs.get(&path).expect("bound document must exist");
		let captured_text: String =
			self.current_selection.iter().map(|r| doc.text().slice(r.start..r.end).to_string()).collect();
		self.registers.save(name, path, self.current_selection.clone(), captured_text);
		self.push_applied(line, "save", format!("saved register {name}"));
		Ok(())
	}

	async fn cmd_load(&mut self, line: usize, name: &str) -> Result<(), EdlError> {
		if self.current_path.is_none() {
			return Err(EdlError::NoFile);
		}
		let Some(entry) = self.registers.get(name).cloned() else {
			let err = EdlError::UnknownRegister { name: name.to_string() };
			let path = self.current_path.clone().expect("checked above");
			self.push_file_error(line, "load", path, &err);
			return Ok(());
		};

		if let Err(err) = self.ensure_doc(&entry.path).await {
			self.push_file_error(line, "load", entry.path.clone(), &err);
			return Ok(());
		}
		let doc = self.docs.get(&entry.path).expect("just ensured");
		let len = doc.text().len_chars();
		if entry.selection.ranges().iter().any(|r| r.end > len) {
			let err = EdlError::StaleRegister { name: name.to_string() };
			self.push_file_error(line, "load", entry.path.clone(), &err);
			return Ok(());
		}

		self.current_path = Some(entry.path.clone());
		self.current_selection = entry.selection;
		self.errored_current = false;
		self.push_applied(line, "load", format!("loaded register {name}"));
		Ok(())
	}

	fn push_applied(&mut self, line: usize, command: &'static str, detail: String) {
		self.trace.push(TraceEntry { line, command, outcome: TraceOutcome::Applied { detail } });
	}

	fn push_no_op(&mut self, line: usize, command: &'static str, reason: &'static str) {
		self.trace.push(TraceEntry { line, command, outcome: TraceOutcome::NoOp { reason: reason.to_string() } });
	}

	fn push_file_error(&mut self, line: usize, command: &'static str, path: PathBuf, err: &EdlError) {
		self.file_errors.push(FileErrorEntry { path, kind: error_kind(err), message: err.to_string() });
		self.trace.push(TraceEntry { line, command, outcome: TraceOutcome::FileError { message: err.to_string() } });
	}
}

fn error_kind(err: &EdlError) -> &'static str {
	match err {
		EdlError::Parse { .. } => "parse",
		EdlError::NoFile => "no_file",
		EdlError::NoMatch => "no_match",
		EdlError::Ambiguous { .. } => "ambiguous",
		EdlError::IndexOutOfRange { .. } => "index_out_of_range",
		EdlError::AlreadyExists { .. } => "already_exists",
		EdlError::UnknownRegister { .. } => "unknown_register",
		EdlError::StaleRegister { .. } => "stale_register",
		EdlError::ReadFailed { .. } => "read_failed",
		EdlError::CommitFailed { .. } => "commit_failed",
		EdlError::Aborted => "aborted",
	}
}
