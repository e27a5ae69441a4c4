/// A pattern used by `narrow`, distinguishing a literal text block from a
/// `/regex/` delimited pattern. `select_one`/`select_all` always operate on
/// literal heredoc text, so they don't need this wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
	Literal(String),
	/// The regex source, already unescaped (`\/` resolved to `/`), ready to
	/// hand to a regex engine with Unicode matching and multiline mode on.
	Regex(String),
}

/// The closed set of EDL commands, as parsed from surface syntax. See
/// spec.md §3/§6 for the full operand/effect table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	File { path: String },
	NewFile { path: String },
	SelectOne { text: String },
	SelectAll { text: String },
	Narrow { pattern: Pattern },
	WidenLines,
	Replace { text: String },
	InsertBefore { text: String },
	InsertAfter { text: String },
	Delete,
	Save { name: String },
	Load { name: String },
	Nth { n: usize },
}

impl Command {
	/// Short keyword for tracing/logging, matching surface syntax.
	pub fn keyword(&self) -> &'static str {
		match self {
			Command::File { .. } => "file",
			Command::NewFile { .. } => "newfile",
			Command::SelectOne { .. } => "select_one",
			Command::SelectAll { .. } => "select_all",
			Command::Narrow { .. } => "narrow",
			Command::WidenLines => "widen_lines",
			Command::Replace { .. } => "replace",
			Command::InsertBefore { .. } => "insert_before",
			Command::InsertAfter { .. } => "insert_after",
			Command::Delete => "delete",
			Command::Save { .. } => "save",
			Command::Load { .. } => "load",
			Command::Nth { .. } => "nth",
		}
	}
}

/// A [`Command`] paired with the 1-indexed source line it started on, for
/// error messages and the executor's trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
	pub line: usize,
	pub command: Command,
}
