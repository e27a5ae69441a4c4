use edl_base::EdlError;

use crate::command::{Command, ParsedCommand, Pattern};

/// Parse an EDL script into an ordered list of commands.
///
/// Parsing is purely syntactic: it never looks at a document or the
/// filesystem. A malformed script is rejected wholesale before any command
/// executes, matching spec.md §4.1's "parse errors abort execution before
/// any mutation" contract.
#[tracing::instrument(skip(script), fields(len = script.len()))]
pub fn parse(script: &str) -> Result<Vec<ParsedCommand>, EdlError> {
	Parser::new(script).parse_all()
}

struct Parser<'a> {
	lines: Vec<&'a str>,
	pos: usize,
}

impl<'a> Parser<'a> {
	fn new(script: &'a str) -> Self {
		Self { lines: script.lines().collect(), pos: 0 }
	}

	fn parse_all(&mut self) -> Result<Vec<ParsedCommand>, EdlError> {
		let mut commands = Vec::new();
		while self.pos < self.lines.len() {
			let raw = self.lines[self.pos];
			let trimmed = raw.trim();
			if trimmed.is_empty() || trimmed.starts_with('#') {
				self.pos += 1;
				continue;
			}
			commands.push(self.parse_command()?);
		}
		Ok(commands)
	}

	fn parse_command(&mut self) -> Result<ParsedCommand, EdlError> {
		let line_no = self.pos + 1;
		let raw = self.lines[self.pos].trim();
		let (keyword, rest) = match raw.split_once(char::is_whitespace) {
			Some((k, r)) => (k, r.trim_start()),
			None => (raw, ""),
		};

		let command = match keyword {
			"file" => {
				let path = self.parse_path_literal(rest, line_no)?;
				self.pos += 1;
				Command::File { path }
			}
			"newfile" => {
				let path = self.parse_path_literal(rest, line_no)?;
				self.pos += 1;
				Command::NewFile { path }
			}
			"select_one" => Command::SelectOne { text: self.parse_heredoc(rest, line_no)? },
			"select_all" => Command::SelectAll { text: self.parse_heredoc(rest, line_no)? },
			"narrow" => {
				let rest_trimmed = rest.trim();
				if rest_trimmed.starts_with('/') {
					let regex = self.parse_regex_literal(rest, line_no)?;
					self.pos += 1;
					Command::Narrow { pattern: Pattern::Regex(regex) }
				} else if rest_trimmed.starts_with("<<") {
					let text = self.parse_heredoc(rest, line_no)?;
					Command::Narrow { pattern: Pattern::Literal(text) }
				} else {
					return Err(parse_err(line_no, 1, "a '/regex/' or '<<IDENT' heredoc after narrow"));
				}
			}
			"widen_lines" => {
				self.expect_no_operand(rest, line_no)?;
				self.pos += 1;
				Command::WidenLines
			}
			"replace" => Command::Replace { text: self.parse_heredoc(rest, line_no)? },
			"insert_before" => Command::InsertBefore { text: self.parse_heredoc(rest, line_no)? },
			"insert_after" => Command::InsertAfter { text: self.parse_heredoc(rest, line_no)? },
			"delete" => {
				self.expect_no_operand(rest, line_no)?;
				self.pos += 1;
				Command::Delete
			}
			"save" => {
				let name = self.parse_identifier(rest, line_no)?;
				self.pos += 1;
				Command::Save { name }
			}
			"load" => {
				let name = self.parse_identifier(rest, line_no)?;
				self.pos += 1;
				Command::Load { name }
			}
			"nth" => {
				let n = self.parse_positive_integer(rest, line_no)?;
				self.pos += 1;
				Command::Nth { n }
			}
			other => {
				return Err(parse_err(line_no, 1, format!("a known command, found '{other}'")));
			}
		};

		Ok(ParsedCommand { line: line_no, command })
	}

	fn expect_no_operand(&self, rest: &str, line_no: usize) -> Result<(), EdlError> {
		if rest.trim().is_empty() {
			Ok(())
		} else {
			Err(parse_err(line_no, 1, "end of line"))
		}
	}

	fn parse_identifier(&self, rest: &str, line_no: usize) -> Result<String, EdlError> {
		let name = rest.trim();
		if name.is_empty() || !is_identifier(name) {
			return Err(parse_err(line_no, 1, "an identifier"));
		}
		Ok(name.to_string())
	}

	fn parse_positive_integer(&self, rest: &str, line_no: usize) -> Result<usize, EdlError> {
		let text = rest.trim();
		match text.parse::<usize>() {
			Ok(n) if n >= 1 => Ok(n),
			_ => Err(parse_err(line_no, 1, "a positive integer")),
		}
	}

	fn parse_path_literal(&self, rest: &str, line_no: usize) -> Result<String, EdlError> {
		let rest = rest.trim();
		let after_open = rest
			.strip_prefix('`')
			.ok_or_else(|| parse_err(line_no, 1, "a path literal, e.g. `src/foo.ts`"))?;
		let close = after_open
			.find('`')
			.ok_or_else(|| parse_err(line_no, 1, "a closing '`' for the path literal"))?;
		let path = &after_open[..close];
		let trailing = after_open[close + 1..].trim();
		if !trailing.is_empty() {
			return Err(parse_err(line_no, 1, "end of line after path literal"));
		}
		Ok(path.to_string())
	}

	fn parse_regex_literal(&self, rest: &str, line_no: usize) -> Result<String, EdlError> {
		let chars: Vec<char> = rest.trim().chars().collect();
		if chars.first() != Some(&'/') {
			return Err(parse_err(line_no, 1, "a regex literal, e.g. /foo \\d/"));
		}
		let mut result = String::new();
		let mut i = 1;
		let mut closed = false;
		while i < chars.len() {
			match chars[i] {
				'\\' if i + 1 < chars.len() && chars[i + 1] == '/' => {
					result.push('/');
					i += 2;
				}
				'/' => {
					closed = true;
					i += 1;
					break;
				}
				c => {
					result.push(c);
					i += 1;
				}
			}
		}
		if !closed {
			return Err(parse_err(line_no, 1, "a closing '/' for the regex literal"));
		}
		let trailing: String = chars[i..].iter().collect();
		if !trailing.trim().is_empty() {
			return Err(parse_err(line_no, 1, "end of line after regex literal"));
		}

		// Validate now (with the same multiline flag the executor will use) so
		// a malformed pattern is a parse-time failure, per spec.
		if let Err(e) = fancy_regex::Regex::new(&format!("(?m){result}")) {
			return Err(parse_err(line_no, 1, format!("a valid regex ({e})")));
		}

		Ok(result)
	}

	/// `rest` is the remainder of the command line, expected to be exactly
	/// `<<IDENT`. Consumes lines up to (and including) the terminator line
	/// and returns the body with internal newlines preserved and exactly
	/// one trailing newline stripped.
	fn parse_heredoc(&mut self, rest: &str, line_no: usize) -> Result<String, EdlError> {
		let marker = rest.trim();
		let ident = marker
			.strip_prefix("<<")
			.ok_or_else(|| parse_err(line_no, 1, "a heredoc marker '<<IDENT'"))?;
		if ident.is_empty() || !is_identifier(ident) {
			return Err(parse_err(line_no, 1, "a heredoc identifier after '<<'"));
		}

		self.pos += 1;
		let body_start = self.pos;
		loop {
			if self.pos >= self.lines.len() {
				return Err(parse_err(line_no, 1, format!("a terminating '{ident}' line for the heredoc")));
			}
			if self.lines[self.pos].trim() == ident {
				break;
			}
			self.pos += 1;
		}
		let body = self.lines[body_start..self.pos].join("\n");
		self.pos += 1;
		Ok(body)
	}
}

fn is_identifier(s: &str) -> bool {
	let mut chars = s.chars();
	match chars.next() {
		Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_err(line: usize, column: usize, expected: impl Into<String>) -> EdlError {
	EdlError::Parse { line, column, expected: expected.into() }
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn parses_file_and_replace() {
		let script = "file `/p/a.ts`\nselect_one <<END\nconst x = 1;\nEND\nreplace <<END\nconst x = 42;\nEND\n";
		let commands = parse(script).unwrap();
		assert_eq!(commands.len(), 3);
		assert_eq!(commands[0].command, Command::File { path: "/p/a.ts".into() });
		assert_eq!(commands[1].command, Command::SelectOne { text: "const x = 1;".into() });
		assert_eq!(commands[2].command, Command::Replace { text: "const x = 42;".into() });
	}

	#[test]
	fn ignores_blank_lines_and_comments() {
		let script = "\n# a comment\nwiden_lines\n\n# another\ndelete\n";
		let commands = parse(script).unwrap();
		assert_eq!(commands.len(), 2);
		assert_eq!(commands[0].command, Command::WidenLines);
		assert_eq!(commands[1].command, Command::Delete);
	}

	#[test]
	fn heredoc_preserves_internal_newlines() {
		let script = "replace <<END\nline one\nline two\n\nEND\n";
		let commands = parse(script).unwrap();
		match &commands[0].command {
			Command::Replace { text } => assert_eq!(text, "line one\nline two\n"),
			other => panic!("unexpected: {other:?}"),
		}
	}

	#[test]
	fn regex_literal_unescapes_slash() {
		let script = r"narrow /foo\/bar \d/";
		let commands = parse(script).unwrap();
		match &commands[0].command {
			Command::Narrow { pattern: Pattern::Regex(r) } => assert_eq!(r, r"foo/bar \d"),
			other => panic!("unexpected: {other:?}"),
		}
	}

	#[test]
	fn nth_parses_positive_integer() {
		let commands = parse("nth 3\n").unwrap();
		assert_eq!(commands[0].command, Command::Nth { n: 3 });
	}

	#[test]
	fn nth_rejects_zero() {
		assert!(parse("nth 0\n").is_err());
	}

	#[test]
	fn unterminated_heredoc_is_a_parse_error() {
		let err = parse("replace <<END\nunterminated\n").unwrap_err();
		assert!(matches!(err, EdlError::Parse { .. }));
	}

	#[test]
	fn unknown_keyword_is_a_parse_error() {
		let err = parse("frobnicate\n").unwrap_err();
		assert!(matches!(err, EdlError::Parse { .. }));
	}

	#[test]
	fn unclosed_path_literal_is_a_parse_error() {
		let err = parse("file `/p/a.ts\n").unwrap_err();
		assert!(matches!(err, EdlError::Parse { .. }));
	}

	#[test]
	fn malformed_regex_is_a_parse_error() {
		let err = parse("narrow /foo(/\n").unwrap_err();
		assert!(matches!(err, EdlError::Parse { .. }));
	}

	#[test]
	fn save_and_load_parse_identifiers() {
		let commands = parse("save A\nload A\n").unwrap();
		assert_eq!(commands[0].command, Command::Save { name: "A".into() });
		assert_eq!(commands[1].command, Command::Load { name: "A".into() });
	}
}
