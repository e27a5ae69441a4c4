//! Pattern-matching operations over a document's text: the parts of the
//! selection algebra (spec.md §4.2) that need a regex engine and document
//! text, as opposed to the pure range bookkeeping in `edl_base::selection`.

use edl_base::{EdlError, Range, Rope, RopeSlice, Selection};
use edl_parser::Pattern;

/// A search target: either literal text (`select_one`/`select_all`, and
/// `narrow <<HEREDOC>>`) or a regex (`narrow /.../`).
#[derive(Debug, Clone, Copy)]
pub enum Needle<'a> {
	Literal(&'a str),
	Regex(&'a str),
}

impl<'a> From<&'a Pattern> for Needle<'a> {
	fn from(pattern: &'a Pattern) -> Self {
		match pattern {
			Pattern::Literal(text) => Needle::Literal(text),
			Pattern::Regex(source) => Needle::Regex(source),
		}
	}
}

/// All non-overlapping, left-to-right matches of `needle` in `doc`.
pub fn find_all(doc: &Rope, needle: Needle<'_>) -> Vec<Range> {
	match needle {
		Needle::Literal(text) => find_all_literal(doc.slice(..), 0, text),
		Needle::Regex(source) => find_all_regex(doc.slice(..), 0, source),
	}
}

/// Exactly one match is required: zero is [`EdlError::NoMatch`], more than
/// one is [`EdlError::Ambiguous`].
pub fn find_one(doc: &Rope, needle: Needle<'_>) -> Result<Range, EdlError> {
	let matches = find_all(doc, needle);
	match matches.len() {
		0 => Err(EdlError::NoMatch),
		1 => Ok(matches[0]),
		count => Err(EdlError::Ambiguous { count }),
	}
}

/// Intersect `sel` with occurrences of `needle`, searching independently
/// within each of `sel`'s ranges so a match can never cross a range
/// boundary. Matches that do not survive the intersection are simply
/// absent — this operation never errors; an empty result is valid.
pub fn narrow(doc: &Rope, sel: &Selection, needle: Needle<'_>) -> Selection {
	let mut matches = Vec::new();
	for range in sel.ranges() {
		let slice = doc.slice(range.start..range.end);
		let local = match needle {
			Needle::Literal(text) => find_all_literal(slice, range.start, text),
			Needle::Regex(source) => find_all_regex(slice, range.start, source),
		};
		matches.extend(local);
	}
	Selection::from_ranges(matches)
}

fn find_all_literal(haystack: RopeSlice<'_>, base: usize, needle: &str) -> Vec<Range> {
	if needle.is_empty() {
		return Vec::new();
	}
	let text = haystack.to_string();
	let needle_chars = needle.chars().count();
	text.match_indices(needle)
		.map(|(byte_idx, _)| {
			let start = base + haystack.byte_to_char(byte_idx);
			Range::new(start, start + needle_chars)
		})
		.collect()
}

fn find_all_regex(haystack: RopeSlice<'_>, base: usize, source: &str) -> Vec<Range> {
	// Multiline mode so `^`/`$` match line boundaries, per spec.md §4.1.
	// The parser already validated this pattern compiles with the same flag.
	let regex =
		fancy_regex::Regex::new(&format!("(?m){source}")).expect("regex was validated at parse time");
	let text = haystack.to_string();
	regex
		.find_iter(&text)
		.filter_map(|m| m.ok())
		.map(|m| {
			let start = base + haystack.byte_to_char(m.start());
			let end = base + haystack.byte_to_char(m.end());
			Range::new(start, end)
		})
		.collect()
}
