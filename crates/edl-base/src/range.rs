use ropey::Rope;

use crate::position::Position;

/// A Unicode scalar offset into a document's rope.
///
/// All indexing in this crate is in terms of `char` (Unicode scalar value)
/// offsets, never bytes — `ropey`'s char-indexed API makes this the natural
/// representation and it keeps every [`Range`] aligned to scalar boundaries
/// by construction, satisfying the executor's "never straddle a multi-byte
/// boundary" requirement without extra bookkeeping.
pub type CharIdx = usize;

/// A half-open `[start, end)` interval of [`CharIdx`] within a single document.
///
/// `start <= end` always holds. `start == end` denotes an empty range (a
/// cursor location).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range {
	pub start: CharIdx,
	pub end: CharIdx,
}

impl Range {
	pub fn new(start: CharIdx, end: CharIdx) -> Self {
		debug_assert!(start <= end, "range start must not exceed end: {start} > {end}");
		Self { start, end }
	}

	/// An empty range (cursor) at `pos`.
	pub fn point(pos: CharIdx) -> Self {
		Self { start: pos, end: pos }
	}

	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	pub fn len(&self) -> usize {
		self.end - self.start
	}

	pub fn contains(&self, pos: CharIdx) -> bool {
		pos >= self.start && pos < self.end
	}

	/// Strict overlap: sharing at least one char index. Touching ranges
	/// (`a.end == b.start`) are not considered overlapping by this check —
	/// see [`Range::touches`] for that case.
	pub fn overlaps(&self, other: &Range) -> bool {
		self.start < other.end && other.start < self.end
	}

	/// Whether the two ranges share an endpoint without overlapping.
	pub fn touches(&self, other: &Range) -> bool {
		self.end == other.start || other.end == self.start
	}

	/// The smallest range containing both `self` and `other`.
	pub fn merge(&self, other: &Range) -> Range {
		Range::new(self.start.min(other.start), self.end.max(other.end))
	}

	/// Extend this range to cover the full logical line(s) it spans.
	///
	/// The result starts at the beginning of the line containing `start`
	/// and ends at the end of the line containing `end - 1` (inclusive of
	/// that line's trailing newline, if any). Empty ranges widen to the
	/// single line containing their cursor.
	pub fn widen_to_lines(&self, doc: &Rope) -> Range {
		let len = doc.len_chars();
		let start_line = doc.char_to_line(self.start.min(len));
		let end_anchor = if self.is_empty() { self.start } else { self.end - 1 };
		let end_line = doc.char_to_line(end_anchor.min(len.saturating_sub(1)));
		let new_start = doc.line_to_char(start_line);
		let new_end = if end_line + 1 < doc.len_lines() {
			doc.line_to_char(end_line + 1)
		} else {
			len
		};
		Range::new(new_start, new_end.max(new_start))
	}

	/// Convert to a (start, end) pair of one-indexed-on-display [`Position`]s.
	pub fn to_positions(&self, doc: &Rope) -> (Position, Position) {
		(char_idx_to_position(doc, self.start), char_idx_to_position(doc, self.end))
	}
}

pub(crate) fn char_idx_to_position(doc: &Rope, idx: CharIdx) -> Position {
	let idx = idx.min(doc.len_chars());
	let row = doc.char_to_line(idx);
	let col = idx - doc.line_to_char(row);
	Position::new(row, col)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rope(s: &str) -> Rope {
		Rope::from_str(s)
	}

	#[test]
	fn overlap_vs_touch() {
		let a = Range::new(0, 5);
		let b = Range::new(5, 10);
		assert!(!a.overlaps(&b));
		assert!(a.touches(&b));

		let c = Range::new(4, 10);
		assert!(a.overlaps(&c));
	}

	#[test]
	fn widen_to_lines_single_line() {
		let doc = rope("foo 1\nfoo 2\nbar 3\n");
		// "foo 2" occupies chars 6..11
		let r = Range::new(6, 11);
		let widened = r.widen_to_lines(&doc);
		assert_eq!(widened, Range::new(6, 12));
	}

	#[test]
	fn widen_to_lines_is_idempotent() {
		let doc = rope("foo 1\nfoo 2\nbar 3\n");
		let r = Range::new(6, 11);
		let once = r.widen_to_lines(&doc);
		let twice = once.widen_to_lines(&doc);
		assert_eq!(once, twice);
	}

	#[test]
	fn to_positions_is_one_indexed_on_display() {
		let doc = rope("const x = 1;\nconst y = 2;\n");
		let r = Range::new(13, 18);
		let (start, end) = r.to_positions(&doc);
		assert_eq!(start, Position::new(1, 0));
		assert_eq!(start.display_row(), 2);
		assert_eq!(end.row, 1);
	}
}
