use crate::range::{CharIdx, Range};
use crate::selection::Selection;

/// A single applied mutation: the `[start, end)` span of the document that
/// was replaced, and the Unicode-scalar length of the text it was replaced
/// with.
///
/// `Edit` is the primitive the executor uses to fold a just-applied mutation
/// back into a [`Selection`], both for the selection that was mutated (each
/// touched range collapses to a cursor) and, in principle, for any other
/// selection that needs its positions kept valid across the same edit (e.g.
/// while validating whether a saved register range still lies in bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
	pub start: CharIdx,
	pub end: CharIdx,
	pub replacement_len: usize,
}

impl Edit {
	pub fn new(start: CharIdx, end: CharIdx, replacement_len: usize) -> Self {
		debug_assert!(start <= end);
		Self { start, end, replacement_len }
	}

	/// Signed change in document length this edit produces.
	pub fn delta(&self) -> isize {
		self.replacement_len as isize - (self.end - self.start) as isize
	}

	/// The cursor position immediately after the edit's replacement text.
	pub fn cursor_after(&self) -> CharIdx {
		self.start + self.replacement_len
	}
}

impl Selection {
	/// Apply a single [`Edit`] to this selection, producing the selection
	/// that should replace it.
	///
	/// Ranges entirely before the edit are untouched. Ranges entirely at or
	/// after the edit's end are shifted by the edit's delta. Any range that
	/// overlaps the edit is collapsed to a cursor at [`Edit::cursor_after`] —
	/// this is what turns a selected range into a post-mutation cursor for
	/// `replace`/`insert_*`/`delete`.
	pub fn apply_edit(&self, edit: &Edit) -> Selection {
		let mut out = Vec::with_capacity(self.ranges().len());
		for r in self.ranges() {
			if r.end <= edit.start {
				out.push(*r);
			} else if r.start >= edit.end {
				let delta = edit.delta();
				let start = (r.start as isize + delta).max(0) as usize;
				let end = (r.end as isize + delta).max(0) as usize;
				out.push(Range::new(start, end));
			} else {
				out.push(Range::point(edit.cursor_after()));
			}
		}
		Selection::from_ranges(out)
	}

	/// Apply `edit` to this selection like [`Selection::apply_edit`], except
	/// `target` — matched by equality, not position — always collapses to a
	/// cursor at [`Edit::cursor_after`], regardless of whether it overlaps
	/// `edit`.
	///
	/// `apply_edit` infers which range to collapse purely from overlap with
	/// `[edit.start, edit.end)`, which works for `replace`/`delete` (their
	/// edit spans the selected range) but not for `insert_before`/
	/// `insert_after`: those use a zero-width edit at the range's start or
	/// end, which never overlaps the range it's inserting into. Callers that
	/// know which range the edit belongs to should use this instead.
	pub fn apply_edit_to(&self, edit: &Edit, target: &Range) -> Selection {
		let mut out = Vec::with_capacity(self.ranges().len());
		for r in self.ranges() {
			if r == target {
				out.push(Range::point(edit.cursor_after()));
			} else if r.start >= edit.end {
				let delta = edit.delta();
				let start = (r.start as isize + delta).max(0) as usize;
				let end = (r.end as isize + delta).max(0) as usize;
				out.push(Range::new(start, end));
			} else {
				out.push(*r);
			}
		}
		Selection::from_ranges(out)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shifts_ranges_after_edit() {
		let sel = Selection::from_ranges(vec![Range::new(0, 2), Range::new(10, 12)]);
		// Replace [0, 2) with a 5-char string: delta = +3.
		let edit = Edit::new(0, 2, 5);
		let shifted = sel.apply_edit(&edit);
		assert_eq!(shifted.ranges(), &[Range::point(5), Range::new(13, 15)]);
	}

	#[test]
	fn untouched_ranges_before_edit_stay_put() {
		let sel = Selection::from_ranges(vec![Range::new(0, 2), Range::new(10, 12)]);
		let edit = Edit::new(10, 12, 0);
		let after = sel.apply_edit(&edit);
		assert_eq!(after.ranges()[0], Range::new(0, 2));
	}

	#[test]
	fn apply_edit_to_collapses_zero_width_insert_before() {
		let sel = Selection::from_ranges(vec![Range::new(4, 6), Range::new(10, 12)]);
		let target = Range::new(4, 6);
		// insert_before: 3 chars inserted at the range's start.
		let edit = Edit::new(4, 4, 3);
		let after = sel.apply_edit_to(&edit, &target);
		assert_eq!(after.ranges(), &[Range::point(7), Range::new(13, 15)]);
	}

	#[test]
	fn apply_edit_to_collapses_zero_width_insert_after() {
		let sel = Selection::from_ranges(vec![Range::new(4, 6), Range::new(10, 12)]);
		let target = Range::new(4, 6);
		// insert_after: 3 chars inserted at the range's end.
		let edit = Edit::new(6, 6, 3);
		let after = sel.apply_edit_to(&edit, &target);
		assert_eq!(after.ranges(), &[Range::point(9), Range::new(13, 15)]);
	}
}
