use ropey::Rope;
use smallvec::SmallVec;

use crate::range::Range;

/// An ordered, non-overlapping set of ranges within a single document.
///
/// Unlike a multi-cursor editor's selection type, an EDL [`Selection`] has
/// no notion of a "primary" range or anchor/head direction — it is purely
/// the ordered set of spans a command operates on. The empty selection
/// (zero ranges) is a valid, distinct state: it represents "nothing
/// selected" rather than an error, and is what `select_all` produces when
/// its pattern matches nothing.
///
/// Invariants, maintained by every constructor and mutator:
/// - ranges are sorted by start position,
/// - no two ranges overlap,
/// - touching ranges (`a.end == b.start`) are coalesced into one — this is
///   the one place EDL's algebra diverges from a typical editor's
///   selection, which keeps touching ranges distinct so they remain
///   independently addressable cursors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
	ranges: SmallVec<[Range; 1]>,
}

impl Selection {
	/// The empty selection.
	pub fn empty() -> Self {
		Self { ranges: SmallVec::new() }
	}

	/// A selection of exactly one range.
	pub fn single(range: Range) -> Self {
		Self { ranges: SmallVec::from_buf([range]) }
	}

	/// Build a selection from an arbitrary (possibly unsorted, possibly
	/// overlapping) set of ranges, normalizing as the invariants require.
	pub fn from_ranges(ranges: Vec<Range>) -> Self {
		let mut sel = Self { ranges: ranges.into() };
		sel.normalize();
		sel
	}

	/// A selection covering the full document.
	pub fn full(doc: &Rope) -> Self {
		Self::single(Range::new(0, doc.len_chars()))
	}

	pub fn ranges(&self) -> &[Range] {
		&self.ranges
	}

	pub fn is_empty(&self) -> bool {
		self.ranges.is_empty()
	}

	pub fn len(&self) -> usize {
		self.ranges.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Range> {
		self.ranges.iter()
	}

	/// 1-indexed range selection, per the `nth` command.
	pub fn nth(&self, n: usize) -> Option<Range> {
		n.checked_sub(1).and_then(|i| self.ranges.get(i)).copied()
	}

	/// Extend every range to cover its full logical line(s), then coalesce
	/// newly-touching or overlapping ranges.
	pub fn widen_lines(&self, doc: &Rope) -> Self {
		let widened: Vec<Range> = self.ranges.iter().map(|r| r.widen_to_lines(doc)).collect();
		Self::from_ranges(widened)
	}

	fn normalize(&mut self) {
		if self.ranges.len() <= 1 {
			return;
		}
		self.ranges.sort_by_key(|r| r.start);

		let mut merged: SmallVec<[Range; 1]> = SmallVec::new();
		for range in self.ranges.iter() {
			match merged.last_mut() {
				Some(last) if last.overlaps(range) || last.touches(range) => {
					*last = last.merge(range);
				}
				_ => merged.push(*range),
			}
		}
		self.ranges = merged;
	}
}

impl From<Range> for Selection {
	fn from(range: Range) -> Self {
		Self::single(range)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rope(s: &str) -> Rope {
		Rope::from_str(s)
	}

	#[test]
	fn empty_selection_is_valid() {
		let sel = Selection::empty();
		assert!(sel.is_empty());
		assert_eq!(sel.len(), 0);
	}

	#[test]
	fn touching_ranges_are_coalesced() {
		let sel = Selection::from_ranges(vec![Range::new(0, 5), Range::new(5, 10)]);
		assert_eq!(sel.len(), 1);
		assert_eq!(sel.ranges()[0], Range::new(0, 10));
	}

	#[test]
	fn overlapping_ranges_are_merged() {
		let sel = Selection::from_ranges(vec![Range::new(0, 10), Range::new(5, 15)]);
		assert_eq!(sel.len(), 1);
		assert_eq!(sel.ranges()[0], Range::new(0, 15));
	}

	#[test]
	fn gapped_ranges_stay_separate_and_sorted() {
		let sel = Selection::from_ranges(vec![Range::new(20, 25), Range::new(0, 5)]);
		assert_eq!(sel.len(), 2);
		assert_eq!(sel.ranges()[0], Range::new(0, 5));
		assert_eq!(sel.ranges()[1], Range::new(20, 25));
	}

	#[test]
	fn nth_is_one_indexed() {
		let sel = Selection::from_ranges(vec![Range::new(0, 5), Range::new(20, 25)]);
		assert_eq!(sel.nth(1), Some(Range::new(0, 5)));
		assert_eq!(sel.nth(2), Some(Range::new(20, 25)));
		assert_eq!(sel.nth(0), None);
		assert_eq!(sel.nth(3), None);
	}

	#[test]
	fn full_spans_whole_document() {
		let doc = rope("hello\nworld\n");
		let sel = Selection::full(&doc);
		assert_eq!(sel.ranges(), &[Range::new(0, doc.len_chars())]);
	}

	#[test]
	fn widen_lines_is_idempotent() {
		let doc = rope("foo 1\nfoo 2\nbar 3\n");
		let sel = Selection::single(Range::new(6, 9));
		let once = sel.widen_lines(&doc);
		let twice = once.widen_lines(&doc);
		assert_eq!(once, twice);
	}
}

/// Property tests for the quantified invariants in the selection algebra:
/// ranges stay sorted, non-overlapping, and in-bounds no matter how the
/// input ranges were ordered or overlapping.
#[cfg(test)]
mod invariants {
	use proptest::prelude::*;

	use super::*;

	fn arb_range(bound: usize) -> impl Strategy<Value = Range> {
		(0..=bound, 0..=bound).prop_map(|(a, b)| Range::new(a.min(b), a.max(b)))
	}

	proptest! {
		#[test]
		fn normalized_selection_is_sorted_and_non_overlapping(
			raw in prop::collection::vec(arb_range(200), 0..20)
		) {
			let sel = Selection::from_ranges(raw);
			let ranges = sel.ranges();
			for w in ranges.windows(2) {
				prop_assert!(w[0].start <= w[1].start);
				prop_assert!(w[0].end <= w[1].start, "ranges must not overlap or touch after normalization");
			}
		}

		#[test]
		fn widen_lines_is_idempotent_prop(
			raw in prop::collection::vec(arb_range(60), 0..10)
		) {
			let doc = Rope::from_str("foo 1\nfoo 2\nbar 3\nquux 4\n");
			let len = doc.len_chars();
			let clipped: Vec<Range> = raw.into_iter().map(|r| Range::new(r.start.min(len), r.end.min(len))).collect();
			let sel = Selection::from_ranges(clipped);
			let once = sel.widen_lines(&doc);
			let twice = once.widen_lines(&doc);
			prop_assert_eq!(once, twice);
		}
	}
}
