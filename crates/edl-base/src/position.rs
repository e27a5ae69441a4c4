use std::fmt;

/// A (row, column) location within a document.
///
/// Stored zero-indexed, the convention used throughout the executor and
/// selection algebra. Surface syntax and human-facing output are
/// one-indexed; use [`Position::display_row`]/[`Position::display_column`]
/// (or the `Display` impl) when rendering to a user.
///
/// Columns count Unicode scalar offsets from the start of the line, never
/// byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Position {
	pub row: usize,
	pub column: usize,
}

impl Position {
	pub fn new(row: usize, column: usize) -> Self {
		Self { row, column }
	}

	/// One-indexed row, for surface syntax and human output.
	pub fn display_row(&self) -> usize {
		self.row + 1
	}

	/// One-indexed column, for surface syntax and human output.
	pub fn display_column(&self) -> usize {
		self.column + 1
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.display_row(), self.display_column())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_is_one_indexed() {
		let pos = Position::new(0, 0);
		assert_eq!(pos.display_row(), 1);
		assert_eq!(pos.display_column(), 1);
		assert_eq!(pos.to_string(), "1:1");
	}
}
