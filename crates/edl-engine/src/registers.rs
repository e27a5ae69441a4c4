use std::collections::HashMap;
use std::path::PathBuf;

use edl_base::Selection;

/// A named, session-scoped snapshot of a selection and the text it covered
/// at save time. Registers survive across EDL script invocations within one
/// agent session (the caller holds the [`RegisterStore`] across calls to
/// `run_script`) but not across process restarts.
#[derive(Debug, Clone)]
pub struct RegisterEntry {
	pub saved_id: u64,
	pub path: PathBuf,
	pub selection: Selection,
	pub captured_text: String,
}

/// Session-scoped register store. Value semantics: a register holds its own
/// copy of its selection and text, so later document mutations never
/// invalidate a saved register (though `load` still validates the saved
/// ranges are in bounds for the document's *current* text — see
/// `EdlError::StaleRegister`).
#[derive(Debug, Clone, Default)]
pub struct RegisterStore {
	entries: HashMap<String, RegisterEntry>,
	next_saved_id: u64,
}

impl RegisterStore {
	pub fn new() -> Self {
		Self { entries: HashMap::new(), next_saved_id: 1 }
	}

	/// `save NAME` — overwrites any prior entry under `name`, no implicit append.
	pub fn save(&mut self, name: impl Into<String>, path: PathBuf, selection: Selection, captured_text: String) -> u64 {
		let saved_id = self.next_saved_id;
		self.next_saved_id += 1;
		self.entries.insert(name.into(), RegisterEntry { saved_id, path, selection, captured_text });
		saved_id
	}

	pub fn get(&self, name: &str) -> Option<&RegisterEntry> {
		self.entries.get(name)
	}
}

#[cfg(test)]
mod tests {
	use edl_base::Range;

	use super::*;

	#[test]
	fn save_overwrites_prior_entry() {
		let mut store = RegisterStore::new();
		let sel_a = Selection::single(Range::new(0, 1));
		let sel_b = Selection::single(Range::new(2, 3));
		let first_id = store.save("A", "/p/a.ts".into(), sel_a, "a".into());
		let second_id = store.save("A", "/p/a.ts".into(), sel_b.clone(), "b".into());
		assert_ne!(first_id, second_id);
		let entry = store.get("A").unwrap();
		assert_eq!(entry.selection, sel_b);
		assert_eq!(entry.captured_text, "b");
	}

	#[test]
	fn unknown_register_is_none() {
		let store = RegisterStore::new();
		assert!(store.get("nope").is_none());
	}
}
