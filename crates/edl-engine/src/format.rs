//! Renders a [`RunOutput`] as the result envelope described in spec.md §6:
//! a machine-readable JSON prefix behind a distinguishable marker, followed
//! by a compact human-readable trace.

use crate::result::{FileMutationSummary, RunOutput};

/// Marks the start of the machine-readable payload so downstream consumers
/// (e.g. chat-context tracking) can split the envelope without parsing the
/// whole thing as JSON.
pub const RESULT_MARKER: &str = "<<<EDL_RESULT>>>";

pub fn render_envelope(output: &RunOutput) -> String {
	let json = serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string());
	format!("{RESULT_MARKER}\n{json}\n{}", render_human(output))
}

/// One line per changed file, e.g. `src/foo.ts: 3 replace, 1 insert (+5/-2)`,
/// followed by any file errors and an overall status line.
pub fn render_human(output: &RunOutput) -> String {
	let mut lines = Vec::new();
	for mutation in &output.mutations {
		lines.push(format!("{}: {}", mutation.path.display(), summarize(&mutation.summary)));
	}
	if !output.file_errors.is_empty() {
		lines.push(format!("{} file error(s):", output.file_errors.len()));
		for file_error in &output.file_errors {
			lines.push(format!("  {}: {}", file_error.path.display(), file_error.message));
		}
	}
	let status = if output.is_clean_success() { "success" } else { "success with file errors" };
	lines.push(format!("status: {status}"));
	lines.join("\n")
}

fn summarize(summary: &FileMutationSummary) -> String {
	let mut parts = Vec::new();
	if summary.replacements > 0 {
		parts.push(format!("{} replace", summary.replacements));
	}
	if summary.insertions > 0 {
		parts.push(format!("{} insert", summary.insertions));
	}
	if summary.deletions > 0 {
		parts.push(format!("{} delete", summary.deletions));
	}
	let ops = if parts.is_empty() { "no changes".to_string() } else { parts.join(", ") };
	format!("{ops} (+{}/-{})", summary.lines_added, summary.lines_removed)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::result::{FinalSelection, MutationEntry, TraceEntry, TraceOutcome};

	#[test]
	fn renders_one_line_per_mutation() {
		let output = RunOutput {
			mutations: vec![MutationEntry {
				path: "src/foo.ts".into(),
				content: "ignored".into(),
				summary: FileMutationSummary { replacements: 3, insertions: 1, deletions: 0, lines_added: 5, lines_removed: 2 },
			}],
			trace: vec![TraceEntry { line: 1, command: "replace", outcome: TraceOutcome::Applied { detail: "1 ranges".into() } }],
			file_errors: vec![],
			final_selection: None::<FinalSelection>,
		};
		let human = render_human(&output);
		assert_eq!(human, "src/foo.ts: 3 replace, 1 insert (+5/-2)\nstatus: success");
	}

	#[test]
	fn envelope_starts_with_marker() {
		let output = RunOutput { mutations: vec![], trace: vec![], file_errors: vec![], final_selection: None };
		assert!(render_envelope(&output).starts_with(RESULT_MARKER));
	}
}
