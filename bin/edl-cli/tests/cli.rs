//! End-to-end smoke test driving the compiled `edl` binary directly,
//! grounded on the teacher's process-spawning e2e style
//! (`crates/editor/tests/broker_e2e.rs`).

use std::io::Write;
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn replaces_text_in_a_real_file() {
	let dir = tempdir().unwrap();
	let file_path = dir.path().join("a.ts");
	std::fs::write(&file_path, "const x = 1;\n").unwrap();

	let script = "file `a.ts`\nselect_one <<END\nconst x = 1;\nEND\nreplace <<END\nconst x = 42;\nEND\n";

	let mut child = Command::new(env!("CARGO_BIN_EXE_edl"))
		.arg("--cwd")
		.arg(dir.path())
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.expect("failed to spawn edl binary");

	child.stdin.take().unwrap().write_all(script.as_bytes()).unwrap();
	let output = child.wait_with_output().unwrap();

	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
	let stdout = String::from_utf8(output.stdout).unwrap();
	assert!(stdout.contains(edl_engine::RESULT_MARKER));

	let final_content = std::fs::read_to_string(&file_path).unwrap();
	assert_eq!(final_content, "const x = 42;\n");
}
