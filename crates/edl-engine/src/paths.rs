use std::path::{Path, PathBuf};

/// Resolve a path literal from a script against a caller-supplied working
/// directory, performing `~` expansion and relative-path resolution per
/// spec.md §6: "Paths passed to FileIO are always absolute; the engine
/// performs `~` and relative-path resolution against a caller-supplied
/// working directory before calling FileIO."
pub fn resolve(cwd: &Path, raw: &str) -> PathBuf {
	let expanded = expand_home(raw);
	if expanded.is_absolute() { expanded } else { cwd.join(expanded) }
}

fn expand_home(raw: &str) -> PathBuf {
	if raw == "~" {
		return dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw));
	}
	if let Some(rest) = raw.strip_prefix("~/") {
		if let Some(home) = dirs::home_dir() {
			return home.join(rest);
		}
	}
	PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn absolute_paths_pass_through() {
		let cwd = Path::new("/work");
		assert_eq!(resolve(cwd, "/p/a.ts"), PathBuf::from("/p/a.ts"));
	}

	#[test]
	fn relative_paths_join_cwd() {
		let cwd = Path::new("/work");
		assert_eq!(resolve(cwd, "src/a.ts"), PathBuf::from("/work/src/a.ts"));
	}
}
