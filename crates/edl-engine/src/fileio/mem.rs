use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{FileIo, FileIoError};

/// An in-memory [`FileIo`] used by the test suite. Not part of the public
/// contract — a fixture, not a production implementation.
#[derive(Debug, Default)]
pub struct MemFileIo {
	files: Mutex<HashMap<PathBuf, String>>,
}

impl MemFileIo {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_files(files: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
		let files = files.into_iter().map(|(p, c)| (PathBuf::from(p), c.to_string())).collect();
		Self { files: Mutex::new(files) }
	}

	pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
		self.files.lock().unwrap().get(path.as_ref()).cloned()
	}

	pub fn written_paths(&self) -> Vec<PathBuf> {
		self.files.lock().unwrap().keys().cloned().collect()
	}
}

#[async_trait]
impl FileIo for MemFileIo {
	async fn read_file(&self, path: &Path) -> Result<String, FileIoError> {
		self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
			FileIoError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, path.display().to_string()))
		})
	}

	async fn write_file(&self, path: &Path, content: &str) -> Result<(), FileIoError> {
		self.files.lock().unwrap().insert(path.to_path_buf(), content.to_string());
		Ok(())
	}

	async fn file_exists(&self, path: &Path) -> Result<bool, FileIoError> {
		Ok(self.files.lock().unwrap().contains_key(path))
	}

	async fn mkdir_p(&self, _path: &Path) -> Result<(), FileIoError> {
		Ok(())
	}
}
