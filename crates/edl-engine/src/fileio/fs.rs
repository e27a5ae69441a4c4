use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{FileIo, FileIoError};

/// The real filesystem [`FileIo`]. Writes go through a sibling temp file and
/// `rename`, so a crash or concurrent reader never observes a torn write.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileIo;

#[async_trait]
impl FileIo for RealFileIo {
	async fn read_file(&self, path: &Path) -> Result<String, FileIoError> {
		Ok(tokio::fs::read_to_string(path).await?)
	}

	async fn write_file(&self, path: &Path, content: &str) -> Result<(), FileIoError> {
		let path = path.to_path_buf();
		let content = content.to_string();
		tokio::task::spawn_blocking(move || write_atomic(&path, &content))
			.await
			.expect("write_file blocking task panicked")
			.map_err(FileIoError::from)
	}

	async fn file_exists(&self, path: &Path) -> Result<bool, FileIoError> {
		Ok(tokio::fs::try_exists(path).await?)
	}

	async fn mkdir_p(&self, path: &Path) -> Result<(), FileIoError> {
		Ok(tokio::fs::create_dir_all(path).await?)
	}
}

fn write_atomic(path: &PathBuf, content: &str) -> std::io::Result<()> {
	let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
	let mut tmp = tempfile::Builder::new().prefix(".edl-tmp-").tempfile_in(dir)?;
	tmp.write_all(content.as_bytes())?;
	tmp.flush()?;
	tmp.persist(path).map_err(|e| e.error)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use tempfile::tempdir;

	use super::*;

	#[tokio::test]
	async fn write_then_read_round_trips() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("a.ts");
		let io = RealFileIo;
		io.write_file(&path, "hello\n").await.unwrap();
		let content = io.read_file(&path).await.unwrap();
		assert_eq!(content, "hello\n");
	}

	#[tokio::test]
	async fn file_exists_reflects_disk_state() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("a.ts");
		let io = RealFileIo;
		assert!(!io.file_exists(&path).await.unwrap());
		io.write_file(&path, "x").await.unwrap();
		assert!(io.file_exists(&path).await.unwrap());
	}
}
