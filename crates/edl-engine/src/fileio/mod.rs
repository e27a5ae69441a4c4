//! The `FileIO` capability the executor and commit phase consume — the
//! engine's only I/O surface, per spec.md §6.

pub mod fs;
pub mod mem;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// An I/O failure surfaced by a [`FileIo`] implementation.
#[derive(Debug, Error)]
pub enum FileIoError {
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// The small file-I/O capability EDL consumes. Implementations are expected
/// to be safe to call concurrently across unrelated script invocations (the
/// engine does not arbitrate file-level contention with external writers,
/// per spec.md §5).
#[async_trait]
pub trait FileIo: Send + Sync {
	async fn read_file(&self, path: &Path) -> Result<String, FileIoError>;

	/// Must perform a single atomic operation (temp file + rename) so a
	/// reader never observes a torn write.
	async fn write_file(&self, path: &Path, content: &str) -> Result<(), FileIoError>;

	async fn file_exists(&self, path: &Path) -> Result<bool, FileIoError>;

	/// Create `path` and all missing parent directories. Called for a
	/// `newfile`'s parent directory before commit writes it.
	async fn mkdir_p(&self, path: &Path) -> Result<(), FileIoError>;
}
