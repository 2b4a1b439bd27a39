//! File system access used by the generator.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// A directory entry returned by [`Storage::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Asynchronous, fallible file access.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read a UTF-8 file.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// List the entries of a directory, sorted by name.
    async fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Write a UTF-8 file. Fails if the parent directory does not exist.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Create a directory and all of its parents.
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// [`Storage`] backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

#[async_trait]
impl Storage for FsStorage {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut reader = tokio::fs::read_dir(path).await?;
        let mut entries = Vec::new();

        while let Some(entry) = reader.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!("Skipping non UTF-8 entry in {}", path.display());
                continue;
            };
            let is_dir = entry.file_type().await?.is_dir();
            entries.push(DirEntry { name, is_dir });
        }

        entries.sort();
        Ok(entries)
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }
}

/// Write `contents` to `dir/name`.
///
/// If the first write fails the directory is created and the write retried
/// once; a second failure is returned.
pub async fn write_file<S: Storage + ?Sized>(
    storage: &S,
    dir: &Path,
    name: &str,
    contents: &str,
) -> io::Result<PathBuf> {
    let path = dir.join(name);

    if let Err(e) = storage.write(&path, contents).await {
        tracing::warn!("{} is not writable ({}), creating it", dir.display(), e);
        storage.create_dir_all(dir).await?;
        storage.write(&path, contents).await?;
    }

    tracing::info!("Wrote {}", path.display());
    Ok(path)
}
