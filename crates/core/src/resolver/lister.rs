//! Directory listing used as the conflict oracle.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Lists directory contents. A missing directory lists as empty.
#[async_trait]
pub trait DirectoryLister: Send + Sync {
    /// Regular files directly inside `dir`, sorted by path.
    async fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Sub-directories directly inside `dir`, sorted by path.
    async fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Lists the real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl FsLister {
    async fn list(dir: &Path, want_dirs: bool) -> io::Result<Vec<PathBuf>> {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            let keep = if want_dirs {
                file_type.is_dir()
            } else {
                file_type.is_file()
            };
            if keep {
                paths.push(entry.path());
            }
        }
        paths.sort();
        Ok(paths)
    }
}

#[async_trait]
impl DirectoryLister for FsLister {
    async fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        Self::list(dir, false).await
    }

    async fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        Self::list(dir, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_dir_lists_empty() {
        let temp = TempDir::new().unwrap();
        let files = FsLister
            .list_files(&temp.path().join("nope"))
            .await
            .unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_lists_files_and_dirs_separately() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.mkv"), "x").await.unwrap();
        fs::write(temp.path().join("a.mkv"), "x").await.unwrap();
        fs::create_dir(temp.path().join("UFC 300")).await.unwrap();

        let files = FsLister.list_files(temp.path()).await.unwrap();
        assert_eq!(
            files,
            vec![temp.path().join("a.mkv"), temp.path().join("b.mkv")]
        );

        let dirs = FsLister.list_dirs(temp.path()).await.unwrap();
        assert_eq!(dirs, vec![temp.path().join("UFC 300")]);
    }
}
