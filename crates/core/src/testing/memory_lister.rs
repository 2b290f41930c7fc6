//! In-memory directory lister for testing.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::resolver::DirectoryLister;

#[derive(Debug, Default)]
struct Tree {
    files: BTreeSet<PathBuf>,
    dirs: BTreeSet<PathBuf>,
}

impl Tree {
    fn insert_file(&mut self, path: PathBuf) {
        if let Some(parent) = path.parent() {
            self.insert_dir(parent.to_path_buf());
        }
        self.files.insert(path);
    }

    fn insert_dir(&mut self, path: PathBuf) {
        let mut current = Some(path.as_path());
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(dir.to_path_buf());
            current = dir.parent();
        }
    }
}

/// A fake library tree.
///
/// Clones share the same tree, so a [`MockPlacer`](super::MockPlacer) built
/// with [`with_lister`](super::MockPlacer::with_lister) makes its placements
/// visible here.
#[derive(Debug, Clone, Default)]
pub struct MemoryLister {
    tree: Arc<RwLock<Tree>>,
    fail_listing: Arc<RwLock<bool>>,
}

impl MemoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file (and its parent directories).
    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        if let Ok(mut tree) = self.tree.try_write() {
            tree.insert_file(path.into());
        }
        self
    }

    /// Adds an empty directory (and its parents).
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        if let Ok(mut tree) = self.tree.try_write() {
            tree.insert_dir(path.into());
        }
        self
    }

    pub async fn add_file(&self, path: impl Into<PathBuf>) {
        self.tree.write().await.insert_file(path.into());
    }

    pub async fn remove_file(&self, path: &Path) -> bool {
        self.tree.write().await.files.remove(path)
    }

    pub async fn contains_file(&self, path: &Path) -> bool {
        self.tree.read().await.files.contains(path)
    }

    /// Makes every listing fail until reset.
    pub async fn set_fail_listing(&self, fail: bool) {
        *self.fail_listing.write().await = fail;
    }

    async fn check_failure(&self) -> io::Result<()> {
        if *self.fail_listing.read().await {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "mock listing failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryLister for MemoryLister {
    async fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.check_failure().await?;
        let tree = self.tree.read().await;
        Ok(tree
            .files
            .iter()
            .filter(|f| f.parent() == Some(dir))
            .cloned()
            .collect())
    }

    async fn list_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.check_failure().await?;
        let tree = self.tree.read().await;
        Ok(tree
            .dirs
            .iter()
            .filter(|d| d.parent() == Some(dir))
            .cloned()
            .collect())
    }
}
