//! Types for the placer module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single file placement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRequest {
    /// Source file path.
    pub source: PathBuf,
    /// Destination file path.
    pub destination: PathBuf,
}

impl PlacementRequest {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// How a file ended up at its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMethod {
    /// Same-filesystem rename.
    Rename,
    /// Copy followed by source removal.
    Copy,
}

/// Information about a placed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedFile {
    /// Final destination path.
    pub destination: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    pub method: PlacementMethod,
    /// SHA-256 of the copy, if verified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

/// Directories created while placing one file, for cleanup on failure.
#[derive(Debug, Clone, Default)]
pub(crate) struct CreatedDirs {
    /// Outermost first.
    pub dirs: Vec<PathBuf>,
}

impl CreatedDirs {
    pub fn record(&mut self, path: PathBuf) {
        self.dirs.push(path);
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_dirs_record() {
        let mut created = CreatedDirs::default();
        assert!(created.is_empty());
        created.record(PathBuf::from("/lib/UFC 300"));
        created.record(PathBuf::from("/lib/UFC 300/Prelims"));
        assert_eq!(created.dirs.len(), 2);
    }

    #[test]
    fn test_placement_request_new() {
        let request = PlacementRequest::new("/dl/a.mkv", "/lib/UFC 300/a.mkv");
        assert_eq!(request.source, PathBuf::from("/dl/a.mkv"));
        assert_eq!(request.destination, PathBuf::from("/lib/UFC 300/a.mkv"));
    }
}
