//! Error types for the pipeline module.

use std::path::PathBuf;
use thiserror::Error;

use crate::placer::PlacerError;

/// Why a file was not (fully) placed.
///
/// Extraction and formatting never fail; only strict matching, slot
/// conflicts and the file system produce these.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// No event number in the name while strict matching is on.
    #[error("Unable to extract an event number from {file}")]
    ParseIncomplete { file: String },

    /// An incumbent with the same resolution was kept.
    #[error("{} already exists in {} with the same resolution", file_name(.existing), parent(.existing))]
    SlotConflictSameRes {
        candidate: PathBuf,
        existing: PathBuf,
    },

    /// An incumbent with a higher resolution was kept.
    #[error("{} already exists in {} with a higher resolution", file_name(.existing), parent(.existing))]
    SlotConflictLowerRes {
        candidate: PathBuf,
        existing: PathBuf,
    },

    /// The file is already at its rendered path.
    #[error("{} is already in place", .path.display())]
    IdenticalPathNoOp { path: PathBuf },

    /// A move, delete or directory operation failed.
    #[error("Could not {action} {}", .path.display())]
    FileSystemFailure {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: PlacerError,
    },
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn parent(path: &std::path::Path) -> String {
    path.parent()
        .map(|p| p.display().to_string())
        .unwrap_or_default()
}

impl ProcessError {
    pub fn file_system(action: &'static str, path: impl Into<PathBuf>, source: PlacerError) -> Self {
        Self::FileSystemFailure {
            action,
            path: path.into(),
            source,
        }
    }

    /// Fatal errors indicate a failed job; the rest are reported outcomes.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ParseIncomplete { .. } | Self::FileSystemFailure { .. }
        )
    }
}
