//! Mock placer for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::MemoryLister;
use crate::placer::{PlacedFile, PlacementMethod, PlacementRequest, Placer, PlacerError};

/// A file-system operation the mock was asked to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacerOp {
    Place(PlacementRequest),
    Remove(PathBuf),
    RemoveDir(PathBuf),
}

/// Mock implementation of the Placer trait.
///
/// Records successful operations in order and can be primed to fail the
/// next one. When built with [`with_lister`](Self::with_lister) it also
/// keeps a [`MemoryLister`] in sync, so later scans see earlier moves.
///
/// # Example
///
/// ```rust,ignore
/// use fightsort_core::testing::{MemoryLister, MockPlacer};
///
/// let lister = MemoryLister::new();
/// let placer = MockPlacer::with_lister(lister.clone());
///
/// placer.place(&request).await?;
/// assert_eq!(placer.recorded_placements().await.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockPlacer {
    ops: Arc<RwLock<Vec<PlacerOp>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<PlacerError>>>,
    lister: Option<MemoryLister>,
}

impl MockPlacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that mirrors its placements into `lister`.
    pub fn with_lister(lister: MemoryLister) -> Self {
        Self {
            lister: Some(lister),
            ..Self::default()
        }
    }

    /// All successful operations, in order.
    pub async fn operations(&self) -> Vec<PlacerOp> {
        self.ops.read().await.clone()
    }

    /// Successful placements.
    pub async fn recorded_placements(&self) -> Vec<PlacementRequest> {
        self.ops
            .read()
            .await
            .iter()
            .filter_map(|op| match op {
                PlacerOp::Place(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    /// Successfully removed files.
    pub async fn recorded_removals(&self) -> Vec<PathBuf> {
        self.ops
            .read()
            .await
            .iter()
            .filter_map(|op| match op {
                PlacerOp::Remove(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: PlacerError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<PlacerError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl Placer for MockPlacer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn place(&self, request: &PlacementRequest) -> Result<PlacedFile, PlacerError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        if let Some(lister) = &self.lister {
            if lister.contains_file(&request.destination).await {
                return Err(PlacerError::DestinationExists {
                    path: request.destination.clone(),
                });
            }
            lister.remove_file(&request.source).await;
            lister.add_file(&request.destination).await;
        }

        self.ops.write().await.push(PlacerOp::Place(request.clone()));

        Ok(PlacedFile {
            destination: request.destination.clone(),
            size_bytes: 0,
            method: PlacementMethod::Rename,
            checksum: None,
        })
    }

    async fn remove(&self, path: &Path) -> Result<(), PlacerError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        if let Some(lister) = &self.lister {
            lister.remove_file(path).await;
        }
        self.ops.write().await.push(PlacerOp::Remove(path.to_path_buf()));
        Ok(())
    }

    async fn remove_dir_if_empty(&self, dir: &Path) -> Result<bool, PlacerError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.ops.write().await.push(PlacerOp::RemoveDir(dir.to_path_buf()));
        Ok(true)
    }
}
