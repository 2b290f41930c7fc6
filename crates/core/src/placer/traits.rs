//! Trait definitions for the placer module.

use async_trait::async_trait;
use std::path::Path;

use super::error::PlacerError;
use super::types::{PlacedFile, PlacementRequest};

/// Moves files into the library and removes replaced ones.
#[async_trait]
pub trait Placer: Send + Sync {
    /// Returns the name of this placer implementation.
    fn name(&self) -> &str;

    /// Moves `request.source` to `request.destination`, creating missing
    /// parent directories. Fails if the destination exists.
    async fn place(&self, request: &PlacementRequest) -> Result<PlacedFile, PlacerError>;

    /// Deletes a file that has been superseded.
    async fn remove(&self, path: &Path) -> Result<(), PlacerError>;

    /// Removes `dir` if it is empty. Returns whether it was removed.
    async fn remove_dir_if_empty(&self, dir: &Path) -> Result<bool, PlacerError>;
}
