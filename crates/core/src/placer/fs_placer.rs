//! File system placer implementation.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, warn};

use super::config::PlacerConfig;
use super::error::PlacerError;
use super::traits::Placer;
use super::types::{CreatedDirs, PlacedFile, PlacementMethod, PlacementRequest};

/// File system based placer implementation.
pub struct FsPlacer {
    config: PlacerConfig,
}

impl FsPlacer {
    /// Creates a new file system placer with the given configuration.
    pub fn new(config: PlacerConfig) -> Self {
        Self { config }
    }

    /// Creates a placer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PlacerConfig::default())
    }

    /// Attempts to move a file atomically (rename).
    async fn try_atomic_move(source: &Path, destination: &Path) -> Result<bool, std::io::Error> {
        match fs::rename(source, destination).await {
            Ok(()) => Ok(true),
            Err(e) => {
                // Cross-filesystem moves fail with EXDEV (18 on Linux)
                if e.kind() == std::io::ErrorKind::CrossesDevices || e.raw_os_error() == Some(18) {
                    Ok(false)
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Hidden sibling the copy is written to before being renamed into place.
    fn partial_path(destination: &Path) -> PathBuf {
        let name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        destination.with_file_name(format!(".{}.partial", name))
    }

    /// Copies a file, hashing the bytes read when `calculate_checksum` is set.
    async fn copy_file(
        &self,
        source: &Path,
        destination: &Path,
        calculate_checksum: bool,
    ) -> Result<(u64, Option<String>), PlacerError> {
        let source_file = File::open(source).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlacerError::SourceNotFound {
                    path: source.to_path_buf(),
                }
            } else {
                PlacerError::Io(e)
            }
        })?;

        let dest_file = File::create(destination).await.map_err(|e| {
            PlacerError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
        })?;

        let mut reader = BufReader::with_capacity(self.config.buffer_size, source_file);
        let mut writer = BufWriter::with_capacity(self.config.buffer_size, dest_file);

        let mut hasher = if calculate_checksum {
            Some(Sha256::new())
        } else {
            None
        };

        let mut total_bytes = 0u64;
        let mut buffer = vec![0u8; self.config.buffer_size];

        loop {
            let bytes_read = reader.read(&mut buffer).await.map_err(|e| {
                PlacerError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
            })?;

            if bytes_read == 0 {
                break;
            }

            if let Some(ref mut h) = hasher {
                h.update(&buffer[..bytes_read]);
            }

            writer.write_all(&buffer[..bytes_read]).await.map_err(|e| {
                PlacerError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
            })?;

            total_bytes += bytes_read as u64;
        }

        writer.flush().await.map_err(|e| {
            PlacerError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
        })?;

        let checksum = hasher.map(|h| format!("{:x}", h.finalize()));

        Ok((total_bytes, checksum))
    }

    /// SHA-256 of a file on disk.
    async fn calculate_checksum(&self, path: &Path) -> Result<String, PlacerError> {
        let file = File::open(path).await?;
        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut buffer = vec![0u8; self.config.buffer_size];
        let mut hasher = Sha256::new();

        loop {
            let bytes_read = reader.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Creates missing parent directories, recording each one created.
    async fn ensure_parent_dirs(
        &self,
        path: &Path,
        created: &mut CreatedDirs,
    ) -> Result<(), PlacerError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                let mut dirs_to_create = Vec::new();
                let mut current = parent;

                while !current.exists() {
                    dirs_to_create.push(current.to_path_buf());
                    current = match current.parent() {
                        Some(p) => p,
                        None => break,
                    };
                }

                fs::create_dir_all(parent).await.map_err(|e| {
                    PlacerError::DirectoryCreationFailed {
                        path: parent.to_path_buf(),
                        source: e,
                    }
                })?;

                for dir in dirs_to_create.into_iter().rev() {
                    created.record(dir);
                }
            }
        }
        Ok(())
    }

    /// Copies through the partial sibling and renames it into place.
    async fn copy_into_place(
        &self,
        request: &PlacementRequest,
    ) -> Result<(u64, Option<String>), PlacerError> {
        let partial = Self::partial_path(&request.destination);

        let result: Result<(u64, Option<String>), PlacerError> = async {
            let (size, checksum) = self
                .copy_file(&request.source, &partial, self.config.verify_checksums)
                .await?;

            if let Some(ref expected) = checksum {
                let actual = self.calculate_checksum(&partial).await?;
                if &actual != expected {
                    return Err(PlacerError::ChecksumMismatch {
                        path: request.destination.clone(),
                        expected: expected.clone(),
                        actual,
                    });
                }
            }

            fs::rename(&partial, &request.destination)
                .await
                .map_err(|e| PlacerError::move_failed(partial.clone(), request.destination.clone(), e))?;

            Ok((size, checksum))
        }
        .await;

        if result.is_err() && partial.exists() {
            let _ = fs::remove_file(&partial).await;
        }
        let (size, checksum) = result?;

        // The copy is in place; a leftover source is only a duplicate.
        if let Err(e) = fs::remove_file(&request.source).await {
            warn!(
                "Failed to remove source file {} after copy: {}",
                request.source.display(),
                e
            );
        }

        Ok((size, checksum))
    }

    async fn transfer(&self, request: &PlacementRequest) -> Result<PlacedFile, PlacerError> {
        if self.config.prefer_atomic_moves
            && Self::try_atomic_move(&request.source, &request.destination)
                .await
                .map_err(|e| {
                    PlacerError::move_failed(
                        request.source.clone(),
                        request.destination.clone(),
                        e,
                    )
                })?
        {
            let meta = fs::metadata(&request.destination).await?;
            return Ok(PlacedFile {
                destination: request.destination.clone(),
                size_bytes: meta.len(),
                method: PlacementMethod::Rename,
                checksum: None,
            });
        }

        let (size_bytes, checksum) = self.copy_into_place(request).await?;
        Ok(PlacedFile {
            destination: request.destination.clone(),
            size_bytes,
            method: PlacementMethod::Copy,
            checksum,
        })
    }

    /// Removes directories created for a failed placement, innermost first.
    /// Only empty directories are removed.
    async fn rollback_dirs(&self, created: CreatedDirs) {
        for dir in created.dirs.iter().rev() {
            match self.remove_dir_if_empty(dir).await {
                Ok(true) => debug!("Rolled back directory {}", dir.display()),
                Ok(false) => {}
                Err(e) => warn!("Failed to roll back directory {}: {}", dir.display(), e),
            }
        }
    }
}

#[async_trait]
impl Placer for FsPlacer {
    fn name(&self) -> &str {
        "fs"
    }

    async fn place(&self, request: &PlacementRequest) -> Result<PlacedFile, PlacerError> {
        if !fs::try_exists(&request.source).await.unwrap_or(false) {
            return Err(PlacerError::SourceNotFound {
                path: request.source.clone(),
            });
        }

        if fs::try_exists(&request.destination).await.unwrap_or(false) {
            return Err(PlacerError::DestinationExists {
                path: request.destination.clone(),
            });
        }

        let mut created = CreatedDirs::default();
        self.ensure_parent_dirs(&request.destination, &mut created)
            .await?;

        match self.transfer(request).await {
            Ok(placed) => {
                debug!(
                    "Placed {} at {} ({:?}, {} bytes)",
                    request.source.display(),
                    placed.destination.display(),
                    placed.method,
                    placed.size_bytes
                );
                Ok(placed)
            }
            Err(e) => {
                if !created.is_empty() {
                    self.rollback_dirs(created).await;
                }
                Err(e)
            }
        }
    }

    async fn remove(&self, path: &Path) -> Result<(), PlacerError> {
        fs::remove_file(path)
            .await
            .map_err(|e| PlacerError::RemoveFailed {
                path: path.to_path_buf(),
                source: e,
            })
    }

    async fn remove_dir_if_empty(&self, dir: &Path) -> Result<bool, PlacerError> {
        let mut entries = fs::read_dir(dir)
            .await
            .map_err(|e| PlacerError::ListFailed {
                path: dir.to_path_buf(),
                source: e,
            })?;

        if entries.next_entry().await?.is_some() {
            return Ok(false);
        }

        fs::remove_dir(dir).await?;
        Ok(true)
    }
}
