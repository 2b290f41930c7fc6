//! Placer module for moving files into the library.
//!
//! This module provides the `Placer` trait and a file-system implementation
//! that never leaves a partially written file at the destination.
//!
//! # Features
//!
//! - Atomic rename when source and destination share a filesystem
//! - Copy into a hidden sibling followed by a rename when they don't
//! - Optional SHA-256 verification of copies
//! - Automatic parent directory creation, rolled back on failure
//! - Destinations are never overwritten
//!
//! # Example
//!
//! ```ignore
//! use fightsort_core::placer::{FsPlacer, Placer, PlacementRequest};
//!
//! let placer = FsPlacer::with_defaults();
//! let placed = placer
//!     .place(&PlacementRequest::new(
//!         "/downloads/job/UFC.300.Pereira.vs.Hill.1080p.mkv",
//!         "/mnt/media/Sport/UFC 300/UFC 300 Pereira vs Hill {Main Event} [1080p].mkv",
//!     ))
//!     .await?;
//! println!("Placed {} bytes", placed.size_bytes);
//! ```

mod config;
mod error;
mod fs_placer;
mod traits;
mod types;

pub use config::PlacerConfig;
pub use error::PlacerError;
pub use fs_placer::FsPlacer;
pub use traits::Placer;
pub use types::{PlacedFile, PlacementMethod, PlacementRequest};
