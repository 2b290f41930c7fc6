//! Testing utilities and mock implementations.
//!
//! The sorter only reaches the outside world through [`Placer`] and
//! [`DirectoryLister`]; the types here stand in for both so whole sorting
//! runs can be exercised without touching disk.
//!
//! [`Placer`]: crate::placer::Placer
//! [`DirectoryLister`]: crate::resolver::DirectoryLister

mod memory_lister;
mod mock_placer;

pub use memory_lister::MemoryLister;
pub use mock_placer::{MockPlacer, PlacerOp};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::PathBuf;

    use crate::extractor::{Edition, Resolution, VideoInfo};

    /// A record as the extractor would produce it for a downloaded file.
    pub fn video_info(
        event: &str,
        names: &[&str],
        edition: Edition,
        resolution: Option<&str>,
    ) -> VideoInfo {
        VideoInfo {
            event_number: event.to_string(),
            fighter_names: names.iter().map(|n| n.to_string()).collect(),
            edition,
            resolution: resolution.map(Resolution::new),
            source_path: PathBuf::from("/downloads/source.mkv"),
        }
    }

    /// Extensions used by the default configuration.
    pub fn video_extensions() -> Vec<String> {
        ["mp4", "mkv", "avi", "mov"]
            .into_iter()
            .map(String::from)
            .collect()
    }
}
