use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::formatter::NamingScheme;
use crate::placer::PlacerConfig;
use crate::resolver::ResolvePolicy;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub conflicts: ResolvePolicy,
    #[serde(default)]
    pub naming: NamingScheme,
    #[serde(default)]
    pub placer: PlacerConfig,
}

/// Library location and what counts as a video file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LibraryConfig {
    #[serde(default = "default_destination")]
    pub destination: PathBuf,
    /// Extensions (without the dot) treated as video files
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            destination: default_destination(),
            video_extensions: default_video_extensions(),
        }
    }
}

fn default_destination() -> PathBuf {
    PathBuf::from("/mnt/media/Sport")
}

fn default_video_extensions() -> Vec<String> {
    ["mp4", "mkv", "avi", "mov"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Extraction policy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatchingConfig {
    /// Fail when no event number can be extracted
    #[serde(default)]
    pub strict: bool,
    /// Job categories that always run in strict mode
    #[serde(default = "default_strict_categories")]
    pub strict_categories: Vec<String>,
    /// Borrow fighter names from an existing event folder when the file
    /// name has none
    #[serde(default = "default_true")]
    pub recover_names: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            strict: false,
            strict_categories: default_strict_categories(),
            recover_names: true,
        }
    }
}

impl MatchingConfig {
    /// Whether a job in `category` runs strict.
    pub fn is_strict_for(&self, category: Option<&str>) -> bool {
        self.strict
            || category.is_some_and(|c| {
                self.strict_categories
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(c))
            })
    }
}

fn default_strict_categories() -> Vec<String> {
    vec!["ufc".to_string()]
}

fn default_true() -> bool {
    true
}
