//! Metadata extraction from release file names.
//!
//! Extraction is a best-effort pattern match over a normalized copy of the
//! name. It never fails: anything that does not match is left empty (or at
//! its default, for the edition). Whether an empty event number is an error
//! is up to the caller.
//!
//! # Example
//!
//! ```
//! use fightsort_core::extractor::{extract, Edition};
//!
//! let info = extract("UFC.Fight.Night.248.Early.Prelims.Holm.vs.Bueno.Silva.1080p.mkv");
//! assert_eq!(info.event_number, "UFC Fight Night 248");
//! assert_eq!(info.edition, Edition::EarlyPrelims);
//! assert_eq!(info.fighter_names, vec!["Holm", "Bueno Silva"]);
//! assert_eq!(info.resolution.unwrap().as_str(), "1080p");
//! ```

mod rules;
mod types;

pub use types::{Edition, Resolution, ResolutionRank, VideoInfo};

use std::path::{Path, PathBuf};

/// Extensions stripped before matching. Anything else after the last dot is
/// treated as part of the name.
const KNOWN_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "mov", "m4v", "ts", "wmv", "webm", "mpg", "mpeg", "srt", "nfo",
];

/// Extracts metadata from a file (or folder) name.
///
/// The returned record has an empty `source_path`; use [`extract_path`] when
/// the record will drive a move.
pub fn extract(file_name: &str) -> VideoInfo {
    let text = rules::normalize(strip_extension(file_name));
    let event = rules::event_number(&text);

    let fighter_names = rules::fighter_names(&text, event.as_ref().map(|e| e.span.clone()));

    VideoInfo {
        event_number: event.map(|e| e.display).unwrap_or_default(),
        fighter_names,
        edition: rules::edition(&text),
        resolution: rules::resolution(&text),
        source_path: PathBuf::new(),
    }
}

/// Extracts metadata from the file name of `path` and records the path.
pub fn extract_path(path: &Path) -> VideoInfo {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    VideoInfo {
        source_path: path.to_path_buf(),
        ..extract(&file_name)
    }
}

fn strip_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, ext))
            if KNOWN_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext)) =>
        {
            stem
        }
        _ => file_name,
    }
}
