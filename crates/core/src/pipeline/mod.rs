//! End-to-end sorting of downloaded fight videos.
//!
//! For each source file the [`Sorter`]:
//!
//! 1. extracts the event record from the file name
//! 2. enforces strict matching, or recovers fighter names from the library
//! 3. renders the destination path
//! 4. scans the destination slot and resolves the conflict
//! 5. places the file, then deletes any replaced incumbents
//!
//! Dry runs stop after step 4 and report what would happen.

mod error;
mod job;
mod sorter;
mod types;

pub use error::ProcessError;
pub use job::{find_largest_video, videos_in};
pub use sorter::Sorter;
pub use types::{SortOutcome, SortPlan, SortSettings};
