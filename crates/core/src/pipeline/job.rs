//! Picking the file to sort out of a download job directory.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::resolver::{has_video_extension, DirectoryLister};

/// Video files directly inside `dir`, sorted by path.
pub async fn videos_in<L: DirectoryLister + ?Sized>(
    lister: &L,
    dir: &Path,
    video_extensions: &[String],
) -> io::Result<Vec<PathBuf>> {
    let files = lister.list_files(dir).await?;
    Ok(files
        .into_iter()
        .filter(|path| has_video_extension(path, video_extensions))
        .collect())
}

/// The largest video file directly inside `dir`.
///
/// Jobs often ship a sample clip next to the real file, so size decides.
/// Ties go to the first path in sort order.
pub async fn find_largest_video<L: DirectoryLister + ?Sized>(
    lister: &L,
    dir: &Path,
    video_extensions: &[String],
) -> io::Result<Option<PathBuf>> {
    let mut largest: Option<(u64, PathBuf)> = None;
    for path in videos_in(lister, dir, video_extensions).await? {
        let size = fs::metadata(&path).await?.len();
        if largest.as_ref().map_or(true, |(best, _)| size > *best) {
            largest = Some((size, path));
        }
    }
    Ok(largest.map(|(_, path)| path))
}
