//! Bulk re-sorting of an existing folder tree.

use std::path::Path;
use tracing::{info, warn};

use fightsort_core::pipeline::videos_in;
use fightsort_core::{DirectoryLister, Placer, Sorter};

use crate::report::{self, EXIT_FAILURE, EXIT_OK};

/// Sorts every video in every immediate sub-directory of `dir`, one file at
/// a time. Returns the worst exit code seen.
///
/// With `remove_renamed`, a sub-directory whose files all sorted cleanly is
/// removed once empty.
pub async fn rename_all<P, L>(
    sorter: &Sorter<P, L>,
    dir: &Path,
    remove_renamed: bool,
    as_json: bool,
) -> anyhow::Result<u8>
where
    P: Placer,
    L: DirectoryLister,
{
    let lister = sorter.lister();
    let extensions = &sorter.settings().video_extensions;
    let dry_run = sorter.settings().dry_run;
    let mut worst = EXIT_OK;

    for folder in lister.list_dirs(dir).await? {
        let mut clean = true;

        for video in videos_in(lister, &folder, extensions).await? {
            let result = sorter.process(&video).await;
            report::print(&video, &result, as_json);

            let code = report::exit_code(&result);
            if code != EXIT_OK {
                clean = false;
                worst = worst.max(code);
            }
        }

        if !(clean && remove_renamed) {
            continue;
        }

        if dry_run {
            if !as_json {
                println!("Would remove {} if empty", folder.display());
            }
            continue;
        }

        match sorter.placer().remove_dir_if_empty(&folder).await {
            Ok(true) => info!(folder = %folder.display(), "Removed empty folder"),
            Ok(false) => {}
            Err(e) => {
                warn!(folder = %folder.display(), error = %e, "Could not remove folder");
                worst = worst.max(EXIT_FAILURE);
            }
        }
    }

    Ok(worst)
}
