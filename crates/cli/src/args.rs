use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for fightsort
#[derive(Parser, Debug)]
#[command(name = "fightsort")]
#[command(about = "Sort downloaded UFC videos into a Plex edition library")]
#[command(version)]
pub struct Args {
    /// Download job directory; its largest video file is sorted
    pub job_dir: Option<PathBuf>,

    /// Directory containing the video files to process
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Download category; some categories force strict matching
    #[arg(short, long)]
    pub category: Option<String>,

    /// Library root to sort into
    #[arg(short = 'D', long)]
    pub dest: Option<PathBuf>,

    /// Configuration file
    #[arg(long, env = "FIGHTSORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Replace existing files with the same resolution
    #[arg(short, long)]
    pub replace_same_res: bool,

    /// Fail if the event number cannot be found in the file name
    #[arg(short, long)]
    pub strict_matching: bool,

    /// Sort every video in every sub-directory of --dir (default: the library root)
    #[arg(long)]
    pub rename_all: bool,

    /// With --rename-all, remove sub-directories left empty
    #[arg(long, requires = "rename_all")]
    pub remove_renamed: bool,

    /// Print what would happen without moving or deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print outcomes as JSON lines
    #[arg(long)]
    pub json: bool,
}

/// What this run should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Sort the largest video in one job directory.
    Job {
        dir: PathBuf,
        category: Option<String>,
    },
    /// Sort every video in every sub-directory of `dir`, or of the library
    /// root when no directory is given.
    RenameAll {
        dir: Option<PathBuf>,
        remove_renamed: bool,
    },
}

impl Args {
    /// Works out the invocation from the arguments and, when running as a
    /// post-processing script, the job environment.
    ///
    /// A positional job directory wins. Otherwise `SAB_VERSION` selects the
    /// download client's `SAB_COMPLETE_DIR` and `SAB_CAT`, and failing that
    /// `--dir` is used.
    pub fn invocation<F>(&self, env: F) -> Result<Invocation, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = &self.job_dir {
            return Ok(Invocation::Job {
                dir: dir.clone(),
                category: self.category.clone(),
            });
        }

        if env("SAB_VERSION").is_some() && !self.rename_all && self.dir.is_none() {
            let dir = env("SAB_COMPLETE_DIR").filter(|d| !d.is_empty());
            let category = env("SAB_CAT").filter(|c| !c.is_empty());
            return match (dir, category) {
                (Some(dir), Some(category)) => Ok(Invocation::Job {
                    dir: PathBuf::from(dir),
                    category: Some(category),
                }),
                _ => Err("SAB_COMPLETE_DIR or SAB_CAT not set".to_string()),
            };
        }

        if self.rename_all {
            return Ok(Invocation::RenameAll {
                dir: self.dir.clone(),
                remove_renamed: self.remove_renamed,
            });
        }

        match &self.dir {
            Some(dir) => Ok(Invocation::Job {
                dir: dir.clone(),
                category: self.category.clone(),
            }),
            None => Err("No job directory given".to_string()),
        }
    }
}
