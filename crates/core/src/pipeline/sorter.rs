//! The sorter: extract, format, resolve and place one file at a time.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::extractor::{extract, extract_path, VideoInfo};
use crate::formatter::format;
use crate::placer::{PlacementRequest, Placer, PlacerError};
use crate::resolver::{resolve, scan_slot, Action, DirectoryLister};

use super::error::ProcessError;
use super::types::{SortOutcome, SortPlan, SortSettings};

/// Sorts downloaded files into the library.
///
/// Files are handled strictly one after another, so two files aimed at the
/// same slot never race between scan and placement.
pub struct Sorter<P: Placer, L: DirectoryLister> {
    settings: SortSettings,
    placer: P,
    lister: L,
}

impl<P: Placer, L: DirectoryLister> Sorter<P, L> {
    pub fn new(settings: SortSettings, placer: P, lister: L) -> Self {
        Self {
            settings,
            placer,
            lister,
        }
    }

    pub fn settings(&self) -> &SortSettings {
        &self.settings
    }

    pub fn placer(&self) -> &P {
        &self.placer
    }

    pub fn lister(&self) -> &L {
        &self.lister
    }

    /// Decides where `source` goes and what happens to the slot, without
    /// touching anything.
    pub async fn plan(&self, source: &Path) -> Result<SortPlan, ProcessError> {
        let mut info = extract_path(source);
        let mut warnings = Vec::new();

        if !info.has_event() {
            let file = source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| source.display().to_string());
            if self.settings.strict {
                return Err(ProcessError::ParseIncomplete { file });
            }
            warnings.push(format!("No event number found in {file}"));
        } else if info.fighter_names.is_empty() && self.settings.recover_names {
            if let Some(names) = self.recover_names(&info).await {
                debug!(event = %info.event_number, names = ?names, "Recovered fighter names");
                info = info.with_fighter_names(names);
            }
        }

        let rendered = format(&info, &self.settings.naming);
        let target_dir = rendered.target_dir(&self.settings.destination);
        let new_path = rendered.target_path(&self.settings.destination);

        let slot = scan_slot(
            &self.lister,
            &new_path,
            &info,
            &self.settings.video_extensions,
        )
        .await
        .map_err(|e| {
            ProcessError::file_system(
                "list",
                &target_dir,
                PlacerError::ListFailed {
                    path: target_dir.clone(),
                    source: e,
                },
            )
        })?;

        let action = resolve(&new_path, &info, &slot, &self.settings.policy);

        if action == Action::NoOpIdentical && source != new_path {
            warnings.push(format!(
                "{} is already occupied; {} was left in place",
                new_path.display(),
                source.display()
            ));
        }

        debug!(
            source = %source.display(),
            target = %new_path.display(),
            action = action.as_str(),
            incumbents = slot.len(),
            "Resolved slot"
        );

        Ok(SortPlan {
            info,
            new_path,
            action,
            warnings,
        })
    }

    /// Plans and, unless this is a dry run, carries out the move for `source`.
    ///
    /// Rejections are reported through the outcome's action; only strict
    /// parse failures and file-system failures are errors.
    pub async fn process(&self, source: &Path) -> Result<SortOutcome, ProcessError> {
        let plan = self.plan(source).await?;
        let mut outcome = SortOutcome::from_plan(plan, self.settings.dry_run);

        for warning in &outcome.warnings {
            warn!(source = %source.display(), "{}", warning);
        }

        if !outcome.placed() {
            if let Some(rejection) = outcome.rejection() {
                info!(source = %source.display(), "{}", rejection);
            }
            return Ok(outcome);
        }

        if self.settings.dry_run {
            outcome.removed = outcome.old_paths().to_vec();
            info!("{}", outcome.message());
            return Ok(outcome);
        }

        // The new file must exist at its destination before anything is deleted.
        let request = PlacementRequest::new(source, &outcome.new_path);
        let placed = self
            .placer
            .place(&request)
            .await
            .map_err(|e| ProcessError::file_system("move", source, e))?;

        debug!(
            placer = self.placer.name(),
            destination = %placed.destination.display(),
            bytes = placed.size_bytes,
            method = ?placed.method,
            "File placed"
        );

        let mut first_failure = None;
        for old in outcome.old_paths().to_vec() {
            match self.placer.remove(&old).await {
                Ok(()) => {
                    info!(path = %old.display(), "Removed lower quality file");
                    outcome.removed.push(old);
                }
                Err(e) => {
                    warn!(path = %old.display(), error = %e, "Failed to remove replaced file");
                    if first_failure.is_none() {
                        first_failure = Some(ProcessError::file_system("delete", old, e));
                    }
                }
            }
        }

        if let Some(err) = first_failure {
            return Err(err);
        }

        info!("{}", outcome.message());
        Ok(outcome)
    }

    /// Processes `sources` in order. Each file sees the effects of the ones
    /// before it.
    pub async fn process_batch(
        &self,
        sources: &[std::path::PathBuf],
    ) -> Vec<Result<SortOutcome, ProcessError>> {
        let mut results = Vec::with_capacity(sources.len());
        for source in sources {
            results.push(self.process(source).await);
        }
        results
    }

    /// Looks for an existing event folder that carries fighter names.
    ///
    /// A folder qualifies when its name is the event itself or starts with
    /// the event followed by a space. The folder name is tried first, then
    /// the video files inside it.
    async fn recover_names(&self, info: &VideoInfo) -> Option<Vec<String>> {
        let dirs = match self.lister.list_dirs(&self.settings.destination).await {
            Ok(dirs) => dirs,
            Err(e) => {
                warn!(error = %e, "Could not list library for name recovery");
                return None;
            }
        };

        let event = info.event_number.as_str();
        let prefix = format!("{event} ");

        for dir in dirs {
            let Some(name) = dir.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            if name != event && !name.starts_with(&prefix) {
                continue;
            }

            let from_folder = extract(&name);
            if from_folder.event_number == event && !from_folder.fighter_names.is_empty() {
                return Some(from_folder.fighter_names);
            }

            let files = self.lister.list_files(&dir).await.unwrap_or_default();
            for file in files {
                let other = extract_path(&file);
                if other.event_number == event && !other.fighter_names.is_empty() {
                    return Some(other.fighter_names);
                }
            }
        }

        None
    }
}
