//! Types for the sorting pipeline.

use serde::Serialize;
use std::path::PathBuf;

use crate::config::Config;
use crate::extractor::VideoInfo;
use crate::formatter::NamingScheme;
use crate::resolver::{Action, ResolvePolicy};

use super::error::ProcessError;

/// Everything the sorter needs to decide and place one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSettings {
    /// Library root.
    pub destination: PathBuf,
    pub naming: NamingScheme,
    pub policy: ResolvePolicy,
    /// Fail files without an event number.
    pub strict: bool,
    /// Borrow fighter names from an existing event folder.
    pub recover_names: bool,
    pub video_extensions: Vec<String>,
    /// Decide and report, but touch nothing.
    pub dry_run: bool,
}

impl SortSettings {
    /// Settings for a job in `category`, which may force strict matching.
    pub fn from_config(config: &Config, category: Option<&str>) -> Self {
        Self {
            destination: config.library.destination.clone(),
            naming: config.naming.clone(),
            policy: config.conflicts,
            strict: config.matching.is_strict_for(category),
            recover_names: config.matching.recover_names,
            video_extensions: config.library.video_extensions.clone(),
            dry_run: false,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn with_policy(mut self, policy: ResolvePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl From<&Config> for SortSettings {
    fn from(config: &Config) -> Self {
        Self::from_config(config, None)
    }
}

/// The decision reached for one source file, before anything is moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortPlan {
    /// Extracted (and possibly name-recovered) record.
    pub info: VideoInfo,
    /// Rendered destination path.
    pub new_path: PathBuf,
    pub action: Action,
    pub warnings: Vec<String>,
}

/// Result of processing one source file.
#[derive(Debug, Clone, Serialize)]
pub struct SortOutcome {
    pub source: PathBuf,
    pub new_path: PathBuf,
    #[serde(flatten)]
    pub action: Action,
    /// Incumbents deleted (or that would be deleted in a dry run).
    pub removed: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub dry_run: bool,
    pub info: VideoInfo,
}

impl SortOutcome {
    pub(crate) fn from_plan(plan: SortPlan, dry_run: bool) -> Self {
        Self {
            source: plan.info.source_path.clone(),
            new_path: plan.new_path,
            action: plan.action,
            removed: Vec::new(),
            warnings: plan.warnings,
            dry_run,
            info: plan.info,
        }
    }

    /// Incumbents the action selected for replacement.
    pub fn old_paths(&self) -> &[PathBuf] {
        self.action.replaced()
    }

    /// Whether the source file was (or would be) moved.
    pub fn placed(&self) -> bool {
        self.action.places_file()
    }

    /// The rejection as an error, if the file was not placed.
    pub fn rejection(&self) -> Option<ProcessError> {
        match &self.action {
            Action::RejectSameRes(existing) => Some(ProcessError::SlotConflictSameRes {
                candidate: self.new_path.clone(),
                existing: existing.clone(),
            }),
            Action::RejectLowerAttempt(existing) => Some(ProcessError::SlotConflictLowerRes {
                candidate: self.new_path.clone(),
                existing: existing.clone(),
            }),
            Action::NoOpIdentical => Some(ProcessError::IdenticalPathNoOp {
                path: self.new_path.clone(),
            }),
            Action::Proceed | Action::Replace(_) => None,
        }
    }

    /// One-line human readable summary.
    pub fn message(&self) -> String {
        let verb = if self.dry_run { "Would move" } else { "Moved" };
        match &self.action {
            Action::Proceed => format!(
                "{verb} {} to {}",
                self.source.display(),
                self.new_path.display()
            ),
            Action::Replace(old) => format!(
                "{verb} {} to {}, replacing {} lower quality file(s)",
                self.source.display(),
                self.new_path.display(),
                old.len()
            ),
            _ => self
                .rejection()
                .map(|e| e.to_string())
                .unwrap_or_default(),
        }
    }
}
