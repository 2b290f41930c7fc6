//! Types for the conflict resolver.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Decision for a candidate destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "paths", rename_all = "snake_case")]
pub enum Action {
    /// Slot is free; place the file.
    Proceed,
    /// Place the file, then delete these incumbents.
    Replace(Vec<PathBuf>),
    /// An incumbent with the same resolution is kept.
    RejectSameRes(PathBuf),
    /// An incumbent with a higher resolution is kept.
    RejectLowerAttempt(PathBuf),
    /// The candidate path is already occupied by the rendered file.
    NoOpIdentical,
}

impl Action {
    /// Whether the candidate file will be moved.
    pub fn places_file(&self) -> bool {
        matches!(self, Self::Proceed | Self::Replace(_))
    }

    /// Incumbents this action deletes.
    pub fn replaced(&self) -> &[PathBuf] {
        match self {
            Self::Replace(old) => old,
            _ => &[],
        }
    }

    /// Short machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proceed => "proceed",
            Self::Replace(_) => "replace",
            Self::RejectSameRes(_) => "reject_same_res",
            Self::RejectLowerAttempt(_) => "reject_lower_attempt",
            Self::NoOpIdentical => "no_op_identical",
        }
    }
}

/// Conflict policy flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvePolicy {
    /// Replace an incumbent of equal resolution instead of rejecting.
    #[serde(default)]
    pub allow_same_res_replace: bool,
}

impl ResolvePolicy {
    pub fn with_same_res_replace(mut self, enabled: bool) -> Self {
        self.allow_same_res_replace = enabled;
        self
    }
}
