//! Types produced by the metadata extractor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which segment of an event broadcast a file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edition {
    /// Main card. Used whenever no prelims keyword is present.
    #[default]
    MainEvent,
    /// Preliminary card.
    Prelims,
    /// Early preliminary card.
    EarlyPrelims,
}

impl Edition {
    /// Display label used when rendering names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MainEvent => "Main Event",
            Self::Prelims => "Prelims",
            Self::EarlyPrelims => "Early Prelims",
        }
    }

    /// Returns true for the main card.
    pub fn is_main(&self) -> bool {
        matches!(self, Self::MainEvent)
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolution token as it should appear in rendered names (e.g. "1080p").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resolution(String);

impl Resolution {
    /// Wraps a token. `4K` and `UHD` are normalized to `2160p`.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into().trim().to_lowercase();
        match token.as_str() {
            "4k" | "uhd" => Self("2160p".to_string()),
            _ => Self(token),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Position of this token on the resolution scale.
    pub fn rank(&self) -> ResolutionRank {
        let digits = self
            .0
            .strip_suffix('p')
            .or_else(|| self.0.strip_suffix('i'))
            .unwrap_or(&self.0);

        match digits.parse::<u32>() {
            Ok(lines) => ResolutionRank::Numeric(lines),
            _ => ResolutionRank::Unrecognized,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Total order over resolutions used for conflict decisions.
///
/// Variant order is significant: a missing resolution ranks below any token,
/// and tokens off the numeric scale rank below every numeric resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResolutionRank {
    Absent,
    Unrecognized,
    Numeric(u32),
}

impl ResolutionRank {
    /// Ranks an optional resolution.
    pub fn of(resolution: Option<&Resolution>) -> Self {
        resolution.map_or(Self::Absent, Resolution::rank)
    }
}

/// Structured metadata extracted from a file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Canonical event identifier, e.g. "UFC Fight Night 248". Empty when
    /// no event pattern matched.
    pub event_number: String,
    /// Up to two participant names in source order.
    pub fighter_names: Vec<String>,
    /// Broadcast segment.
    pub edition: Edition,
    /// Resolution token, if one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    /// Path of the file the metadata came from. Never rendered.
    pub source_path: PathBuf,
}

impl VideoInfo {
    /// Whether the event identifier was found.
    pub fn has_event(&self) -> bool {
        !self.event_number.is_empty()
    }

    /// Fighter names joined the way they are rendered ("A vs B").
    pub fn matchup(&self) -> Option<String> {
        if self.fighter_names.is_empty() {
            None
        } else {
            Some(self.fighter_names.join(" vs "))
        }
    }

    /// Rank of this file's resolution.
    pub fn resolution_rank(&self) -> ResolutionRank {
        ResolutionRank::of(self.resolution.as_ref())
    }

    /// Returns a copy carrying the given fighter names (at most two kept).
    pub fn with_fighter_names(mut self, names: Vec<String>) -> Self {
        self.fighter_names = names.into_iter().take(2).collect();
        self
    }
}
