//! Naming scheme types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One renderable piece of a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    EventNumber,
    FighterNames,
    Edition,
    Resolution,
}

impl Part {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventNumber => "event_number",
            Self::FighterNames => "fighter_names",
            Self::Edition => "edition",
            Self::Resolution => "resolution",
        }
    }
}

/// Bracket style wrapped around a rendered part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bracket {
    Square,
    Curly,
    Round,
    /// No brackets; written `"none"` to clear a default.
    #[serde(rename = "none")]
    Bare,
}

impl Bracket {
    pub fn wrap(&self, value: &str) -> String {
        match self {
            Self::Square => format!("[{}]", value),
            Self::Curly => format!("{{{}}}", value),
            Self::Round => format!("({})", value),
            Self::Bare => value.to_string(),
        }
    }
}

/// Per-part bracket assignment.
///
/// Keys merge over the defaults one by one: a `[naming.brackets]` table
/// that only names `resolution` keeps the default edition brackets. Use
/// `"none"` to clear a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_number: Option<Bracket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fighter_names: Option<Bracket>,
    #[serde(default = "default_edition_bracket", skip_serializing_if = "Option::is_none")]
    pub edition: Option<Bracket>,
    #[serde(default = "default_resolution_bracket", skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Bracket>,
}

// Plex only detects editions inside curly brackets.
fn default_edition_bracket() -> Option<Bracket> {
    Some(Bracket::Curly)
}

fn default_resolution_bracket() -> Option<Bracket> {
    Some(Bracket::Square)
}

impl Default for BracketStyles {
    fn default() -> Self {
        Self {
            event_number: None,
            fighter_names: None,
            edition: default_edition_bracket(),
            resolution: default_resolution_bracket(),
        }
    }
}

impl BracketStyles {
    /// Bracket assigned to `part`, if any.
    pub fn get(&self, part: Part) -> Option<Bracket> {
        match part {
            Part::EventNumber => self.event_number,
            Part::FighterNames => self.fighter_names,
            Part::Edition => self.edition,
            Part::Resolution => self.resolution,
        }
    }
}

/// User-configured ordering and bracket styling for rendered names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingScheme {
    /// Part order for file names in the event folder.
    #[serde(default = "default_file_parts")]
    pub file: Vec<Part>,

    /// Part order for the event folder name.
    #[serde(default = "default_folder_parts")]
    pub folder: Vec<Part>,

    /// Part order for file names inside the subfolder.
    #[serde(default = "default_subfolder_parts")]
    pub subfolder: Vec<Part>,

    /// Subfolder for non-main editions. `None` or an empty string keeps
    /// every edition in the event folder.
    #[serde(default = "default_subfolder_name")]
    pub subfolder_name: Option<String>,

    /// Text rendered in front of the edition label, e.g. `edition-`.
    #[serde(default)]
    pub edition_tag: String,

    #[serde(default)]
    pub brackets: BracketStyles,
}

fn default_file_parts() -> Vec<Part> {
    vec![
        Part::EventNumber,
        Part::FighterNames,
        Part::Edition,
        Part::Resolution,
    ]
}

fn default_folder_parts() -> Vec<Part> {
    vec![Part::EventNumber]
}

fn default_subfolder_parts() -> Vec<Part> {
    vec![Part::EventNumber, Part::Edition]
}

fn default_subfolder_name() -> Option<String> {
    Some("Prelims".to_string())
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            file: default_file_parts(),
            folder: default_folder_parts(),
            subfolder: default_subfolder_parts(),
            subfolder_name: default_subfolder_name(),
            edition_tag: String::new(),
            brackets: BracketStyles::default(),
        }
    }
}

impl NamingScheme {
    /// Configured subfolder, if enabled.
    pub fn active_subfolder(&self) -> Option<&str> {
        self.subfolder_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Disables the subfolder so every edition lands in the event folder.
    pub fn without_subfolder(mut self) -> Self {
        self.subfolder_name = None;
        self
    }

    /// Sets the edition tag.
    pub fn with_edition_tag(mut self, tag: impl Into<String>) -> Self {
        self.edition_tag = tag.into();
        self
    }
}

/// A rendered destination, relative to the library root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPath {
    /// Event folder name. Empty when no folder part had a value.
    pub folder_name: String,
    /// Subfolder name, for non-main editions when one is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subfolder: Option<String>,
    /// File name including the original extension.
    pub file_name: String,
}

impl RenderedPath {
    /// Directory the file goes into under `root`.
    pub fn target_dir(&self, root: &Path) -> PathBuf {
        let mut dir = root.to_path_buf();
        if !self.folder_name.is_empty() {
            dir.push(&self.folder_name);
        }
        if let Some(ref sub) = self.subfolder {
            dir.push(sub);
        }
        dir
    }

    /// Full destination path under `root`.
    pub fn target_path(&self, root: &Path) -> PathBuf {
        self.target_dir(root).join(&self.file_name)
    }
}
