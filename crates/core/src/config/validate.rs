use std::collections::HashSet;

use super::{types::Config, ConfigError};
use crate::formatter::Part;

/// Validate configuration
/// Currently validates:
/// - Destination is an absolute path
/// - At least one video extension
/// - File part order is not empty
/// - No part appears twice in one ordering
/// - `event_number`, when present, comes first
/// - Subfolder name is a single path component
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if !config.library.destination.is_absolute() {
        return Err(ConfigError::ValidationError(format!(
            "library.destination must be absolute, got {}",
            config.library.destination.display()
        )));
    }

    if config.library.video_extensions.is_empty() {
        return Err(ConfigError::ValidationError(
            "library.video_extensions cannot be empty".to_string(),
        ));
    }

    if config.naming.file.is_empty() {
        return Err(ConfigError::ValidationError(
            "naming.file cannot be empty".to_string(),
        ));
    }

    for (name, parts) in [
        ("naming.file", &config.naming.file),
        ("naming.folder", &config.naming.folder),
        ("naming.subfolder", &config.naming.subfolder),
    ] {
        validate_order(name, parts)?;
    }

    if let Some(sub) = config.naming.active_subfolder() {
        if sub == "." || sub == ".." || sub.contains(['/', '\\']) {
            return Err(ConfigError::ValidationError(format!(
                "naming.subfolder_name must be a single folder name, got {:?}",
                sub
            )));
        }
    }

    Ok(())
}

fn validate_order(name: &str, parts: &[Part]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for part in parts {
        if !seen.insert(part) {
            return Err(ConfigError::ValidationError(format!(
                "{} lists {} more than once",
                name,
                part.as_str()
            )));
        }
    }

    if let Some(pos) = parts.iter().position(|p| *p == Part::EventNumber) {
        if pos != 0 {
            return Err(ConfigError::ValidationError(format!(
                "{}: event_number must come first",
                name
            )));
        }
    }

    Ok(())
}
