//! Renders extracted metadata into a folder and file name.
//!
//! Formatting is a pure function of the record and the scheme: no file-system
//! access, and identical inputs always produce identical names.

mod types;

pub use types::{Bracket, BracketStyles, NamingScheme, Part, RenderedPath};

use crate::extractor::VideoInfo;

/// Delimiter placed between rendered parts.
pub const PART_DELIMITER: &str = " ";

/// Renders `info` according to `scheme`.
///
/// Non-main editions go into the configured subfolder (if any) and use the
/// subfolder part order for their file name. Parts without a value are
/// skipped. The source file's extension is reattached unchanged.
pub fn format(info: &VideoInfo, scheme: &NamingScheme) -> RenderedPath {
    let folder_name = render_parts(info, scheme, &scheme.folder);

    let subfolder = if info.edition.is_main() {
        None
    } else {
        scheme.active_subfolder().map(str::to_string)
    };

    let file_parts = match subfolder {
        Some(_) if !scheme.subfolder.is_empty() => &scheme.subfolder,
        _ => &scheme.file,
    };

    let mut file_name = render_parts(info, scheme, file_parts);
    if let Some(ext) = info.source_path.extension() {
        file_name.push('.');
        file_name.push_str(&ext.to_string_lossy());
    }

    RenderedPath {
        folder_name,
        subfolder,
        file_name,
    }
}

/// Renders `parts` in order, skipping empty values and applying brackets.
pub fn render_parts(info: &VideoInfo, scheme: &NamingScheme, parts: &[Part]) -> String {
    parts
        .iter()
        .filter_map(|part| {
            let value = part_value(info, scheme, *part)?;
            Some(match scheme.brackets.get(*part) {
                Some(bracket) => bracket.wrap(&value),
                None => value,
            })
        })
        .collect::<Vec<_>>()
        .join(PART_DELIMITER)
}

fn part_value(info: &VideoInfo, scheme: &NamingScheme, part: Part) -> Option<String> {
    match part {
        Part::EventNumber => Some(info.event_number.clone()).filter(|e| !e.is_empty()),
        Part::FighterNames => info.matchup(),
        Part::Edition => Some(format!("{}{}", scheme.edition_tag, info.edition.label())),
        Part::Resolution => info.resolution.as_ref().map(|r| r.as_str().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{extract_path, Edition};
    use crate::testing::fixtures::video_info as info;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_main_event_default_scheme() {
        let rendered = format(
            &info("UFC 300", &["Pereira", "Hill"], Edition::MainEvent, Some("1080p")),
            &NamingScheme::default(),
        );
        assert_eq!(rendered.folder_name, "UFC 300");
        assert_eq!(rendered.subfolder, None);
        assert_eq!(
            rendered.file_name,
            "UFC 300 Pereira vs Hill {Main Event} [1080p].mkv"
        );
    }

    #[test]
    fn test_early_prelims_go_to_subfolder() {
        let source = Path::new("/dl/UFC.Fight.Night.248.Early.Prelims.Holm.vs.Bueno.Silva.1080p.mkv");
        let rendered = format(&extract_path(source), &NamingScheme::default());

        assert_eq!(rendered.folder_name, "UFC Fight Night 248");
        assert_eq!(rendered.subfolder.as_deref(), Some("Prelims"));
        assert_eq!(rendered.file_name, "UFC Fight Night 248 {Early Prelims}.mkv");
        assert_eq!(
            rendered.target_path(Path::new("/lib")),
            PathBuf::from("/lib/UFC Fight Night 248/Prelims/UFC Fight Night 248 {Early Prelims}.mkv")
        );
    }

    #[test]
    fn test_without_subfolder_uses_file_parts() {
        let scheme = NamingScheme::default().without_subfolder();
        let rendered = format(
            &info("UFC 300", &[], Edition::Prelims, None),
            &scheme,
        );
        assert_eq!(rendered.subfolder, None);
        assert_eq!(rendered.file_name, "UFC 300 {Prelims}.mkv");
    }

    #[test]
    fn test_empty_event_is_omitted() {
        let rendered = format(
            &info("", &["A", "B"], Edition::MainEvent, Some("720p")),
            &NamingScheme::default(),
        );
        assert_eq!(rendered.folder_name, "");
        assert_eq!(rendered.file_name, "A vs B {Main Event} [720p].mkv");
        assert_eq!(
            rendered.target_dir(Path::new("/lib")),
            PathBuf::from("/lib")
        );
    }

    #[test]
    fn test_custom_order_brackets_and_tag() {
        let scheme = NamingScheme {
            file: vec![Part::Resolution, Part::EventNumber, Part::Edition],
            folder: vec![Part::EventNumber, Part::FighterNames],
            brackets: BracketStyles {
                event_number: None,
                fighter_names: Some(Bracket::Round),
                edition: Some(Bracket::Curly),
                resolution: None,
            },
            ..NamingScheme::default()
        }
        .with_edition_tag("edition-");

        let rendered = format(
            &info("UFC 300", &["Pereira", "Hill"], Edition::MainEvent, Some("2160p")),
            &scheme,
        );
        assert_eq!(rendered.folder_name, "UFC 300 (Pereira vs Hill)");
        assert_eq!(rendered.file_name, "2160p UFC 300 {edition-Main Event}.mkv");
    }

    #[test]
    fn test_format_is_deterministic() {
        let record = info("UFC 300", &["Pereira", "Hill"], Edition::Prelims, Some("1080p"));
        let scheme = NamingScheme::default();
        assert_eq!(format(&record, &scheme), format(&record, &scheme));
    }

    #[test]
    fn test_missing_extension() {
        let mut record = info("UFC 300", &[], Edition::MainEvent, None);
        record.source_path = PathBuf::from("/dl/UFC 300");
        let rendered = format(&record, &NamingScheme::default());
        assert_eq!(rendered.file_name, "UFC 300 {Main Event}");
    }
}
