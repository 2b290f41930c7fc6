//! Conflict resolution for library slots.
//!
//! A slot is every video file in the target directory that shares the
//! candidate's event number and edition, whatever its resolution. The
//! resolver decides between the candidate and the slot's incumbents:
//!
//! 1. candidate path already present → [`Action::NoOpIdentical`]
//! 2. no incumbents → [`Action::Proceed`]
//! 3. otherwise every incumbent the candidate beats is replaced. An incumbent
//!    is beaten when it ranks strictly lower, or equal when same-resolution
//!    replacement is allowed. An incumbent ranking higher is never touched.
//!    If nothing is beaten, the best incumbent decides the rejection kind.
//!
//! The directory listing is injected through [`DirectoryLister`] so the
//! decision can be exercised without a real file system.

mod lister;
mod types;

pub use lister::{DirectoryLister, FsLister};
pub use types::{Action, ResolvePolicy};

use std::io;
use std::path::{Path, PathBuf};

use crate::extractor::{extract_path, ResolutionRank, VideoInfo};

/// Decides what to do with `candidate` given the current slot contents.
///
/// `slot` is expected to come from [`slot_members`] or [`scan_slot`]. The
/// candidate's own source file is never treated as an incumbent.
pub fn resolve(
    candidate: &Path,
    info: &VideoInfo,
    slot: &[PathBuf],
    policy: &ResolvePolicy,
) -> Action {
    if slot.iter().any(|existing| existing == candidate) {
        return Action::NoOpIdentical;
    }

    let mut incumbents: Vec<(&PathBuf, ResolutionRank)> = slot
        .iter()
        .filter(|existing| existing.as_path() != info.source_path.as_path())
        .map(|existing| (existing, extract_path(existing).resolution_rank()))
        .collect();

    if incumbents.is_empty() {
        return Action::Proceed;
    }
    incumbents.sort_by(|a, b| a.0.cmp(b.0));

    let new_rank = info.resolution_rank();
    let beaten: Vec<PathBuf> = incumbents
        .iter()
        .filter(|(_, rank)| {
            *rank < new_rank || (*rank == new_rank && policy.allow_same_res_replace)
        })
        .map(|(path, _)| (*path).clone())
        .collect();

    if !beaten.is_empty() {
        return Action::Replace(beaten);
    }

    // Nothing beaten: every incumbent ranks >= the candidate.
    let Some((best, best_rank)) = incumbents.iter().max_by_key(|(_, rank)| *rank) else {
        return Action::Proceed;
    };

    if *best_rank > new_rank {
        Action::RejectLowerAttempt((*best).clone())
    } else {
        Action::RejectSameRes((*best).clone())
    }
}

/// Filters a directory listing down to the files in `info`'s slot.
///
/// A slot is keyed by a shared event, so a record without one has no
/// incumbents, and listed files without one never join a slot. The
/// candidate path itself is always kept so an already placed file is
/// recognised.
pub fn slot_members(
    candidate: &Path,
    info: &VideoInfo,
    files: &[PathBuf],
    video_extensions: &[String],
) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|path| has_video_extension(path, video_extensions))
        .filter(|path| {
            if path.as_path() == candidate {
                return true;
            }
            if !info.has_event() {
                return false;
            }
            let other = extract_path(path);
            other.has_event()
                && other.event_number == info.event_number
                && other.edition == info.edition
        })
        .cloned()
        .collect()
}

/// Lists the candidate's directory and returns the slot members for `info`.
pub async fn scan_slot<L: DirectoryLister + ?Sized>(
    lister: &L,
    candidate: &Path,
    info: &VideoInfo,
    video_extensions: &[String],
) -> io::Result<Vec<PathBuf>> {
    let Some(dir) = candidate.parent() else {
        return Ok(Vec::new());
    };
    let files = lister.list_files(dir).await?;
    Ok(slot_members(candidate, info, &files, video_extensions))
}

/// Whether `path` has one of the given extensions (case-insensitive).
pub fn has_video_extension(path: &Path, video_extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .is_some_and(|ext| video_extensions.iter().any(|v| v.eq_ignore_ascii_case(&ext)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIR: &str = "/lib/UFC 300";

    fn p(name: &str) -> PathBuf {
        Path::new(DIR).join(name)
    }

    fn candidate(res: &str) -> (PathBuf, VideoInfo) {
        let source = PathBuf::from(format!("/dl/UFC.300.Pereira.vs.Hill.{res}.mkv"));
        let target = p(&format!("UFC 300 Pereira vs Hill {{Main Event}} [{res}].mkv"));
        (target, extract_path(&source))
    }

    fn exts() -> Vec<String> {
        vec!["mkv".to_string(), "mp4".to_string()]
    }

    const STRICT: ResolvePolicy = ResolvePolicy {
        allow_same_res_replace: false,
    };
    const LENIENT: ResolvePolicy = ResolvePolicy {
        allow_same_res_replace: true,
    };

    #[test]
    fn test_empty_slot_proceeds() {
        let (target, info) = candidate("1080p");
        assert_eq!(resolve(&target, &info, &[], &STRICT), Action::Proceed);
    }

    #[test]
    fn test_identical_path_is_noop() {
        let (target, info) = candidate("1080p");
        let slot = vec![target.clone()];
        assert_eq!(resolve(&target, &info, &slot, &LENIENT), Action::NoOpIdentical);
    }

    #[test]
    fn test_higher_resolution_replaces() {
        let (target, info) = candidate("1080p");
        let old = p("UFC 300 Pereira vs Hill {Main Event} [720p].mkv");
        assert_eq!(
            resolve(&target, &info, &[old.clone()], &STRICT),
            Action::Replace(vec![old])
        );
    }

    #[test]
    fn test_lower_resolution_rejected() {
        let (target, info) = candidate("720p");
        let old = p("UFC 300 Pereira vs Hill {Main Event} [1080p].mkv");
        assert_eq!(
            resolve(&target, &info, &[old.clone()], &STRICT),
            Action::RejectLowerAttempt(old)
        );
    }

    #[test]
    fn test_same_resolution_policy() {
        let (target, info) = candidate("1080p");
        let old = p("UFC 300 {Main Event} [1080p].mkv");
        assert_eq!(
            resolve(&target, &info, &[old.clone()], &STRICT),
            Action::RejectSameRes(old.clone())
        );
        assert_eq!(
            resolve(&target, &info, &[old.clone()], &LENIENT),
            Action::Replace(vec![old])
        );
    }

    #[test]
    fn test_missing_resolution_ranks_lowest() {
        let source = PathBuf::from("/dl/UFC.300.Pereira.vs.Hill.mkv");
        let info = extract_path(&source);
        let target = p("UFC 300 Pereira vs Hill {Main Event}.mkv");
        let old = p("UFC 300 Pereira vs Hill {Main Event} [480p].mkv");
        assert_eq!(
            resolve(&target, &info, &[old.clone()], &LENIENT),
            Action::RejectLowerAttempt(old)
        );
    }

    #[test]
    fn test_multiple_incumbents_all_lower() {
        let (target, info) = candidate("2160p");
        let low = p("UFC 300 {Main Event} [720p].mkv");
        let mid = p("UFC 300 {Main Event} [1080p].mkv");
        let action = resolve(&target, &info, &[mid.clone(), low.clone()], &STRICT);
        assert_eq!(action, Action::Replace(vec![mid, low]));
    }

    #[test]
    fn test_multiple_incumbents_higher_one_survives() {
        let (target, info) = candidate("1080p");
        let low = p("UFC 300 {Main Event} [720p].mkv");
        let high = p("UFC 300 {Main Event} [2160p].mkv");
        let action = resolve(&target, &info, &[high.clone(), low.clone()], &STRICT);
        assert_eq!(action, Action::Replace(vec![low]));
        assert!(!action.replaced().contains(&high));
    }

    #[test]
    fn test_multiple_incumbents_nothing_beaten() {
        let (target, info) = candidate("720p");
        let a = p("UFC 300 {Main Event} [720p].mkv");
        let b = p("UFC 300 {Main Event} [1080p].mkv");
        assert_eq!(
            resolve(&target, &info, &[a.clone(), b.clone()], &STRICT),
            Action::RejectLowerAttempt(b)
        );

        let (target, info) = candidate("1080p");
        let c = p("UFC 300 A vs B {Main Event} [1080p].mkv");
        let d = p("UFC 300 {Main Event} [1080p].mkv");
        assert!(matches!(
            resolve(&target, &info, &[c, d], &STRICT),
            Action::RejectSameRes(_)
        ));
    }

    #[test]
    fn test_source_file_is_not_an_incumbent() {
        let source = p("UFC.300.Pereira.vs.Hill.1080p.mkv");
        let info = extract_path(&source);
        let target = p("UFC 300 Pereira vs Hill {Main Event} [1080p].mkv");
        assert_eq!(
            resolve(&target, &info, &[source.clone()], &STRICT),
            Action::Proceed
        );
    }

    #[test]
    fn test_slot_members_filters_event_edition_and_extension() {
        let (target, info) = candidate("1080p");
        let files = vec![
            p("UFC 300 Pereira vs Hill {Main Event} [720p].mkv"),
            p("UFC 300 Pereira vs Hill {Main Event} [720p].srt"),
            p("UFC 300 {Prelims} [720p].mkv"),
            p("UFC 301 {Main Event} [720p].mp4"),
            p("UFC 300 {Main Event}.MP4"),
        ];
        let slot = slot_members(&target, &info, &files, &exts());
        assert_eq!(
            slot,
            vec![
                p("UFC 300 Pereira vs Hill {Main Event} [720p].mkv"),
                p("UFC 300 {Main Event}.MP4"),
            ]
        );
    }

    #[test]
    fn test_slot_without_event_has_no_incumbents() {
        let info = extract_path(Path::new("/dl/PFL.Finals.2024.1080p.mkv"));
        let target = PathBuf::from("/lib/{Main Event} [1080p].mkv");
        let files = vec![
            PathBuf::from("/lib/Bellator 300 Main Card 720p.mkv"),
            PathBuf::from("/lib/Boxing Fury Usyk 2160p.mkv"),
            PathBuf::from("/lib/{Main Event} [720p].mkv"),
        ];

        let slot = slot_members(&target, &info, &files, &exts());
        assert!(slot.is_empty());
        assert_eq!(resolve(&target, &info, &slot, &STRICT), Action::Proceed);

        let mut placed = files.clone();
        placed.push(target.clone());
        let slot = slot_members(&target, &info, &placed, &exts());
        assert_eq!(slot, vec![target.clone()]);
        assert_eq!(resolve(&target, &info, &slot, &STRICT), Action::NoOpIdentical);
    }

    #[test]
    fn test_files_without_event_never_join_a_slot() {
        let (target, info) = candidate("1080p");
        let files = vec![
            p("Bellator 300 Main Card 720p.mkv"),
            p("{Main Event} [480p].mkv"),
        ];
        assert!(slot_members(&target, &info, &files, &exts()).is_empty());
    }
}
