//! Sorting lifecycle integration tests.
//!
//! These tests run the sorter against a real temporary library:
//! - Placement into edition folders
//! - Re-running on an already placed file
//! - Resolution upgrades, downgrades and same-resolution policy
//! - Strict and lenient matching
//! - Dry runs

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::fs;

use fightsort_core::{
    find_largest_video,
    placer::PlacerConfig,
    resolver::ResolvePolicy,
    Action, Config, FsLister, FsPlacer, ProcessError, SortSettings, Sorter,
};

/// Test helper holding a download dir and a library dir.
struct TestHarness {
    downloads: TempDir,
    library: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        Self {
            downloads: TempDir::new().expect("Failed to create downloads dir"),
            library: TempDir::new().expect("Failed to create library dir"),
        }
    }

    fn settings(&self) -> SortSettings {
        SortSettings::from(&Config::default()).with_destination(self.library.path())
    }

    fn sorter(&self, settings: SortSettings) -> Sorter<FsPlacer, FsLister> {
        Sorter::new(
            settings,
            FsPlacer::new(PlacerConfig::default()),
            FsLister,
        )
    }

    async fn download(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.downloads.path().join(name);
        fs::write(&path, contents).await.expect("Failed to write download");
        path
    }

    async fn existing(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.library.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, contents).await.unwrap();
        path
    }

    fn lib(&self, relative: &str) -> PathBuf {
        self.library.path().join(relative)
    }
}

async fn read(path: &Path) -> String {
    fs::read_to_string(path).await.unwrap()
}

#[tokio::test]
async fn test_places_early_prelims_in_subfolder() {
    let h = TestHarness::new();
    let source = h
        .download("UFC.Fight.Night.248.Early.Prelims.Holm.vs.Bueno.Silva.1080p.mkv", "video")
        .await;

    let outcome = h.sorter(h.settings()).process(&source).await.unwrap();

    let expected = h.lib("UFC Fight Night 248/Prelims/UFC Fight Night 248 {Early Prelims}.mkv");
    assert_eq!(outcome.action, Action::Proceed);
    assert_eq!(outcome.new_path, expected);
    assert_eq!(read(&expected).await, "video");
    assert!(!source.exists());
}

#[tokio::test]
async fn test_rerun_on_placed_file_is_noop() {
    let h = TestHarness::new();
    let source = h.download("UFC.300.Pereira.vs.Hill.1080p.mkv", "video").await;
    let sorter = h.sorter(h.settings());

    let placed = sorter.process(&source).await.unwrap();
    let again = sorter.process(&placed.new_path).await.unwrap();

    assert_eq!(again.action, Action::NoOpIdentical);
    assert!(again.warnings.is_empty());
    assert!(matches!(
        again.rejection(),
        Some(ProcessError::IdenticalPathNoOp { .. })
    ));
    assert_eq!(read(&placed.new_path).await, "video");
}

#[tokio::test]
async fn test_higher_resolution_replaces_lower() {
    let h = TestHarness::new();
    let old = h
        .existing("UFC 300/UFC 300 Pereira vs Hill {Main Event} [720p].mkv", "old")
        .await;
    let source = h.download("UFC.300.Pereira.vs.Hill.1080p.mkv", "new").await;

    let outcome = h.sorter(h.settings()).process(&source).await.unwrap();

    assert_eq!(outcome.action, Action::Replace(vec![old.clone()]));
    assert_eq!(outcome.removed, vec![old.clone()]);
    assert!(!old.exists());
    assert_eq!(read(&outcome.new_path).await, "new");
}

#[tokio::test]
async fn test_lower_resolution_is_rejected() {
    let h = TestHarness::new();
    let old = h
        .existing("UFC 300/UFC 300 Pereira vs Hill {Main Event} [2160p].mkv", "old")
        .await;
    let source = h.download("UFC.300.Pereira.vs.Hill.720p.mkv", "new").await;

    let outcome = h.sorter(h.settings()).process(&source).await.unwrap();

    assert_eq!(outcome.action, Action::RejectLowerAttempt(old.clone()));
    assert!(outcome.rejection().is_some());
    assert!(source.exists());
    assert_eq!(read(&old).await, "old");
}

#[tokio::test]
async fn test_same_resolution_follows_policy() {
    let h = TestHarness::new();
    let old = h
        .existing("UFC 300/UFC 300 {Main Event} [1080p].mkv", "old")
        .await;
    let source = h.download("UFC.300.Pereira.vs.Hill.1080p.mkv", "new").await;

    let outcome = h.sorter(h.settings()).process(&source).await.unwrap();
    assert_eq!(outcome.action, Action::RejectSameRes(old.clone()));
    assert!(source.exists());

    let lenient = h
        .settings()
        .with_policy(ResolvePolicy::default().with_same_res_replace(true));
    let outcome = h.sorter(lenient).process(&source).await.unwrap();
    assert_eq!(outcome.action, Action::Replace(vec![old.clone()]));
    assert!(!old.exists());
    assert_eq!(read(&outcome.new_path).await, "new");
}

#[tokio::test]
async fn test_higher_incumbent_survives_duplicate_cleanup() {
    let h = TestHarness::new();
    let high = h.existing("UFC 300/UFC 300 {Main Event} [2160p].mkv", "uhd").await;
    let low = h.existing("UFC 300/UFC 300 {Main Event} [720p].mkv", "sd").await;
    let source = h.download("UFC.300.1080p.mkv", "hd").await;

    let outcome = h.sorter(h.settings()).process(&source).await.unwrap();

    assert_eq!(outcome.action, Action::Replace(vec![low.clone()]));
    assert!(!low.exists());
    assert_eq!(read(&high).await, "uhd");
    assert_eq!(read(&h.lib("UFC 300/UFC 300 {Main Event} [1080p].mkv")).await, "hd");
}

#[tokio::test]
async fn test_other_editions_do_not_conflict() {
    let h = TestHarness::new();
    h.existing("UFC 300/UFC 300 {Main Event} [2160p].mkv", "main").await;
    h.existing("UFC 300/UFC 300 {Main Event} [720p].srt", "subs").await;
    let source = h.download("UFC.300.Prelims.720p.mkv", "prelims").await;

    let outcome = h.sorter(h.settings()).process(&source).await.unwrap();

    assert_eq!(outcome.action, Action::Proceed);
    assert_eq!(outcome.new_path, h.lib("UFC 300/Prelims/UFC 300 {Prelims}.mkv"));
}

#[tokio::test]
async fn test_strict_and_lenient_matching() {
    let h = TestHarness::new();
    let source = h.download("Some.Random.Fight.1080p.mkv", "video").await;

    let err = h
        .sorter(h.settings().with_strict(true))
        .process(&source)
        .await
        .unwrap_err();
    assert!(matches!(err, ProcessError::ParseIncomplete { .. }));
    assert!(err.is_fatal());
    assert!(source.exists());

    let outcome = h.sorter(h.settings()).process(&source).await.unwrap();
    assert_eq!(outcome.action, Action::Proceed);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.new_path, h.lib("{Main Event} [1080p].mkv"));
}

#[tokio::test]
async fn test_lenient_placement_leaves_unrelated_root_files() {
    let h = TestHarness::new();
    let bellator = h.existing("Bellator 300 Main Card 720p.mkv", "bellator").await;
    let boxing = h.existing("Boxing Fury Usyk 2160p.mkv", "boxing").await;
    let source = h.download("PFL.Finals.2024.1080p.mkv", "pfl").await;

    let outcome = h.sorter(h.settings()).process(&source).await.unwrap();

    assert_eq!(outcome.action, Action::Proceed);
    assert!(outcome.removed.is_empty());
    assert_eq!(read(&bellator).await, "bellator");
    assert_eq!(read(&boxing).await, "boxing");
    assert_eq!(read(&h.lib("{Main Event} [1080p].mkv")).await, "pfl");
}

#[tokio::test]
async fn test_names_recovered_from_existing_folder() {
    let h = TestHarness::new();
    h.existing("UFC 300/UFC 300 Pereira vs Hill {Main Event} [1080p].mkv", "main")
        .await;
    let source = h.download("UFC.300.Prelims.1080p.mkv", "prelims").await;

    let mut settings = h.settings();
    settings.naming.subfolder = settings.naming.file.clone();
    let outcome = h.sorter(settings).process(&source).await.unwrap();

    assert_eq!(
        outcome.new_path,
        h.lib("UFC 300/Prelims/UFC 300 Pereira vs Hill {Prelims} [1080p].mkv")
    );
}

#[tokio::test]
async fn test_dry_run_leaves_everything_in_place() {
    let h = TestHarness::new();
    let old = h.existing("UFC 300/UFC 300 {Main Event} [720p].mkv", "old").await;
    let source = h.download("UFC.300.1080p.mkv", "new").await;

    let outcome = h
        .sorter(h.settings().with_dry_run(true))
        .process(&source)
        .await
        .unwrap();

    assert!(outcome.dry_run);
    assert_eq!(outcome.removed, vec![old.clone()]);
    assert!(old.exists());
    assert!(source.exists());
    assert!(!outcome.new_path.exists());
}

#[tokio::test]
async fn test_job_directory_picks_largest_video() {
    let h = TestHarness::new();
    h.download("sample.mkv", "tiny").await;
    let main = h
        .download("UFC.300.Pereira.vs.Hill.1080p.mkv", "the real video file")
        .await;
    h.download("UFC.300.Pereira.vs.Hill.nfo", "a long nfo file with lots of text").await;

    let extensions = Config::default().library.video_extensions;
    let picked = find_largest_video(&FsLister, h.downloads.path(), &extensions)
        .await
        .unwrap();
    assert_eq!(picked, Some(main));
}
