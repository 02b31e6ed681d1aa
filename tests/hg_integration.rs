//! Integration tests against a real `hg` executable.
//!
//! Skipped (with a note on stderr) when `hg` is not on PATH.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use dvcswrap::adapter::{
    open_repository, AdapterConfig, CommitOptions, Dvcs, LogFormat, PushOptions, UpdateOptions,
};

const USER: &str = "Tester <tester@example.com>";

fn hg_available() -> bool {
    Command::new("hg")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

macro_rules! require_hg {
    () => {
        if !hg_available() {
            eprintln!("hg not found on PATH, skipping");
            return;
        }
        // Keep user configuration out of the tool's output.
        std::env::set_var("HGPLAIN", "1");
    };
}

fn open(path: &Path, format: LogFormat) -> Box<dyn Dvcs> {
    let config = AdapterConfig::default()
        .with_log_format(format)
        .with_global_config("ui.interactive=false");
    open_repository(path, "hg", config).unwrap()
}

fn commit(repo: &dyn Dvcs, message: &str) {
    let mut options = CommitOptions::new(message);
    options.user = Some(USER.to_string());
    repo.commit(&options).unwrap();
}

/// Two changesets: rev 0 on default, rev 1 on `feature`.
fn seeded(dir: &TempDir, format: LogFormat) -> Box<dyn Dvcs> {
    let repo = open(dir.path(), format);
    repo.init_repo().unwrap();

    fs::write(dir.path().join("a.txt"), "one\n").unwrap();
    fs::write(dir.path().join("b c.txt"), "two\n").unwrap();
    repo.add(&[]).unwrap();
    commit(repo.as_ref(), "first");

    repo.branch("feature").unwrap();
    fs::write(dir.path().join("a.txt"), "changed\n").unwrap();
    commit(repo.as_ref(), "second\nwith body");

    repo
}

#[test]
fn status_tracks_working_copy() {
    require_hg!();
    let dir = TempDir::new().unwrap();
    let repo = open(dir.path(), LogFormat::Xml);
    repo.init_repo().unwrap();

    fs::write(dir.path().join("a.txt"), "one\n").unwrap();
    fs::write(dir.path().join("b c.txt"), "two\n").unwrap();
    let report = repo.status().unwrap();
    assert_eq!(report.not_versioned, vec!["a.txt", "b c.txt"]);

    repo.add(&["a.txt".to_string()]).unwrap();
    let report = repo.status().unwrap();
    assert_eq!(report.added, vec!["a.txt"]);
    assert_eq!(report.not_versioned, vec!["b c.txt"]);

    commit(repo.as_ref(), "first");
    let report = repo.status().unwrap();
    assert!(report.added.is_empty());
    assert!(report.not_versioned.is_empty());
}

#[test]
fn history_in_both_forms() {
    require_hg!();
    for format in [LogFormat::Xml, LogFormat::Template] {
        let dir = TempDir::new().unwrap();
        let repo = seeded(&dir, format);

        let log = repo.log(None).unwrap();
        assert_eq!(log.len(), 2, "{format}");
        assert_eq!(log.branch("default").len(), 1);
        assert_eq!(log.branch("feature").len(), 1);

        let tip = &log.entries[0];
        assert_eq!(tip.revision, 1);
        assert_eq!(tip.message, "second\nwith body");
        assert_eq!(tip.author, USER);
        assert_eq!(tip.files, vec!["a.txt"]);
        assert_eq!(tip.tags, vec!["tip"]);

        let first = &log.entries[1];
        assert_eq!(first.files, vec!["a.txt", "b c.txt"]);
    }
}

#[test]
fn branches_and_heads() {
    require_hg!();
    let dir = TempDir::new().unwrap();
    let repo = seeded(&dir, LogFormat::Xml);

    assert_eq!(repo.branch("").unwrap(), "feature");

    let set = repo.branches().unwrap();
    assert_eq!(set.active, vec!["feature"]);
    assert_eq!(set.inactive, vec!["default"]);

    let head = repo.get_head(None).unwrap().unwrap();
    assert_eq!(head.revision, 1);
    let default_head = repo.get_head(Some("default")).unwrap().unwrap();
    assert_eq!(default_head.revision, 0);

    assert_eq!(repo.branch_revisions("feature").unwrap().len(), 1);
    assert_eq!(repo.user_commits("tester", Some(1)).unwrap().len(), 1);

    repo.update(&UpdateOptions {
        branch: Some("default".into()),
        ..UpdateOptions::default()
    })
    .unwrap();
    assert_eq!(repo.branch("").unwrap(), "default");
    assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "one\n");
}

#[test]
fn changes_between_revisions() {
    require_hg!();
    let dir = TempDir::new().unwrap();
    let repo = seeded(&dir, LogFormat::Xml);

    let report = repo.changed_between_nodes("0", "1").unwrap();
    assert_eq!(report.modified, vec!["a.txt"]);

    let diff = repo.diff_unified("a.txt", Some("0")).unwrap();
    assert!(diff.contains("-one"));
    assert!(diff.contains("+changed"));

    let changed = repo.get_changed_files(None, "1").unwrap();
    assert_eq!(changed.len(), 2);
}

#[test]
fn clone_push_and_incoming() {
    require_hg!();
    let upstream_dir = TempDir::new().unwrap();
    let upstream = seeded(&upstream_dir, LogFormat::Xml);

    let parent = TempDir::new().unwrap();
    let clone_path = parent.path().join("clone");
    let clone = open(&clone_path, LogFormat::Xml);
    clone
        .clone_repo(&upstream_dir.path().to_string_lossy())
        .unwrap();
    assert_eq!(clone.log(None).unwrap().len(), 2);

    assert!(!clone.has_new_changesets(None).unwrap());
    assert!(clone.push(&PushOptions::default()).unwrap().is_zero());

    fs::write(clone_path.join("c.txt"), "three\n").unwrap();
    commit(clone.as_ref(), "from clone");
    let summary = clone.push(&PushOptions::default()).unwrap();
    assert_eq!(
        (summary.changesets, summary.changes, summary.files),
        (1, 1, 1)
    );

    assert_eq!(upstream.log(None).unwrap().len(), 3);
}
