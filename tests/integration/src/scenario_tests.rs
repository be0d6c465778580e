//! End-to-end scenarios over real temp trees
//!
//! The walker, engine, scratch area and filesystem mover run for real; only
//! the sync client is the in-memory fake.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use dropfix_core::{
    Error, FixerConfig, FsMover, Result, SyncClient, SyncStatus, SyncWait, TreeWalker,
};
use dropfix_test_utils::{FakeSyncClient, RecordingProgress, SyncedTree};
use pretty_assertions::assert_eq;

#[test]
fn nested_exclusion() {
    let tree = SyncedTree::new();
    tree.file("proj/node_modules/pkg/index.js", "module.exports = 1;");
    let before = tree.snapshot();
    let client = FakeSyncClient::new();
    let mut progress = RecordingProgress::new();

    let summary = TreeWalker::new(tree.config(), &client, FsMover)
        .run(&mut progress)
        .unwrap();

    assert_eq!(summary.excluded, 1);
    assert_eq!(
        fs::read_to_string(tree.path("proj/node_modules/pkg/index.js")).unwrap(),
        "module.exports = 1;"
    );
    assert_eq!(tree.snapshot(), before);
    assert!(client.excluded().contains(&tree.path("proj/node_modules")));
    assert!(!progress.listed.contains(&tree.path("proj/node_modules/pkg")));
    assert!(!progress.listed.contains(&tree.path("proj/node_modules/pkg/index.js")));
}

#[test]
fn avoided_directory() {
    let tree = SyncedTree::new();
    tree.file("repo/.git/config", "[core]\n\tbare = false\n");
    let before = tree.snapshot();
    let client = FakeSyncClient::new();
    let mut progress = RecordingProgress::new();

    let summary = TreeWalker::new(tree.config(), &client, FsMover)
        .run(&mut progress)
        .unwrap();

    assert_eq!(summary.avoided, 1);
    assert!(client.exclude_calls().is_empty());
    assert!(progress.outcomes().is_empty());
    assert!(!progress.listed.contains(&tree.path("repo/.git/config")));
    assert_eq!(tree.snapshot(), before);
}

#[test]
fn round_trip_preserves_every_target() {
    let tree = SyncedTree::new();
    tree.file("web/node_modules/a/package.json", "{}")
        .file("web/node_modules/a/lib/x.js", "x")
        .file("web/bower_components/b.js", "b")
        .file("ml/_build/model.bin", "weights")
        .file("ml/src/train.py", "print()")
        .dir("empty/build");
    let before = tree.snapshot();
    let client = FakeSyncClient::new();

    let summary = TreeWalker::new(tree.config(), &client, FsMover)
        .run(&mut RecordingProgress::new())
        .unwrap();

    assert_eq!(summary.excluded, 4);
    assert_eq!(tree.snapshot(), before);
    let expected: BTreeSet<PathBuf> = [
        "web/node_modules",
        "web/bower_components",
        "ml/_build",
        "empty/build",
    ]
    .iter()
    .map(|rel| tree.path(rel))
    .collect();
    assert_eq!(client.excluded(), expected);
}

/// Wraps the fake and drops a same-named entry into scratch the first time
/// the exclusion list is read, as a concurrent process might.
struct CollidingClient<'a> {
    inner: FakeSyncClient,
    intruder: &'a Path,
}

impl SyncClient for CollidingClient<'_> {
    fn list_excluded(&self) -> Result<BTreeSet<PathBuf>> {
        if !self.intruder.exists() {
            fs::write(self.intruder, "intruder").unwrap();
        }
        self.inner.list_excluded()
    }

    fn status(&self) -> Result<SyncStatus> {
        self.inner.status()
    }

    fn exclude(&self, path: &Path) -> Result<()> {
        self.inner.exclude(path)
    }
}

#[test]
fn collision_on_move_out() {
    let tree = SyncedTree::new();
    tree.file("app/build/out.o", "object code");
    let intruder = tree.scratch().join("build");
    let client = CollidingClient {
        inner: FakeSyncClient::new(),
        intruder: &intruder,
    };

    let err = TreeWalker::new(tree.config(), &client, FsMover)
        .run(&mut RecordingProgress::new())
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Fs(dropfix_fs::Error::DestinationExists { .. })
    ));
    assert_eq!(
        fs::read_to_string(tree.path("app/build/out.o")).unwrap(),
        "object code"
    );
    assert_eq!(fs::read_to_string(&intruder).unwrap(), "intruder");
    assert!(client.inner.exclude_calls().is_empty());
}

#[test]
fn custom_name_sets_replace_defaults() {
    let tree = SyncedTree::new();
    tree.file("rust/target/debug/app", "elf")
        .file("js/node_modules/x", "x")
        .file("notes/.DS_Store", "ds");
    let client = FakeSyncClient::new();
    let config = FixerConfig {
        exclude_dirs: vec!["target".into()],
        exclude_files: vec![".DS_Store".into()],
        avoid_dirs: vec!["js".into()],
        sync_wait: SyncWait {
            poll_interval_secs: 1,
            max_polls: None,
        },
        ..tree.config()
    }
    .validated()
    .unwrap();

    let summary = TreeWalker::new(config, &client, FsMover)
        .run(&mut RecordingProgress::new())
        .unwrap();

    assert_eq!(summary.excluded, 2);
    assert_eq!(summary.avoided, 1);
    assert_eq!(
        client.exclude_calls(),
        vec![tree.path("notes/.DS_Store"), tree.path("rust/target")]
    );
}
