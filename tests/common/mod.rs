//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::PathBuf;

use git2::{Oid, Repository, Signature, Time};

/// Get the path to test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Get the path to a log fixture.
pub fn log_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("logs").join(name)
}

/// Read a fixture file as a string.
pub fn read_fixture(path: PathBuf) -> String {
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {:?}: {}", path, e))
}

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    /// Create a commit authored at `seconds` since the epoch (UTC). Returns the commit OID.
    pub fn commit_at(&self, message: &str, seconds: i64) -> Oid {
        let sig = Signature::new("Test User", "test@example.com", &Time::new(seconds, 0))
            .expect("Failed to create signature");

        // Create or update a file to have something to commit
        let file_path = self.dir.path().join("test.txt");
        std::fs::write(&file_path, format!("{}\n{}", message, seconds))
            .expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(std::path::Path::new("test.txt")).expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        // Get parent commit if exists
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());

        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Write a commit object with an arbitrary (possibly non-UTF-8) message
    /// straight into the object database and point HEAD at it.
    pub fn commit_raw(&self, message: &[u8], seconds: i64) -> Oid {
        let tree = self
            .repo
            .treebuilder(None)
            .expect("Failed to create tree builder")
            .write()
            .expect("Failed to write tree");

        let who = format!("Test User <test@example.com> {} +0000", seconds);
        let mut raw = format!("tree {}\nauthor {}\ncommitter {}\n\n", tree, who, who).into_bytes();
        raw.extend_from_slice(message);
        raw.push(b'\n');

        let oid = self
            .repo
            .odb()
            .expect("Failed to open odb")
            .write(git2::ObjectType::Commit, &raw)
            .expect("Failed to write commit object");

        self.repo
            .reference("refs/heads/raw", oid, true, "raw commit")
            .expect("Failed to create branch");
        self.repo.set_head("refs/heads/raw").expect("Failed to set HEAD");
        oid
    }

    /// Abbreviated hash of a commit, as libgit2 reports it.
    pub fn short_id(&self, oid: Oid) -> String {
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        obj.short_id()
            .expect("Failed to get short id")
            .as_str()
            .expect("Short id is not UTF-8")
            .to_string()
    }
}
