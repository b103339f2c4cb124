//! Temporary git repositories for integration tests.

use git2::{Oid, Repository, RepositoryInitOptions, Signature, Time};
use std::path::Path;

pub const DAY: i64 = 86_400;

/// A repository created under a shared root, committed to directly with git2.
pub struct TestRepo {
    pub repo: Repository,
}

impl TestRepo {
    /// Create `<root>/<name>` with `HEAD` pointing at `branch`.
    pub fn init(root: &Path, name: &str, branch: &str) -> Self {
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(branch);
        let repo = Repository::init_opts(root.join(name), &opts).expect("git init failed");
        Self { repo }
    }

    /// Commit on top of `HEAD` and advance it.
    pub fn commit(&self, message: &str, seconds: i64, offset_minutes: i32) -> Oid {
        let parents = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().expect("HEAD is not a commit")],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<_> = parents.iter().collect();
        self.write(Some("HEAD"), message, seconds, offset_minutes, &parent_refs)
    }

    /// Commit on top of `HEAD` without moving any reference.
    pub fn side_commit(&self, message: &str, seconds: i64) -> Oid {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.write(None, message, seconds, 0, &[&head])
    }

    /// Merge commit on `HEAD` whose second parent is `other`.
    pub fn merge(&self, other: Oid, message: &str, seconds: i64) -> Oid {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        let other = self.repo.find_commit(other).unwrap();
        self.write(Some("HEAD"), message, seconds, 0, &[&head, &other])
    }

    fn write(
        &self,
        update_ref: Option<&str>,
        message: &str,
        seconds: i64,
        offset_minutes: i32,
        parents: &[&git2::Commit<'_>],
    ) -> Oid {
        let when = Time::new(seconds, offset_minutes);
        let sig = Signature::new("Test Author", "author@example.com", &when)
            .expect("invalid signature");
        let tree_id = self.repo.index().unwrap().write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        self.repo
            .commit(update_ref, &sig, &sig, message, &tree, parents)
            .expect("commit failed")
    }
}
