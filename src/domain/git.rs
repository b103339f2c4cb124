use git2::{BranchType, Oid, Repository};
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::service::{Author, BranchInfo, Commit, CommitService, RepositoryMetadata};
use crate::error::ServiceError;

pub struct RepoExt(pub Repository);

impl RepoExt {
    pub fn open(path: &Path) -> Result<Self, git2::Error> {
        Repository::open(path).map(Self)
    }
    pub fn repo(&self) -> &Repository { &self.0 }

    /// Short name of the branch `HEAD` points at, even if it has no commits yet.
    pub fn default_branch(&self) -> Option<String> {
        let head = self.0.find_reference("HEAD").ok()?;
        let target = head.symbolic_target()?;
        Some(target.strip_prefix("refs/heads/").unwrap_or(target).to_string())
    }
}

/// Serves repositories found as directories under `root`, keyed by directory name.
/// Each repository is opened once and reused for later calls.
pub struct GitService {
    root: PathBuf,
    cache: RefCell<HashMap<String, RepoExt>>,
}

impl GitService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn with_repo<T>(
        &self,
        name: &str,
        f: impl FnOnce(&RepoExt) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let mut cache = self.cache.borrow_mut();
        let repo = match cache.entry(name.to_string()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(self.open(name)?),
        };
        f(repo)
    }

    fn open(&self, name: &str) -> Result<RepoExt, ServiceError> {
        let path = self.root.join(name);
        tracing::debug!("opening repository {}", path.display());
        RepoExt::open(&path).map_err(|e| ServiceError::RepositoryNotFound {
            name: name.to_string(),
            reason: e.message().to_string(),
        })
    }
}

/// Render a signature time the way the report expects: `"1700000000 -0500"`.
pub fn format_git_time(time: git2::Time) -> String {
    let offset = time.offset_minutes().abs();
    format!(
        "{} {}{:02}{:02}",
        time.seconds(),
        time.sign(),
        offset / 60,
        offset % 60
    )
}

impl CommitService for GitService {
    fn get_repository(&self, name: &str) -> Result<RepositoryMetadata, ServiceError> {
        let default_branch = self.with_repo(name, |repo| {
            repo.default_branch()
                .ok_or_else(|| ServiceError::NoDefaultBranch(name.to_string()))
        })?;
        Ok(RepositoryMetadata {
            name: name.to_string(),
            default_branch,
        })
    }

    fn get_branch(&self, name: &str, branch: &str) -> Result<BranchInfo, ServiceError> {
        let not_found = |reason: String| ServiceError::BranchNotFound {
            repository: name.to_string(),
            branch: branch.to_string(),
            reason,
        };
        let tip = self.with_repo(name, |repo| {
            let found = repo
                .repo()
                .find_branch(branch, BranchType::Local)
                .map_err(|e| not_found(e.message().to_string()))?;
            let tip = found.get().target();
            tip.ok_or_else(|| not_found("branch has no target".to_string()))
        })?;
        Ok(BranchInfo {
            name: branch.to_string(),
            tip_commit_id: tip.to_string(),
        })
    }

    fn get_commit(&self, name: &str, commit_id: &str) -> Result<Commit, ServiceError> {
        let not_found = |e: git2::Error| ServiceError::CommitNotFound {
            repository: name.to_string(),
            commit_id: commit_id.to_string(),
            reason: e.message().to_string(),
        };
        self.with_repo(name, |repo| {
            let oid = Oid::from_str(commit_id).map_err(not_found)?;
            let commit = repo.repo().find_commit(oid).map_err(not_found)?;
            let author = commit.author();

            Ok(Commit {
                commit_id: commit.id().to_string(),
                author: Author {
                    name: String::from_utf8_lossy(author.name_bytes()).into_owned(),
                    date: format_git_time(author.when()),
                },
                message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
                parents: commit.parent_ids().map(|p| p.to_string()).collect(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_negative_offsets() {
        assert_eq!(
            format_git_time(git2::Time::new(1_700_000_000, -300)),
            "1700000000 -0500"
        );
    }

    #[test]
    fn formats_half_hour_offsets() {
        assert_eq!(
            format_git_time(git2::Time::new(1_700_000_000, 330)),
            "1700000000 +0530"
        );
    }

    impl GitService {
        fn cached(&self) -> usize {
            self.cache.borrow().len()
        }
    }

    fn init_repo(root: &Path, name: &str) -> Repository {
        let mut opts = git2::RepositoryInitOptions::new();
        opts.initial_head("main");
        Repository::init_opts(root.join(name), &opts).unwrap()
    }

    /// Writes a commit object whose author name is not valid UTF-8.
    fn raw_commit(repo: &Repository) -> Oid {
        let tree = repo.index().unwrap().write_tree().unwrap();
        let mut body = format!("tree {tree}\n").into_bytes();
        body.extend_from_slice(b"author Jos\xe9 <jose@example.com> 1700000000 -0500\n");
        body.extend_from_slice(b"committer Jose <jose@example.com> 1700000000 -0500\n\n");
        body.extend_from_slice(b"latin-1 author\n");
        repo.odb().unwrap().write(git2::ObjectType::Commit, &body).unwrap()
    }

    #[test]
    fn non_utf8_author_names_are_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_repo(dir.path(), "legacy");
        let oid = raw_commit(&repo);

        let commit = GitService::new(dir.path())
            .get_commit("legacy", &oid.to_string())
            .unwrap();

        assert_eq!(commit.author.name, "Jos\u{fffd}");
        assert_eq!(commit.author.date, "1700000000 -0500");
        assert_eq!(commit.message, "latin-1 author\n");
    }

    #[test]
    fn repositories_are_opened_once() {
        let dir = tempfile::tempdir().unwrap();
        let repo = init_repo(dir.path(), "one");
        let oid = raw_commit(&repo).to_string();
        init_repo(dir.path(), "two");
        let service = GitService::new(dir.path());

        service.get_repository("one").unwrap();
        for _ in 0..5 {
            service.get_commit("one", &oid).unwrap();
        }
        assert_eq!(service.cached(), 1);

        service.get_repository("two").unwrap();
        assert!(service.get_repository("three").is_err());
        assert_eq!(service.cached(), 2);
    }

    #[test]
    fn unknown_repository_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let service = GitService::new(dir.path());
        assert!(matches!(
            service.get_repository("missing"),
            Err(ServiceError::RepositoryNotFound { .. })
        ));
    }
}
