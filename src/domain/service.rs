use crate::error::ServiceError;

/// Author block of a commit. `date` is `"<epoch-seconds> <sign>HHMM"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub date: String,
}

/// A commit as returned by the service. Never built locally outside tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub commit_id: String,
    pub author: Author,
    pub message: String,
    pub parents: Vec<String>,
}

impl Commit {
    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryMetadata {
    pub name: String,
    pub default_branch: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchInfo {
    pub name: String,
    pub tip_commit_id: String,
}

/// The slice of a source-control service the report needs.
pub trait CommitService {
    fn get_repository(&self, name: &str) -> Result<RepositoryMetadata, ServiceError>;
    fn get_branch(&self, name: &str, branch: &str) -> Result<BranchInfo, ServiceError>;
    fn get_commit(&self, name: &str, commit_id: &str) -> Result<Commit, ServiceError>;
}
