use std::path::PathBuf;
use thiserror::Error;

/// Failure to parse an authoring date of the form `"<seconds> <sign>HHMM"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("expected \"<seconds> <sign>HHMM\", got {0:?}")]
    Shape(String),

    #[error("epoch seconds are not an integer: {0:?}")]
    Epoch(String),

    #[error("offset must look like +HHMM or -HHMM, got {0:?}")]
    Offset(String),

    #[error("timestamp {0:?} is out of range")]
    OutOfRange(String),
}

/// Errors surfaced by a [`crate::domain::service::CommitService`].
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("repository '{name}' not found: {reason}")]
    RepositoryNotFound { name: String, reason: String },

    #[error("repository '{0}' has no default branch")]
    NoDefaultBranch(String),

    #[error("branch '{branch}' not found in '{repository}': {reason}")]
    BranchNotFound {
        repository: String,
        branch: String,
        reason: String,
    },

    #[error("commit {commit_id} not found in '{repository}': {reason}")]
    CommitNotFound {
        repository: String,
        commit_id: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Anything that aborts a report run.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ReportError> = std::result::Result<T, E>;
