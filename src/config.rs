/// Report configuration.
///
/// Sources, highest priority first: command-line flags, a TOML file passed
/// with `--config`, built-in defaults.
use crate::domain::walker::{
    WalkLimits, DEFAULT_MAX_COMMITS, DEFAULT_PAST_YEARS, DEFAULT_TIMEOUT_SECS,
};
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest accepted `past_years`.
pub const MAX_PAST_YEARS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// Repository names, processed in order
    #[serde(default)]
    pub repositories: Vec<String>,

    /// Directory holding one git repository per name
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Only commits authored within this many 365-day years
    #[serde(default = "default_past_years")]
    pub past_years: u32,

    /// Stop each repository after this many commits
    #[serde(default = "default_max_commits")]
    pub max_commits: usize,

    /// Wall-clock budget per repository, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// CSV file to write
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_past_years() -> u32 {
    DEFAULT_PAST_YEARS
}

fn default_max_commits() -> usize {
    DEFAULT_MAX_COMMITS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_output() -> PathBuf {
    PathBuf::from("commit_report.csv")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            repositories: Vec::new(),
            root: default_root(),
            past_years: default_past_years(),
            max_commits: default_max_commits(),
            timeout_secs: default_timeout_secs(),
            output: default_output(),
        }
    }
}

/// Values given on the command line; `None` leaves the file/default value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub repositories: Vec<String>,
    pub root: Option<PathBuf>,
    pub past_years: Option<u32>,
    pub max_commits: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub output: Option<PathBuf>,
}

impl ReportConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ReportConfig = toml::from_str(&content)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Optional file, then overrides, then validation.
    pub fn resolve(file: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, o: Overrides) {
        if !o.repositories.is_empty() {
            self.repositories = o.repositories;
        }
        if let Some(root) = o.root {
            self.root = root;
        }
        if let Some(years) = o.past_years {
            self.past_years = years;
        }
        if let Some(max) = o.max_commits {
            self.max_commits = max;
        }
        if let Some(secs) = o.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(output) = o.output {
            self.output = output;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repositories.is_empty() {
            return Err(ConfigError::Invalid(
                "no repositories given (pass names or set `repositories` in the config file)"
                    .into(),
            ));
        }
        if let Some(blank) = self.repositories.iter().find(|r| r.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "repository name {blank:?} is blank"
            )));
        }
        if self.past_years > MAX_PAST_YEARS {
            return Err(ConfigError::Invalid(format!(
                "past_years must be at most {MAX_PAST_YEARS}, got {}",
                self.past_years
            )));
        }
        if self.max_commits == 0 {
            return Err(ConfigError::Invalid("max_commits must be at least 1".into()));
        }
        Ok(())
    }

    pub fn limits(&self) -> WalkLimits {
        WalkLimits {
            past_years: self.past_years,
            max_commits: self.max_commits,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
