//! Bounded first-parent walk over one repository's default branch.
//!
//! A walk resolves the default branch and its tip, then follows the first
//! parent of each commit until one of the bounds in [`WalkLimits`] trips,
//! a fetch fails, or a root commit is reached.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::time::{Duration as StdDuration, Instant};

use crate::domain::service::{Commit, CommitService};
use crate::domain::timestamp::parse_author_date;
use crate::error::{ServiceError, TimestampError};
use crate::utils::short_id;

pub const DEFAULT_PAST_YEARS: u32 = 2;
pub const DEFAULT_MAX_COMMITS: usize = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Years are 365 days here; leap days are not accounted for.
const DAYS_PER_YEAR: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkLimits {
    pub past_years: u32,
    pub max_commits: usize,
    pub timeout: StdDuration,
}

impl Default for WalkLimits {
    fn default() -> Self {
        Self {
            past_years: DEFAULT_PAST_YEARS,
            max_commits: DEFAULT_MAX_COMMITS,
            timeout: StdDuration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl WalkLimits {
    /// Oldest authoring instant still accepted, relative to `now`.
    /// `None` when the window reaches past the earliest representable date.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        Duration::try_days(DAYS_PER_YEAR * i64::from(self.past_years))
            .and_then(|window| now.checked_sub_signed(window))
    }
}

/// A commit that passed every bound, with its normalized authoring instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedCommit {
    pub commit: Commit,
    pub authored: DateTime<Utc>,
}

/// Why a walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    CountLimit,
    Timeout,
    AgeLimit { commit_id: String },
    FetchError { commit_id: String, message: String },
    NoParent,
}

impl StopReason {
    pub fn label(&self) -> &'static str {
        match self {
            StopReason::CountLimit => "count limit",
            StopReason::Timeout => "timeout",
            StopReason::AgeLimit { .. } => "age limit",
            StopReason::FetchError { .. } => "fetch error",
            StopReason::NoParent => "root reached",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::AgeLimit { commit_id } => {
                write!(f, "{} at {}", self.label(), short_id(commit_id, 7))
            }
            StopReason::FetchError { commit_id, message } => {
                write!(f, "{} at {}: {message}", self.label(), short_id(commit_id, 7))
            }
            _ => f.write_str(self.label()),
        }
    }
}

/// Outcome of one iteration of the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Accepted(AcceptedCommit),
    Stopped(StopReason),
}

/// Cursor over one repository's history. Finite and not restartable.
pub struct CommitWalk<'a, S: CommitService + ?Sized> {
    service: &'a S,
    repository: String,
    limits: WalkLimits,
    cutoff: Option<DateTime<Utc>>,
    started: Instant,
    cursor: Option<String>,
    accepted: usize,
    stop: Option<StopReason>,
}

impl<'a, S: CommitService + ?Sized> CommitWalk<'a, S> {
    /// Resolve the default branch and its tip. Failures here are not
    /// per-commit errors and propagate to the caller.
    pub fn start(
        service: &'a S,
        repository: &str,
        limits: WalkLimits,
        now: DateTime<Utc>,
    ) -> Result<Self, ServiceError> {
        let meta = service.get_repository(repository)?;
        let branch = service.get_branch(repository, &meta.default_branch)?;
        tracing::debug!(
            repository,
            branch = %branch.name,
            tip = %branch.tip_commit_id,
            "resolved default branch"
        );

        Ok(Self {
            service,
            repository: repository.to_string(),
            limits,
            cutoff: limits.cutoff(now),
            started: Instant::now(),
            cursor: Some(branch.tip_commit_id),
            accepted: 0,
            stop: None,
        })
    }

    /// Set once the walk has ended.
    pub fn stop_reason(&self) -> Option<&StopReason> {
        self.stop.as_ref()
    }

    /// Advance one commit. Once stopped, keeps returning the same stop.
    /// A malformed timestamp is returned as an error and ends the walk.
    pub fn step(&mut self) -> Result<Step, TimestampError> {
        if let Some(reason) = &self.stop {
            return Ok(Step::Stopped(reason.clone()));
        }
        let step = self.advance()?;
        if let Step::Stopped(reason) = &step {
            self.stop = Some(reason.clone());
        }
        Ok(step)
    }

    fn advance(&mut self) -> Result<Step, TimestampError> {
        if self.accepted >= self.limits.max_commits {
            return Ok(Step::Stopped(StopReason::CountLimit));
        }
        if self.started.elapsed() > self.limits.timeout {
            tracing::warn!(repository = %self.repository, "timeout reached for repository");
            return Ok(Step::Stopped(StopReason::Timeout));
        }
        let Some(commit_id) = self.cursor.take() else {
            return Ok(Step::Stopped(StopReason::NoParent));
        };

        let commit = match self.service.get_commit(&self.repository, &commit_id) {
            Ok(commit) => commit,
            Err(e) => {
                tracing::error!(
                    repository = %self.repository,
                    commit = %commit_id,
                    "error getting commit: {e}"
                );
                return Ok(Step::Stopped(StopReason::FetchError {
                    commit_id,
                    message: e.to_string(),
                }));
            }
        };

        let authored = parse_author_date(&commit.author.date)?;
        if self.cutoff.is_some_and(|cutoff| authored < cutoff) {
            tracing::debug!(commit = %commit_id, %authored, "older than cutoff");
            return Ok(Step::Stopped(StopReason::AgeLimit { commit_id }));
        }

        self.accepted += 1;
        self.cursor = commit.first_parent().map(str::to_string);
        tracing::debug!(commit = %commit_id, count = self.accepted, "accepted");
        Ok(Step::Accepted(AcceptedCommit { commit, authored }))
    }
}

impl<S: CommitService + ?Sized> Iterator for CommitWalk<'_, S> {
    type Item = Result<AcceptedCommit, TimestampError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(Step::Accepted(c)) => Some(Ok(c)),
            Ok(Step::Stopped(_)) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
