//! Multi-repository report loop.
//!
//! Repositories are walked one at a time. Each accepted commit is printed to
//! the console as soon as it is accepted; a repository's rows reach the CSV
//! sink only after its walk has finished.

use chrono::{DateTime, Utc};
use std::io::Write;

use crate::config::ReportConfig;
use crate::domain::service::CommitService;
use crate::domain::walker::{CommitWalk, StopReason, WalkLimits};
use crate::error::Result;
use crate::presentation::row::ReportRow;
use crate::presentation::sink::CsvSink;

const SEPARATOR_WIDTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySummary {
    pub repository: String,
    pub rows: usize,
    pub stop: Option<StopReason>,
}

/// Walk every repository and append its rows to `sink`.
///
/// `clock` is read once at the start of each walk to place its age cutoff.
pub fn run<S, N, W, C>(
    service: &S,
    repositories: &[String],
    limits: WalkLimits,
    clock: N,
    sink: &mut CsvSink<W>,
    console: &mut C,
) -> Result<Vec<RepositorySummary>>
where
    S: CommitService + ?Sized,
    N: Fn() -> DateTime<Utc>,
    W: Write,
    C: Write,
{
    let mut summaries = Vec::with_capacity(repositories.len());

    for name in repositories {
        writeln!(console, "Commits for repository: {name}")?;
        tracing::info!(repository = %name, "walking repository");

        let mut walk = CommitWalk::start(service, name, limits, clock())?;
        let mut accepted = Vec::new();
        for commit in walk.by_ref() {
            let commit = commit?;
            writeln!(console, "{}", ReportRow::from(&commit))?;
            accepted.push(commit);
        }

        let rows: Vec<ReportRow> = accepted.iter().map(ReportRow::from).collect();
        sink.write_rows(&rows)?;
        writeln!(console, "{}", "=".repeat(SEPARATOR_WIDTH))?;

        let stop = walk.stop_reason().cloned();
        tracing::info!(
            repository = %name,
            rows = rows.len(),
            stop = %stop.as_ref().map_or("-", StopReason::label),
            "repository done"
        );
        summaries.push(RepositorySummary {
            repository: name.clone(),
            rows: rows.len(),
            stop,
        });
    }

    sink.flush()?;
    Ok(summaries)
}

/// Open the configured output file, run the report into it and close it.
pub fn write_report<S, N, C>(
    service: &S,
    config: &ReportConfig,
    clock: N,
    console: &mut C,
) -> Result<Vec<RepositorySummary>>
where
    S: CommitService + ?Sized,
    N: Fn() -> DateTime<Utc>,
    C: Write,
{
    let mut sink = CsvSink::create(&config.output)?;
    let summaries = run(
        service,
        &config.repositories,
        config.limits(),
        clock,
        &mut sink,
        console,
    )?;
    sink.into_inner()?;
    Ok(summaries)
}
