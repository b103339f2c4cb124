use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::commands::Global;
use crate::config::{Overrides, ReportConfig};
use crate::domain::git::GitService;
use crate::presentation::table;
use crate::report::{self as r, RepositorySummary};

/// Export recent first-parent history of each repository to CSV.
///
/// Every accepted commit is printed as it is found; the CSV file is
/// written repository by repository once each walk has finished.
#[derive(Debug, Args)]
pub struct Report {
    /// Repository names (directories under --root)
    pub repositories: Vec<String>,

    /// TOML file with report settings; flags override it
    #[arg(short, long, env = "COMMIT_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing the repositories
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Only commits authored within this many years (365 days each)
    #[arg(long)]
    pub past_years: Option<u32>,

    /// Stop each repository after this many commits
    #[arg(short = 'n', long)]
    pub max_commits: Option<usize>,

    /// Per-repository time budget in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// CSV file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Report {
    fn overrides(&self) -> Overrides {
        Overrides {
            repositories: self.repositories.clone(),
            root: self.root.clone(),
            past_years: self.past_years,
            max_commits: self.max_commits,
            timeout_secs: self.timeout,
            output: self.output.clone(),
        }
    }
}

impl super::Runnable for Report {
    fn run(self, g: &Global) -> Result<()> {
        let config = ReportConfig::resolve(self.config.as_deref(), self.overrides())
            .context("invalid report configuration")?;
        let service = GitService::new(&config.root);

        // With --json, stdout carries only the JSON summary.
        let mut console: Box<dyn Write> = if g.json {
            Box::new(io::stderr().lock())
        } else {
            Box::new(io::stdout().lock())
        };
        let summaries = r::write_report(&service, &config, Utc::now, &mut console)
            .with_context(|| format!("report into {} failed", config.output.display()))?;

        finish(&summaries, &config, g.json, &mut console, &mut io::stdout())
    }
}

/// Completion line on the console, then the summary as a table there or as
/// JSON on `out`.
fn finish<C: Write, O: Write>(
    summaries: &[RepositorySummary],
    config: &ReportConfig,
    json: bool,
    console: &mut C,
    out: &mut O,
) -> Result<()> {
    let total: usize = summaries.iter().map(|s| s.rows).sum();
    writeln!(
        console,
        "Report complete: {total} commits from {} repositories written to {}",
        summaries.len(),
        config.output.display()
    )?;

    if json {
        let payload = summary_json(summaries, config);
        writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
    } else {
        writeln!(console, "{}", table::summary(summaries))?;
    }
    console.flush()?;
    out.flush()?;
    Ok(())
}

fn summary_json(summaries: &[RepositorySummary], config: &ReportConfig) -> serde_json::Value {
    json!({
        "output": config.output.display().to_string(),
        "past_years": config.past_years,
        "max_commits": config.max_commits,
        "timeout_secs": config.timeout_secs,
        "repositories": summaries.iter().map(|s| json!({
            "repository": s.repository,
            "rows": s.rows,
            "stop": s.stop.as_ref().map(|r| r.label()),
            "detail": s.stop.as_ref().map(|r| r.to_string()),
        })).collect::<Vec<_>>(),
    })
}
