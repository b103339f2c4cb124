use clap::{Parser, Subcommand};

use crate::commands::Report;

/// 📜 Commit history reports for a set of repositories
#[derive(Parser)]
#[command(
    name = "commit-report",
    version,
    about = "📜 Export recent default-branch history of repositories to CSV",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Print machine-readable summaries
    #[arg(long, global = true)]
    pub json: bool,

    /// Log at debug level
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🧾 Walk each repository and write the commit report
    Report(Report),
}
