use clap::Parser;
use commit_report::cli::{Cli, Commands};
use commit_report::commands::{Global, Runnable};
use tracing::Level;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let g = Global { json: cli.json };
    let result = match cli.command {
        Commands::Report(cmd) => cmd.run(&g),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
