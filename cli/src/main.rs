//! CLI for the fork activity report generator.
//!
//! Walks a GitHub repository's fork network, counts each fork's unique
//! commits, and writes a static HTML report.

use clap::Parser;
use fork_activity::{RunSummary, Runner, RunnerConfig, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Fork Activity - report commit activity across a repository's fork network.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Owner of the root repository.
    #[arg(long)]
    owner: String,

    /// Name of the root repository.
    #[arg(long)]
    repo: String,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN")]
    token: String,

    /// Maximum fork-of-fork recursion depth (0 = direct forks only).
    #[arg(long, default_value_t = 2)]
    max_depth: u32,

    /// Path of the rendered HTML report.
    #[arg(long, default_value = "public/index.html")]
    output: PathBuf,

    /// Preview report records without writing the file.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Run failed");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let config = RunnerConfig::new(
        args.owner,
        args.repo,
        args.token,
        args.max_depth,
        args.output,
        args.dry_run,
    );
    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Records gathered: {}", summary.records_gathered);
    println!("  Records rendered: {}", summary.records_rendered);
    println!("  Total commits: {}", summary.total_commits);
}
