//! Orchestrates fork-network scans and report generation.

use crate::github::GitHubSource;
use crate::report::{dedup_by_full_name, write_report, ReportError, ReportRenderer};
use crate::summary::RunSummary;
use crate::traversal::{gather_activity, ForkActivity, TraversalError};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration for a fork activity run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Owner of the root repository.
    owner: String,
    /// Name of the root repository.
    repo: String,
    /// GitHub token used for API calls.
    token: String,
    /// Maximum fork-of-fork recursion depth (0 = direct forks only).
    max_depth: u32,
    /// Where the rendered report is written.
    output_path: PathBuf,
    /// Whether to preview records without writing the report.
    dry_run: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(
        owner: String,
        repo: String,
        token: String,
        max_depth: u32,
        output_path: PathBuf,
        dry_run: bool,
    ) -> Self {
        Self {
            owner,
            repo,
            token,
            max_depth,
            output_path,
            dry_run,
        }
    }

    /// Returns the owner of the root repository.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the name of the root repository.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the maximum recursion depth.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Returns the report output path.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Errors that can occur while running a scan.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Fork network traversal errors.
    #[error(transparent)]
    Traversal(#[from] TraversalError),
    /// Report rendering and writing errors.
    #[error(transparent)]
    Report(#[from] ReportError),
    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),
}

/// Orchestrates a full fork activity scan and report run.
pub struct Runner {
    config: RunnerConfig,
    source: GitHubSource,
    renderer: ReportRenderer,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the GitHub client cannot be constructed.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let source = GitHubSource::from_token(config.token.clone())?;
        Ok(Self {
            config,
            source,
            renderer: ReportRenderer::new(),
        })
    }

    /// Executes the full scan: traverse, dedup, render, write.
    ///
    /// # Errors
    ///
    /// Fails fast on the first traversal or filesystem error; no report is
    /// written in that case.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run);
        info!(
            owner = %self.config.owner,
            repo = %self.config.repo,
            max_depth = self.config.max_depth,
            "Gathering fork activity"
        );

        let activity = gather_activity(
            &self.source,
            &self.config.owner,
            &self.config.repo,
            0,
            self.config.max_depth,
        )
        .await?;
        summary.records_gathered = activity.len();

        if activity.is_empty() {
            warn!("No forks with unique commits found");
        }

        let records = dedup_by_full_name(activity);
        summary.record_report(&records);

        if self.config.dry_run {
            print_dry_run_preview(&records);
            return Ok(summary);
        }

        let html = self.renderer.render(&records)?;
        write_report(self.config.output_path(), &html)?;

        Ok(summary)
    }
}

fn print_dry_run_preview(records: &[ForkActivity]) {
    println!("\n[DRY RUN] Would report {} forks:", records.len());
    for (i, record) in records.iter().enumerate() {
        println!(
            "  [{}/{}] {}: {} commits",
            i + 1,
            records.len(),
            record.fork.full_name,
            record.commits
        );
    }
    println!();
}
