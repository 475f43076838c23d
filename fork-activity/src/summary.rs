//! Run summary.

use crate::traversal::ForkActivity;

/// Summary of a completed fork activity run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Records gathered by the traversal (before dedup).
    pub records_gathered: usize,

    /// Records in the rendered report (after dedup).
    pub records_rendered: usize,

    /// Sum of unique commit counts across rendered records.
    pub total_commits: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Records the final report contents.
    pub fn record_report(&mut self, records: &[ForkActivity]) {
        self.records_rendered = records.len();
        self.total_commits = records.iter().map(|record| record.commits).sum();
    }
}
