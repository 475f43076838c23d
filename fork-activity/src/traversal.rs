//! Recursive fork-network traversal.
//!
//! Starting from a root repository, [`gather_activity`] discovers its forks,
//! counts each fork's unique commits, and descends into forks of forks up to
//! a depth limit. Forks without any unique commits are dropped and never
//! descended into.

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info_span, Instrument};

/// Errors that can occur while walking the fork network.
#[derive(Debug, Error)]
pub enum TraversalError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, reset at {reset_at}")]
    RateLimitExceeded { reset_at: u64 },
}

/// A repository in the fork network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForkRef {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,

    /// GitHub URL of the repository.
    pub html_url: String,
}

/// A fork paired with its unique commit count.
///
/// Created once per fork that has at least one unique commit; never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForkActivity {
    /// The fork this record describes.
    pub fork: ForkRef,

    /// Number of unique commit SHAs in the fork.
    pub commits: usize,
}

/// Source of fork listings and commit identifiers.
///
/// Implemented by [`GitHubSource`](crate::github::GitHubSource) for the real
/// API; tests substitute an in-memory implementation.
#[async_trait]
pub trait ForkSource {
    /// Lists all forks of `owner/repo` across every page, in listing order.
    async fn list_forks(&self, owner: &str, repo: &str) -> Result<Vec<ForkRef>, TraversalError>;

    /// Returns the set of unique commit SHAs of `owner/repo`.
    async fn unique_commits(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<HashSet<String>, TraversalError>;
}

/// Gathers activity records for the fork network of `owner/repo`.
///
/// Descends depth-first in fork-listing order. `depth` is the current
/// recursion level (pass 0 for the root repository); once it exceeds
/// `max_depth` the call returns empty without touching the source, so
/// `max_depth = 0` covers direct forks only.
///
/// # Errors
///
/// The first [`TraversalError`] aborts the whole traversal; records gathered
/// up to that point are discarded.
pub fn gather_activity<'a, S>(
    source: &'a S,
    owner: &'a str,
    repo: &'a str,
    depth: u32,
    max_depth: u32,
) -> BoxFuture<'a, Result<Vec<ForkActivity>, TraversalError>>
where
    S: ForkSource + Sync,
{
    let span = info_span!("traverse", owner, repo, depth);
    Box::pin(
        async move {
            if depth > max_depth {
                debug!("Depth limit reached");
                return Ok(Vec::new());
            }

            let forks = source.list_forks(owner, repo).await?;
            debug!(count = forks.len(), "Listed forks");

            let mut activity = Vec::new();
            for fork in forks {
                let commits = source.unique_commits(&fork.owner, &fork.name).await?;
                if commits.is_empty() {
                    // No unique commits: neither reported nor descended into.
                    debug!(fork = %fork.full_name, "Fork has no unique commits, skipping");
                    continue;
                }

                let record = ForkActivity {
                    commits: commits.len(),
                    fork,
                };
                let nested = gather_activity(
                    source,
                    &record.fork.owner,
                    &record.fork.name,
                    depth + 1,
                    max_depth,
                )
                .await?;
                activity.push(record);
                activity.extend(nested);
            }

            Ok(activity)
        }
        .instrument(span),
    )
}
