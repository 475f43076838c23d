//! GitHub-backed fork source.
//!
//! Implements [`ForkSource`] over the REST API's forks and commits list
//! endpoints, deserializing only the fields the activity report needs.

use crate::pages::fetch_all;
use crate::rate_limit::ensure_core_rate_limit;
use crate::traversal::{ForkRef, ForkSource, TraversalError};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;
use std::collections::HashSet;

/// Fork list entry as returned by `GET /repos/{owner}/{repo}/forks`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForkEntry {
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub owner: OwnerEntry,
}

/// Owner object nested in a fork entry.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OwnerEntry {
    pub login: String,
}

/// Commit list entry as returned by `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CommitEntry {
    pub sha: String,
}

impl From<ForkEntry> for ForkRef {
    fn from(entry: ForkEntry) -> Self {
        Self {
            owner: entry.owner.login,
            name: entry.name,
            full_name: entry.full_name,
            html_url: entry.html_url,
        }
    }
}

/// [`ForkSource`] backed by the GitHub REST API.
pub struct GitHubSource {
    octocrab: Octocrab,
}

impl GitHubSource {
    /// Wraps an already-built client.
    #[must_use]
    pub fn new(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    /// Builds a client authenticated with a personal access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the octocrab client cannot be constructed.
    pub fn from_token(token: String) -> Result<Self, octocrab::Error> {
        Ok(Self::new(
            Octocrab::builder().personal_token(token).build()?,
        ))
    }

    /// Checks the core budget, waiting for the reset when it runs low.
    ///
    /// Fails with [`TraversalError::RateLimitExceeded`] when the budget is
    /// exhausted even after the wait.
    async fn ensure_budget(&self) -> Result<(), TraversalError> {
        let info = ensure_core_rate_limit(&self.octocrab).await?;
        if info.remaining == 0 {
            return Err(TraversalError::RateLimitExceeded {
                reset_at: info.reset,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ForkSource for GitHubSource {
    async fn list_forks(&self, owner: &str, repo: &str) -> Result<Vec<ForkRef>, TraversalError> {
        self.ensure_budget().await?;

        let route = format!("/repos/{owner}/{repo}/forks");
        let entries: Vec<ForkEntry> = fetch_all(&self.octocrab, &route).await?;

        Ok(entries.into_iter().map(ForkRef::from).collect())
    }

    async fn unique_commits(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<HashSet<String>, TraversalError> {
        self.ensure_budget().await?;

        let route = format!("/repos/{owner}/{repo}/commits");
        let entries: Vec<CommitEntry> = fetch_all(&self.octocrab, &route).await?;

        // Identical SHAs appearing on multiple pages collapse here.
        Ok(entries.into_iter().map(|entry| entry.sha).collect())
    }
}
