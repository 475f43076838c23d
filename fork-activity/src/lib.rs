#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod github;
pub mod pages;
pub mod rate_limit;
pub mod report;
pub mod runner;
pub mod summary;
pub mod traversal;

#[cfg(test)]
pub(crate) mod test_support;

pub use github::GitHubSource;
pub use pages::{collect_pages, fetch_all};
pub use rate_limit::{check_core_rate_limit, ensure_core_rate_limit, wait_if_needed, RateLimitInfo};
pub use report::{dedup_by_full_name, write_report, ReportError, ReportRenderer};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::RunSummary;
pub use traversal::{gather_activity, ForkActivity, ForkRef, ForkSource, TraversalError};
