//! HTML report rendering and writing.
//!
//! Collapses the traversal output to one record per repository full name and
//! renders it as a static HTML listing via Handlebars.

use crate::traversal::ForkActivity;
use handlebars::Handlebars;
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while producing the report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Handlebars rendering error.
    #[error("Report rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// Failed to write the report file.
    #[error("Failed to write report to '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Handlebars template for the report page.
const REPORT_TEMPLATE: &str = "<html><head><title>Fork Activity</title></head><body>\
<h1>Fork Activity</h1><ul>\
{{#each records}}<li><a href=\"{{html_url}}\" target=\"_blank\">{{full_name}}</a>: \
{{commits}} commits</li>{{/each}}\
</ul></body></html>";

/// Collapses records onto one entry per repository full name.
///
/// A later record overwrites an earlier one with the same name while keeping
/// the position of the name's first occurrence. The result never contains two
/// records for the same full name.
#[must_use]
pub fn dedup_by_full_name(records: Vec<ForkActivity>) -> Vec<ForkActivity> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut deduped: Vec<ForkActivity> = Vec::new();

    for record in records {
        match positions.get(&record.fork.full_name) {
            Some(&at) => deduped[at] = record,
            None => {
                positions.insert(record.fork.full_name.clone(), deduped.len());
                deduped.push(record);
            }
        }
    }

    deduped
}

/// Renders fork activity records to the report document.
pub struct ReportRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer {
    /// Creates a renderer with a strict-mode Handlebars registry.
    ///
    /// HTML escaping stays enabled; repository names and URLs come from the
    /// API and land inside markup.
    #[must_use]
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        // Catch missing variables instead of rendering blanks
        handlebars.set_strict_mode(true);
        Self { handlebars }
    }

    /// Renders deduplicated records into the HTML report.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render(&self, records: &[ForkActivity]) -> Result<String, ReportError> {
        let items: Vec<_> = records
            .iter()
            .map(|record| {
                json!({
                    "full_name": record.fork.full_name,
                    "html_url": record.fork.html_url,
                    "commits": record.commits,
                })
            })
            .collect();

        Ok(self
            .handlebars
            .render_template(REPORT_TEMPLATE, &json!({ "records": items }))?)
    }
}

/// Writes the rendered report, creating the parent directory if missing.
///
/// An existing file at `path` is overwritten.
///
/// # Errors
///
/// Returns [`ReportError::IoError`] if the directory cannot be created or the
/// file cannot be written.
pub fn write_report(path: &Path, html: &str) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ReportError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }

    fs::write(path, html).map_err(|source| ReportError::IoError {
        path: path.display().to_string(),
        source,
    })?;

    info!(path = %path.display(), "Report written");
    Ok(())
}
