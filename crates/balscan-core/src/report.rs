//! Issue serialization and the JSON results file.

use crate::rule::{RuleKind, Source};
use crate::types::{Issue, TextRange};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the JSON results file.
pub const RESULTS_JSON_FILE: &str = "scan_results.json";

/// Errors raised while producing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Reading a source file or writing a report failed.
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ReportError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// One issue as it appears in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRecord {
    /// Qualified rule id.
    #[serde(rename = "ruleID")]
    pub rule_id: String,
    /// Rule kind.
    pub issue_severity: RuleKind,
    /// Provenance.
    pub issue_type: Source,
    /// Rule description.
    pub message: String,
    /// One-based range.
    pub text_range: TextRange,
}

impl From<&Issue> for IssueRecord {
    fn from(issue: &Issue) -> Self {
        Self {
            rule_id: issue.rule().id().to_string(),
            issue_severity: issue.rule().kind(),
            issue_type: issue.source(),
            message: issue.rule().description().to_string(),
            text_range: issue.text_range(),
        }
    }
}

/// An issue record together with the file it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    /// `<module>/<document>` label.
    pub file_name: String,
    /// Path of the file.
    pub file_path: String,
    /// The issue.
    #[serde(flatten)]
    pub issue: IssueRecord,
}

impl From<&Issue> for ReportEntry {
    fn from(issue: &Issue) -> Self {
        Self {
            file_name: issue.document_label().to_string(),
            file_path: issue.file_path().display().to_string(),
            issue: issue.into(),
        }
    }
}

/// Converts issues to report entries, keeping their order.
#[must_use]
pub fn to_entries(issues: &[Issue]) -> Vec<ReportEntry> {
    issues.iter().map(ReportEntry::from).collect()
}

/// Pretty-printed JSON array of report entries.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(issues: &[Issue]) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(&to_entries(issues))?)
}

/// Writes [`RESULTS_JSON_FILE`] into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_json_report(issues: &[Issue], dir: &Path) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir).map_err(ReportError::io(dir))?;
    let path = dir.join(RESULTS_JSON_FILE);
    let json = to_json(issues)?;
    std::fs::write(&path, json).map_err(ReportError::io(&path))?;
    Ok(path)
}
