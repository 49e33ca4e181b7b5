//! Console output for scan results.

use anyhow::Result;
use balscan_core::{to_entries, RuleKind, ScanResult};
use serde::Serialize;

use crate::OutputFormat;

/// JSON document printed with `--format json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    documents_scanned: usize,
    rules: Vec<String>,
    issues: Vec<balscan_core::ReportEntry>,
}

/// Print scan results in the specified format.
pub fn print(result: &ScanResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
    }
    Ok(())
}

fn kind_indicator(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::Vulnerability => "\x1b[31mvulnerability\x1b[0m",
        RuleKind::Bug => "\x1b[33mbug\x1b[0m",
        RuleKind::CodeSmell => "\x1b[34mcode smell\x1b[0m",
    }
}

fn render_text(result: &ScanResult) -> String {
    let mut out = String::new();

    for issue in &result.issues {
        let range = issue.text_range();
        out.push_str(&format!(
            "{} at {}:{}:{}\n",
            issue.rule().id(),
            issue.document_label(),
            range.start_line,
            range.start_line_offset,
        ));
        out.push_str(&format!(
            "  {}: {}\n",
            kind_indicator(issue.rule().kind()),
            issue.rule().description()
        ));
        out.push('\n');
    }

    let summary_color = if result.issues.is_empty() {
        "\x1b[32m"
    } else {
        "\x1b[33m"
    };
    out.push_str(&format!(
        "{}Found {} issue(s) in {} file(s)\x1b[0m\n",
        summary_color,
        result.issues.len(),
        result.documents_scanned
    ));
    out
}

fn render_json(result: &ScanResult) -> Result<String> {
    let summary = JsonSummary {
        documents_scanned: result.documents_scanned,
        rules: result.rules.iter().map(|r| r.id().to_string()).collect(),
        issues: to_entries(&result.issues),
    };
    Ok(serde_json::to_string_pretty(&summary)?)
}
