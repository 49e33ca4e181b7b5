//! Self-contained HTML scan report.

use crate::report::{IssueRecord, ReportError};
use crate::types::Issue;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Name of the HTML report file.
pub const RESULTS_HTML_FILE: &str = "index.html";

const CSS_STYLES: &str = r"
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;
    margin: 0;
    padding: 20px;
    background-color: #f4f4f4;
    color: #333;
}
h1, h2 { color: #333; }
section { margin-bottom: 32px; }
table {
    width: 100%;
    border-collapse: collapse;
    background-color: white;
    box-shadow: 0 2px 15px rgba(0,0,0,0.1);
}
th, td {
    border: 1px solid #ddd;
    padding: 8px 12px;
    text-align: left;
}
th { background-color: #007bff; color: white; }
tr:nth-child(even) { background-color: #f9f9f9; }
.kind-VULNERABILITY { color: #c62828; font-weight: bold; }
.kind-BUG { color: #ef6c00; font-weight: bold; }
.kind-CODE_SMELL { color: #1565c0; }
pre { background: #272822; color: #f8f8f2; padding: 12px; overflow-x: auto; }
";

/// A file with at least one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedFile {
    /// `<module>/<document>` label.
    pub file_name: String,
    /// Path of the file.
    pub file_path: String,
    /// File contents at report time.
    pub file_content: String,
    /// Issues found in the file.
    pub issues: Vec<IssueRecord>,
}

/// Data embedded in the HTML report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReportData {
    /// Project name.
    pub project_name: String,
    /// Files in order of their first issue.
    pub scanned_files: Vec<ScannedFile>,
}

impl ScanReportData {
    /// Groups `issues` by file, reading each file's contents once.
    ///
    /// # Errors
    ///
    /// Returns an error if a referenced file cannot be read.
    pub fn collect(project_name: &str, issues: &[Issue]) -> Result<Self, ReportError> {
        let mut scanned_files: Vec<ScannedFile> = Vec::new();

        for issue in issues {
            let file_path = issue.file_path().display().to_string();
            if let Some(file) = scanned_files.iter_mut().find(|f| f.file_path == file_path) {
                file.issues.push(issue.into());
                continue;
            }

            let file_content =
                std::fs::read_to_string(issue.file_path()).map_err(ReportError::io(issue.file_path()))?;
            scanned_files.push(ScannedFile {
                file_name: issue.document_label().to_string(),
                file_path,
                file_content,
                issues: vec![issue.into()],
            });
        }

        Ok(Self {
            project_name: project_name.to_string(),
            scanned_files,
        })
    }
}

/// Renders the report page.
///
/// # Errors
///
/// Returns an error if the embedded data cannot be serialized.
pub fn render_html(data: &ScanReportData) -> Result<String, ReportError> {
    // Keeps the embedded JSON from closing its script element.
    let json = serde_json::to_string(data)?.replace("</", "<\\/");
    let issue_count: usize = data.scanned_files.iter().map(|f| f.issues.len()).sum();

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Scan report: " (data.project_name) }
                style { (PreEscaped(CSS_STYLES)) }
            }
            body {
                h1 { "Scan report: " (data.project_name) }
                p { (issue_count) " issues in " (data.scanned_files.len()) " files" }
                @for file in &data.scanned_files {
                    (render_file(file))
                }
                script id="scan-data" type="application/json" { (PreEscaped(json)) }
            }
        }
    };

    Ok(markup.into_string())
}

fn render_file(file: &ScannedFile) -> Markup {
    html! {
        section {
            h2 { (file.file_name) }
            p { code { (file.file_path) } }
            table {
                thead {
                    tr {
                        th { "Rule" }
                        th { "Kind" }
                        th { "Source" }
                        th { "Message" }
                        th { "Location" }
                    }
                }
                tbody {
                    @for issue in &file.issues {
                        tr {
                            td { (issue.rule_id) }
                            td class={ "kind-" (issue.issue_severity) } { (issue.issue_severity) }
                            td { (issue.issue_type) }
                            td { (issue.message) }
                            td {
                                (issue.text_range.start_line) ":" (issue.text_range.start_line_offset)
                                "-"
                                (issue.text_range.end_line) ":" (issue.text_range.end_line_offset)
                            }
                        }
                    }
                }
            }
            details {
                summary { "Source" }
                pre { (file.file_content) }
            }
        }
    }
}

/// Writes [`RESULTS_HTML_FILE`] into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if a source file cannot be read or the report cannot be
/// written.
pub fn write_html_report(
    project_name: &str,
    issues: &[Issue],
    dir: &Path,
) -> Result<PathBuf, ReportError> {
    let data = ScanReportData::collect(project_name, issues)?;
    let page = render_html(&data)?;

    std::fs::create_dir_all(dir).map_err(ReportError::io(dir))?;
    let path = dir.join(RESULTS_HTML_FILE);
    std::fs::write(&path, page).map_err(ReportError::io(&path))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{Document, DocumentRef, Module};
    use crate::reporter::Reporter;
    use crate::rule::{Rule, RuleKind, RuleRegistry};
    use crate::types::Location;

    fn issues_in(paths: &[&Path]) -> Vec<Issue> {
        let module = Module::new("demo");
        let mut reporter = Reporter::new(
            "ballerina",
            RuleRegistry::new([Rule::builtin(1, "Avoid checkpanic", RuleKind::CodeSmell)]).unwrap(),
        );
        for path in paths {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            let document = Document::new(name, *path);
            let doc = DocumentRef {
                module: &module,
                document: &document,
            };
            reporter.report_issue(doc, Location::on_line(0, 0, 5), 1).unwrap();
        }
        reporter.into_issues()
    }

    #[test]
    fn groups_issues_by_first_appearance() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bal");
        let b = dir.path().join("b.bal");
        std::fs::write(&a, "function a() {}").unwrap();
        std::fs::write(&b, "function b() {}").unwrap();

        let data = ScanReportData::collect("demo", &issues_in(&[&b, &a, &b])).unwrap();

        assert_eq!(data.scanned_files.len(), 2);
        assert_eq!(data.scanned_files[0].file_name, "demo/b.bal");
        assert_eq!(data.scanned_files[0].issues.len(), 2);
        assert_eq!(data.scanned_files[1].file_content, "function a() {}");
    }

    #[test]
    fn missing_source_file_is_an_error() {
        let missing = Path::new("/nonexistent/main.bal");
        let err = ScanReportData::collect("demo", &issues_in(&[missing])).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }

    #[test]
    fn embeds_escaped_data() {
        let data = ScanReportData {
            project_name: "demo".into(),
            scanned_files: vec![ScannedFile {
                file_name: "demo/main.bal".into(),
                file_path: "main.bal".into(),
                file_content: "string s = \"</script>\";".into(),
                issues: Vec::new(),
            }],
        };

        let page = render_html(&data).unwrap();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"<script id="scan-data" type="application/json">"#));
        assert!(page.contains("\"projectName\":\"demo\""));
        assert_eq!(page.matches("</script>").count(), 1);
    }

    #[test]
    fn writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("main.bal");
        std::fs::write(&source, "public function main() {}").unwrap();

        let path = write_html_report("demo", &issues_in(&[&source]), &dir.path().join("report")).unwrap();

        let page = std::fs::read_to_string(path).unwrap();
        assert!(page.contains("ballerina:1"));
        assert!(page.contains("Avoid checkpanic"));
    }
}
