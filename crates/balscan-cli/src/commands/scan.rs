//! Scan command implementation.

use anyhow::{anyhow, Context, Result};
use balscan_core::{
    forward, write_html_report, write_json_report, PlatformPluginBox, Project, ProjectAnalyzer,
    RuleFilter, ScanConfig,
};
use balscan_rules::BuiltinSuite;
use std::path::{Path, PathBuf};

use crate::config_resolver::{self, ConfigSource};
use crate::ScanArgs;

/// Snapshot file looked up when the scan path is a directory.
const SNAPSHOT_FILE: &str = "scan-project.json";

/// Report directory relative to the project, unless `--target-dir` is set.
const DEFAULT_TARGET_DIR: &str = "target/report";

/// Runs the scan command.
pub fn run(args: &ScanArgs, config_path: Option<&Path>) -> Result<()> {
    let (project_dir, snapshot) = locate(&args.path);
    let source = config_resolver::resolve(&project_dir, config_path)
        .context("Failed to locate config")?;
    let config = load_config(&source)?;

    let cli_filter = RuleFilter::new()
        .include(args.include_rules.iter().cloned())
        .exclude(args.exclude_rules.iter().cloned());

    let analyzer = ProjectAnalyzer::builder()
        .suite(BuiltinSuite::new())
        .config(&config)
        .filter(&cli_filter)
        .build()
        .context("Failed to build analyzer")?;

    if args.list_rules {
        super::list_rules::run(&analyzer);
        return Ok(());
    }

    let mut project = Project::from_file(&snapshot)
        .with_context(|| format!("Failed to load project: {}", snapshot.display()))?;
    anchor_paths(&mut project, &project_dir);

    tracing::info!("Scanning {}", project.name);
    let result = analyzer.analyze(&project).context("Scan failed")?;

    super::output::print(&result, args.format)?;

    let target_dir = args
        .target_dir
        .clone()
        .unwrap_or_else(|| project_dir.join(DEFAULT_TARGET_DIR));

    let json = write_json_report(&result.issues, &target_dir)?;
    tracing::info!("View scan results at: {}", json.display());

    if args.scan_report {
        let html = write_html_report(&project.name, &result.issues, &target_dir)?;
        tracing::info!("View scan report at: {}", html.display());
    }

    if !args.platforms.is_empty() {
        // Platform plugins are supplied by embedding hosts; this binary has none.
        let mut plugins: Vec<PlatformPluginBox> = Vec::new();
        let unavailable = forward(
            &mut plugins,
            &config.platforms,
            &args.platforms,
            args.platform_triggered,
            &result.issues,
        );
        if !unavailable.is_empty() {
            tracing::warn!("Platforms not reported to: {}", unavailable.join(", "));
        }
    }

    Ok(())
}

/// Splits the scan path into the project directory and the snapshot file.
fn locate(path: &Path) -> (PathBuf, PathBuf) {
    if path.is_dir() {
        (path.to_path_buf(), path.join(SNAPSHOT_FILE))
    } else {
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        (dir, path.to_path_buf())
    }
}

/// Resolves relative document paths against the project directory.
fn anchor_paths(project: &mut Project, project_dir: &Path) {
    for module in &mut project.modules {
        for document in module
            .documents
            .iter_mut()
            .chain(module.test_documents.iter_mut())
        {
            if document.path.is_relative() {
                document.path = project_dir.join(&document.path);
            }
        }
    }
}

fn load_config(source: &ConfigSource) -> Result<ScanConfig> {
    let Some(path) = source.path() else {
        return Ok(ScanConfig::default());
    };
    if matches!(source, ConfigSource::Manifest(_)) {
        tracing::info!("Loading scan tool configurations from {}", path.display());
    }

    ScanConfig::from_file(path).map_err(|err| {
        anyhow!("{:?}", miette::Report::new(err))
            .context(format!("Failed to load config: {}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputFormat;
    use balscan_core::{RESULTS_HTML_FILE, RESULTS_JSON_FILE};
    use std::fs;
    use tempfile::TempDir;

    const PROJECT: &str = r#"{
        "name": "demo",
        "modules": [{
            "name": "demo",
            "documents": [{
                "name": "main.bal",
                "path": "main.bal",
                "syntax": {"items": [{
                    "kind": "Function",
                    "id": 1,
                    "location": {"start": {"line": 0, "column": 0}, "end": {"line": 2, "column": 1}},
                    "name": "main",
                    "params": [{
                        "id": 2,
                        "location": {"start": {"line": 0, "column": 14}, "end": {"line": 0, "column": 19}},
                        "name": "n"
                    }]
                }]},
                "semantic": {
                    "symbols": [{"id": 1, "name": "n", "kind": "parameter"}],
                    "bindings": [{"node": 2, "symbol": 1}]
                }
            }]
        }]
    }"#;

    fn args(path: &Path) -> ScanArgs {
        ScanArgs {
            path: path.to_path_buf(),
            format: OutputFormat::Json,
            include_rules: Vec::new(),
            exclude_rules: Vec::new(),
            list_rules: false,
            target_dir: None,
            scan_report: false,
            platforms: Vec::new(),
            platform_triggered: false,
        }
    }

    fn project_dir() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(SNAPSHOT_FILE), PROJECT).unwrap();
        fs::write(tmp.path().join("main.bal"), "function main(int n) {\n}\n").unwrap();
        tmp
    }

    fn report(dir: &Path) -> serde_json::Value {
        let content = fs::read_to_string(dir.join(DEFAULT_TARGET_DIR).join(RESULTS_JSON_FILE)).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    #[test]
    fn writes_json_report_into_project_target() {
        let tmp = project_dir();

        run(&args(tmp.path()), None).unwrap();

        let report = report(tmp.path());
        assert_eq!(report.as_array().unwrap().len(), 1);
        assert_eq!(report[0]["ruleID"], "ballerina:2");
        assert_eq!(
            report[0]["filePath"],
            tmp.path().join("main.bal").display().to_string()
        );
        assert!(!tmp.path().join(DEFAULT_TARGET_DIR).join(RESULTS_HTML_FILE).exists());
    }

    #[test]
    fn scan_report_flag_adds_html() {
        let tmp = project_dir();
        let out = TempDir::new().unwrap();
        let mut args = args(tmp.path());
        args.scan_report = true;
        args.target_dir = Some(out.path().to_path_buf());

        run(&args, None).unwrap();

        assert!(out.path().join(RESULTS_JSON_FILE).exists());
        let html = fs::read_to_string(out.path().join(RESULTS_HTML_FILE)).unwrap();
        assert!(html.contains("function main(int n)"));
    }

    #[test]
    fn project_scan_toml_excludes_rules() {
        let tmp = project_dir();
        fs::write(
            tmp.path().join("Scan.toml"),
            "[rule]\nexclude = [\"ballerina:2\"]\n",
        )
        .unwrap();

        run(&args(tmp.path()), None).unwrap();

        assert_eq!(report(tmp.path()), serde_json::json!([]));
    }

    #[test]
    fn cli_include_restricts_rules() {
        let tmp = project_dir();
        let mut args = args(tmp.path());
        args.include_rules = vec!["ballerina:1".to_string()];

        run(&args, None).unwrap();

        assert_eq!(report(tmp.path()), serde_json::json!([]));
    }

    #[test]
    fn ballerina_toml_config_path_is_followed() {
        let tmp = project_dir();
        fs::write(
            tmp.path().join("Ballerina.toml"),
            "[scan]\nconfigPath = \"lint.toml\"\n",
        )
        .unwrap();
        fs::write(
            tmp.path().join("lint.toml"),
            "[rule]\nexclude = [\"ballerina:2\"]\n",
        )
        .unwrap();

        run(&args(tmp.path()), None).unwrap();

        assert_eq!(report(tmp.path()), serde_json::json!([]));
    }

    #[test]
    fn scan_table_without_config_path_aborts() {
        let tmp = project_dir();
        fs::write(tmp.path().join("Ballerina.toml"), "[scan]\n").unwrap();

        let err = run(&args(tmp.path()), None).unwrap_err();

        assert!(err.to_string().contains("Failed to locate config"));
        assert!(!tmp.path().join(DEFAULT_TARGET_DIR).exists());
    }

    #[test]
    fn invalid_config_aborts_before_scanning() {
        let tmp = project_dir();
        fs::write(tmp.path().join("Scan.toml"), "[[analyzer]]\nname = \"x\"\n").unwrap();

        let err = run(&args(tmp.path()), None).unwrap_err();

        assert!(err.to_string().contains("Failed to load config"));
        assert!(!tmp.path().join(DEFAULT_TARGET_DIR).exists());
    }

    #[test]
    fn unknown_platforms_do_not_fail_the_scan() {
        let tmp = project_dir();
        let mut args = args(tmp.path());
        args.platforms = vec!["sonarqube".to_string()];

        run(&args, None).unwrap();
    }

    #[test]
    fn locate_accepts_file_or_directory() {
        let tmp = project_dir();
        let snapshot = tmp.path().join(SNAPSHOT_FILE);

        assert_eq!(locate(tmp.path()), (tmp.path().to_path_buf(), snapshot.clone()));
        assert_eq!(locate(&snapshot), (tmp.path().to_path_buf(), snapshot));
    }
}
