//! # balscan-core
//!
//! Rule dispatch and issue reporting for static analysis of Ballerina
//! projects.
//!
//! The parser and name resolver live outside this crate. A project arrives
//! as an already-parsed snapshot: per document, a syntax tree
//! ([`syntax::ModulePart`]) and a semantic model ([`semantic::SymbolTable`]).
//! On top of that this crate provides:
//!
//! - [`Rule`] and [`RuleRegistry`] for rule identity and provenance
//! - [`Detector`], [`Collector`] and [`DetectorSuite`] for syntax-node checks
//! - [`Reporter`] for turning findings into [`Issue`]s
//! - [`ExternalAnalyzer`] for analyzers contributed by other organizations
//! - [`RuleFilter`] for include/exclude selection
//! - [`ProjectAnalyzer`] for orchestrating a scan
//! - JSON and HTML report writers, and [`PlatformPlugin`] forwarding
//!
//! ## Example
//!
//! ```ignore
//! use balscan_core::{ProjectAnalyzer, Project, ScanConfig};
//!
//! let config = ScanConfig::from_file("Scan.toml".as_ref())?;
//! let analyzer = ProjectAnalyzer::builder()
//!     .suite(MySuite::new())
//!     .config(&config)
//!     .build()?;
//!
//! let result = analyzer.analyze(&Project::from_file("scan-project.json".as_ref())?)?;
//! println!("{} issues", result.issues.len());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod detector;
mod error;
mod external;
mod filter;
mod html;
mod ordering;
mod platform;
mod project;
mod report;
mod reporter;
mod rule;
mod types;
mod walk;

/// Semantic model of a document: symbols and their bindings.
pub mod semantic;
/// Syntax tree of a document.
pub mod syntax;

/// Tree builders for tests.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use analyzer::{ProjectAnalyzer, ProjectAnalyzerBuilder, RuleCatalog, ScanResult};
pub use config::{ConfigError, PlatformConfig, ScanConfig, LOCAL_REPOSITORY, SCAN_FILE};
pub use context::{ScannerContext, SensitiveParams, UserData};
pub use detector::{
    collect, dispatch, CheckContext, Collector, CollectorBox, Detector, DetectorBox,
    DetectorSuite,
};
pub use error::ScanError;
pub use external::{
    integrate, parse_rule_manifest, run as run_external, AnalyzerDescriptor, ExternalAnalyzer,
    ExternalAnalyzerBox, ExternalError, Integration, LoadedAnalyzer,
};
pub use filter::RuleFilter;
pub use html::{render_html, write_html_report, ScanReportData, ScannedFile, RESULTS_HTML_FILE};
pub use ordering::{format_rules_table, sort_rules, RULE_PRIORITY_LIST};
pub use platform::{forward, PlatformContext, PlatformPlugin, PlatformPluginBox};
pub use project::{Document, DocumentRef, Module, Project, ProjectError};
pub use report::{
    to_entries, to_json, write_json_report, IssueRecord, ReportEntry, ReportError,
    RESULTS_JSON_FILE,
};
pub use reporter::Reporter;
pub use rule::{RegistryError, Rule, RuleKind, RuleRegistry, Source, TRUSTED_ORGS, TRUSTED_ROOT};
pub use semantic::{SemanticModel, Symbol, SymbolId, SymbolKind, SymbolTable};
pub use syntax::{Node, NodeId, SyntaxKind};
pub use types::{Issue, Location, Position, TextRange};
pub use walk::walk_module;
