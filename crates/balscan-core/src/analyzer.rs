//! Orchestrates a scan over a whole project.

use crate::config::ScanConfig;
use crate::context::ScannerContext;
use crate::detector::{collect, dispatch, DetectorSuite};
use crate::error::ScanError;
use crate::external::{
    self, AnalyzerDescriptor, ExternalAnalyzer, ExternalAnalyzerBox, ExternalError, Integration,
};
use crate::filter::RuleFilter;
use crate::ordering::sort_rules;
use crate::project::Project;
use crate::reporter::Reporter;
use crate::rule::{Rule, RuleRegistry, TRUSTED_ROOT};
use crate::types::Issue;
use std::sync::Arc;
use tracing::{debug, info};

/// Builder for configuring a [`ProjectAnalyzer`].
#[derive(Default)]
pub struct ProjectAnalyzerBuilder {
    suite: Option<Box<dyn DetectorSuite>>,
    external: Vec<ExternalAnalyzerBox>,
    declared: Vec<AnalyzerDescriptor>,
    filter: RuleFilter,
}

impl ProjectAnalyzerBuilder {
    /// Creates a new builder with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the built-in rule suite.
    #[must_use]
    pub fn suite<S: DetectorSuite + 'static>(mut self, suite: S) -> Self {
        self.suite = Some(Box::new(suite));
        self
    }

    /// Adds a discovered external analyzer.
    #[must_use]
    pub fn external_analyzer<A: ExternalAnalyzer + 'static>(mut self, analyzer: A) -> Self {
        self.external.push(Box::new(analyzer));
        self
    }

    /// Adds a boxed discovered external analyzer.
    #[must_use]
    pub fn external_analyzer_box(mut self, analyzer: ExternalAnalyzerBox) -> Self {
        self.external.push(analyzer);
        self
    }

    /// Declares an analyzer the project uses.
    #[must_use]
    pub fn declare(mut self, descriptor: AnalyzerDescriptor) -> Self {
        self.declared.push(descriptor);
        self
    }

    /// Merges a rule filter into the current one.
    #[must_use]
    pub fn filter(mut self, filter: &RuleFilter) -> Self {
        self.filter = self.filter.merge(filter);
        self
    }

    /// Applies the analyzer declarations and rule filter of a `Scan.toml`.
    #[must_use]
    pub fn config(mut self, config: &ScanConfig) -> Self {
        self.declared.extend(config.analyzers.iter().cloned());
        self.filter = self.filter.merge(&config.rules);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the suite's rules share a numeric id.
    pub fn build(self) -> Result<ProjectAnalyzer, ScanError> {
        let builtin = match &self.suite {
            Some(suite) => RuleRegistry::new(suite.rules())?,
            None => RuleRegistry::default(),
        };

        Ok(ProjectAnalyzer {
            suite: self.suite,
            builtin,
            external: self.external,
            declared: self.declared,
            filter: self.filter,
        })
    }
}

/// Result of a successful scan.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Issues in report order: built-in first, then each external analyzer.
    pub issues: Vec<Issue>,
    /// Effective rules, in listing order.
    pub rules: Vec<Arc<Rule>>,
    /// Number of documents visited.
    pub documents_scanned: usize,
}

/// Every rule available to a scan.
#[derive(Debug)]
pub struct RuleCatalog {
    /// Built-in and loadable external rules, in listing order.
    pub rules: Vec<Arc<Rule>>,
    /// Analyzers whose rules could not be loaded.
    pub diagnostics: Vec<ExternalError>,
}

/// Runs built-in and external analyzers over a project.
///
/// Use [`ProjectAnalyzer::builder()`] to construct an instance.
pub struct ProjectAnalyzer {
    suite: Option<Box<dyn DetectorSuite>>,
    builtin: RuleRegistry,
    external: Vec<ExternalAnalyzerBox>,
    declared: Vec<AnalyzerDescriptor>,
    filter: RuleFilter,
}

impl ProjectAnalyzer {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> ProjectAnalyzerBuilder {
        ProjectAnalyzerBuilder::new()
    }

    /// The active rule filter.
    #[must_use]
    pub fn filter(&self) -> &RuleFilter {
        &self.filter
    }

    /// Lists every available rule, unfiltered.
    ///
    /// External analyzers that fail to load are reported in
    /// [`RuleCatalog::diagnostics`] instead of aborting the listing.
    #[must_use]
    pub fn catalog(&self) -> RuleCatalog {
        let integration = external::integrate(&self.external, &self.declared);
        let mut rules: Vec<Arc<Rule>> = self.builtin.iter().cloned().collect();
        rules.extend(integration.rules());
        sort_rules(&mut rules);

        RuleCatalog {
            rules,
            diagnostics: integration.failures,
        }
    }

    /// Scans `project`.
    ///
    /// # Errors
    ///
    /// Returns an error if an external analyzer cannot be loaded or fails,
    /// or a check reports against an unknown rule. No issues are returned
    /// in either case.
    pub fn analyze(&self, project: &Project) -> Result<ScanResult, ScanError> {
        info!("Starting scan of project {}", project.name);

        let integration = external::integrate(&self.external, &self.declared);
        let external_rules = integration.rules();
        let Integration { loaded, failures } = integration;
        if let Some(failure) = failures.into_iter().next() {
            return Err(failure.into());
        }

        let mut candidates: Vec<Arc<Rule>> = self.builtin.iter().cloned().collect();
        candidates.extend(external_rules);
        if self.filter.is_combined() {
            info!("Both included and excluded rules are set; excluded rules take precedence");
        }
        let effective = self.filter.apply(&candidates);
        debug!(
            "{} of {} rules active",
            effective.len(),
            candidates.len()
        );

        let mut context = ScannerContext::new(Reporter::new(TRUSTED_ROOT, self.builtin.clone()));
        if let Some(suite) = &self.suite {
            let mut collectors = suite.collectors();
            for document in project.documents() {
                debug!("Collecting: {}", document.label());
                collect(&mut collectors, document, context.user_data_mut());
            }

            let (reporter, user_data) = context.parts_mut();
            let mut detectors = suite.detectors(user_data);
            for document in project.documents() {
                debug!("Checking: {}", document.label());
                dispatch(&mut detectors, document, reporter)?;
            }
        }

        let mut issues = context.into_reporter().into_issues();
        issues.extend(external::run(&loaded, project)?);

        let issues = RuleFilter::retain_issues(issues, &effective);
        let documents_scanned = project.documents().count();
        let mut rules = effective;
        sort_rules(&mut rules);

        info!(
            "Scan complete: {} issues in {} documents",
            issues.len(),
            documents_scanned
        );

        Ok(ScanResult {
            issues,
            rules,
            documents_scanned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::UserData;
    use crate::detector::{CheckContext, CollectorBox, Detector, DetectorBox};
    use crate::external::parse_rule_manifest;
    use crate::project::{Document, DocumentRef, Module};
    use crate::rule::{RuleKind, Source};
    use crate::syntax::{ModulePart, Node, SyntaxKind};
    use crate::testing::{function, Ids};
    use crate::types::Location;

    struct FunctionSuite {
        rules: Vec<Rule>,
    }

    struct EveryFunction;

    impl Detector for EveryFunction {
        fn name(&self) -> &'static str {
            "every-function"
        }

        fn interests(&self) -> &'static [SyntaxKind] {
            &[SyntaxKind::Function]
        }

        fn check(&mut self, node: Node<'_>, cx: &mut CheckContext<'_, '_>) -> Result<(), ScanError> {
            if let Node::Function(function) = node {
                cx.report(function.location, 1)?;
                cx.report(function.location, 2)?;
            }
            Ok(())
        }
    }

    impl DetectorSuite for FunctionSuite {
        fn rules(&self) -> Vec<Rule> {
            self.rules.clone()
        }

        fn collectors(&self) -> Vec<CollectorBox> {
            Vec::new()
        }

        fn detectors<'u>(&self, _user_data: &'u UserData) -> Vec<DetectorBox<'u>> {
            vec![Box::new(EveryFunction)]
        }
    }

    fn suite() -> FunctionSuite {
        FunctionSuite {
            rules: vec![
                Rule::builtin(1, "first", RuleKind::CodeSmell),
                Rule::builtin(2, "second", RuleKind::Bug),
            ],
        }
    }

    const LINT_RULES: &str = r#"[{"id": 1, "kind": "BUG", "description": "Missing docs"}]"#;

    /// Reports its only rule once per document.
    struct ManifestLint {
        org: &'static str,
    }

    impl ExternalAnalyzer for ManifestLint {
        fn org(&self) -> &str {
            self.org
        }

        fn name(&self) -> &str {
            "lint"
        }

        fn rules(&self) -> Result<Vec<Rule>, ExternalError> {
            parse_rule_manifest(LINT_RULES, self.org, "lint")
        }

        fn analyze(&self, document: DocumentRef<'_>, context: &mut ScannerContext) -> Result<(), ScanError> {
            context
                .reporter_mut()
                .report_issue(document, Location::on_line(0, 0, 4), 1)
        }
    }

    fn with_lint(org: &'static str) -> ProjectAnalyzerBuilder {
        ProjectAnalyzer::builder()
            .suite(suite())
            .external_analyzer(ManifestLint { org })
            .declare(AnalyzerDescriptor::new(org, "lint"))
    }

    fn project() -> Project {
        let mut ids = Ids::default();
        let syntax = ModulePart {
            items: vec![function(&mut ids, "main", vec![], vec![])],
        };
        Project::new("demo").module(
            Module::new("demo").document(Document::new("main.bal", "main.bal").with_syntax(syntax)),
        )
    }

    #[test]
    fn duplicate_builtin_ids_fail_build() {
        let result = ProjectAnalyzer::builder()
            .suite(FunctionSuite {
                rules: vec![
                    Rule::builtin(1, "a", RuleKind::Bug),
                    Rule::builtin(1, "b", RuleKind::Bug),
                ],
            })
            .build();

        assert!(matches!(result, Err(ScanError::Registry(_))));
    }

    #[test]
    fn filter_drops_issues_of_inactive_rules() {
        let analyzer = ProjectAnalyzer::builder()
            .suite(suite())
            .filter(&RuleFilter::new().exclude(["ballerina:1"]))
            .build()
            .unwrap();

        let result = analyzer.analyze(&project()).unwrap();

        let ids: Vec<&str> = result.issues.iter().map(|i| i.rule().id()).collect();
        assert_eq!(ids, vec!["ballerina:2"]);
        assert_eq!(result.rules.len(), 1);
        assert_eq!(result.documents_scanned, 1);
    }

    #[test]
    fn include_and_exclude_of_same_rule_leaves_nothing() {
        let analyzer = ProjectAnalyzer::builder()
            .suite(suite())
            .filter(
                &RuleFilter::new()
                    .include(["ballerina:1"])
                    .exclude(["ballerina:1"]),
            )
            .build()
            .unwrap();

        let result = analyzer.analyze(&project()).unwrap();

        assert!(result.issues.is_empty());
        assert!(result.rules.is_empty());
    }

    #[test]
    fn catalog_lists_unfiltered_rules() {
        let analyzer = ProjectAnalyzer::builder()
            .suite(suite())
            .filter(&RuleFilter::new().exclude(["ballerina:1"]))
            .build()
            .unwrap();

        let catalog = analyzer.catalog();

        assert_eq!(catalog.rules.len(), 2);
        assert!(catalog.diagnostics.is_empty());
    }

    #[test]
    fn external_issues_follow_builtin_issues() {
        let analyzer = with_lint("acme").build().unwrap();

        let result = analyzer.analyze(&project()).unwrap();

        let ids: Vec<(&str, Source)> = result
            .issues
            .iter()
            .map(|i| (i.rule().id(), i.source()))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("ballerina:1", Source::BuiltIn),
                ("ballerina:2", Source::BuiltIn),
                ("acme/lint:1", Source::External),
            ]
        );
        assert_eq!(result.rules.len(), 3);
        assert_eq!(result.issues[2].rule().description(), "Missing docs");
    }

    #[test]
    fn excluding_external_rule_drops_its_issues() {
        let analyzer = ProjectAnalyzer::builder()
            .external_analyzer(ManifestLint { org: "acme" })
            .declare(AnalyzerDescriptor::new("acme", "lint"))
            .filter(&RuleFilter::new().exclude(["acme/lint:1"]))
            .build()
            .unwrap();

        let result = analyzer.analyze(&project()).unwrap();

        assert!(result.issues.is_empty());
        assert!(result.rules.is_empty());
    }

    #[test]
    fn undeclared_external_analyzer_does_not_run() {
        let analyzer = ProjectAnalyzer::builder()
            .suite(suite())
            .external_analyzer(ManifestLint { org: "acme" })
            .build()
            .unwrap();

        let result = analyzer.analyze(&project()).unwrap();

        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.rules.len(), 2);
    }

    #[test]
    fn trusted_org_analyzer_issues_are_builtin() {
        let analyzer = with_lint("ballerinax").build().unwrap();

        let result = analyzer.analyze(&project()).unwrap();

        let last = result.issues.last().unwrap();
        assert_eq!(last.rule().id(), "ballerinax/lint:1");
        assert_eq!(last.source(), Source::BuiltIn);
    }

    #[test]
    fn empty_analyzer_reports_nothing() {
        let analyzer = ProjectAnalyzer::builder().build().unwrap();
        let result = analyzer.analyze(&project()).unwrap();
        assert!(result.issues.is_empty());
    }
}
