//! Integration of analyzers contributed by third parties.
//!
//! Discovery happens outside the engine: the host hands over every
//! [`ExternalAnalyzer`] it found, together with the [`AnalyzerDescriptor`]s
//! the project declares. Only declared analyzers take part in a scan.

use crate::context::ScannerContext;
use crate::error::ScanError;
use crate::project::{DocumentRef, Project};
use crate::reporter::Reporter;
use crate::rule::{RegistryError, Rule, RuleKind, RuleRegistry};
use crate::types::Issue;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised by external analyzers and their rule sets.
#[derive(Debug, Error)]
pub enum ExternalError {
    /// A contributed rule lives outside the analyzer's namespace.
    #[error("Analyzer '{namespace}' contributed rule '{rule}' outside its namespace")]
    ForeignRule {
        /// Analyzer namespace (`org/name`).
        namespace: String,
        /// Qualified id of the offending rule.
        rule: String,
    },

    /// Contributed rules clash with each other.
    #[error("Analyzer '{namespace}' contributed an invalid rule set: {source}")]
    InvalidRules {
        /// Analyzer namespace.
        namespace: String,
        /// Registry failure.
        #[source]
        source: RegistryError,
    },

    /// A rule manifest could not be read.
    #[error("Invalid rule manifest for '{namespace}': {message}")]
    InvalidManifest {
        /// Analyzer namespace.
        namespace: String,
        /// What is wrong with the manifest.
        message: String,
    },

    /// The analyzer failed while analyzing a document.
    #[error("Analyzer '{namespace}' failed on {document}: {source}")]
    AnalysisFailed {
        /// Analyzer namespace.
        namespace: String,
        /// Label of the document being analyzed.
        document: String,
        /// What the analyzer returned.
        #[source]
        source: Box<ScanError>,
    },
}

/// An analyzer declared by the project configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerDescriptor {
    /// Organization.
    pub org: String,
    /// Package name.
    pub name: String,
    /// Pinned version (`major.minor.patch`).
    #[serde(default)]
    pub version: Option<String>,
    /// Repository to resolve from, e.g. `local`.
    #[serde(default)]
    pub repository: Option<String>,
}

impl AnalyzerDescriptor {
    /// Creates an unpinned declaration.
    #[must_use]
    pub fn new(org: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            name: name.into(),
            version: None,
            repository: None,
        }
    }

    /// Pins the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the repository.
    #[must_use]
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// `org/name`.
    #[must_use]
    pub fn namespace(&self) -> String {
        format!("{}/{}", self.org, self.name)
    }
}

/// A third-party analyzer.
///
/// Implementations provide rules in their own `org/name` namespace and
/// report against them through the [`ScannerContext`] they are given.
pub trait ExternalAnalyzer {
    /// Organization of the providing package.
    fn org(&self) -> &str;

    /// Name of the providing package.
    fn name(&self) -> &str;

    /// Version of the providing package, if known.
    fn version(&self) -> Option<&str> {
        None
    }

    /// Rules this analyzer reports against.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule set cannot be produced.
    fn rules(&self) -> Result<Vec<Rule>, ExternalError>;

    /// Analyzes one document.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole scan.
    fn analyze(&self, document: DocumentRef<'_>, context: &mut ScannerContext) -> Result<(), ScanError>;
}

/// Type alias for boxed external analyzers.
pub type ExternalAnalyzerBox = Box<dyn ExternalAnalyzer>;

/// A declared analyzer whose rules passed validation.
pub struct LoadedAnalyzer<'a> {
    analyzer: &'a dyn ExternalAnalyzer,
    namespace: String,
    registry: RuleRegistry,
}

impl LoadedAnalyzer<'_> {
    /// `org/name` of the analyzer.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Validated rules.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }
}

/// Outcome of matching discovered analyzers against declarations.
pub struct Integration<'a> {
    /// Analyzers ready to run.
    pub loaded: Vec<LoadedAnalyzer<'a>>,
    /// Analyzers whose rules were rejected.
    pub failures: Vec<ExternalError>,
}

impl Integration<'_> {
    /// All contributed rules, analyzer by analyzer.
    #[must_use]
    pub fn rules(&self) -> Vec<std::sync::Arc<Rule>> {
        self.loaded
            .iter()
            .flat_map(|loaded| loaded.registry.iter().cloned())
            .collect()
    }
}

/// Matches `discovered` analyzers against `declared` ones and validates
/// their rules.
#[must_use]
pub fn integrate<'a>(
    discovered: &'a [ExternalAnalyzerBox],
    declared: &[AnalyzerDescriptor],
) -> Integration<'a> {
    let mut integration = Integration {
        loaded: Vec::new(),
        failures: Vec::new(),
    };

    for analyzer in discovered {
        let namespace = format!("{}/{}", analyzer.org(), analyzer.name());
        if !declared.iter().any(|d| d.namespace() == namespace) {
            debug!("Skipping undeclared analyzer: {}", namespace);
        }
    }

    for descriptor in declared {
        let namespace = descriptor.namespace();
        let Some(analyzer) = discovered
            .iter()
            .find(|a| a.org() == descriptor.org && a.name() == descriptor.name)
        else {
            warn!("Declared analyzer not found: {}", namespace);
            continue;
        };

        if let (Some(pinned), Some(actual)) = (&descriptor.version, analyzer.version()) {
            if pinned != actual {
                warn!(
                    "Skipping analyzer {}: version {} does not match pinned {}",
                    namespace, actual, pinned
                );
                continue;
            }
        }
        if let Some(repository) = &descriptor.repository {
            debug!("Analyzer {} resolved from repository '{}'", namespace, repository);
        }

        match load_rules(analyzer.as_ref(), &namespace) {
            Ok(registry) => {
                info!("Loaded analyzer {} with {} rules", namespace, registry.len());
                integration.loaded.push(LoadedAnalyzer {
                    analyzer: analyzer.as_ref(),
                    namespace,
                    registry,
                });
            }
            Err(e) => integration.failures.push(e),
        }
    }

    integration
}

fn load_rules(analyzer: &dyn ExternalAnalyzer, namespace: &str) -> Result<RuleRegistry, ExternalError> {
    let rules = analyzer.rules()?;
    if let Some(foreign) = rules.iter().find(|rule| rule.namespace() != namespace) {
        return Err(ExternalError::ForeignRule {
            namespace: namespace.to_string(),
            rule: foreign.id().to_string(),
        });
    }
    RuleRegistry::new(rules).map_err(|source| ExternalError::InvalidRules {
        namespace: namespace.to_string(),
        source,
    })
}

/// Runs every loaded analyzer over every document of `project`.
///
/// Each analyzer gets its own [`ScannerContext`]. Issues come back analyzer
/// by analyzer, in document order.
///
/// # Errors
///
/// Returns the first analyzer failure; no issues are returned in that case.
pub fn run(loaded: &[LoadedAnalyzer<'_>], project: &Project) -> Result<Vec<Issue>, ScanError> {
    let mut issues = Vec::new();

    for entry in loaded {
        let reporter = Reporter::new(entry.namespace.clone(), entry.registry.clone());
        let mut context = ScannerContext::new(reporter);

        for document in project.documents() {
            entry
                .analyzer
                .analyze(document, &mut context)
                .map_err(|source| ExternalError::AnalysisFailed {
                    namespace: entry.namespace.clone(),
                    document: document.label(),
                    source: Box::new(source),
                })?;
        }

        issues.extend(context.into_reporter().into_issues());
    }

    Ok(issues)
}

/// Parses a JSON rule manifest for the analyzer `org/name`.
///
/// The manifest is an array of `{ "id": <int>, "kind": <kind>,
/// "description": <string> }` objects. Analyzers that ship their rules as a
/// `rules.json` resource can return this from [`ExternalAnalyzer::rules`]:
///
/// ```ignore
/// fn rules(&self) -> Result<Vec<Rule>, ExternalError> {
///     parse_rule_manifest(include_str!("rules.json"), self.org(), self.name())
/// }
/// ```
///
/// # Errors
///
/// Returns [`ExternalError::InvalidManifest`] for anything else.
pub fn parse_rule_manifest(json: &str, org: &str, name: &str) -> Result<Vec<Rule>, ExternalError> {
    let invalid = |message: String| ExternalError::InvalidManifest {
        namespace: format!("{org}/{name}"),
        message,
    };

    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| invalid(format!("not valid JSON: {e}")))?;
    let entries = value
        .as_array()
        .ok_or_else(|| invalid("rules must be a JSON array".to_string()))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let id = entry
                .get("id")
                .and_then(serde_json::Value::as_u64)
                .and_then(|id| u32::try_from(id).ok())
                .ok_or_else(|| invalid(format!("rule #{index} has no valid numeric 'id'")))?;
            let kind_label = entry
                .get("kind")
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| invalid(format!("rule #{index} has no 'kind'")))?;
            let kind = RuleKind::parse(kind_label)
                .ok_or_else(|| invalid(format!("rule #{index} has invalid kind '{kind_label}'")))?;
            let description = entry
                .get("description")
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| invalid(format!("rule #{index} has no 'description'")))?;

            Ok(Rule::external(id, description, kind, org, name))
        })
        .collect()
}
