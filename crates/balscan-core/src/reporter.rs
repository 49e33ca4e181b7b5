//! The only way findings become issues.

use crate::error::ScanError;
use crate::project::DocumentRef;
use crate::rule::{Rule, RuleRegistry};
use crate::types::{Issue, Location};
use std::sync::Arc;

/// Turns findings into [`Issue`]s for one rule namespace.
///
/// The issue list only grows during a run.
#[derive(Debug)]
pub struct Reporter {
    namespace: String,
    registry: RuleRegistry,
    issues: Vec<Issue>,
}

impl Reporter {
    /// Creates a reporter resolving numeric ids against `registry`.
    #[must_use]
    pub fn new(namespace: impl Into<String>, registry: RuleRegistry) -> Self {
        Self {
            namespace: namespace.into(),
            registry,
            issues: Vec::new(),
        }
    }

    /// Reports a finding by numeric rule id.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::RuleNotFound`] if the id is not registered.
    pub fn report_issue(
        &mut self,
        document: DocumentRef<'_>,
        location: Location,
        numeric_id: u32,
    ) -> Result<(), ScanError> {
        let rule = self
            .registry
            .get(numeric_id)
            .cloned()
            .ok_or_else(|| ScanError::RuleNotFound {
                namespace: self.namespace.clone(),
                numeric_id,
            })?;
        self.report_rule(document, location, &rule);
        Ok(())
    }

    /// Reports a finding against an already resolved rule.
    pub fn report_rule(&mut self, document: DocumentRef<'_>, location: Location, rule: &Arc<Rule>) {
        self.issues.push(Issue::new(
            location,
            Arc::clone(rule),
            document.label(),
            document.document.path.clone(),
        ));
    }

    /// Namespace this reporter resolves ids in.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Registered rules.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Issues reported so far, in report order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consumes the reporter, returning its issues.
    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}
