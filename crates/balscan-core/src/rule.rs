//! Rules, their qualified identities, and the per-run registry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Namespace of every rule shipped with the scanner.
pub const TRUSTED_ROOT: &str = "ballerina";

/// Organizations whose analyzers are treated as built-in.
pub const TRUSTED_ORGS: &[&str] = &["ballerina", "ballerinai", "ballerinax"];

/// Classification of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleKind {
    /// Maintainability problem.
    CodeSmell,
    /// Likely defect.
    Bug,
    /// Security weakness.
    Vulnerability,
}

impl RuleKind {
    /// The wire label (`CODE_SMELL`, `BUG`, `VULNERABILITY`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CodeSmell => "CODE_SMELL",
            Self::Bug => "BUG",
            Self::Vulnerability => "VULNERABILITY",
        }
    }

    /// Parses a wire label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "CODE_SMELL" => Some(Self::CodeSmell),
            "BUG" => Some(Self::Bug),
            "VULNERABILITY" => Some(Self::Vulnerability),
            _ => None,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    /// Rule from the trusted root or a trusted organization.
    BuiltIn,
    /// Rule contributed by any other analyzer.
    External,
}

impl Source {
    /// Derives provenance from a qualified rule id.
    ///
    /// The namespace is everything before the last `:`. The trusted root is
    /// built-in; otherwise the organization (text before `/`) decides.
    #[must_use]
    pub fn classify(qualified_id: &str) -> Self {
        let namespace = qualified_id
            .rsplit_once(':')
            .map_or(qualified_id, |(namespace, _)| namespace);

        if namespace == TRUSTED_ROOT {
            return Self::BuiltIn;
        }

        let org = namespace.split_once('/').map_or(namespace, |(org, _)| org);
        if TRUSTED_ORGS.contains(&org) {
            Self::BuiltIn
        } else {
            Self::External
        }
    }

    /// The wire label (`BUILT_IN` or `EXTERNAL`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BuiltIn => "BUILT_IN",
            Self::External => "EXTERNAL",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule with its qualified identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    id: String,
    numeric_id: u32,
    description: String,
    kind: RuleKind,
}

impl Rule {
    /// Creates a rule in the trusted root namespace (`ballerina:<n>`).
    #[must_use]
    pub fn builtin(numeric_id: u32, description: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            id: format!("{TRUSTED_ROOT}:{numeric_id}"),
            numeric_id,
            description: description.into(),
            kind,
        }
    }

    /// Creates a rule in an analyzer namespace (`<org>/<name>:<n>`).
    #[must_use]
    pub fn external(
        numeric_id: u32,
        description: impl Into<String>,
        kind: RuleKind,
        org: &str,
        name: &str,
    ) -> Self {
        Self {
            id: format!("{org}/{name}:{numeric_id}"),
            numeric_id,
            description: description.into(),
            kind,
        }
    }

    /// Fully qualified id, e.g. `ballerina:3`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id within the namespace.
    #[must_use]
    pub fn numeric_id(&self) -> u32 {
        self.numeric_id
    }

    /// Namespace part of the qualified id.
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.id
            .rsplit_once(':')
            .map_or(self.id.as_str(), |(namespace, _)| namespace)
    }

    /// Human-readable description, also used as the issue message.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Rule classification.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        self.kind
    }
}

/// Errors raised while building a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two rules share a numeric id.
    #[error("duplicate rule id {numeric_id}: '{first}' and '{second}'")]
    DuplicateNumericId {
        /// The shared id.
        numeric_id: u32,
        /// Qualified id of the rule registered first.
        first: String,
        /// Qualified id of the conflicting rule.
        second: String,
    },
}

/// Rules of one namespace, indexed by numeric id.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<Arc<Rule>>,
    by_numeric_id: HashMap<u32, usize>,
}

impl RuleRegistry {
    /// Builds a registry, failing on the first duplicated numeric id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateNumericId`] when two rules share an id.
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for rule in rules {
            registry.insert(Arc::new(rule))?;
        }
        Ok(registry)
    }

    fn insert(&mut self, rule: Arc<Rule>) -> Result<(), RegistryError> {
        if let Some(&index) = self.by_numeric_id.get(&rule.numeric_id()) {
            return Err(RegistryError::DuplicateNumericId {
                numeric_id: rule.numeric_id(),
                first: self.rules[index].id().to_string(),
                second: rule.id().to_string(),
            });
        }
        self.by_numeric_id.insert(rule.numeric_id(), self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    /// Looks up a rule by numeric id.
    #[must_use]
    pub fn get(&self, numeric_id: u32) -> Option<&Arc<Rule>> {
        self.by_numeric_id
            .get(&numeric_id)
            .map(|&index| &self.rules[index])
    }

    /// Rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules.iter()
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn builtin_rules_use_trusted_root() {
        let rule = Rule::builtin(9, "Invalid range expression", RuleKind::CodeSmell);
        assert_eq!(rule.id(), "ballerina:9");
        assert_eq!(rule.namespace(), "ballerina");
    }

    #[test]
    fn external_rules_use_org_and_name() {
        let rule = Rule::external(2, "Custom", RuleKind::Bug, "exampleOrg", "scanner");
        assert_eq!(rule.id(), "exampleOrg/scanner:2");
        assert_eq!(rule.namespace(), "exampleOrg/scanner");
    }

    #[test]
    fn classifies_provenance() {
        assert_eq!(Source::classify("ballerina:1"), Source::BuiltIn);
        assert_eq!(Source::classify("ballerina/http:1"), Source::BuiltIn);
        assert_eq!(Source::classify("ballerinai/io:4"), Source::BuiltIn);
        assert_eq!(Source::classify("ballerinax/redis:2"), Source::BuiltIn);
        assert_eq!(Source::classify("wso2/tool:1"), Source::External);
        assert_eq!(Source::classify("exampleOrg/scanner:1"), Source::External);
        assert_eq!(Source::classify("ballerinaxx/lib:1"), Source::External);
    }

    #[test]
    fn registry_rejects_duplicate_ids() {
        let result = RuleRegistry::new([
            Rule::builtin(1, "a", RuleKind::CodeSmell),
            Rule::builtin(1, "b", RuleKind::Bug),
        ]);

        assert_eq!(
            result.err(),
            Some(RegistryError::DuplicateNumericId {
                numeric_id: 1,
                first: "ballerina:1".into(),
                second: "ballerina:1".into(),
            })
        );
    }

    #[test]
    fn registry_looks_up_by_numeric_id() {
        let registry = RuleRegistry::new([
            Rule::builtin(1, "a", RuleKind::CodeSmell),
            Rule::builtin(7, "b", RuleKind::Bug),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(7).map(|r| r.description()), Some("b"));
        assert!(registry.get(2).is_none());
    }

    #[test]
    fn kind_labels_round_trip() {
        for kind in [RuleKind::CodeSmell, RuleKind::Bug, RuleKind::Vulnerability] {
            assert_eq!(RuleKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RuleKind::parse("STYLE"), None);
    }

    proptest! {
        #[test]
        fn provenance_depends_only_on_namespace(
            org in "[a-z]{1,10}",
            name in "[a-z_]{1,10}",
            a in 0u32..1000,
            b in 0u32..1000,
        ) {
            let first = Rule::external(a, "x", RuleKind::Bug, &org, &name);
            let second = Rule::external(b, "y", RuleKind::Vulnerability, &org, &name);
            prop_assert_eq!(Source::classify(first.id()), Source::classify(second.id()));
        }
    }
}
