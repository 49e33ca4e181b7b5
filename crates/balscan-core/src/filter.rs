//! Include/exclude rule filtering.

use crate::rule::Rule;
use crate::types::Issue;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Qualified rule ids to keep or drop.
///
/// A non-empty include set restricts the candidates to the named rules.
/// The exclude set is subtracted afterwards, so a rule named in both is
/// dropped. Ids that match no candidate are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFilter {
    include: BTreeSet<String>,
    exclude: BTreeSet<String>,
}

impl RuleFilter {
    /// Creates a filter that keeps every rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds rule ids to the include set.
    #[must_use]
    pub fn include<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Adds rule ids to the exclude set.
    #[must_use]
    pub fn exclude<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Unions both sets of `other` into this filter.
    #[must_use]
    pub fn merge(mut self, other: &RuleFilter) -> Self {
        self.include.extend(other.include.iter().cloned());
        self.exclude.extend(other.exclude.iter().cloned());
        self
    }

    /// Rule ids to include.
    #[must_use]
    pub fn included(&self) -> &BTreeSet<String> {
        &self.include
    }

    /// Rule ids to exclude.
    #[must_use]
    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.exclude
    }

    /// Whether both sets are in use.
    #[must_use]
    pub fn is_combined(&self) -> bool {
        !self.include.is_empty() && !self.exclude.is_empty()
    }

    /// Whether `rule_id` survives the filter.
    #[must_use]
    pub fn allows(&self, rule_id: &str) -> bool {
        (self.include.is_empty() || self.include.contains(rule_id))
            && !self.exclude.contains(rule_id)
    }

    /// The effective rule set, in candidate order.
    #[must_use]
    pub fn apply(&self, candidates: &[Arc<Rule>]) -> Vec<Arc<Rule>> {
        for id in self.include.iter().chain(&self.exclude) {
            if !candidates.iter().any(|rule| rule.id() == id) {
                debug!("Ignoring unknown rule id in filter: {}", id);
            }
        }

        candidates
            .iter()
            .filter(|rule| self.allows(rule.id()))
            .cloned()
            .collect()
    }

    /// Drops issues whose rule is not part of `effective`.
    #[must_use]
    pub fn retain_issues(issues: Vec<Issue>, effective: &[Arc<Rule>]) -> Vec<Issue> {
        let ids: BTreeSet<&str> = effective.iter().map(|rule| rule.id()).collect();
        issues
            .into_iter()
            .filter(|issue| ids.contains(issue.rule().id()))
            .collect()
    }
}
