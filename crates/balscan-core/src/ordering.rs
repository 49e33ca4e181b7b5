//! Presentation order for rule listings.

use crate::rule::Rule;
use std::cmp::Ordering;
use std::sync::Arc;

/// Namespaces listed first, in this order.
pub const RULE_PRIORITY_LIST: &[&str] = &["ballerina", "ballerinax", "wso2"];

/// `(priority index, exact match)` of a namespace.
fn priority(namespace: &str) -> (usize, bool) {
    let org = namespace.split_once('/').map_or(namespace, |(org, _)| org);
    for (index, entry) in RULE_PRIORITY_LIST.iter().enumerate() {
        if namespace == *entry {
            return (index, true);
        }
        if org == *entry {
            return (index, false);
        }
    }
    (RULE_PRIORITY_LIST.len(), false)
}

fn compare(a: &Rule, b: &Rule) -> Ordering {
    let (rank_a, exact_a) = priority(a.namespace());
    let (rank_b, exact_b) = priority(b.namespace());

    rank_a
        .cmp(&rank_b)
        .then(exact_b.cmp(&exact_a))
        .then_with(|| a.namespace().cmp(b.namespace()))
        .then(a.numeric_id().cmp(&b.numeric_id()))
}

/// Sorts rules for listing: prioritized namespaces first, exact matches
/// before their organization's packages, then namespace, then numeric id.
pub fn sort_rules(rules: &mut [Arc<Rule>]) {
    rules.sort_by(|a, b| compare(a, b));
}

const RULE_ID_COLUMN: &str = "RuleID";
const RULE_KIND_COLUMN: &str = "Rule Kind";
const RULE_DESCRIPTION_COLUMN: &str = "Rule Description";

/// Renders the `RuleID | Rule Kind | Rule Description` table, sorted.
#[must_use]
pub fn format_rules_table(rules: &[Arc<Rule>]) -> String {
    let mut rules = rules.to_vec();
    sort_rules(&mut rules);

    let id_width = rules
        .iter()
        .map(|r| r.id().len())
        .fold(RULE_ID_COLUMN.len(), usize::max);
    let kind_width = rules
        .iter()
        .map(|r| r.kind().as_str().len())
        .fold(RULE_KIND_COLUMN.len(), usize::max);
    let description_width = rules
        .iter()
        .map(|r| r.description().len())
        .fold(RULE_DESCRIPTION_COLUMN.len(), usize::max);

    let mut out = String::new();
    out.push_str(&format!(
        "\t{:<id_width$} | {:<kind_width$} | {}\n",
        RULE_ID_COLUMN, RULE_KIND_COLUMN, RULE_DESCRIPTION_COLUMN
    ));
    out.push_str(&format!(
        "\t{}--{}--{}\n",
        "-".repeat(id_width + 1),
        "-".repeat(kind_width + 1),
        "-".repeat(description_width + 1)
    ));
    for rule in &rules {
        out.push_str(&format!(
            "\t{:<id_width$} | {:<kind_width$} | {}\n",
            rule.id(),
            rule.kind().as_str(),
            rule.description()
        ));
    }
    out
}
