//! The built-in rule records.

use balscan_core::{Rule, RuleKind};

/// `ballerina:1`
pub const AVOID_CHECKPANIC: u32 = 1;
/// `ballerina:2`
pub const UNUSED_FUNCTION_PARAMETER: u32 = 2;
/// `ballerina:3`
pub const HARD_CODED_SECRET: u32 = 3;
/// `ballerina:4`
pub const NON_CONFIGURABLE_SECRET: u32 = 4;
/// `ballerina:5`
pub const SELF_ASSIGNMENT: u32 = 5;
/// `ballerina:6`
pub const ALWAYS_TRUE: u32 = 6;
/// `ballerina:7`
pub const ALWAYS_FALSE: u32 = 7;
/// `ballerina:8`
pub const ALWAYS_SAME_VALUE: u32 = 8;
/// `ballerina:9`
pub const INVALID_RANGE: u32 = 9;
/// `ballerina:10`
pub const UNUSED_PRIVATE_FIELD: u32 = 10;
/// `ballerina:11`
pub const NON_ISOLATED_PUBLIC_FUNCTION: u32 = 11;
/// `ballerina:12`
pub const NON_ISOLATED_PUBLIC_METHOD: u32 = 12;
/// `ballerina:13`
pub const NON_ISOLATED_PUBLIC_CLASS: u32 = 13;
/// `ballerina:14`
pub const NON_ISOLATED_PUBLIC_OBJECT: u32 = 14;

const CATALOG: &[(u32, &str, RuleKind)] = &[
    (AVOID_CHECKPANIC, "Avoid checkpanic", RuleKind::CodeSmell),
    (
        UNUSED_FUNCTION_PARAMETER,
        "Unused function parameter",
        RuleKind::CodeSmell,
    ),
    (
        HARD_CODED_SECRET,
        "Hard-coded secrets are security-sensitive",
        RuleKind::Vulnerability,
    ),
    (
        NON_CONFIGURABLE_SECRET,
        "Non configurable secrets are security-sensitive",
        RuleKind::Vulnerability,
    ),
    (SELF_ASSIGNMENT, "Self assignment", RuleKind::CodeSmell),
    (
        ALWAYS_TRUE,
        "This operation always evaluates to true",
        RuleKind::CodeSmell,
    ),
    (
        ALWAYS_FALSE,
        "This operation always evaluates to false",
        RuleKind::CodeSmell,
    ),
    (
        ALWAYS_SAME_VALUE,
        "This operation always evaluates to the same value",
        RuleKind::CodeSmell,
    ),
    (INVALID_RANGE, "Invalid range expression", RuleKind::CodeSmell),
    (
        UNUSED_PRIVATE_FIELD,
        "Unused class private fields",
        RuleKind::CodeSmell,
    ),
    (
        NON_ISOLATED_PUBLIC_FUNCTION,
        "Non isolated public function",
        RuleKind::CodeSmell,
    ),
    (
        NON_ISOLATED_PUBLIC_METHOD,
        "Non isolated public method",
        RuleKind::CodeSmell,
    ),
    (
        NON_ISOLATED_PUBLIC_CLASS,
        "Non isolated public class",
        RuleKind::CodeSmell,
    ),
    (
        NON_ISOLATED_PUBLIC_OBJECT,
        "Non isolated public object",
        RuleKind::CodeSmell,
    ),
];

/// Returns every built-in rule, in id order.
#[must_use]
pub fn all_rules() -> Vec<Rule> {
    CATALOG
        .iter()
        .map(|&(id, description, kind)| Rule::builtin(id, description, kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use balscan_core::RuleRegistry;

    #[test]
    fn catalog_ids_are_unique() {
        let registry = RuleRegistry::new(all_rules()).unwrap();
        assert_eq!(registry.len(), 14);
    }

    #[test]
    fn secrets_are_vulnerabilities() {
        let rules = all_rules();
        let vulnerabilities: Vec<&str> = rules
            .iter()
            .filter(|rule| rule.kind() == RuleKind::Vulnerability)
            .map(Rule::id)
            .collect();
        assert_eq!(vulnerabilities, vec!["ballerina:3", "ballerina:4"]);
    }
}
