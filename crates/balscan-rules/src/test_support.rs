use crate::BuiltinSuite;
use balscan_core::{Project, ProjectAnalyzer};

/// Scans `project` with the built-in suite and returns `(rule, line)` for
/// every issue of the given rules, in report order.
pub(crate) fn findings(project: &Project, rules: &[u32]) -> Vec<(u32, u32)> {
    let analyzer = ProjectAnalyzer::builder()
        .suite(BuiltinSuite::new())
        .build()
        .unwrap();

    analyzer
        .analyze(project)
        .unwrap()
        .issues
        .iter()
        .filter(|issue| rules.contains(&issue.rule().numeric_id()))
        .map(|issue| (issue.rule().numeric_id(), issue.location().start.line))
        .collect()
}
