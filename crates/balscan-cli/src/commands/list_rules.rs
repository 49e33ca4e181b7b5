//! `--list-rules` implementation.

use balscan_core::{format_rules_table, ProjectAnalyzer};

/// Prints every available rule, built-in and external.
pub fn run(analyzer: &ProjectAnalyzer) {
    let catalog = analyzer.catalog();

    for failure in &catalog.diagnostics {
        tracing::warn!("{failure}");
    }

    println!("Loaded scan rules are:");
    println!("{}", format_rules_table(&catalog.rules));
}
