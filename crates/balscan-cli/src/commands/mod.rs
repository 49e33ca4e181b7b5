//! Subcommand implementations.

pub mod list_rules;
pub mod output;
pub mod scan;
