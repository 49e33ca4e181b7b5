//! Run-level error type.

use crate::config::ConfigError;
use crate::external::ExternalError;
use crate::project::ProjectError;
use crate::report::ReportError;
use crate::rule::RegistryError;
use miette::Diagnostic;
use thiserror::Error;

/// Errors that end a scan.
#[derive(Debug, Error, Diagnostic)]
pub enum ScanError {
    /// A check reported against a rule id its registry does not know.
    #[error("Rule {numeric_id} is not registered in namespace '{namespace}'")]
    #[diagnostic(
        code(balscan::rule_not_found),
        help("every reported rule id must be part of the analyzer's rule set")
    )]
    RuleNotFound {
        /// Namespace of the reporting registry.
        namespace: String,
        /// The unknown numeric id.
        numeric_id: u32,
    },

    /// Rule set is inconsistent.
    #[error(transparent)]
    #[diagnostic(code(balscan::registry))]
    Registry(#[from] RegistryError),

    /// An external analyzer could not be loaded or failed while analyzing.
    #[error(transparent)]
    #[diagnostic(
        code(balscan::external_analyzer),
        help("no issues are published when an external analyzer fails")
    )]
    External(#[from] ExternalError),

    /// `Scan.toml` is malformed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// Project snapshot could not be loaded.
    #[error(transparent)]
    #[diagnostic(code(balscan::project))]
    Project(#[from] ProjectError),

    /// A report could not be written.
    #[error(transparent)]
    #[diagnostic(code(balscan::report))]
    Report(#[from] ReportError),
}
