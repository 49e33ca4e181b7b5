//! # balscan-rules
//!
//! Built-in rules for balscan.
//!
//! All rules live in the trusted `ballerina` namespace.
//!
//! ## Available Rules
//!
//! | Id | Name | Description |
//! |----|------|-------------|
//! | `ballerina:1` | `avoid-checkpanic` | Avoid checkpanic |
//! | `ballerina:2` | `unused-function-parameter` | Unused function parameter |
//! | `ballerina:3` | `secrets` | Hard-coded secrets are security-sensitive |
//! | `ballerina:4` | `secrets` | Non configurable secrets are security-sensitive |
//! | `ballerina:5` | `self-assignment` | Self assignment |
//! | `ballerina:6` | `trivial-operations` | This operation always evaluates to true |
//! | `ballerina:7` | `trivial-operations` | This operation always evaluates to false |
//! | `ballerina:8` | `trivial-operations` | This operation always evaluates to the same value |
//! | `ballerina:9` | `invalid-range` | Invalid range expression |
//! | `ballerina:10` | `unused-private-field` | Unused class private fields |
//! | `ballerina:11` | `non-isolated-public` | Non isolated public function |
//! | `ballerina:12` | `non-isolated-public` | Non isolated public method |
//! | `ballerina:13` | `non-isolated-public` | Non isolated public class |
//! | `ballerina:14` | `non-isolated-public` | Non isolated public object |
//!
//! ## Usage
//!
//! ```ignore
//! use balscan_core::ProjectAnalyzer;
//! use balscan_rules::BuiltinSuite;
//!
//! let analyzer = ProjectAnalyzer::builder()
//!     .suite(BuiltinSuite::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod avoid_checkpanic;
pub mod catalog;
mod expressions;
mod invalid_range;
mod non_isolated_public;
mod secrets;
mod self_assignment;
mod sensitive_params;
mod trivial_operations;
mod unused_function_parameter;
mod unused_private_field;

#[cfg(test)]
mod test_support;

pub use avoid_checkpanic::AvoidCheckpanic;
pub use catalog::all_rules;
pub use invalid_range::InvalidRange;
pub use non_isolated_public::NonIsolatedPublic;
pub use secrets::{is_secret_name, is_url_with_credentials, SecretChecker};
pub use self_assignment::SelfAssignment;
pub use sensitive_params::SensitiveParamTracker;
pub use trivial_operations::TrivialOperations;
pub use unused_function_parameter::UnusedFunctionParameter;
pub use unused_private_field::UnusedPrivateField;

/// Re-export core types for convenience.
pub use balscan_core::{Detector, DetectorSuite, Rule};

use balscan_core::{CollectorBox, DetectorBox, UserData};

/// The built-in rule set and the passes implementing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSuite;

impl BuiltinSuite {
    /// Creates the suite.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DetectorSuite for BuiltinSuite {
    fn rules(&self) -> Vec<Rule> {
        all_rules()
    }

    fn collectors(&self) -> Vec<CollectorBox> {
        vec![Box::new(SensitiveParamTracker::new())]
    }

    fn detectors<'u>(&self, user_data: &'u UserData) -> Vec<DetectorBox<'u>> {
        vec![
            Box::new(AvoidCheckpanic::new()),
            Box::new(UnusedFunctionParameter::new()),
            Box::new(SecretChecker::new(&user_data.sensitive_params)),
            Box::new(SelfAssignment::new()),
            Box::new(TrivialOperations::new()),
            Box::new(InvalidRange::new()),
            Box::new(UnusedPrivateField::new()),
            Box::new(NonIsolatedPublic::new()),
        ]
    }
}
