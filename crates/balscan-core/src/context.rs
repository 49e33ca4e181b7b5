//! Per-run state shared by the checks of one analyzer.

use crate::reporter::Reporter;
use crate::semantic::SymbolId;
use std::collections::{BTreeMap, BTreeSet};

/// Parameters of one callable whose names mark them as secrets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensitiveParams {
    /// Callable name, for diagnostics.
    pub callable: String,
    /// Zero-based ordinals of the sensitive parameters.
    pub positions: BTreeSet<usize>,
}

/// State gathered in the collection phase and read by later checks.
#[derive(Debug, Clone, Default)]
pub struct UserData {
    /// Sensitive parameter ordinals per function or method symbol.
    pub sensitive_params: BTreeMap<SymbolId, SensitiveParams>,
}

/// A reporter plus the run's shared [`UserData`].
///
/// Created at the start of a run and dropped at the end.
#[derive(Debug)]
pub struct ScannerContext {
    reporter: Reporter,
    user_data: UserData,
}

impl ScannerContext {
    /// Creates a context with empty user data.
    #[must_use]
    pub fn new(reporter: Reporter) -> Self {
        Self {
            reporter,
            user_data: UserData::default(),
        }
    }

    /// The run's reporter.
    #[must_use]
    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Mutable access to the reporter.
    pub fn reporter_mut(&mut self) -> &mut Reporter {
        &mut self.reporter
    }

    /// Shared state.
    #[must_use]
    pub fn user_data(&self) -> &UserData {
        &self.user_data
    }

    /// Mutable access to the shared state.
    pub fn user_data_mut(&mut self) -> &mut UserData {
        &mut self.user_data
    }

    /// Borrows the reporter and the shared state at the same time.
    pub fn parts_mut(&mut self) -> (&mut Reporter, &mut UserData) {
        (&mut self.reporter, &mut self.user_data)
    }

    /// Ends the run, keeping only the reporter.
    #[must_use]
    pub fn into_reporter(self) -> Reporter {
        self.reporter
    }
}
