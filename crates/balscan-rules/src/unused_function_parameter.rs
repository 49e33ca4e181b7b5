//! Flags parameters that are never referenced.
//!
//! Applies to functions, methods and anonymous functions alike, since the
//! walker yields their parameters as the same node kind.

use crate::catalog::UNUSED_FUNCTION_PARAMETER;
use balscan_core::{CheckContext, Detector, Node, ScanError, SemanticModel, SyntaxKind};

/// Detector name.
pub const NAME: &str = "unused-function-parameter";

/// Reports parameters whose symbol has no usages.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnusedFunctionParameter;

impl UnusedFunctionParameter {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Detector for UnusedFunctionParameter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn interests(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::Parameter]
    }

    fn check(&mut self, node: Node<'_>, cx: &mut CheckContext<'_, '_>) -> Result<(), ScanError> {
        let Node::Parameter(param) = node else {
            return Ok(());
        };

        let semantic = cx.semantic();
        // Unresolved parameters are not reported.
        if let Some(symbol) = semantic.symbol(param.id) {
            if semantic.usages(symbol.id) == 0 {
                cx.report(param.location, UNUSED_FUNCTION_PARAMETER)?;
            }
        }
        Ok(())
    }
}
