//! Flags every `checkpanic` expression.
//!
//! `checkpanic` turns an error value into a panic. Propagating the error
//! with `check` or handling it explicitly keeps the caller in control.

use crate::catalog::AVOID_CHECKPANIC;
use balscan_core::syntax::ExprKind;
use balscan_core::{CheckContext, Detector, Node, ScanError, SyntaxKind};

/// Detector name.
pub const NAME: &str = "avoid-checkpanic";

/// Reports `checkpanic` expressions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvoidCheckpanic;

impl AvoidCheckpanic {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Detector for AvoidCheckpanic {
    fn name(&self) -> &'static str {
        NAME
    }

    fn interests(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::Check]
    }

    fn check(&mut self, node: Node<'_>, cx: &mut CheckContext<'_, '_>) -> Result<(), ScanError> {
        if let Node::Expr(expr) = node {
            if let ExprKind::Check { panics: true, .. } = expr.kind {
                cx.report(expr.location, AVOID_CHECKPANIC)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::AVOID_CHECKPANIC;
    use crate::test_support::findings;
    use balscan_core::semantic::SymbolTable;
    use balscan_core::testing::{call, check, check_panic, document, function, local, project, Ids};

    #[test]
    fn flags_checkpanic_but_not_check() {
        let mut ids = Ids::default();
        let panicking = {
            let inner = call(&mut ids, "parse", vec![]);
            check_panic(&mut ids, inner)
        };
        let line = panicking.location.start.line;
        let propagating = {
            let inner = call(&mut ids, "parse", vec![]);
            check(&mut ids, inner)
        };
        let body = vec![
            local(&mut ids, "a", Some(panicking)),
            local(&mut ids, "b", Some(propagating)),
        ];
        let main = function(&mut ids, "main", vec![], body);
        let project = project(vec![document("main.bal", vec![main], SymbolTable::new())]);

        assert_eq!(
            findings(&project, &[AVOID_CHECKPANIC]),
            vec![(AVOID_CHECKPANIC, line)]
        );
    }
}
