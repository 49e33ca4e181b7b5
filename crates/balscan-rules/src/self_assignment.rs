//! Flags assignments of a value to itself (`x = x`, `a.b += a.b`).

use crate::catalog::SELF_ASSIGNMENT;
use crate::expressions::is_same_simple_expression;
use balscan_core::{CheckContext, Detector, Node, ScanError, SyntaxKind};

/// Detector name.
pub const NAME: &str = "self-assignment";

/// Reports plain and compound self assignments.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfAssignment;

impl SelfAssignment {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Detector for SelfAssignment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn interests(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::Assignment, SyntaxKind::CompoundAssignment]
    }

    fn check(&mut self, node: Node<'_>, cx: &mut CheckContext<'_, '_>) -> Result<(), ScanError> {
        let (location, target, value) = match node {
            Node::Assignment(stmt) => (stmt.location, &stmt.target, &stmt.value),
            Node::CompoundAssignment(stmt) => (stmt.location, &stmt.target, &stmt.value),
            _ => return Ok(()),
        };

        if is_same_simple_expression(target, value) {
            cx.report(location, SELF_ASSIGNMENT)?;
        }
        Ok(())
    }
}
