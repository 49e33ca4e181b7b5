//! Flags integer ranges that can never contain a value.
//!
//! `a ... b` is empty when `a > b`, and `a ..< b` when `a >= b`. Only
//! ranges with literal bounds are checked; bounds that do not fit in an
//! `i64` are ignored.

use crate::catalog::INVALID_RANGE;
use crate::expressions::int_value;
use balscan_core::syntax::{BinaryOp, ExprKind};
use balscan_core::{CheckContext, Detector, Node, ScanError, SyntaxKind};

/// Detector name.
pub const NAME: &str = "invalid-range";

/// Reports empty literal ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvalidRange;

impl InvalidRange {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Whether the range `lhs op rhs` is empty.
fn is_empty_range(op: BinaryOp, lhs: i64, rhs: i64) -> bool {
    match op {
        BinaryOp::RangeExclusive => lhs >= rhs,
        BinaryOp::RangeInclusive => lhs > rhs,
        _ => false,
    }
}

impl Detector for InvalidRange {
    fn name(&self) -> &'static str {
        NAME
    }

    fn interests(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::Binary]
    }

    fn check(&mut self, node: Node<'_>, cx: &mut CheckContext<'_, '_>) -> Result<(), ScanError> {
        let Node::Expr(expr) = node else {
            return Ok(());
        };
        let ExprKind::Binary { op, lhs, rhs } = &expr.kind else {
            return Ok(());
        };
        if !op.is_range() {
            return Ok(());
        }

        if let (Some(start), Some(end)) = (int_value(lhs), int_value(rhs)) {
            if is_empty_range(*op, start, end) {
                cx.report(expr.location, INVALID_RANGE)?;
            }
        }
        Ok(())
    }
}
