//! Flags binary operations whose result is known without evaluating them.
//!
//! Two shapes are recognised. Comparing or combining an expression with
//! itself:
//!
//! | Operators | Result |
//! |-----------|--------|
//! | `>=` `<=` `==` `===` | always true |
//! | `>` `<` `!=` `!==` | always false |
//! | `\|\|` `&&` `&` `\|` | always the operand |
//!
//! And operations against identity or absorbing constants, such as
//! `a > int:MAX_VALUE`, `a && false` or `a | 0`. Logical and bitwise
//! constants are recognised on either side.

use crate::catalog::{ALWAYS_FALSE, ALWAYS_SAME_VALUE, ALWAYS_TRUE};
use crate::expressions::{is_bool, is_int, is_qualified_ref, is_same_simple_expression};
use balscan_core::syntax::{BinaryOp, Expr, ExprKind};
use balscan_core::{CheckContext, Detector, Node, ScanError, SyntaxKind};

/// Detector name.
pub const NAME: &str = "trivial-operations";

/// Reports same-operand and constant-operand trivial operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrivialOperations;

impl TrivialOperations {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Rule for an operation whose operands are the same expression.
fn same_operand_rule(op: BinaryOp) -> Option<u32> {
    match op {
        BinaryOp::GtEq | BinaryOp::LtEq | BinaryOp::Eq | BinaryOp::RefEq => Some(ALWAYS_TRUE),
        BinaryOp::Gt | BinaryOp::Lt | BinaryOp::NotEq | BinaryOp::RefNotEq => Some(ALWAYS_FALSE),
        BinaryOp::LogicalOr | BinaryOp::LogicalAnd | BinaryOp::BitwiseAnd | BinaryOp::BitwiseOr => {
            Some(ALWAYS_SAME_VALUE)
        }
        _ => None,
    }
}

fn either(lhs: &Expr, rhs: &Expr, test: impl Fn(&Expr) -> bool) -> bool {
    test(lhs) || test(rhs)
}

/// Rules for an operation against a constant, in report order.
fn constant_operand_rules(op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Vec<u32> {
    let mut rules = Vec::new();

    match op {
        BinaryOp::Gt => {
            if is_qualified_ref(rhs, "float", "Infinity") {
                rules.push(ALWAYS_FALSE);
            }
            if is_qualified_ref(rhs, "int", "MAX_VALUE") {
                rules.push(ALWAYS_FALSE);
            }
        }
        BinaryOp::LtEq => {
            if is_qualified_ref(rhs, "float", "Infinity") {
                rules.push(ALWAYS_TRUE);
            }
            if is_qualified_ref(rhs, "int", "MAX_VALUE") {
                rules.push(ALWAYS_TRUE);
            }
        }
        BinaryOp::Lt if is_qualified_ref(rhs, "int", "MIN_VALUE") => rules.push(ALWAYS_FALSE),
        BinaryOp::GtEq if is_qualified_ref(rhs, "int", "MIN_VALUE") => rules.push(ALWAYS_TRUE),
        BinaryOp::LogicalAnd => {
            if either(lhs, rhs, |e| is_bool(e, false)) {
                rules.push(ALWAYS_FALSE);
            }
            if either(lhs, rhs, |e| is_bool(e, true)) {
                rules.push(ALWAYS_SAME_VALUE);
            }
        }
        BinaryOp::LogicalOr => {
            if either(lhs, rhs, |e| is_bool(e, false)) {
                rules.push(ALWAYS_SAME_VALUE);
            }
            if either(lhs, rhs, |e| is_bool(e, true)) {
                rules.push(ALWAYS_TRUE);
            }
        }
        BinaryOp::BitwiseAnd => {
            if either(lhs, rhs, |e| is_int(e, 0)) {
                rules.push(ALWAYS_FALSE);
            }
            if either(lhs, rhs, |e| is_int(e, -1)) {
                rules.push(ALWAYS_SAME_VALUE);
            }
        }
        BinaryOp::BitwiseOr => {
            if either(lhs, rhs, |e| is_int(e, 0)) {
                rules.push(ALWAYS_SAME_VALUE);
            }
            if either(lhs, rhs, |e| is_int(e, -1)) {
                rules.push(ALWAYS_TRUE);
            }
        }
        _ => {}
    }

    rules
}

impl Detector for TrivialOperations {
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

        for rule in constant_operand_rules(*op, lhs, rhs) {
            cx.report(expr.location, rule)?;
        }
        if let Some(rule) = same_operand_rule(*op) {
            if is_same_simple_expression(lhs, rhs) {
                cx.report(expr.location, rule)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::findings;
    use balscan_core::semantic::SymbolTable;
    use balscan_core::testing::{
        binary, boolean, document, function, int, local, name_ref, neg, project, qualified, Ids,
    };

    const ALL: &[u32] = &[ALWAYS_TRUE, ALWAYS_FALSE, ALWAYS_SAME_VALUE];

    /// Scans `main() { var r = <expr>; }` and returns the reported rules.
    fn rules_for(build: impl FnOnce(&mut Ids) -> Expr) -> Vec<u32> {
        let mut ids = Ids::default();
        let expr = build(&mut ids);
        let body = vec![local(&mut ids, "r", Some(expr))];
        let main = function(&mut ids, "main", vec![], body);
        let project = project(vec![document("main.bal", vec![main], SymbolTable::new())]);
        findings(&project, ALL).into_iter().map(|(rule, _)| rule).collect()
    }

    fn same_operands(op: BinaryOp) -> Vec<u32> {
        rules_for(|ids| {
            let (a, b) = (name_ref(ids, "a"), name_ref(ids, "a"));
            binary(ids, op, a, b)
        })
    }

    #[test]
    fn same_operand_table() {
        for op in [BinaryOp::GtEq, BinaryOp::LtEq, BinaryOp::Eq, BinaryOp::RefEq] {
            assert_eq!(same_operands(op), vec![ALWAYS_TRUE], "{op:?}");
        }
        for op in [BinaryOp::Gt, BinaryOp::Lt, BinaryOp::NotEq, BinaryOp::RefNotEq] {
            assert_eq!(same_operands(op), vec![ALWAYS_FALSE], "{op:?}");
        }
        for op in [
            BinaryOp::LogicalOr,
            BinaryOp::LogicalAnd,
            BinaryOp::BitwiseAnd,
            BinaryOp::BitwiseOr,
        ] {
            assert_eq!(same_operands(op), vec![ALWAYS_SAME_VALUE], "{op:?}");
        }
        for op in [BinaryOp::Add, BinaryOp::Sub, BinaryOp::BitwiseXor] {
            assert!(same_operands(op).is_empty(), "{op:?}");
        }
    }

    #[test]
    fn different_operands_are_fine() {
        let rules = rules_for(|ids| {
            let (a, b) = (name_ref(ids, "a"), name_ref(ids, "b"));
            binary(ids, BinaryOp::Eq, a, b)
        });
        assert!(rules.is_empty());
    }

    fn against_qualified(op: BinaryOp, module: &str, name: &str) -> Vec<u32> {
        rules_for(|ids| {
            let a = name_ref(ids, "a");
            let bound = qualified(ids, module, name);
            binary(ids, op, a, bound)
        })
    }

    #[test]
    fn comparisons_against_limits() {
        assert_eq!(against_qualified(BinaryOp::Gt, "float", "Infinity"), vec![ALWAYS_FALSE]);
        assert_eq!(against_qualified(BinaryOp::Gt, "int", "MAX_VALUE"), vec![ALWAYS_FALSE]);
        assert_eq!(against_qualified(BinaryOp::Lt, "int", "MIN_VALUE"), vec![ALWAYS_FALSE]);
        assert_eq!(against_qualified(BinaryOp::LtEq, "float", "Infinity"), vec![ALWAYS_TRUE]);
        assert_eq!(against_qualified(BinaryOp::LtEq, "int", "MAX_VALUE"), vec![ALWAYS_TRUE]);
        assert_eq!(against_qualified(BinaryOp::GtEq, "int", "MIN_VALUE"), vec![ALWAYS_TRUE]);
        assert!(against_qualified(BinaryOp::Lt, "int", "MAX_VALUE").is_empty());
    }

    fn with_bool(op: BinaryOp, value: bool, on_left: bool) -> Vec<u32> {
        rules_for(|ids| {
            let a = name_ref(ids, "a");
            let constant = boolean(ids, value);
            if on_left {
                binary(ids, op, constant, a)
            } else {
                binary(ids, op, a, constant)
            }
        })
    }

    #[test]
    fn logical_constants() {
        assert_eq!(with_bool(BinaryOp::LogicalAnd, false, false), vec![ALWAYS_FALSE]);
        assert_eq!(with_bool(BinaryOp::LogicalAnd, false, true), vec![ALWAYS_FALSE]);
        assert_eq!(with_bool(BinaryOp::LogicalAnd, true, false), vec![ALWAYS_SAME_VALUE]);
        assert_eq!(with_bool(BinaryOp::LogicalOr, true, false), vec![ALWAYS_TRUE]);
        assert_eq!(with_bool(BinaryOp::LogicalOr, false, false), vec![ALWAYS_SAME_VALUE]);
    }

    fn with_int(op: BinaryOp, value: i64) -> Vec<u32> {
        rules_for(|ids| {
            let a = name_ref(ids, "a");
            let magnitude = int(ids, &value.unsigned_abs().to_string());
            let constant = if value < 0 { neg(ids, magnitude) } else { magnitude };
            binary(ids, op, a, constant)
        })
    }

    #[test]
    fn bitwise_constants() {
        assert_eq!(with_int(BinaryOp::BitwiseAnd, 0), vec![ALWAYS_FALSE]);
        assert_eq!(with_int(BinaryOp::BitwiseAnd, -1), vec![ALWAYS_SAME_VALUE]);
        assert_eq!(with_int(BinaryOp::BitwiseOr, 0), vec![ALWAYS_SAME_VALUE]);
        assert_eq!(with_int(BinaryOp::BitwiseOr, -1), vec![ALWAYS_TRUE]);
        assert!(with_int(BinaryOp::BitwiseAnd, 1).is_empty());
    }

    #[test]
    fn constant_and_same_operand_both_report() {
        let rules = rules_for(|ids| {
            let (f1, f2) = (boolean(ids, false), boolean(ids, false));
            binary(ids, BinaryOp::LogicalAnd, f1, f2)
        });
        assert_eq!(rules, vec![ALWAYS_FALSE, ALWAYS_SAME_VALUE]);
    }
}
