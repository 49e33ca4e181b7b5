//! Expression shape helpers shared by the detectors.

use balscan_core::syntax::{Expr, ExprKind, LiteralKind, UnaryOp};

/// Whether `lhs` and `rhs` are the same side-effect free expression.
///
/// Covers name references, qualified name references, literals, field
/// accesses and index expressions built from those.
pub(crate) fn is_same_simple_expression(lhs: &Expr, rhs: &Expr) -> bool {
    match (&lhs.kind, &rhs.kind) {
        (ExprKind::NameRef { name: a }, ExprKind::NameRef { name: b }) => a == b,
        (
            ExprKind::QualifiedNameRef { module: m1, name: n1 },
            ExprKind::QualifiedNameRef { module: m2, name: n2 },
        ) => m1 == m2 && n1 == n2,
        (
            ExprKind::Literal { literal: k1, text: t1 },
            ExprKind::Literal { literal: k2, text: t2 },
        ) => k1 == k2 && t1 == t2,
        (
            ExprKind::FieldAccess { target: t1, field: f1 },
            ExprKind::FieldAccess { target: t2, field: f2 },
        ) => f1 == f2 && is_same_simple_expression(t1, t2),
        (
            ExprKind::Index { container: c1, keys: k1 },
            ExprKind::Index { container: c2, keys: k2 },
        ) => {
            k1.len() == k2.len()
                && is_same_simple_expression(c1, c2)
                && k1
                    .iter()
                    .zip(k2)
                    .all(|(a, b)| is_same_simple_expression(a, b))
        }
        _ => false,
    }
}

/// Whether `expr` is the reference `module:name`.
pub(crate) fn is_qualified_ref(expr: &Expr, module: &str, name: &str) -> bool {
    matches!(
        &expr.kind,
        ExprKind::QualifiedNameRef { module: m, name: n } if m == module && n == name
    )
}

/// Whether `expr` is the boolean literal `value`.
pub(crate) fn is_bool(expr: &Expr, value: bool) -> bool {
    let expected = if value { "true" } else { "false" };
    matches!(
        &expr.kind,
        ExprKind::Literal { literal: LiteralKind::Boolean, text } if text == expected
    )
}

/// The value of an int literal, optionally negated with unary minus.
pub(crate) fn int_value(expr: &Expr) -> Option<i64> {
    match &expr.kind {
        ExprKind::Literal {
            literal: LiteralKind::Int,
            text,
        } => text.parse().ok(),
        ExprKind::Unary {
            op: UnaryOp::Minus,
            operand,
        } => match &operand.kind {
            ExprKind::Literal {
                literal: LiteralKind::Int,
                text,
            } => format!("-{text}").parse().ok(),
            _ => None,
        },
        _ => None,
    }
}

/// Whether `expr` is an int literal equal to `value`.
pub(crate) fn is_int(expr: &Expr, value: i64) -> bool {
    int_value(expr) == Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use balscan_core::testing::{field_access, index, int, name_ref, neg, qualified, string, Ids};

    #[test]
    fn same_names_and_fields() {
        let mut ids = Ids::default();
        let a = name_ref(&mut ids, "a");
        let a2 = name_ref(&mut ids, "a");
        let b = name_ref(&mut ids, "b");
        assert!(is_same_simple_expression(&a, &a2));
        assert!(!is_same_simple_expression(&a, &b));

        let fa = field_access(&mut ids, a, "x");
        let fa2 = field_access(&mut ids, a2, "x");
        let fb = field_access(&mut ids, b, "x");
        assert!(is_same_simple_expression(&fa, &fa2));
        assert!(!is_same_simple_expression(&fa, &fb));
    }

    #[test]
    fn index_keys_compare_pairwise() {
        let mut ids = Ids::default();
        let left = {
            let c = name_ref(&mut ids, "arr");
            let k = int(&mut ids, "0");
            index(&mut ids, c, vec![k])
        };
        let same = {
            let c = name_ref(&mut ids, "arr");
            let k = int(&mut ids, "0");
            index(&mut ids, c, vec![k])
        };
        let other = {
            let c = name_ref(&mut ids, "arr");
            let k = int(&mut ids, "1");
            index(&mut ids, c, vec![k])
        };
        assert!(is_same_simple_expression(&left, &same));
        assert!(!is_same_simple_expression(&left, &other));
    }

    #[test]
    fn literals_of_different_kinds_differ() {
        let mut ids = Ids::default();
        let s = string(&mut ids, "1");
        let i = int(&mut ids, "1");
        assert!(!is_same_simple_expression(&s, &i));
    }

    #[test]
    fn negative_ints() {
        let mut ids = Ids::default();
        let one = int(&mut ids, "1");
        let minus_one = neg(&mut ids, one);
        assert!(is_int(&minus_one, -1));

        let min = int(&mut ids, "9223372036854775808");
        assert_eq!(int_value(&min), None);
        let min = neg(&mut ids, min);
        assert_eq!(int_value(&min), Some(i64::MIN));
    }

    #[test]
    fn qualified_refs() {
        let mut ids = Ids::default();
        let inf = qualified(&mut ids, "float", "Infinity");
        assert!(is_qualified_ref(&inf, "float", "Infinity"));
        assert!(!is_qualified_ref(&inf, "int", "Infinity"));
    }
}
