//! Flags public constructs that are not `isolated`.
//!
//! Public functions, public classes, public methods of public classes and
//! public object types can be called from other modules, so each one should
//! be safe for concurrent use. The `main` and `init` entry points are exempt.

use crate::catalog::{
    NON_ISOLATED_PUBLIC_CLASS, NON_ISOLATED_PUBLIC_FUNCTION, NON_ISOLATED_PUBLIC_METHOD,
    NON_ISOLATED_PUBLIC_OBJECT,
};
use balscan_core::syntax::Qualifier;
use balscan_core::{CheckContext, Detector, Node, ScanError, SyntaxKind};

/// Detector name.
pub const NAME: &str = "non-isolated-public";

const ENTRY_POINTS: &[&str] = &["main", "init"];

fn is_public_non_isolated(qualifiers: &[Qualifier]) -> bool {
    qualifiers.contains(&Qualifier::Public) && !qualifiers.contains(&Qualifier::Isolated)
}

/// Reports public functions, methods, classes and object types lacking
/// the `isolated` qualifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonIsolatedPublic {
    /// Whether the class whose methods are being visited is public.
    in_public_class: bool,
}

impl NonIsolatedPublic {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Detector for NonIsolatedPublic {
    fn name(&self) -> &'static str {
        NAME
    }

    fn interests(&self) -> &'static [SyntaxKind] {
        &[
            SyntaxKind::Function,
            SyntaxKind::Class,
            SyntaxKind::Method,
            SyntaxKind::ObjectType,
        ]
    }

    fn check(&mut self, node: Node<'_>, cx: &mut CheckContext<'_, '_>) -> Result<(), ScanError> {
        match node {
            Node::Function(function) => {
                if is_public_non_isolated(&function.qualifiers)
                    && !ENTRY_POINTS.contains(&function.name.as_str())
                {
                    cx.report(function.location, NON_ISOLATED_PUBLIC_FUNCTION)?;
                }
            }
            // Methods are walked right after their class.
            Node::Class(class) => {
                self.in_public_class = class.qualifiers.contains(&Qualifier::Public);
                if is_public_non_isolated(&class.qualifiers) {
                    cx.report(class.location, NON_ISOLATED_PUBLIC_CLASS)?;
                }
            }
            Node::Method(method) => {
                if self.in_public_class && is_public_non_isolated(&method.qualifiers) {
                    cx.report(method.location, NON_ISOLATED_PUBLIC_METHOD)?;
                }
            }
            Node::ObjectType(object) => {
                if object.qualifiers.contains(&Qualifier::Public)
                    && !object.object_qualifiers.contains(&Qualifier::Isolated)
                {
                    cx.report(object.location, NON_ISOLATED_PUBLIC_OBJECT)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}
