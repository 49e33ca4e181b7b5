//! Flags `private` class fields that nothing reads or writes.

use crate::catalog::UNUSED_PRIVATE_FIELD;
use balscan_core::syntax::Qualifier;
use balscan_core::{CheckContext, Detector, Node, ScanError, SemanticModel, SymbolKind, SyntaxKind};

/// Detector name.
pub const NAME: &str = "unused-private-field";

/// Reports unused private class fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnusedPrivateField;

impl UnusedPrivateField {
    /// Creates the detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Detector for UnusedPrivateField {
    fn name(&self) -> &'static str {
        NAME
    }

    fn interests(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ObjectField]
    }

    fn check(&mut self, node: Node<'_>, cx: &mut CheckContext<'_, '_>) -> Result<(), ScanError> {
        let Node::ObjectField(field) = node else {
            return Ok(());
        };

        let semantic = cx.semantic();
        if let Some(symbol) = semantic.symbol(field.id) {
            if symbol.kind == SymbolKind::ClassField
                && symbol.has_qualifier(Qualifier::Private)
                && semantic.usages(symbol.id) == 0
            {
                cx.report(field.location, UNUSED_PRIVATE_FIELD)?;
            }
        }
        Ok(())
    }
}
