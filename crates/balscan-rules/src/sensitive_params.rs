//! Records which parameters of each callable carry secrets.
//!
//! Runs in the collection phase so that calls in any document can be
//! checked against callables declared in any other.

use crate::secrets::is_secret_name;
use balscan_core::{
    Collector, DocumentRef, Node, SemanticModel, SensitiveParams, SyntaxKind, UserData,
};
use std::collections::BTreeSet;
use tracing::debug;

/// Collector name.
pub const NAME: &str = "sensitive-parameter-tracker";

/// Fills [`UserData::sensitive_params`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SensitiveParamTracker;

impl SensitiveParamTracker {
    /// Creates the collector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Collector for SensitiveParamTracker {
    fn name(&self) -> &'static str {
        NAME
    }

    fn interests(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::Function, SyntaxKind::Method]
    }

    fn collect(&mut self, node: Node<'_>, document: DocumentRef<'_>, user_data: &mut UserData) {
        let (Node::Function(function) | Node::Method(function)) = node else {
            return;
        };

        let positions: BTreeSet<usize> = function
            .params
            .iter()
            .enumerate()
            .filter(|(_, param)| param.name.as_deref().is_some_and(is_secret_name))
            .map(|(position, _)| position)
            .collect();
        if positions.is_empty() {
            return;
        }

        let Some(symbol) = document.document.semantic.symbol(function.id) else {
            return;
        };

        debug!(
            "{} has sensitive parameters at {:?}",
            function.name, positions
        );
        user_data.sensitive_params.insert(
            symbol.id,
            SensitiveParams {
                callable: function.name.clone(),
                positions,
            },
        );
    }
}
