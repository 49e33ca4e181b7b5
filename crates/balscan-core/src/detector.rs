//! Detection framework: collectors, detectors, and their dispatch.
//!
//! A scan runs in two phases over the whole document set:
//!
//! 1. every [`Collector`] sees every document and fills [`UserData`];
//! 2. [`Detector`]s, constructed with a shared borrow of the finished
//!    [`UserData`], see every document and report issues.
//!
//! Each phase walks a document once and offers each node to the
//! participants whose interest set contains the node's [`SyntaxKind`], in
//! registration order.
//!
//! # Example
//!
//! ```ignore
//! use balscan_core::{CheckContext, Detector, Node, ScanError, SyntaxKind};
//!
//! struct AvoidCheckpanic;
//!
//! impl Detector for AvoidCheckpanic {
//!     fn name(&self) -> &'static str { "avoid-checkpanic" }
//!     fn interests(&self) -> &'static [SyntaxKind] { &[SyntaxKind::Check] }
//!
//!     fn check(&mut self, node: Node<'_>, cx: &mut CheckContext<'_, '_>) -> Result<(), ScanError> {
//!         if let Node::Expr(expr) = node {
//!             cx.report(expr.location, 1)?;
//!         }
//!         Ok(())
//!     }
//! }
//! ```

use crate::context::UserData;
use crate::error::ScanError;
use crate::project::DocumentRef;
use crate::reporter::Reporter;
use crate::rule::Rule;
use crate::semantic::SemanticModel;
use crate::syntax::{Node, SyntaxKind};
use crate::types::Location;
use crate::walk::walk_module;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

/// What a detector sees while checking one document.
pub struct CheckContext<'a, 'r> {
    document: DocumentRef<'a>,
    reporter: &'r mut Reporter,
}

impl<'a, 'r> CheckContext<'a, 'r> {
    /// Creates a context for `document`.
    pub fn new(document: DocumentRef<'a>, reporter: &'r mut Reporter) -> Self {
        Self { document, reporter }
    }

    /// The document being checked.
    #[must_use]
    pub fn document(&self) -> DocumentRef<'a> {
        self.document
    }

    /// The document's semantic model.
    #[must_use]
    pub fn semantic(&self) -> &'a dyn SemanticModel {
        &self.document.document.semantic
    }

    /// Reports a finding by numeric rule id.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::RuleNotFound`] for an unregistered id.
    pub fn report(&mut self, location: Location, numeric_id: u32) -> Result<(), ScanError> {
        self.reporter.report_issue(self.document, location, numeric_id)
    }

    /// Reports a finding against a resolved rule.
    pub fn report_rule(&mut self, location: Location, rule: &Arc<Rule>) {
        self.reporter.report_rule(self.document, location, rule);
    }
}

/// A check that reports issues.
pub trait Detector {
    /// Kebab-case name, used in logs.
    fn name(&self) -> &'static str;

    /// Node kinds this detector wants to see.
    fn interests(&self) -> &'static [SyntaxKind];

    /// Checks one node. Must not assume anything about sibling order beyond
    /// pre-order traversal.
    ///
    /// # Errors
    ///
    /// Reporting against an unregistered rule is fatal for the run.
    fn check(&mut self, node: Node<'_>, cx: &mut CheckContext<'_, '_>) -> Result<(), ScanError>;
}

/// Type alias for boxed detectors borrowing the run's [`UserData`].
pub type DetectorBox<'u> = Box<dyn Detector + 'u>;

/// A pass that only gathers facts into [`UserData`].
pub trait Collector {
    /// Kebab-case name, used in logs.
    fn name(&self) -> &'static str;

    /// Node kinds this collector wants to see.
    fn interests(&self) -> &'static [SyntaxKind];

    /// Records what `node` contributes.
    fn collect(&mut self, node: Node<'_>, document: DocumentRef<'_>, user_data: &mut UserData);
}

/// Type alias for boxed collectors.
pub type CollectorBox = Box<dyn Collector>;

/// A rule set together with the passes implementing it.
pub trait DetectorSuite {
    /// Rules the detectors may report against.
    fn rules(&self) -> Vec<Rule>;

    /// Passes that run first, over every document.
    fn collectors(&self) -> Vec<CollectorBox>;

    /// Detectors, built once collection has finished.
    fn detectors<'u>(&self, user_data: &'u UserData) -> Vec<DetectorBox<'u>>;
}

/// Maps each node kind to the participants interested in it.
struct InterestIndex {
    by_kind: HashMap<SyntaxKind, Vec<usize>>,
}

impl InterestIndex {
    fn new<'s>(interests: impl Iterator<Item = &'s [SyntaxKind]>) -> Self {
        let mut by_kind: HashMap<SyntaxKind, Vec<usize>> = HashMap::new();
        for (index, kinds) in interests.enumerate() {
            for kind in kinds {
                let entry = by_kind.entry(*kind).or_default();
                if !entry.contains(&index) {
                    entry.push(index);
                }
            }
        }
        Self { by_kind }
    }

    fn get(&self, kind: SyntaxKind) -> &[usize] {
        self.by_kind.get(&kind).map_or(&[], Vec::as_slice)
    }
}

/// Runs `detectors` over one document.
///
/// # Errors
///
/// Stops at the first error a detector returns.
pub fn dispatch(
    detectors: &mut [DetectorBox<'_>],
    document: DocumentRef<'_>,
    reporter: &mut Reporter,
) -> Result<(), ScanError> {
    let index = InterestIndex::new(detectors.iter().map(|d| d.interests()));
    let mut cx = CheckContext::new(document, reporter);

    walk_module(&document.document.syntax, &mut |node| {
        for &i in index.get(node.kind()) {
            detectors[i].check(node, &mut cx)?;
        }
        Ok(())
    })
}

/// Runs `collectors` over one document.
pub fn collect(
    collectors: &mut [CollectorBox],
    document: DocumentRef<'_>,
    user_data: &mut UserData,
) {
    let index = InterestIndex::new(collectors.iter().map(|c| c.interests()));

    let walked: Result<(), Infallible> = walk_module(&document.document.syntax, &mut |node| {
        for &i in index.get(node.kind()) {
            collectors[i].collect(node, document, user_data);
        }
        Ok(())
    });
    match walked {
        Ok(()) => {}
        Err(never) => match never {},
    }
}
