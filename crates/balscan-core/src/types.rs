//! Locations and issues.

use crate::rule::{Rule, Source};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// A zero-based line/column position inside a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed).
    pub line: u32,
    /// Column number (0-indexed).
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A zero-based source range, as produced by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Start of the range (inclusive).
    pub start: Position,
    /// End of the range (exclusive).
    pub end: Position,
}

impl Location {
    /// Creates a location spanning `start..end`.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a location on a single line.
    #[must_use]
    pub const fn on_line(line: u32, start_column: u32, end_column: u32) -> Self {
        Self {
            start: Position::new(line, start_column),
            end: Position::new(line, end_column),
        }
    }
}

/// A one-based text range, the form every report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    /// Start line (1-indexed).
    pub start_line: u32,
    /// Start column (1-indexed).
    pub start_line_offset: u32,
    /// End line (1-indexed).
    pub end_line: u32,
    /// End column (1-indexed).
    pub end_line_offset: u32,
}

impl From<Location> for TextRange {
    fn from(location: Location) -> Self {
        Self {
            start_line: location.start.line.saturating_add(1),
            start_line_offset: location.start.column.saturating_add(1),
            end_line: location.end.line.saturating_add(1),
            end_line_offset: location.end.column.saturating_add(1),
        }
    }
}

/// A finding produced by a rule.
///
/// Issues are only created by the [`Reporter`](crate::Reporter), which also
/// decides their [`Source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    location: Location,
    rule: Arc<Rule>,
    source: Source,
    document_label: String,
    file_path: PathBuf,
}

impl Issue {
    pub(crate) fn new(
        location: Location,
        rule: Arc<Rule>,
        document_label: String,
        file_path: PathBuf,
    ) -> Self {
        let source = Source::classify(rule.id());
        Self {
            location,
            rule,
            source,
            document_label,
            file_path,
        }
    }

    /// Zero-based location of the finding.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    /// One-based range of the finding.
    #[must_use]
    pub fn text_range(&self) -> TextRange {
        self.location.into()
    }

    /// The rule that was violated.
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Whether the rule comes from a trusted or an external namespace.
    #[must_use]
    pub fn source(&self) -> Source {
        self.source
    }

    /// `<module>/<document>` label of the reporting document.
    #[must_use]
    pub fn document_label(&self) -> &str {
        &self.document_label
    }

    /// Path of the reporting document.
    #[must_use]
    pub fn file_path(&self) -> &std::path::Path {
        &self.file_path
    }
}
