//! Projects, modules, and documents as delivered by the loader.

use crate::semantic::SymbolTable;
use crate::syntax::ModulePart;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a project snapshot.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The snapshot file could not be read.
    #[error("Failed to read project snapshot {path}: {source}")]
    Io {
        /// Path to the snapshot.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON for a project.
    #[error("Invalid project snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A parsed and resolved document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// File name within the module, e.g. `main.bal`.
    pub name: String,
    /// Path of the file on disk.
    pub path: PathBuf,
    /// Syntax tree.
    #[serde(default)]
    pub syntax: ModulePart,
    /// Resolved symbols.
    #[serde(default)]
    pub semantic: SymbolTable,
}

impl Document {
    /// Creates a document with an empty syntax tree and symbol table.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            syntax: ModulePart::default(),
            semantic: SymbolTable::new(),
        }
    }

    /// Sets the syntax tree.
    #[must_use]
    pub fn with_syntax(mut self, syntax: ModulePart) -> Self {
        self.syntax = syntax;
        self
    }

    /// Sets the symbol table.
    #[must_use]
    pub fn with_semantic(mut self, semantic: SymbolTable) -> Self {
        self.semantic = semantic;
        self
    }
}

/// A module and its documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Module name.
    pub name: String,
    /// Source documents.
    #[serde(default)]
    pub documents: Vec<Document>,
    /// Test documents.
    #[serde(default)]
    pub test_documents: Vec<Document>,
}

impl Module {
    /// Creates an empty module.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Vec::new(),
            test_documents: Vec::new(),
        }
    }

    /// Adds a source document.
    #[must_use]
    pub fn document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }

    /// Adds a test document.
    #[must_use]
    pub fn test_document(mut self, document: Document) -> Self {
        self.test_documents.push(document);
        self
    }
}

/// A project snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project name, shown in reports.
    pub name: String,
    /// Modules in load order.
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// A document together with the module it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRef<'a> {
    /// Owning module.
    pub module: &'a Module,
    /// The document.
    pub document: &'a Document,
}

impl DocumentRef<'_> {
    /// `<module>/<document>` label used in reports.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.module.name, self.document.name)
    }
}

impl Project {
    /// Creates an empty project.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modules: Vec::new(),
        }
    }

    /// Adds a module.
    #[must_use]
    pub fn module(mut self, module: Module) -> Self {
        self.modules.push(module);
        self
    }

    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a project.
    pub fn from_json_str(json: &str) -> Result<Self, ProjectError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProjectError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }

    /// Every document, module by module, sources before tests.
    pub fn documents(&self) -> impl Iterator<Item = DocumentRef<'_>> {
        self.modules.iter().flat_map(|module| {
            module
                .documents
                .iter()
                .chain(&module.test_documents)
                .map(move |document| DocumentRef { module, document })
        })
    }
}
