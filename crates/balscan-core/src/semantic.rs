//! Semantic model handed over by the resolver.

use crate::syntax::{NodeId, Qualifier};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity of a resolved symbol, stable across the documents of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

/// What a symbol denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Module or local variable.
    Variable,
    /// Module constant.
    Constant,
    /// Function or method parameter.
    Parameter,
    /// Function.
    Function,
    /// Class method.
    Method,
    /// Class.
    Class,
    /// Class field.
    ClassField,
    /// Type definition.
    Type,
}

/// A resolved symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Symbol id.
    pub id: SymbolId,
    /// Declared name.
    pub name: String,
    /// What the symbol denotes.
    pub kind: SymbolKind,
    /// Declaration qualifiers.
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
    /// Number of references, not counting the declaration.
    #[serde(default)]
    pub usages: usize,
}

impl Symbol {
    /// Creates an unqualified symbol with no usages.
    #[must_use]
    pub fn new(id: SymbolId, name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            qualifiers: Vec::new(),
            usages: 0,
        }
    }

    /// Adds a qualifier.
    #[must_use]
    pub fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    /// Sets the usage count.
    #[must_use]
    pub fn with_usages(mut self, usages: usize) -> Self {
        self.usages = usages;
        self
    }

    /// Whether the declaration carries `qualifier`.
    #[must_use]
    pub fn has_qualifier(&self, qualifier: Qualifier) -> bool {
        self.qualifiers.contains(&qualifier)
    }
}

/// Read access to symbols, as detectors see it.
pub trait SemanticModel {
    /// Symbol declared or referenced by `node`, if resolved.
    fn symbol(&self, node: NodeId) -> Option<&Symbol>;

    /// References to `symbol`, excluding its declaration.
    fn usages(&self, symbol: SymbolId) -> usize;
}

/// Node-to-symbol binding as stored in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Declaring or referencing node.
    pub node: NodeId,
    /// Resolved symbol.
    pub symbol: SymbolId,
}

#[derive(Clone, Default, Serialize, Deserialize)]
struct SymbolTableRepr {
    #[serde(default)]
    symbols: Vec<Symbol>,
    #[serde(default)]
    bindings: Vec<Binding>,
}

/// Snapshot-backed [`SemanticModel`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "SymbolTableRepr", into = "SymbolTableRepr")]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    bindings: Vec<Binding>,
    symbol_index: HashMap<SymbolId, usize>,
    binding_index: HashMap<NodeId, SymbolId>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a symbol, replacing any symbol with the same id.
    pub fn insert(&mut self, symbol: Symbol) {
        if let Some(&index) = self.symbol_index.get(&symbol.id) {
            self.symbols[index] = symbol;
        } else {
            self.symbol_index.insert(symbol.id, self.symbols.len());
            self.symbols.push(symbol);
        }
    }

    /// Binds `node` to `symbol`.
    pub fn bind(&mut self, node: NodeId, symbol: SymbolId) {
        self.bindings.push(Binding { node, symbol });
        self.binding_index.insert(node, symbol);
    }

    /// All symbols in insertion order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl SemanticModel for SymbolTable {
    fn symbol(&self, node: NodeId) -> Option<&Symbol> {
        let id = self.binding_index.get(&node)?;
        self.symbol_index.get(id).map(|&index| &self.symbols[index])
    }

    fn usages(&self, symbol: SymbolId) -> usize {
        self.symbol_index
            .get(&symbol)
            .map_or(0, |&index| self.symbols[index].usages)
    }
}

impl From<SymbolTableRepr> for SymbolTable {
    fn from(repr: SymbolTableRepr) -> Self {
        let mut table = Self::new();
        for symbol in repr.symbols {
            table.insert(symbol);
        }
        for binding in repr.bindings {
            table.bind(binding.node, binding.symbol);
        }
        table
    }
}

impl From<SymbolTable> for SymbolTableRepr {
    fn from(table: SymbolTable) -> Self {
        Self {
            symbols: table.symbols,
            bindings: table.bindings,
        }
    }
}
