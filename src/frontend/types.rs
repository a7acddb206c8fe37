//! Semantic types for the analyzer.

use crate::frontend::ast::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel id meaning "no node" (symbol-table misses, untied types).
pub const UNRESOLVED_NODE: NodeId = NodeId::MAX;

/// The kind of a semantic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TypeKind {
    /// Not yet inferred
    #[default]
    Unknown,
    /// No value
    Void,
    /// Integer literal / arithmetic
    Integer,
    /// Floating-point literal / arithmetic
    Float,
    /// Boolean
    Bool,
    /// String literal
    String,
    /// Callable; `reference` names the defining Function node
    Function,
}

impl TypeKind {
    /// Get a human-readable name for this type kind.
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Unknown => "unknown",
            TypeKind::Void => "void",
            TypeKind::Integer => "integer",
            TypeKind::Float => "float",
            TypeKind::Bool => "bool",
            TypeKind::String => "string",
            TypeKind::Function => "function",
        }
    }
}

/// A semantic type.
///
/// Function types carry the id of their defining node so call sites can
/// resolve through the function registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Type {
    /// The type kind
    pub kind: TypeKind,
    /// Defining node for Function types; `UNRESOLVED_NODE` otherwise
    pub reference: NodeId,
}

impl Type {
    /// Create a type of the given kind with no node reference.
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            reference: UNRESOLVED_NODE,
        }
    }

    /// Create the unknown type.
    pub fn unknown() -> Self {
        Self::new(TypeKind::Unknown)
    }

    /// Create a function type referencing its defining node.
    pub fn function(reference: NodeId) -> Self {
        Self {
            kind: TypeKind::Function,
            reference,
        }
    }

    /// Check whether this type is still unknown.
    pub fn is_unknown(&self) -> bool {
        self.kind == TypeKind::Unknown
    }
}

impl Default for Type {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.name())
    }
}
