//! Arena-backed abstract syntax tree.
//!
//! Nodes live in a single append-only [`AstContext`] and refer to each other
//! by dense numeric id, never by reference. Nodes are created bottom-up, so
//! every child id is strictly less than its parent's id and edges can never
//! dangle as the arena grows.

use crate::utils::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node inside an [`AstContext`].
pub type NodeId = usize;

/// The kind of an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AstKind {
    /// Unclassified node
    Unknown,
    /// Top-level module
    Module,
    /// Function definition
    Function,
    /// Declaration
    Declaration,
    /// Generic expression
    Expression,
    /// Assignment expression (`=`, `+=`, ...)
    AssignmentExpr,
    /// Binary expression
    BinaryExpr,
    /// Unary prefix expression
    UnaryExpr,
    /// Literal expression
    LiteralExpr,
    /// Identifier expression
    IdentifierExpr,
    /// Call expression (children: callee, arguments...)
    CallExpr,
    /// Parameter list of a function
    ArgumentList,
    /// Parenthesized expression
    GroupExpr,
    /// Braced statement block
    BlockStmt,
    /// `let` binding
    LetStmt,
    /// `return` statement
    ReturnStmt,
    /// Expression used as a statement
    ExpressionStmt,
}

impl AstKind {
    /// Get a human-readable name for this node kind.
    pub fn name(&self) -> &'static str {
        match self {
            AstKind::Unknown => "Unknown",
            AstKind::Module => "Module",
            AstKind::Function => "Function",
            AstKind::Declaration => "Declaration",
            AstKind::Expression => "Expression",
            AstKind::AssignmentExpr => "AssignmentExpr",
            AstKind::BinaryExpr => "BinaryExpr",
            AstKind::UnaryExpr => "UnaryExpr",
            AstKind::LiteralExpr => "LiteralExpr",
            AstKind::IdentifierExpr => "IdentifierExpr",
            AstKind::CallExpr => "CallExpr",
            AstKind::ArgumentList => "ArgumentList",
            AstKind::GroupExpr => "GroupExpr",
            AstKind::BlockStmt => "BlockStmt",
            AstKind::LetStmt => "LetStmt",
            AstKind::ReturnStmt => "ReturnStmt",
            AstKind::ExpressionStmt => "ExpressionStmt",
        }
    }
}

impl fmt::Display for AstKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single AST node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstNode {
    /// This node's id within its arena
    pub id: NodeId,
    /// The node kind
    pub kind: AstKind,
    /// Source span covered by the node
    pub span: Span,
    /// Textual payload: identifier name, literal spelling, or operator lexeme
    pub value: String,
    /// Ordered child ids; always smaller than `id`
    pub children: Vec<NodeId>,
}

/// Append-only arena owning all AST nodes.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AstContext {
    nodes: Vec<AstNode>,
}

impl AstContext {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new node and return its id.
    pub fn create_node(&mut self, kind: AstKind, span: Span, value: impl Into<String>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(AstNode {
            id,
            kind,
            span,
            value: value.into(),
            children: Vec::new(),
        });
        id
    }

    /// Look up a node by id.
    ///
    /// Panics if the id was not produced by this arena.
    pub fn node(&self, id: NodeId) -> &AstNode {
        &self.nodes[id]
    }

    /// Mutable lookup of a node by id.
    pub fn node_mut(&mut self, id: NodeId) -> &mut AstNode {
        &mut self.nodes[id]
    }

    /// Look up a node, returning `None` for foreign ids.
    pub fn get(&self, id: NodeId) -> Option<&AstNode> {
        self.nodes.get(id)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, AstNode> {
        self.nodes.iter()
    }
}
