//! Frontend: lexer, parser, AST, and semantic analysis for Sable.
//!
//! ## Language overview
//!
//! Sable is a small statically-typed, expression-oriented language:
//!
//! ```text
//! let x = 1;
//! let mut total = x + 2 * 3;
//! total = add(total, 4);
//! return total;
//! ```
//!
//! Types are inferred: literals seed the information and unification
//! propagates it through locals, assignments, returns, and calls.

pub mod ast;
pub mod ast_dump;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod symbols;
pub mod token;
pub mod types;

// Re-exports
pub use ast::{AstContext, AstKind, AstNode, NodeId};
pub use ast_dump::{dump_ast_json, dump_ast_text, AstDumpOptions};
pub use lexer::{lex, Lexer};
pub use parser::{parse_expression, parse_module, Parser};
pub use semantic::{SemanticAnalyzer, TypeTable};
pub use symbols::{FunctionParameter, FunctionRegistry, FunctionSignature, SemanticContext, SymbolTable};
pub use token::{LexerConfig, Token, TokenKind, TokenStream, Trivia, TriviaKind};
pub use types::{Type, TypeKind, UNRESOLVED_NODE};
