//! # Sable — compiler front-end and mid-end
//!
//! A small, modular compiler for a statically-typed, expression-oriented
//! language, with a pluggable code-emission backend targeting C++.
//!
//! ## Architecture
//!
//! ```text
//! Source → Lexer → Parser → Semantic Analysis → IR Lowering → Passes → Backend → Files
//! ```
//!
//! Data flows strictly forward: each stage consumes an immutable earlier
//! output and produces an owned result. Diagnostics accumulate across the
//! run and never abort the pipeline on their own.
//!
//! ## Example
//!
//! ```rust
//! use sable::codegen::CppBackendOptions;
//!
//! let source = "let x = 1;\nlet y = x + 2;";
//! let output = sable::compile_to_cpp(source, "demo", CppBackendOptions::default()).unwrap();
//! assert_eq!(output.files.len(), 2);
//! assert!(output.diagnostics.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codegen;
pub mod frontend;
pub mod ir;
pub mod lsp;
pub mod opt;
pub mod utils;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::codegen::{Backend, BackendRegistry, CppBackend, CppBackendOptions, GeneratedFile, TargetProfile};
    pub use crate::frontend::{
        dump_ast_json, dump_ast_text, lex, parse_expression, parse_module, AstContext, AstDumpOptions,
        AstKind, AstNode, LexerConfig, NodeId, SemanticAnalyzer, Token, TokenKind, TokenStream, Type,
        TypeKind, TypeTable,
    };
    pub use crate::ir::{lower_module, print_module, IRFunction, IRModule, IRType, IRValue};
    pub use crate::opt::{ConstantFoldingPass, Pass, PassManager};
    pub use crate::utils::{DiagCode, Diagnostic, DiagnosticReporter, ParseError, Span};
}

use crate::codegen::{Backend, CppBackend, CppBackendOptions, GeneratedFile, TargetProfile};
use crate::frontend::semantic::{SemanticAnalyzer, TypeTable};
use crate::frontend::symbols::SemanticContext;
use crate::frontend::{lex, parse_module, AstContext, LexerConfig, NodeId, TokenStream};
use crate::ir::{lower_module, IRModule};
use crate::opt::{ConstantFoldingPass, PassManager};
use crate::utils::diagnostics::{Diagnostic, DiagnosticReporter};
use anyhow::{Context, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tokenize source text with the default configuration.
pub fn tokenize(source: &str) -> TokenStream {
    lex(source, LexerConfig::default())
}

/// Parse source text into an arena, returning the Module root.
pub fn parse_source(source: &str, context: &mut AstContext) -> Result<NodeId> {
    let tokens = tokenize(source);
    parse_module(&tokens, context)
        .with_context(|| "Failed to parse module".to_string())
}

/// Result of analyzing a source text.
#[derive(Debug)]
pub struct Analysis {
    /// The AST arena
    pub ast: AstContext,
    /// The module root node
    pub root: NodeId,
    /// Node types recorded by the analyzer
    pub types: TypeTable,
    /// Symbols and function signatures
    pub context: SemanticContext,
    /// Diagnostics accumulated during analysis
    pub diagnostics: Vec<Diagnostic>,
}

/// Lex, parse, and analyze source text.
pub fn analyze_source(source: &str) -> Result<Analysis> {
    let mut ast = AstContext::new();
    let root = parse_source(source, &mut ast)?;

    let mut reporter = DiagnosticReporter::new();
    let (types, context) = {
        let mut analyzer = SemanticAnalyzer::new(&ast, &mut reporter);
        analyzer.analyze(root);
        (analyzer.types().clone(), analyzer.context().clone())
    };

    Ok(Analysis {
        ast,
        root,
        types,
        context,
        diagnostics: reporter.take(),
    })
}

/// Lex, parse, analyze, lower, and constant-fold source text.
pub fn lower_source(source: &str, module_name: &str) -> Result<(IRModule, Vec<Diagnostic>)> {
    let mut ast = AstContext::new();
    let root = parse_source(source, &mut ast)?;

    let mut reporter = DiagnosticReporter::new();
    let mut module = {
        let mut analyzer = SemanticAnalyzer::new(&ast, &mut reporter);
        analyzer.analyze(root);
        lower_module(&analyzer, module_name)
    };

    let mut passes = PassManager::new();
    passes.add_pass(ConstantFoldingPass::new());
    passes.run(&mut module);

    Ok((module, reporter.take()))
}

/// Output of a full compilation.
#[derive(Debug)]
pub struct CompileOutput {
    /// Generated files, in backend order
    pub files: Vec<GeneratedFile>,
    /// Diagnostics accumulated across the run
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the full pipeline and emit C++ files.
pub fn compile_to_cpp(
    source: &str,
    module_name: &str,
    options: CppBackendOptions,
) -> Result<CompileOutput> {
    let (module, diagnostics) = lower_source(source, module_name)?;

    let backend = CppBackend::new(options);
    let files = backend.emit(&module, &TargetProfile::default());

    Ok(CompileOutput { files, diagnostics })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_analyze_source_clean_program() {
        let analysis = analyze_source("let x = 1;\nlet y = x + 2;").expect("pipeline failed");
        assert!(analysis.diagnostics.is_empty());
        assert_eq!(analysis.ast.node(analysis.root).children.len(), 2);
    }

    #[test]
    fn test_analyze_source_parse_error() {
        assert!(analyze_source("let = 1;").is_err());
    }

    #[test]
    fn test_compile_to_cpp_produces_two_files() {
        let output =
            compile_to_cpp("let x = 1;", "demo", CppBackendOptions::default()).expect("compile");
        let paths: Vec<_> = output.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["demo.hpp", "demo.cpp"]);
    }
}
