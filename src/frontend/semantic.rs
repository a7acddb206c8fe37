//! Semantic analysis for the Sable language.
//!
//! The analyzer walks the AST, records a type for every node it visits,
//! resolves identifiers through the scope stack, registers function
//! signatures, and unifies types across assignments, returns, and calls.
//! Problems become diagnostics; analysis always runs to completion and
//! falls back to the unknown type where information is lost.

use crate::frontend::ast::{AstContext, AstKind, NodeId};
use crate::frontend::symbols::{
    FunctionParameter, FunctionSignature, SemanticContext,
};
use crate::frontend::types::{Type, TypeKind, UNRESOLVED_NODE};
use crate::utils::diagnostics::{DiagCode, DiagnosticReporter};
use crate::utils::span::Span;
use std::collections::HashMap;

fn is_bool_literal(value: &str) -> bool {
    value == "true" || value == "false"
}

fn is_number_literal(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    let mut seen_decimal = false;
    for ch in value.chars() {
        if ch.is_ascii_digit() {
            continue;
        }
        if ch == '.' && !seen_decimal {
            seen_decimal = true;
            continue;
        }
        return false;
    }
    true
}

fn is_float_literal(value: &str) -> bool {
    value.contains('.')
}

// Prefer the first operand when it is already known.
fn pick_known(lhs: Type, rhs: Type) -> Type {
    if !lhs.is_unknown() {
        lhs
    } else {
        rhs
    }
}

/// Mapping from AST node ids to their inferred types.
#[derive(Debug, Default, Clone)]
pub struct TypeTable {
    types: HashMap<NodeId, Type>,
}

impl TypeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a type for a node, replacing any previous entry.
    pub fn set(&mut self, id: NodeId, ty: Type) {
        self.types.insert(id, ty);
    }

    /// Type recorded for a node; unknown when absent.
    pub fn get(&self, id: NodeId) -> Type {
        self.types.get(&id).copied().unwrap_or_default()
    }

    /// Check whether a node has a recorded type.
    pub fn contains(&self, id: NodeId) -> bool {
        self.types.contains_key(&id)
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.types.clear();
    }
}

#[derive(Debug)]
struct ActiveFunction {
    /// Registry slab index of the signature being analyzed
    signature: Option<usize>,
    inferred_return: Type,
    saw_return: bool,
}

/// The semantic analyzer.
pub struct SemanticAnalyzer<'a> {
    ast: &'a AstContext,
    reporter: &'a mut DiagnosticReporter,
    context: SemanticContext,
    types: TypeTable,
    function_stack: Vec<ActiveFunction>,
}

impl<'a> SemanticAnalyzer<'a> {
    /// Create an analyzer over an arena, reporting into `reporter`.
    pub fn new(ast: &'a AstContext, reporter: &'a mut DiagnosticReporter) -> Self {
        Self {
            ast,
            reporter,
            context: SemanticContext::new(),
            types: TypeTable::new(),
            function_stack: Vec::new(),
        }
    }

    /// Analyze the subtree rooted at `root`, resetting any previous state.
    pub fn analyze(&mut self, root: NodeId) {
        self.types.clear();
        self.context = SemanticContext::new();
        self.analyze_node(root);
    }

    /// The semantic context (symbols and function registry).
    pub fn context(&self) -> &SemanticContext {
        &self.context
    }

    /// The node type table.
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    fn analyze_node(&mut self, id: NodeId) {
        match self.ast.node(id).kind {
            AstKind::Module => self.analyze_module(id),
            AstKind::Function => self.analyze_function(id),
            AstKind::BlockStmt => self.analyze_block(id),
            AstKind::LetStmt => self.analyze_let(id),
            AstKind::ReturnStmt => self.analyze_return(id),
            AstKind::ExpressionStmt => self.analyze_expression_statement(id),
            _ => {}
        }
    }

    fn analyze_module(&mut self, id: NodeId) {
        for &child in &self.ast.node(id).children {
            self.analyze_node(child);
        }
        self.assign_type(id, Type::unknown());
    }

    fn analyze_block(&mut self, id: NodeId) {
        self.context.symbols_mut().push_scope();
        for &child in &self.ast.node(id).children {
            self.analyze_node(child);
        }
        self.context.symbols_mut().pop_scope();
        self.assign_type(id, Type::unknown());
    }

    fn analyze_function(&mut self, id: NodeId) {
        let node = self.ast.node(id);
        if node.children.is_empty() {
            self.assign_type(id, Type::function(id));
            return;
        }

        let name_id = node.children[0];
        let name_node = self.ast.node(name_id);
        self.declare_symbol(&name_node.value, name_id, name_node.span);

        let function_type = Type::function(id);
        self.assign_type(name_id, function_type);
        self.assign_type(id, function_type);

        let mut signature = FunctionSignature {
            name: name_node.value.clone(),
            node_id: id,
            parameters: Vec::new(),
            return_type: Type::unknown(),
        };

        // Children are [name, ArgumentList?, body...].
        let mut next_index = 1;
        if node.children.len() > 1 {
            let maybe_params = self.ast.node(node.children[1]);
            if maybe_params.kind == AstKind::ArgumentList {
                for &param_id in &maybe_params.children {
                    let param_node = self.ast.node(param_id);
                    signature.parameters.push(FunctionParameter {
                        name: param_node.value.clone(),
                        node_id: param_id,
                        ty: Type::unknown(),
                    });
                }
                next_index = 2;
            }
        }

        let (entry_index, inserted) = self.context.functions_mut().declare(signature);
        if !inserted {
            self.reporter.report(
                DiagCode::SemDuplicateSymbol,
                format!("duplicate function '{}'", name_node.value),
                name_node.span,
            );
        }

        self.function_stack.push(ActiveFunction {
            signature: Some(entry_index),
            inferred_return: Type::unknown(),
            saw_return: false,
        });

        self.context.symbols_mut().push_scope();
        let parameters: Vec<(String, NodeId, Type)> = self
            .context
            .functions()
            .get(entry_index)
            .map(|sig| {
                sig.parameters
                    .iter()
                    .map(|p| (p.name.clone(), p.node_id, p.ty))
                    .collect()
            })
            .unwrap_or_default();
        for (name, param_id, ty) in parameters {
            let span = self.ast.node(param_id).span;
            self.declare_symbol(&name, param_id, span);
            self.assign_type(param_id, ty);
        }

        for &child in node.children.iter().skip(next_index) {
            self.analyze_node(child);
        }

        self.context.symbols_mut().pop_scope();

        let active = match self.function_stack.pop() {
            Some(active) => active,
            None => return,
        };

        let mut return_type = active.inferred_return;
        if !active.saw_return && return_type.is_unknown() {
            return_type.kind = TypeKind::Void;
        }
        if let Some(entry) = self.context.functions_mut().get_mut(entry_index) {
            entry.return_type = return_type;
            // Capture inference contributed by the body and by call sites.
            for param in &mut entry.parameters {
                param.ty = self.types.get(param.node_id);
            }
        }
    }

    fn analyze_let(&mut self, id: NodeId) {
        let node = self.ast.node(id);
        if node.children.is_empty() {
            self.assign_type(id, Type::unknown());
            return;
        }

        let name_id = node.children[0];
        let name_node = self.ast.node(name_id);
        self.declare_symbol(&name_node.value, name_id, name_node.span);

        let init_type = if node.children.len() > 1 {
            self.analyze_expression(node.children[1])
        } else {
            Type::unknown()
        };

        self.assign_type(name_id, init_type);
        self.assign_type(id, init_type);
    }

    fn analyze_return(&mut self, id: NodeId) {
        let node = self.ast.node(id);
        let mut return_type = match node.children.first() {
            Some(&value) => self.analyze_expression(value),
            None => Type::new(TypeKind::Void),
        };
        self.assign_type(id, return_type);

        let active_signature = self.function_stack.last().and_then(|a| a.signature);
        if let Some(index) = active_signature {
            if let Some(sig) = self.context.functions().get(index) {
                let message = format!("return type mismatch for function '{}'", sig.name);
                let declared = sig.return_type;
                let unified = self.unify_types(declared, return_type, node.span, &message);
                if let Some(entry) = self.context.functions_mut().get_mut(index) {
                    entry.return_type = unified;
                }
                return_type = unified;
            }
        }
        self.update_current_function_return(return_type, node.span);
    }

    fn analyze_expression_statement(&mut self, id: NodeId) {
        let node = self.ast.node(id);
        match node.children.first() {
            Some(&child) => {
                let expr_type = self.analyze_expression(child);
                self.assign_type(id, expr_type);
            }
            None => self.assign_type(id, Type::unknown()),
        }
    }

    fn analyze_expression(&mut self, id: NodeId) -> Type {
        match self.ast.node(id).kind {
            AstKind::IdentifierExpr => self.analyze_identifier(id),
            AstKind::LiteralExpr => self.analyze_literal(id),
            AstKind::BinaryExpr => self.analyze_binary(id),
            AstKind::AssignmentExpr => self.analyze_assignment(id),
            AstKind::UnaryExpr => self.analyze_unary(id),
            AstKind::GroupExpr => self.analyze_group(id),
            AstKind::CallExpr => self.analyze_call(id),
            _ => {
                for &child in &self.ast.node(id).children {
                    self.analyze_expression(child);
                }
                let result = Type::unknown();
                self.assign_type(id, result);
                result
            }
        }
    }

    fn analyze_identifier(&mut self, id: NodeId) -> Type {
        let node = self.ast.node(id);
        let symbol_id = self.context.symbols().lookup(&node.value);
        if symbol_id == UNRESOLVED_NODE {
            self.reporter.report(
                DiagCode::SemUnknownIdentifier,
                format!("use of undeclared symbol '{}'", node.value),
                node.span,
            );
            let ty = Type::unknown();
            self.assign_type(id, ty);
            return ty;
        }

        let decl_type = self.types.get(symbol_id);
        self.assign_type(id, decl_type);
        decl_type
    }

    fn analyze_literal(&mut self, id: NodeId) -> Type {
        let value = &self.ast.node(id).value;
        let mut result = Type::unknown();

        if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            result.kind = TypeKind::String;
        } else if is_bool_literal(value) {
            result.kind = TypeKind::Bool;
        } else if is_number_literal(value) {
            result.kind = if is_float_literal(value) {
                TypeKind::Float
            } else {
                TypeKind::Integer
            };
        }

        self.assign_type(id, result);
        result
    }

    fn analyze_binary(&mut self, id: NodeId) -> Type {
        let node = self.ast.node(id);
        if node.children.len() < 2 {
            let result = Type::unknown();
            self.assign_type(id, result);
            return result;
        }

        let left = self.analyze_expression(node.children[0]);
        let right = self.analyze_expression(node.children[1]);
        let message = format!("type mismatch in '{}' expression", node.value);
        let result = self.unify_types(left, right, node.span, &message);
        self.assign_type(id, result);
        result
    }

    fn analyze_assignment(&mut self, id: NodeId) -> Type {
        let node = self.ast.node(id);
        if node.children.len() < 2 {
            let result = Type::unknown();
            self.assign_type(id, result);
            return result;
        }

        let lhs_id = node.children[0];
        let rhs_id = node.children[1];
        let mut left = self.analyze_expression(lhs_id);
        let right = self.analyze_expression(rhs_id);
        self.unify_types(left, right, node.span, "type mismatch in assignment");

        // Assignments through identifiers also refine the declared type.
        let lhs_node = self.ast.node(lhs_id);
        if lhs_node.kind == AstKind::IdentifierExpr {
            let decl_id = self.context.symbols().lookup(&lhs_node.value);
            if decl_id != UNRESOLVED_NODE {
                let decl_type = self.types.get(decl_id);
                let message = format!("assignment to '{}'", lhs_node.value);
                let unified = self.unify_types(decl_type, right, lhs_node.span, &message);
                self.types.set(decl_id, unified);
                self.assign_type(lhs_id, unified);
                left = unified;
            }
        }

        let result = pick_known(right, left);
        self.assign_type(id, result);
        result
    }

    fn analyze_unary(&mut self, id: NodeId) -> Type {
        let node = self.ast.node(id);
        let result = match node.children.first() {
            Some(&operand) => self.analyze_expression(operand),
            None => Type::unknown(),
        };
        self.assign_type(id, result);
        result
    }

    fn analyze_group(&mut self, id: NodeId) -> Type {
        let node = self.ast.node(id);
        let result = match node.children.first() {
            Some(&inner) => self.analyze_expression(inner),
            None => Type::unknown(),
        };
        self.assign_type(id, result);
        result
    }

    fn analyze_call(&mut self, id: NodeId) -> Type {
        let node = self.ast.node(id);
        if node.children.is_empty() {
            let result = Type::unknown();
            self.assign_type(id, result);
            return result;
        }

        let callee_id = node.children[0];
        let callee_type = self.analyze_expression(callee_id);

        let mut argument_types = Vec::with_capacity(node.children.len() - 1);
        for &arg in &node.children[1..] {
            argument_types.push(self.analyze_expression(arg));
        }

        let mut result = Type::unknown();
        if callee_type.kind == TypeKind::Function {
            if let Some(index) = self.context.functions().index_of_node(callee_type.reference) {
                let (expected, function_name) = match self.context.functions().get(index) {
                    Some(sig) => (sig.parameters.len(), sig.name.clone()),
                    None => (0, String::new()),
                };
                let provided = argument_types.len();
                if expected != provided {
                    self.reporter.report(
                        DiagCode::SemArgumentCountMismatch,
                        format!(
                            "expected {} argument(s) but got {} when calling '{}'",
                            expected, provided, function_name
                        ),
                        node.span,
                    );
                }

                let limit = expected.min(provided);
                for i in 0..limit {
                    let (param_name, param_node) = match self.context.functions().get(index) {
                        Some(sig) => {
                            let param = &sig.parameters[i];
                            (param.name.clone(), param.node_id)
                        }
                        None => break,
                    };
                    let param_type = self.types.get(param_node);
                    let arg_span = self.ast.node(node.children[1 + i]).span;
                    let message =
                        format!("argument type mismatch for parameter '{}'", param_name);
                    let unified =
                        self.unify_types(param_type, argument_types[i], arg_span, &message);
                    self.types.set(param_node, unified);
                    if let Some(entry) = self.context.functions_mut().get_mut(index) {
                        entry.parameters[i].ty = unified;
                    }
                }

                if let Some(sig) = self.context.functions().get(index) {
                    result = sig.return_type;
                }
            }
        }

        self.assign_type(id, result);
        result
    }

    fn declare_symbol(&mut self, name: &str, id: NodeId, span: Span) {
        if !self.context.symbols_mut().insert(name, id) {
            self.reporter.report(
                DiagCode::SemDuplicateSymbol,
                format!("duplicate symbol '{}'", name),
                span,
            );
        }
    }

    fn assign_type(&mut self, id: NodeId, ty: Type) {
        self.types.set(id, ty);
    }

    fn update_current_function_return(&mut self, return_type: Type, span: Span) {
        if self.function_stack.is_empty() {
            return;
        }

        if return_type.kind != TypeKind::Void {
            if let Some(active) = self.function_stack.last_mut() {
                active.saw_return = true;
            }
        }

        let active_signature = self.function_stack.last().and_then(|a| a.signature);

        // An unknown return resets inference so later returns do not unify
        // against stale information.
        if return_type.is_unknown() {
            if let Some(active) = self.function_stack.last_mut() {
                active.inferred_return = Type::unknown();
            }
            if let Some(index) = active_signature {
                if let Some(entry) = self.context.functions_mut().get_mut(index) {
                    entry.return_type = Type::unknown();
                }
            }
            return;
        }

        let mut conflict_message = String::from("conflicting return types");
        if let Some(index) = active_signature {
            if let Some(sig) = self.context.functions().get(index) {
                conflict_message.push_str(&format!(" in function '{}'", sig.name));
            }
        }

        let inferred = self
            .function_stack
            .last()
            .map(|a| a.inferred_return)
            .unwrap_or_default();
        let unified = self.unify_types(inferred, return_type, span, &conflict_message);

        if let Some(active) = self.function_stack.last_mut() {
            active.inferred_return = unified;
        }
        if let Some(index) = active_signature {
            if let Some(entry) = self.context.functions_mut().get_mut(index) {
                entry.return_type = unified;
            }
        }
    }

    fn unify_types(&mut self, lhs: Type, rhs: Type, span: Span, context: &str) -> Type {
        if lhs.is_unknown() {
            return rhs;
        }
        if rhs.is_unknown() {
            return lhs;
        }

        if lhs.kind == rhs.kind {
            if lhs.kind == TypeKind::Function && lhs.reference != rhs.reference {
                self.reporter
                    .report(DiagCode::SemTypeMismatch, context, span);
                return Type::unknown();
            }
            return lhs;
        }

        self.reporter
            .report(DiagCode::SemTypeMismatch, context, span);
        Type::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::lex;
    use crate::frontend::parser::parse_module;
    use crate::frontend::token::LexerConfig;

    struct Analysis {
        ast: AstContext,
        root: NodeId,
        reporter: DiagnosticReporter,
        types: TypeTable,
        context: SemanticContext,
    }

    fn analyze_source(source: &str) -> Analysis {
        let tokens = lex(source, LexerConfig::default());
        let mut ast = AstContext::new();
        let root = parse_module(&tokens, &mut ast).expect("parse failed");
        let mut reporter = DiagnosticReporter::new();
        let (types, context) = {
            let mut analyzer = SemanticAnalyzer::new(&ast, &mut reporter);
            analyzer.analyze(root);
            (analyzer.types().clone(), analyzer.context().clone())
        };
        Analysis { ast, root, reporter, types, context }
    }

    /// Build `fn add(x, y) { return 1; }` directly in an arena, the way the
    /// front-end would once function syntax lands.
    fn build_add_function(ast: &mut AstContext) -> NodeId {
        let span = Span::dummy();
        let name = ast.create_node(AstKind::IdentifierExpr, span, "add");
        let params = ast.create_node(AstKind::ArgumentList, span, "");
        let x = ast.create_node(AstKind::IdentifierExpr, span, "x");
        let y = ast.create_node(AstKind::IdentifierExpr, span, "y");
        ast.node_mut(params).children.extend([x, y]);

        let literal = ast.create_node(AstKind::LiteralExpr, span, "1");
        let ret = ast.create_node(AstKind::ReturnStmt, span, "");
        ast.node_mut(ret).children.push(literal);
        let body = ast.create_node(AstKind::BlockStmt, span, "");
        ast.node_mut(body).children.push(ret);

        let function = ast.create_node(AstKind::Function, span, "");
        ast.node_mut(function).children.extend([name, params, body]);
        function
    }

    #[test]
    fn test_duplicate_symbol_detection() {
        let analysis = analyze_source("let x = 1;\nlet x = 2;");
        let diagnostics = analysis.reporter.diagnostics();
        assert!(!diagnostics.is_empty());
        assert_eq!(diagnostics[0].code, DiagCode::SemDuplicateSymbol);
    }

    #[test]
    fn test_unknown_identifier_reports_error() {
        let analysis = analyze_source("return y;");
        let diagnostics = analysis.reporter.diagnostics();
        assert!(!diagnostics.is_empty());
        assert_eq!(diagnostics[0].code, DiagCode::SemUnknownIdentifier);
    }

    #[test]
    fn test_integer_type_inference() {
        let analysis = analyze_source("let x = 1;\nreturn x;");
        let module = analysis.ast.node(analysis.root);
        let let_stmt = analysis.ast.node(module.children[0]);
        assert_eq!(let_stmt.kind, AstKind::LetStmt);
        let ident = let_stmt.children[0];
        assert_eq!(analysis.types.get(ident).kind, TypeKind::Integer);
    }

    #[test]
    fn test_float_and_string_literals() {
        let analysis = analyze_source("let a = 1.5;\nlet b = \"hi\";\nlet c = true;");
        let module = analysis.ast.node(analysis.root);
        let a = analysis.ast.node(module.children[0]).children[0];
        let b = analysis.ast.node(module.children[1]).children[0];
        let c = analysis.ast.node(module.children[2]).children[0];
        assert_eq!(analysis.types.get(a).kind, TypeKind::Float);
        assert_eq!(analysis.types.get(b).kind, TypeKind::String);
        assert_eq!(analysis.types.get(c).kind, TypeKind::Bool);
    }

    #[test]
    fn test_binary_type_mismatch_produces_diagnostic() {
        let analysis = analyze_source("let x = \"hi\";\nlet y = x + 1;");
        let diagnostics = analysis.reporter.diagnostics();
        assert!(diagnostics
            .iter()
            .any(|d| d.code == DiagCode::SemTypeMismatch));
    }

    #[test]
    fn test_assignment_refines_declared_type() {
        let analysis = analyze_source("let x = 1;\nx = 2;");
        assert!(analysis.reporter.is_empty());
        let module = analysis.ast.node(analysis.root);
        let decl_ident = analysis.ast.node(module.children[0]).children[0];
        assert_eq!(analysis.types.get(decl_ident).kind, TypeKind::Integer);
    }

    #[test]
    fn test_function_signature_recording() {
        let mut ast = AstContext::new();
        let function = build_add_function(&mut ast);

        let mut reporter = DiagnosticReporter::new();
        let mut analyzer = SemanticAnalyzer::new(&ast, &mut reporter);
        analyzer.analyze(function);

        let name_id = ast.node(function).children[0];
        assert_eq!(analyzer.types().get(name_id).kind, TypeKind::Function);
        assert_eq!(analyzer.types().get(name_id).reference, function);

        let signature = analyzer
            .context()
            .functions()
            .lookup_name("add")
            .expect("signature recorded");
        assert_eq!(signature.parameters.len(), 2);
        assert_eq!(signature.parameters[0].name, "x");
        assert_eq!(signature.parameters[1].name, "y");
        assert_eq!(signature.return_type.kind, TypeKind::Integer);

        let by_node = analyzer
            .context()
            .functions()
            .lookup_node(function)
            .expect("lookup by node id");
        assert_eq!(by_node.name, "add");

        assert_eq!(analyzer.context().symbols().lookup("add"), name_id);
    }

    #[test]
    fn test_call_expression_infers_return_type() {
        let mut ast = AstContext::new();
        let span = Span::dummy();
        let function = build_add_function(&mut ast);

        let callee = ast.create_node(AstKind::IdentifierExpr, span, "add");
        let arg_a = ast.create_node(AstKind::LiteralExpr, span, "1");
        let arg_b = ast.create_node(AstKind::LiteralExpr, span, "2");
        let call = ast.create_node(AstKind::CallExpr, span, "");
        ast.node_mut(call).children.extend([callee, arg_a, arg_b]);
        let stmt = ast.create_node(AstKind::ExpressionStmt, span, "");
        ast.node_mut(stmt).children.push(call);

        let block = ast.create_node(AstKind::BlockStmt, span, "");
        ast.node_mut(block).children.extend([function, stmt]);

        let mut reporter = DiagnosticReporter::new();
        let mut analyzer = SemanticAnalyzer::new(&ast, &mut reporter);
        analyzer.analyze(block);

        assert_eq!(analyzer.types().get(call).kind, TypeKind::Integer);
        assert_eq!(analyzer.types().get(callee).kind, TypeKind::Function);
        assert_eq!(analyzer.types().get(callee).reference, function);
        assert_eq!(analyzer.types().get(stmt).kind, TypeKind::Integer);

        // Arguments refined the parameter types through the registry.
        let signature = analyzer.context().functions().lookup_name("add").unwrap();
        assert_eq!(signature.parameters[0].ty.kind, TypeKind::Integer);
        assert_eq!(signature.parameters[1].ty.kind, TypeKind::Integer);
        drop(analyzer);
        assert!(reporter.is_empty(), "diagnostics: {:?}", reporter.diagnostics());
    }

    #[test]
    fn test_call_arity_mismatch() {
        let mut ast = AstContext::new();
        let span = Span::dummy();
        let function = build_add_function(&mut ast);

        let callee = ast.create_node(AstKind::IdentifierExpr, span, "add");
        let arg = ast.create_node(AstKind::LiteralExpr, span, "1");
        let call = ast.create_node(AstKind::CallExpr, span, "");
        ast.node_mut(call).children.extend([callee, arg]);
        let stmt = ast.create_node(AstKind::ExpressionStmt, span, "");
        ast.node_mut(stmt).children.push(call);

        let block = ast.create_node(AstKind::BlockStmt, span, "");
        ast.node_mut(block).children.extend([function, stmt]);

        let mut reporter = DiagnosticReporter::new();
        let mut analyzer = SemanticAnalyzer::new(&ast, &mut reporter);
        analyzer.analyze(block);

        assert!(reporter
            .diagnostics()
            .iter()
            .any(|d| d.code == DiagCode::SemArgumentCountMismatch));
    }

    #[test]
    fn test_conflicting_return_types_report_error() {
        let mut ast = AstContext::new();
        let span = Span::dummy();
        let name = ast.create_node(AstKind::IdentifierExpr, span, "mix");

        let int_literal = ast.create_node(AstKind::LiteralExpr, span, "1");
        let first_return = ast.create_node(AstKind::ReturnStmt, span, "");
        ast.node_mut(first_return).children.push(int_literal);

        let str_literal = ast.create_node(AstKind::LiteralExpr, span, "\"two\"");
        let second_return = ast.create_node(AstKind::ReturnStmt, span, "");
        ast.node_mut(second_return).children.push(str_literal);

        let body = ast.create_node(AstKind::BlockStmt, span, "");
        ast.node_mut(body).children.extend([first_return, second_return]);

        let function = ast.create_node(AstKind::Function, span, "");
        ast.node_mut(function).children.extend([name, body]);

        let mut reporter = DiagnosticReporter::new();
        let mut analyzer = SemanticAnalyzer::new(&ast, &mut reporter);
        analyzer.analyze(function);

        let signature = analyzer.context().functions().lookup_name("mix").unwrap();
        assert_eq!(signature.return_type.kind, TypeKind::Unknown);

        assert!(!reporter.is_empty());
        assert_eq!(reporter.diagnostics()[0].code, DiagCode::SemTypeMismatch);
    }

    #[test]
    fn test_void_return_inference_without_return() {
        let mut ast = AstContext::new();
        let span = Span::dummy();
        let name = ast.create_node(AstKind::IdentifierExpr, span, "noop");
        let body = ast.create_node(AstKind::BlockStmt, span, "");
        let function = ast.create_node(AstKind::Function, span, "");
        ast.node_mut(function).children.extend([name, body]);

        let mut reporter = DiagnosticReporter::new();
        let mut analyzer = SemanticAnalyzer::new(&ast, &mut reporter);
        analyzer.analyze(function);

        let signature = analyzer.context().functions().lookup_name("noop").unwrap();
        assert_eq!(signature.return_type.kind, TypeKind::Void);
    }

    #[test]
    fn test_unification_commutes_up_to_span() {
        let forward = analyze_source("let s = \"hi\";\nlet n = 1;\ns + n;");
        let backward = analyze_source("let s = \"hi\";\nlet n = 1;\nn + s;");
        let forward_codes: Vec<_> = forward.reporter.diagnostics().iter().map(|d| d.code).collect();
        let backward_codes: Vec<_> =
            backward.reporter.diagnostics().iter().map(|d| d.code).collect();
        assert_eq!(forward_codes, backward_codes);
    }

    #[test]
    fn test_diagnostic_spans_within_root() {
        let analysis = analyze_source("let x = 1;\nlet x = \"a\" + 2;\nreturn missing;");
        let root_span = analysis.ast.node(analysis.root).span;
        assert!(!analysis.reporter.is_empty());
        for diag in analysis.reporter.diagnostics() {
            assert!(root_span.contains(&diag.span), "span {} outside {}", diag.span, root_span);
        }
    }

    #[test]
    fn test_shadowing_across_scopes_is_allowed() {
        let analysis = analyze_source("let x = 1;\n{ let x = \"inner\"; }\nreturn x;");
        assert!(analysis.reporter.is_empty());
        assert_eq!(analysis.context.symbols().depth(), 1);
    }
}
