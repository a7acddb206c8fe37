//! Lowering from the semantic view to the IR.
//!
//! The current lowering projects the function registry into an IR module:
//! every signature becomes a typed [`IRFunction`] shell in declaration
//! order. Bodies are filled in by later IR builders or backend heuristics.

use crate::frontend::semantic::SemanticAnalyzer;
use crate::frontend::types::{Type, TypeKind};
use crate::ir::module::{IRFunction, IRModule, IRParameter};
use crate::ir::types::IRType;

fn map_type(ty: &Type) -> IRType {
    match ty.kind {
        TypeKind::Void => IRType::Void,
        TypeKind::Integer => IRType::I64,
        TypeKind::Float => IRType::F64,
        TypeKind::Bool => IRType::Bool,
        TypeKind::String => IRType::String,
        TypeKind::Function => IRType::generic("fn"),
        TypeKind::Unknown => IRType::Void,
    }
}

/// Lower the analyzed program into an IR module skeleton.
pub fn lower_module(analyzer: &SemanticAnalyzer<'_>, module_name: impl Into<String>) -> IRModule {
    let mut module = IRModule::new(module_name);

    for signature in analyzer.context().functions().entries() {
        let mut function = IRFunction::new(signature.name.clone(), map_type(&signature.return_type));
        function.parameters = signature
            .parameters
            .iter()
            .map(|param| IRParameter {
                name: param.name.clone(),
                ty: map_type(&param.ty),
            })
            .collect();
        module.add_function(function);
    }

    module
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ast::{AstContext, AstKind, NodeId};
    use crate::utils::diagnostics::DiagnosticReporter;
    use crate::utils::span::Span;

    fn build_function(ast: &mut AstContext, name: &str, params: &[&str], literal: &str) -> NodeId {
        let span = Span::dummy();
        let name_id = ast.create_node(AstKind::IdentifierExpr, span, name);
        let param_list = ast.create_node(AstKind::ArgumentList, span, "");
        for &param in params {
            let param_id = ast.create_node(AstKind::IdentifierExpr, span, param);
            ast.node_mut(param_list).children.push(param_id);
        }

        let value = ast.create_node(AstKind::LiteralExpr, span, literal);
        let ret = ast.create_node(AstKind::ReturnStmt, span, "");
        ast.node_mut(ret).children.push(value);
        let body = ast.create_node(AstKind::BlockStmt, span, "");
        ast.node_mut(body).children.push(ret);

        let function = ast.create_node(AstKind::Function, span, "");
        ast.node_mut(function)
            .children
            .extend([name_id, param_list, body]);
        function
    }

    #[test]
    fn test_lowering_is_total_on_registry() {
        let mut ast = AstContext::new();
        let span = Span::dummy();
        let first = build_function(&mut ast, "first", &["a"], "1");
        let second = build_function(&mut ast, "second", &[], "2.5");
        let block = ast.create_node(AstKind::BlockStmt, span, "");
        ast.node_mut(block).children.extend([first, second]);

        let mut reporter = DiagnosticReporter::new();
        let mut analyzer = SemanticAnalyzer::new(&ast, &mut reporter);
        analyzer.analyze(block);

        let module = lower_module(&analyzer, "demo");
        assert_eq!(module.functions.len(), analyzer.context().functions().len());
        assert_eq!(module.name, "demo");
    }

    #[test]
    fn test_type_mapping() {
        let mut ast = AstContext::new();
        let span = Span::dummy();
        let int_fn = build_function(&mut ast, "int_fn", &[], "1");
        let float_fn = build_function(&mut ast, "float_fn", &[], "2.5");
        let str_fn = build_function(&mut ast, "str_fn", &[], "\"s\"");
        let block = ast.create_node(AstKind::BlockStmt, span, "");
        ast.node_mut(block).children.extend([int_fn, float_fn, str_fn]);

        let mut reporter = DiagnosticReporter::new();
        let mut analyzer = SemanticAnalyzer::new(&ast, &mut reporter);
        analyzer.analyze(block);

        let module = lower_module(&analyzer, "demo");
        let by_name: std::collections::HashMap<_, _> = module
            .functions
            .iter()
            .map(|f| (f.name.as_str(), f.return_type.clone()))
            .collect();
        assert_eq!(by_name["int_fn"], IRType::I64);
        assert_eq!(by_name["float_fn"], IRType::F64);
        assert_eq!(by_name["str_fn"], IRType::String);
    }

    #[test]
    fn test_unknown_parameter_maps_to_void() {
        let mut ast = AstContext::new();
        let function = build_function(&mut ast, "f", &["p"], "1");

        let mut reporter = DiagnosticReporter::new();
        let mut analyzer = SemanticAnalyzer::new(&ast, &mut reporter);
        analyzer.analyze(function);

        let module = lower_module(&analyzer, "demo");
        assert_eq!(module.functions[0].parameters.len(), 1);
        assert_eq!(module.functions[0].parameters[0].ty, IRType::Void);
    }
}
