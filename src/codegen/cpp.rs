//! C++ emission backend.
//!
//! Emits one header and one source file per module: structs and forward
//! declarations in the header, function definitions translated from the IR
//! instruction stream in the source. Output is deterministic and
//! whitespace-stable so golden-file tests stay meaningful.

use crate::codegen::{Backend, GeneratedFile, TargetProfile};
use crate::ir::module::{IRFunction, IRModule, IRParameter, IRStruct, IRValue};
use crate::ir::types::IRType;
use crate::utils::pretty::SourceWriter;
use std::collections::BTreeSet;

/// Options for the C++ backend.
#[derive(Debug, Clone)]
pub struct CppBackendOptions {
    /// Namespace wrapped around all declarations; empty disables it
    pub namespace_name: String,
    /// Suffix of the emitted header file
    pub header_suffix: String,
    /// Suffix of the emitted source file
    pub source_suffix: String,
    /// Whether to emit the header file
    pub emit_header: bool,
    /// Whether to emit the source file
    pub emit_source: bool,
}

impl Default for CppBackendOptions {
    fn default() -> Self {
        Self {
            namespace_name: "istudio::generated".to_string(),
            header_suffix: ".hpp".to_string(),
            source_suffix: ".cpp".to_string(),
            emit_header: true,
            emit_source: true,
        }
    }
}

fn sanitize_for_filename(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
        } else if !result.is_empty() && !result.ends_with('_') {
            result.push('_');
        }
    }
    let trimmed = result.trim_matches('_');
    if trimmed.is_empty() {
        "module".to_string()
    } else {
        trimmed.to_string()
    }
}

struct CppEmitter<'a> {
    module: &'a IRModule,
    options: &'a CppBackendOptions,
    header_includes: BTreeSet<&'static str>,
    header_filename: String,
    source_filename: String,
}

impl<'a> CppEmitter<'a> {
    fn new(module: &'a IRModule, options: &'a CppBackendOptions) -> Self {
        let sanitized = sanitize_for_filename(&module.name);
        let header_filename = format!("{}{}", sanitized, options.header_suffix);
        let source_filename = format!("{}{}", sanitized, options.source_suffix);
        Self {
            module,
            options,
            header_includes: BTreeSet::new(),
            header_filename,
            source_filename,
        }
    }

    fn emit(mut self) -> Vec<GeneratedFile> {
        self.collect_includes();

        let mut files = Vec::new();
        if self.options.emit_header {
            files.push(GeneratedFile {
                path: self.header_filename.clone(),
                contents: self.build_header(),
            });
        }
        if self.options.emit_source {
            files.push(GeneratedFile {
                path: self.source_filename.clone(),
                contents: self.build_source(),
            });
        }
        files
    }

    fn collect_includes_for_type(&mut self, ty: &IRType) {
        match ty {
            IRType::I32 | IRType::I64 => {
                self.header_includes.insert("<cstdint>");
            }
            IRType::String => {
                self.header_includes.insert("<string>");
            }
            IRType::Struct { type_args, .. } => {
                for arg in type_args {
                    self.collect_includes_for_type(arg);
                }
            }
            IRType::Generic(_) | IRType::F32 | IRType::F64 | IRType::Bool | IRType::Void => {}
        }
    }

    fn collect_includes(&mut self) {
        let module = self.module;
        for record in &module.structs {
            for field in &record.fields {
                self.collect_includes_for_type(&field.ty);
            }
        }
        for function in &module.functions {
            self.collect_includes_for_type(&function.return_type);
            for param in &function.parameters {
                self.collect_includes_for_type(&param.ty);
            }
        }
    }

    fn type_to_string(&self, ty: &IRType) -> String {
        match ty {
            IRType::Void => "void".to_string(),
            IRType::I32 => "std::int32_t".to_string(),
            IRType::I64 => "std::int64_t".to_string(),
            IRType::F32 => "float".to_string(),
            IRType::F64 => "double".to_string(),
            IRType::Bool => "bool".to_string(),
            IRType::String => "std::string".to_string(),
            IRType::Generic(name) => name.clone(),
            IRType::Struct { name, type_args } => {
                if type_args.is_empty() {
                    name.clone()
                } else {
                    let args: Vec<String> =
                        type_args.iter().map(|arg| self.type_to_string(arg)).collect();
                    format!("{}<{}>", name, args.join(", "))
                }
            }
        }
    }

    fn template_header(params: &[String]) -> String {
        let typed: Vec<String> = params.iter().map(|p| format!("typename {}", p)).collect();
        format!("template <{}>", typed.join(", "))
    }

    fn format_parameter_list(&self, params: &[IRParameter]) -> String {
        let rendered: Vec<String> = params
            .iter()
            .map(|param| format!("{} {}", self.type_to_string(&param.ty), param.name))
            .collect();
        rendered.join(", ")
    }

    // Namespace contents stay flush, so these never touch the block depth.
    fn open_namespace(&self, out: &mut SourceWriter) {
        if !self.options.namespace_name.is_empty() {
            out.line(&format!("namespace {} {{", self.options.namespace_name));
            out.blank();
        }
    }

    fn close_namespace(&self, out: &mut SourceWriter) {
        if !self.options.namespace_name.is_empty() {
            out.line(&format!("}}  // namespace {}", self.options.namespace_name));
        }
    }

    fn emit_struct(&self, record: &IRStruct, out: &mut SourceWriter) {
        if !record.template_params.is_empty() {
            out.line(&Self::template_header(&record.template_params));
        }
        if !record.is_public {
            out.line("// internal");
        }
        out.open(&format!("struct {} {{", record.name));
        for field in &record.fields {
            out.line(&format!("{} {};", self.type_to_string(&field.ty), field.name));
        }
        out.close("};");
        out.blank();
    }

    fn emit_function_declaration(&self, function: &IRFunction, out: &mut SourceWriter) {
        if !function.template_params.is_empty() {
            out.line(&Self::template_header(&function.template_params));
        }
        out.line(&format!(
            "{} {}({});",
            self.type_to_string(&function.return_type),
            function.name,
            self.format_parameter_list(&function.parameters)
        ));
        out.blank();
    }

    fn emit_binary_op(inst: &IRValue, symbol: &str) -> String {
        if inst.operands.len() != 2 {
            return format!("// unsupported operand count for '{}'", inst.op);
        }
        let mut line = String::new();
        if !inst.result.is_empty() {
            line.push_str(&format!("auto {} = ", inst.result));
        }
        line.push_str(&format!(
            "{} {} {};",
            inst.operands[0], symbol, inst.operands[1]
        ));
        line
    }

    fn translate_instructions(function: &IRFunction) -> Vec<String> {
        let mut lines = Vec::with_capacity(function.instructions.len());

        for inst in &function.instructions {
            if inst.is_constant {
                if inst.result.is_empty() {
                    lines.push("// constant value discarded (no target)".to_string());
                } else {
                    lines.push(format!("auto {} = {};", inst.result, inst.constant_value));
                }
                continue;
            }

            match inst.op.as_str() {
                "ret" | "return" => {
                    if inst.operands.is_empty() {
                        lines.push("return;".to_string());
                    } else {
                        lines.push(format!("return {};", inst.operands[0]));
                    }
                }
                "const" => {
                    if inst.operands.is_empty() {
                        lines.push("// const missing operand".to_string());
                    } else if inst.result.is_empty() {
                        lines.push(format!("{};", inst.operands[0]));
                    } else {
                        lines.push(format!("auto {} = {};", inst.result, inst.operands[0]));
                    }
                }
                "add" => lines.push(Self::emit_binary_op(inst, "+")),
                "sub" => lines.push(Self::emit_binary_op(inst, "-")),
                "mul" => lines.push(Self::emit_binary_op(inst, "*")),
                "div" => lines.push(Self::emit_binary_op(inst, "/")),
                "mod" => lines.push(Self::emit_binary_op(inst, "%")),
                "neg" => {
                    if inst.operands.len() != 1 {
                        lines.push("// neg expects one operand".to_string());
                    } else if inst.result.is_empty() {
                        lines.push(format!("-{};", inst.operands[0]));
                    } else {
                        lines.push(format!("auto {} = -{};", inst.result, inst.operands[0]));
                    }
                }
                "call" => {
                    if inst.operands.is_empty() {
                        lines.push("// call missing callee".to_string());
                        continue;
                    }
                    let mut line = String::new();
                    if !inst.result.is_empty() {
                        line.push_str(&format!("auto {} = ", inst.result));
                    }
                    line.push_str(&format!(
                        "{}({});",
                        inst.operands[0],
                        inst.operands[1..].join(", ")
                    ));
                    lines.push(line);
                }
                other => lines.push(format!("// unsupported op '{}'", other)),
            }
        }

        if lines.is_empty() {
            lines.push("// TODO: provide implementation".to_string());
        }

        lines
    }

    fn emit_function_definition(&self, function: &IRFunction, out: &mut SourceWriter) {
        if !function.template_params.is_empty() {
            out.line(&Self::template_header(&function.template_params));
        }
        out.open(&format!(
            "{} {}({}) {{",
            self.type_to_string(&function.return_type),
            function.name,
            self.format_parameter_list(&function.parameters)
        ));
        for line in Self::translate_instructions(function) {
            out.line(&line);
        }
        out.close("}");
        out.blank();
    }

    fn build_header(&self) -> String {
        let mut out = SourceWriter::generated();

        out.line("#pragma once");
        out.blank();
        if !self.header_includes.is_empty() {
            for include in &self.header_includes {
                out.line(&format!("#include {}", include));
            }
            out.blank();
        }

        self.open_namespace(&mut out);
        for record in &self.module.structs {
            self.emit_struct(record, &mut out);
        }
        for function in &self.module.functions {
            self.emit_function_declaration(function, &mut out);
        }
        self.close_namespace(&mut out);
        out.finish()
    }

    fn build_source(&self) -> String {
        let mut out = SourceWriter::generated();

        if self.options.emit_header {
            out.line(&format!("#include \"{}\"", self.header_filename));
        } else {
            for include in &self.header_includes {
                out.line(&format!("#include {}", include));
            }
        }
        out.blank();

        self.open_namespace(&mut out);
        for function in &self.module.functions {
            self.emit_function_definition(function, &mut out);
        }
        self.close_namespace(&mut out);
        out.finish()
    }
}

/// The C++ backend.
#[derive(Debug, Default)]
pub struct CppBackend {
    options: CppBackendOptions,
}

impl CppBackend {
    /// Create a backend with the given options.
    pub fn new(options: CppBackendOptions) -> Self {
        Self { options }
    }
}

impl Backend for CppBackend {
    fn name(&self) -> &'static str {
        "cpp"
    }

    fn emit(&self, module: &IRModule, _profile: &TargetProfile) -> Vec<GeneratedFile> {
        CppEmitter::new(module, &self.options).emit()
    }
}
