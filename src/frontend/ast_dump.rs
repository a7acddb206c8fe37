//! Textual and JSON dumps of the AST.
//!
//! The text form is line-per-node with two-space indentation and is stable
//! enough for golden tests; the JSON form mirrors the node records for
//! external tooling.

use crate::frontend::ast::{AstContext, NodeId};
use serde_json::{json, Value};

/// Options controlling what the dumps include.
#[derive(Debug, Clone, Copy)]
pub struct AstDumpOptions {
    /// Include node ids
    pub include_ids: bool,
    /// Include source spans
    pub include_spans: bool,
}

impl Default for AstDumpOptions {
    fn default() -> Self {
        Self {
            include_ids: true,
            include_spans: true,
        }
    }
}

fn escape_text(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            _ => result.push(ch),
        }
    }
    result
}

fn dump_text_impl(
    context: &AstContext,
    id: NodeId,
    options: &AstDumpOptions,
    out: &mut String,
    depth: usize,
) {
    let node = context.node(id);
    out.push_str(&"  ".repeat(depth));
    out.push_str(node.kind.name());

    if options.include_ids {
        out.push('#');
        out.push_str(&node.id.to_string());
    }

    if !node.value.is_empty() {
        out.push_str(" value=\"");
        out.push_str(&escape_text(&node.value));
        out.push('"');
    }

    if options.include_spans {
        out.push_str(&format!(" span={}", node.span));
    }

    out.push('\n');

    for &child in &node.children {
        dump_text_impl(context, child, options, out, depth + 1);
    }
}

fn dump_json_impl(context: &AstContext, id: NodeId, options: &AstDumpOptions) -> Value {
    let node = context.node(id);
    let mut object = serde_json::Map::new();

    if options.include_ids {
        object.insert("id".to_string(), json!(node.id));
    }
    object.insert("kind".to_string(), json!(node.kind.name()));
    if options.include_spans {
        object.insert(
            "span".to_string(),
            json!({"start": node.span.start, "end": node.span.end}),
        );
    }
    object.insert("value".to_string(), json!(node.value));
    object.insert(
        "children".to_string(),
        Value::Array(
            node.children
                .iter()
                .map(|&child| dump_json_impl(context, child, options))
                .collect(),
        ),
    );

    Value::Object(object)
}

/// Render the subtree rooted at `root` as indented text.
pub fn dump_ast_text(context: &AstContext, root: NodeId, options: &AstDumpOptions) -> String {
    let mut output = String::new();
    dump_text_impl(context, root, options, &mut output, 0);
    output
}

/// Render the subtree rooted at `root` as pretty-printed JSON.
pub fn dump_ast_json(context: &AstContext, root: NodeId, options: &AstDumpOptions) -> String {
    let value = dump_json_impl(context, root, options);
    let mut output = serde_json::to_string_pretty(&value).unwrap_or_default();
    output.push('\n');
    output
}
