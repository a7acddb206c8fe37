//! Deterministic textual dump of an IR module.

use crate::ir::module::IRModule;
use crate::utils::pretty::SourceWriter;

/// Print the module as stable, line-oriented text.
///
/// Constant instructions print as `result = const N;`, everything else as
/// `result = op a, b;`.
pub fn print_module(module: &IRModule) -> String {
    let mut out = SourceWriter::generated();

    for function in &module.functions {
        out.open(&format!("function {} {{", function.name));
        for inst in &function.instructions {
            let mut line = format!("{} = ", inst.result);
            if inst.is_constant {
                line.push_str(&format!("const {}", inst.constant_value));
            } else {
                line.push_str(&inst.op);
                if !inst.operands.is_empty() {
                    line.push(' ');
                    line.push_str(&inst.operands.join(", "));
                }
            }
            line.push(';');
            out.line(&line);
        }
        out.close("}");
    }

    out.finish()
}
