//! Constant folding over IR function bodies.

use crate::ir::module::{IRModule, IRValue};
use crate::opt::Pass;
use std::collections::HashMap;

fn parse_literal(inst: &IRValue) -> Option<i64> {
    inst.operands.first()?.parse().ok()
}

/// Folds integer constant expressions in a single forward pass per function.
///
/// Arithmetic wraps per two's complement; division by zero and non-integer
/// operands are left unfolded.
#[derive(Debug, Default)]
pub struct ConstantFoldingPass;

impl ConstantFoldingPass {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl Pass for ConstantFoldingPass {
    fn run(&mut self, module: &mut IRModule) {
        for function in &mut module.functions {
            let mut constants: HashMap<String, i64> = HashMap::new();

            for inst in &mut function.instructions {
                if inst.is_constant {
                    constants.insert(inst.result.clone(), inst.constant_value);
                    continue;
                }

                if inst.op == "const" {
                    if let Some(literal) = parse_literal(inst) {
                        inst.make_constant(literal);
                        constants.insert(inst.result.clone(), literal);
                    }
                    continue;
                }

                if inst.operands.len() != 2 {
                    continue;
                }

                let lhs = match constants.get(&inst.operands[0]) {
                    Some(&value) => value,
                    None => continue,
                };
                let rhs = match constants.get(&inst.operands[1]) {
                    Some(&value) => value,
                    None => continue,
                };

                let folded = match inst.op.as_str() {
                    "add" => lhs.wrapping_add(rhs),
                    "sub" => lhs.wrapping_sub(rhs),
                    "mul" => lhs.wrapping_mul(rhs),
                    "div" if rhs != 0 => lhs.wrapping_div(rhs),
                    _ => continue,
                };

                inst.make_constant(folded);
                constants.insert(inst.result.clone(), folded);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::module::IRFunction;
    use crate::ir::printer::print_module;
    use crate::ir::types::IRType;

    fn build_sample_module() -> IRModule {
        let mut module = IRModule::new("demo");
        let function = module.add_function(IRFunction::new("main", IRType::Void));
        function.add_instruction(IRValue::new("c1", "const", vec!["2".to_string()]));
        function.add_instruction(IRValue::new("c2", "const", vec!["3".to_string()]));
        function.add_instruction(IRValue::new(
            "sum",
            "add",
            vec!["c1".to_string(), "c2".to_string()],
        ));
        module
    }

    #[test]
    fn test_folds_add_through_const_chain() {
        let mut module = build_sample_module();
        ConstantFoldingPass::new().run(&mut module);

        let instructions = &module.functions[0].instructions;
        assert!(instructions[0].is_constant);
        assert_eq!(instructions[0].constant_value, 2);
        assert!(instructions[2].is_constant);
        assert_eq!(instructions[2].constant_value, 5);

        let printed = print_module(&module);
        assert!(printed.contains("sum = const 5"));
    }

    #[test]
    fn test_folding_is_idempotent() {
        let mut module = build_sample_module();
        ConstantFoldingPass::new().run(&mut module);
        let once = module.clone();
        ConstantFoldingPass::new().run(&mut module);
        assert_eq!(module, once);
    }

    #[test]
    fn test_division_by_zero_is_skipped() {
        let mut module = IRModule::new("demo");
        let function = module.add_function(IRFunction::new("main", IRType::Void));
        function.add_instruction(IRValue::new("a", "const", vec!["1".to_string()]));
        function.add_instruction(IRValue::new("z", "const", vec!["0".to_string()]));
        function.add_instruction(IRValue::new(
            "q",
            "div",
            vec!["a".to_string(), "z".to_string()],
        ));

        ConstantFoldingPass::new().run(&mut module);
        let q = &module.functions[0].instructions[2];
        assert!(!q.is_constant);
        assert_eq!(q.op, "div");
    }

    #[test]
    fn test_non_integer_literal_is_skipped() {
        let mut module = IRModule::new("demo");
        let function = module.add_function(IRFunction::new("main", IRType::Void));
        function.add_instruction(IRValue::new("s", "const", vec!["hello".to_string()]));

        ConstantFoldingPass::new().run(&mut module);
        let s = &module.functions[0].instructions[0];
        assert!(!s.is_constant);
        assert_eq!(s.operands, vec!["hello".to_string()]);
    }

    #[test]
    fn test_unknown_operands_are_skipped() {
        let mut module = IRModule::new("demo");
        let function = module.add_function(IRFunction::new("main", IRType::Void));
        function.add_instruction(IRValue::new(
            "sum",
            "add",
            vec!["a".to_string(), "b".to_string()],
        ));

        ConstantFoldingPass::new().run(&mut module);
        assert!(!module.functions[0].instructions[0].is_constant);
    }

    #[test]
    fn test_overflow_wraps() {
        let mut module = IRModule::new("demo");
        let function = module.add_function(IRFunction::new("main", IRType::Void));
        function.add_instruction(IRValue::new("max", "const", vec![i64::MAX.to_string()]));
        function.add_instruction(IRValue::new("one", "const", vec!["1".to_string()]));
        function.add_instruction(IRValue::new(
            "wrapped",
            "add",
            vec!["max".to_string(), "one".to_string()],
        ));

        ConstantFoldingPass::new().run(&mut module);
        let wrapped = &module.functions[0].instructions[2];
        assert!(wrapped.is_constant);
        assert_eq!(wrapped.constant_value, i64::MIN);
    }

    #[test]
    fn test_other_ops_left_intact() {
        let mut module = IRModule::new("demo");
        let function = module.add_function(IRFunction::new("main", IRType::Void));
        function.add_instruction(IRValue::new("a", "const", vec!["4".to_string()]));
        function.add_instruction(IRValue::new("b", "const", vec!["3".to_string()]));
        function.add_instruction(IRValue::new(
            "m",
            "mod",
            vec!["a".to_string(), "b".to_string()],
        ));

        ConstantFoldingPass::new().run(&mut module);
        assert!(!module.functions[0].instructions[2].is_constant);
    }
}
