//! The linear intermediate representation.
//!
//! An [`IRModule`] owns structs and functions in declaration order; function
//! bodies are flat lists of three-address [`IRValue`] instructions.

use crate::ir::types::IRType;
use serde::{Deserialize, Serialize};

/// A three-address instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IRValue {
    /// Result name; empty when the instruction produces no value
    pub result: String,
    /// Opcode (`const`, `add`, `call`, `ret`, ...)
    pub op: String,
    /// Operand names, in order
    pub operands: Vec<String>,
    /// Whether the instruction has been resolved to a constant
    pub is_constant: bool,
    /// Constant payload, valid when `is_constant` is set
    pub constant_value: i64,
}

impl IRValue {
    /// Create an instruction with a result name, opcode, and operands.
    pub fn new(
        result: impl Into<String>,
        op: impl Into<String>,
        operands: Vec<String>,
    ) -> Self {
        Self {
            result: result.into(),
            op: op.into(),
            operands,
            is_constant: false,
            constant_value: 0,
        }
    }

    /// Rewrite this instruction into a resolved constant in place.
    pub fn make_constant(&mut self, value: i64) {
        self.op = "const".to_string();
        self.operands.clear();
        self.is_constant = true;
        self.constant_value = value;
    }
}

/// A function parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IRParameter {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: IRType,
}

/// A struct field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IRField {
    /// Field name
    pub name: String,
    /// Field type
    pub ty: IRType,
}

/// A struct definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IRStruct {
    /// Struct name
    pub name: String,
    /// Template parameter names, in order
    pub template_params: Vec<String>,
    /// Fields, in order
    pub fields: Vec<IRField>,
    /// Whether the struct is part of the public surface
    pub is_public: bool,
}

impl IRStruct {
    /// Create a struct definition.
    pub fn new(
        name: impl Into<String>,
        fields: Vec<IRField>,
        template_params: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            template_params,
            fields,
            is_public: true,
        }
    }
}

/// A function definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IRFunction {
    /// Function name
    pub name: String,
    /// Return type
    pub return_type: IRType,
    /// Template parameter names, in order
    pub template_params: Vec<String>,
    /// Parameters, in order
    pub parameters: Vec<IRParameter>,
    /// Body instructions, in order
    pub instructions: Vec<IRValue>,
}

impl IRFunction {
    /// Create a function with an empty body.
    pub fn new(name: impl Into<String>, return_type: IRType) -> Self {
        Self {
            name: name.into(),
            return_type,
            template_params: Vec::new(),
            parameters: Vec::new(),
            instructions: Vec::new(),
        }
    }

    /// Append an instruction and return a handle to it.
    pub fn add_instruction(&mut self, value: IRValue) -> &mut IRValue {
        let index = self.instructions.len();
        self.instructions.push(value);
        &mut self.instructions[index]
    }
}

/// A named container of structs and functions, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IRModule {
    /// Module name
    pub name: String,
    /// Structs, in declaration order
    pub structs: Vec<IRStruct>,
    /// Functions, in declaration order
    pub functions: Vec<IRFunction>,
}

impl IRModule {
    /// Create an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            structs: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Append a struct and return a handle to it.
    pub fn add_struct(&mut self, value: IRStruct) -> &mut IRStruct {
        let index = self.structs.len();
        self.structs.push(value);
        &mut self.structs[index]
    }

    /// Append a function and return a handle to it.
    pub fn add_function(&mut self, function: IRFunction) -> &mut IRFunction {
        let index = self.functions.len();
        self.functions.push(function);
        &mut self.functions[index]
    }
}
