//! IR-level types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A type in the intermediate representation.
///
/// Equality is structural, including struct names and type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IRType {
    /// No value
    Void,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
    /// Boolean
    Bool,
    /// String
    String,
    /// Named aggregate with optional type arguments
    Struct {
        /// Struct name
        name: String,
        /// Type arguments, in order
        type_args: Vec<IRType>,
    },
    /// Named generic placeholder
    Generic(String),
}

impl IRType {
    /// Create a struct type.
    pub fn named_struct(name: impl Into<String>, type_args: Vec<IRType>) -> Self {
        IRType::Struct {
            name: name.into(),
            type_args,
        }
    }

    /// Create a generic placeholder type.
    pub fn generic(name: impl Into<String>) -> Self {
        IRType::Generic(name.into())
    }

    /// Check if this is a struct type.
    pub fn is_struct(&self) -> bool {
        matches!(self, IRType::Struct { .. })
    }

    /// Check if this is a generic placeholder.
    pub fn is_generic(&self) -> bool {
        matches!(self, IRType::Generic(_))
    }

    /// Check if this is one of the built-in scalar types.
    pub fn is_builtin(&self) -> bool {
        matches!(
            self,
            IRType::Void
                | IRType::I32
                | IRType::I64
                | IRType::F32
                | IRType::F64
                | IRType::Bool
                | IRType::String
        )
    }
}

impl Default for IRType {
    fn default() -> Self {
        IRType::Void
    }
}

impl fmt::Display for IRType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IRType::Void => write!(f, "void"),
            IRType::I32 => write!(f, "i32"),
            IRType::I64 => write!(f, "i64"),
            IRType::F32 => write!(f, "f32"),
            IRType::F64 => write!(f, "f64"),
            IRType::Bool => write!(f, "bool"),
            IRType::String => write!(f, "string"),
            IRType::Struct { name, type_args } => {
                write!(f, "{}", name)?;
                if !type_args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in type_args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            IRType::Generic(name) => write!(f, "{}", name),
        }
    }
}
