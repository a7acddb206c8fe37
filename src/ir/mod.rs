//! Intermediate representation: typed module model, lowering, and printing.

pub mod lowering;
pub mod module;
pub mod printer;
pub mod types;

pub use lowering::lower_module;
pub use module::{IRField, IRFunction, IRModule, IRParameter, IRStruct, IRValue};
pub use printer::print_module;
pub use types::IRType;
