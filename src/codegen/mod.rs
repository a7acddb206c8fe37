//! Code generation backends.
//!
//! A backend turns an [`IRModule`] into named source files. Backends are
//! held in a [`BackendRegistry`] so drivers can select one by name.

pub mod cpp;

pub use cpp::{CppBackend, CppBackendOptions};

use crate::ir::module::IRModule;

/// Name/version pair identifying the target dialect. Advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetProfile {
    /// Target name
    pub name: String,
    /// Target version
    pub version: String,
}

/// A generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name relative to the output directory
    pub path: String,
    /// Full file contents
    pub contents: String,
}

/// A code-emission backend.
pub trait Backend {
    /// Short identifier used for registry lookups.
    fn name(&self) -> &'static str;

    /// Emit the module as a set of generated files.
    fn emit(&self, module: &IRModule, profile: &TargetProfile) -> Vec<GeneratedFile>;
}

/// Registry of available backends, in insertion order.
#[derive(Default)]
pub struct BackendRegistry {
    backends: Vec<Box<dyn Backend>>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend.
    pub fn register(&mut self, backend: impl Backend + 'static) {
        self.backends.push(Box::new(backend));
    }

    /// All registered backends.
    pub fn backends(&self) -> &[Box<dyn Backend>] {
        &self.backends
    }

    /// Find a backend by name.
    pub fn lookup(&self, name: &str) -> Option<&dyn Backend> {
        self.backends
            .iter()
            .find(|backend| backend.name() == name)
            .map(|backend| backend.as_ref())
    }
}
