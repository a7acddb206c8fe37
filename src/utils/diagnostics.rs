//! Diagnostic collection for the compilation pipeline.
//!
//! Semantic problems are accumulated as [`Diagnostic`] records rather than
//! raised as errors; the pipeline keeps running and produces a partial
//! artifact alongside the complete diagnostic list.

use crate::utils::span::Span;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

/// Stable diagnostic codes.
///
/// The numeric values are part of the external interface and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagCode {
    /// Attached detail on another diagnostic
    GenericNote,
    /// Reserved for lexer-level failures; not currently emitted
    LexUnknownToken,
    /// Name already declared in the current scope or function registry
    SemDuplicateSymbol,
    /// Reference to a name not in any live scope
    SemUnknownIdentifier,
    /// Unification failure (binary, assignment, return, call argument)
    SemTypeMismatch,
    /// Call arity disagrees with the function signature
    SemArgumentCountMismatch,
}

impl DiagCode {
    /// Numeric form of the code.
    pub fn value(&self) -> u32 {
        match self {
            DiagCode::GenericNote => 0,
            DiagCode::LexUnknownToken => 1000,
            DiagCode::SemDuplicateSymbol => 2000,
            DiagCode::SemUnknownIdentifier => 2001,
            DiagCode::SemTypeMismatch => 2002,
            DiagCode::SemArgumentCountMismatch => 2003,
        }
    }

    /// String form of the code.
    pub fn name(&self) -> &'static str {
        match self {
            DiagCode::GenericNote => "GenericNote",
            DiagCode::LexUnknownToken => "LexUnknownToken",
            DiagCode::SemDuplicateSymbol => "SemDuplicateSymbol",
            DiagCode::SemUnknownIdentifier => "SemUnknownIdentifier",
            DiagCode::SemTypeMismatch => "SemTypeMismatch",
            DiagCode::SemArgumentCountMismatch => "SemArgumentCountMismatch",
        }
    }
}

impl fmt::Display for DiagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The coded kind
    pub code: DiagCode,
    /// Human-readable message
    pub message: String,
    /// Primary source span
    pub span: Span,
    /// Additional notes, in order
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(code: DiagCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            notes: Vec::new(),
        }
    }

    /// Add a note to the diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// External JSON form: numeric and string code, message, span, notes.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "code": self.code.value(),
            "name": self.code.name(),
            "message": self.message,
            "start": self.span.start,
            "end": self.span.end,
            "notes": self.notes,
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} at {}", self.code, self.message, self.span)
    }
}

/// Collector for diagnostics across all pipeline stages.
#[derive(Debug, Default)]
pub struct DiagnosticReporter {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic.
    pub fn report(&mut self, code: DiagCode, message: impl Into<String>, span: Span) {
        self.diagnostics.push(Diagnostic::new(code, message, span));
    }

    /// Record a pre-built diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// All diagnostics reported so far, in order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Check whether anything was reported.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics reported.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drain the collected diagnostics out of the reporter.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
