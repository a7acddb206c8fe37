//! Error types for the compiler.
//!
//! Structural failures (a parse that cannot continue, a missing input file)
//! surface as errors; semantic findings go through the diagnostic reporter
//! instead and never abort the pipeline.

use crate::utils::span::Span;
use std::fmt;
use thiserror::Error;

/// Top-level error type for the compiler.
#[derive(Error, Debug)]
pub enum SableError {
    /// Error during parsing
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Internal compiler error
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during parsing.
///
/// The parser is fail-fast: the first structural problem aborts the current
/// top-level request and is carried here with its source location.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)
    }
}

/// Result type using SableError.
pub type SableResult<T> = Result<T, SableError>;

/// Result type for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;
