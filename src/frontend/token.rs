//! Token types produced by the lexer.
//!
//! Tokens carry their raw lexeme, a source span, and any leading trivia
//! (whitespace, comments) collected since the previous token, so the
//! original source can be reconstructed byte-for-byte.

use crate::utils::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Identifier (variable, function name, etc.)
    Identifier,
    /// Integer or floating-point literal
    Number,
    /// Double-quoted string literal
    StringLiteral,
    /// Reserved word
    Keyword,
    /// Operator or punctuation
    Symbol,
    /// End of file
    EndOfFile,
    /// Unclassified input
    Unknown,
}

impl TokenKind {
    /// Get a human-readable name for this token kind.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "Identifier",
            TokenKind::Number => "Number",
            TokenKind::StringLiteral => "StringLiteral",
            TokenKind::Keyword => "Keyword",
            TokenKind::Symbol => "Symbol",
            TokenKind::EndOfFile => "EndOfFile",
            TokenKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The kind of a piece of trivia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriviaKind {
    /// Run of whitespace
    Whitespace,
    /// Line comment
    Comment,
}

/// Insignificant lexical material kept alongside tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trivia {
    /// The kind of trivia
    pub kind: TriviaKind,
    /// Raw text
    pub text: String,
    /// The source span
    pub span: Span,
}

/// A token in the source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The lexeme (raw text)
    pub lexeme: String,
    /// The source span
    pub span: Span,
    /// Trivia collected since the previous token, in order
    pub leading_trivia: Vec<Trivia>,
}

impl Token {
    /// Check if this is an EOF token.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfFile)
    }

    /// Check if this token is the given keyword.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == keyword
    }

    /// Check if this token is the given symbol.
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.lexeme == symbol
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.lexeme)
    }
}

/// Configuration for trivia capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Record whitespace runs as trivia
    pub capture_whitespace: bool,
    /// Record line comments as trivia
    pub capture_comments: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            capture_whitespace: false,
            capture_comments: true,
        }
    }
}

/// An immutable, indexable sequence of tokens ending in EndOfFile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStream {
    /// The tokens, in source order
    pub tokens: Vec<Token>,
}

impl TokenStream {
    /// Number of tokens (including the final EOF).
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the stream holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at the given index.
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Iterate over the tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Span covering the whole stream.
    pub fn covering_span(&self) -> Span {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => Span::dummy(),
        }
    }
}

/// Check whether a word is one of the reserved keywords.
pub fn is_keyword(word: &str) -> bool {
    matches!(
        word,
        "module" | "fn" | "pub" | "let" | "mut" | "struct" | "enum" | "ct" | "return"
    )
}

/// Check whether a lexeme is one of the recognized compound symbols.
pub fn is_compound_symbol(symbol: &str) -> bool {
    matches!(
        symbol,
        "==" | "!=" | "<=" | ">=" | "&&" | "||" | "::" | "->" | "=>" | "+=" | "-=" | "*=" | "/="
            | "%=" | "&=" | "|=" | "^=" | "<<" | ">>" | ">>="
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert!(is_keyword("fn"));
        assert!(is_keyword("return"));
        assert!(is_keyword("ct"));
        assert!(!is_keyword("function"));
    }

    #[test]
    fn test_compound_symbols() {
        assert!(is_compound_symbol("=="));
        assert!(is_compound_symbol(">>="));
        assert!(is_compound_symbol("->"));
        assert!(!is_compound_symbol("==="));
        assert!(!is_compound_symbol("+"));
    }

    #[test]
    fn test_default_config() {
        let config = LexerConfig::default();
        assert!(!config.capture_whitespace);
        assert!(config.capture_comments);
    }

    #[test]
    fn test_covering_span_empty_stream() {
        let stream = TokenStream::default();
        assert_eq!(stream.covering_span(), Span::dummy());
    }
}
