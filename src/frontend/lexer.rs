//! Lexer for the Sable language.
//!
//! The lexer converts source text into a [`TokenStream`]. Whitespace and
//! line comments become trivia attached to the next token, which makes the
//! stream lossless: with full capture enabled, concatenating trivia and
//! lexemes reproduces the input exactly.

use crate::frontend::token::{
    is_compound_symbol, is_keyword, LexerConfig, Token, TokenKind, TokenStream, Trivia, TriviaKind,
};
use crate::utils::span::Span;

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_continue(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit()
}

/// A lexer for tokenizing source code.
pub struct Lexer<'a> {
    /// The source text
    source: &'a str,
    /// Trivia capture configuration
    config: LexerConfig,
    /// Current byte offset
    position: usize,
    /// Trivia accumulated since the last emitted token
    pending_leading: Vec<Trivia>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str, config: LexerConfig) -> Self {
        Self {
            source,
            config,
            position: 0,
            pending_leading: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    pub fn lex(mut self) -> TokenStream {
        let mut stream = TokenStream::default();

        while self.position < self.source.len() {
            self.skip_whitespace();
            if self.position >= self.source.len() {
                break;
            }

            if self.rest().starts_with("//") {
                let start = self.position;
                self.position += 2;
                while let Some(ch) = self.peek() {
                    if ch == '\n' {
                        break;
                    }
                    self.position += ch.len_utf8();
                }
                self.capture_trivia(TriviaKind::Comment, start, self.position);
                continue;
            }

            let ch = match self.peek() {
                Some(ch) => ch,
                None => break,
            };

            let token = if is_identifier_start(ch) {
                self.read_identifier()
            } else if ch.is_ascii_digit() {
                self.read_number()
            } else if ch == '"' {
                self.read_string()
            } else {
                self.read_symbol()
            };
            stream.tokens.push(token);
        }

        let end = self.source.len();
        stream.tokens.push(Token {
            kind: TokenKind::EndOfFile,
            lexeme: String::new(),
            span: Span::new(end, end),
            leading_trivia: std::mem::take(&mut self.pending_leading),
        });
        stream
    }

    fn rest(&self) -> &str {
        &self.source[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn make_token(&mut self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            lexeme: self.source[start..self.position].to_string(),
            span: Span::new(start, self.position),
            leading_trivia: std::mem::take(&mut self.pending_leading),
        }
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.position;
        self.position += 1;
        while let Some(ch) = self.peek() {
            if !is_identifier_continue(ch) {
                break;
            }
            self.position += ch.len_utf8();
        }

        let mut token = self.make_token(TokenKind::Identifier, start);
        if is_keyword(&token.lexeme) {
            token.kind = TokenKind::Keyword;
        }
        token
    }

    fn read_number(&mut self) -> Token {
        let start = self.position;
        while self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            self.position += 1;
        }
        if self.peek() == Some('.') {
            self.position += 1;
            while self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                self.position += 1;
            }
        }
        self.make_token(TokenKind::Number, start)
    }

    fn read_string(&mut self) -> Token {
        let start = self.position;
        self.position += 1; // opening quote
        while let Some(ch) = self.peek() {
            if ch == '"' {
                break;
            }
            if ch == '\\' && self.position + 1 < self.source.len() {
                self.position += 1;
                if let Some(escaped) = self.peek() {
                    self.position += escaped.len_utf8();
                }
                continue;
            }
            self.position += ch.len_utf8();
        }

        // Unterminated strings run to end of input and are accepted as written.
        if self.peek() == Some('"') {
            self.position += 1;
        }
        self.make_token(TokenKind::StringLiteral, start)
    }

    fn read_symbol(&mut self) -> Token {
        let start = self.position;
        let first = self.peek().unwrap_or('\0');
        self.position += first.len_utf8();

        // Greedy maximal munch over the compound symbol set.
        while let Some(ch) = self.peek() {
            let candidate = &self.source[start..self.position + ch.len_utf8()];
            if !is_compound_symbol(candidate) {
                break;
            }
            self.position += ch.len_utf8();
        }
        self.make_token(TokenKind::Symbol, start)
    }

    fn skip_whitespace(&mut self) {
        let start = self.position;
        while self.peek().map(|c| c.is_ascii_whitespace()).unwrap_or(false) {
            self.position += 1;
        }
        if self.position > start && self.config.capture_whitespace {
            self.pending_leading.push(self.make_trivia(TriviaKind::Whitespace, start, self.position));
        }
    }

    fn capture_trivia(&mut self, kind: TriviaKind, start: usize, end: usize) {
        let wanted = match kind {
            TriviaKind::Whitespace => self.config.capture_whitespace,
            TriviaKind::Comment => self.config.capture_comments,
        };
        if wanted {
            let trivia = self.make_trivia(kind, start, end);
            self.pending_leading.push(trivia);
        }
    }

    fn make_trivia(&self, kind: TriviaKind, start: usize, end: usize) -> Trivia {
        Trivia {
            kind,
            text: self.source[start..end].to_string(),
            span: Span::new(start, end),
        }
    }
}

/// Tokenize source text with the given configuration.
pub fn lex(source: &str, config: LexerConfig) -> TokenStream {
    Lexer::new(source, config).lex()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source, LexerConfig::default())
            .tokens
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_empty_source() {
        let stream = lex("", LexerConfig::default());
        assert_eq!(stream.len(), 1);
        let eof = &stream.tokens[0];
        assert_eq!(eof.kind, TokenKind::EndOfFile);
        assert_eq!(eof.span, Span::new(0, 0));
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let stream = lex("module demo\nfn main() {\n  return 42\n}\n", LexerConfig::default());
        assert_eq!(stream.tokens[0].kind, TokenKind::Keyword);
        assert_eq!(stream.tokens[0].lexeme, "module");
        assert_eq!(stream.tokens[1].kind, TokenKind::Identifier);
        assert_eq!(stream.tokens[1].lexeme, "demo");
        assert!(stream.tokens.last().map(|t| t.is_eof()).unwrap_or(false));
    }

    #[test]
    fn test_numbers() {
        let stream = lex("123 45.67", LexerConfig::default());
        assert_eq!(stream.tokens[0].kind, TokenKind::Number);
        assert_eq!(stream.tokens[0].lexeme, "123");
        assert_eq!(stream.tokens[1].lexeme, "45.67");
    }

    #[test]
    fn test_compound_symbols_maximal_munch() {
        let stream = lex(">>= == -> =", LexerConfig::default());
        let lexemes: Vec<_> = stream.tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec![">>=", "==", "->", "=", ""]);
        assert!(stream.tokens[..4].iter().all(|t| t.kind == TokenKind::Symbol));
    }

    #[test]
    fn test_string_literal_with_escape() {
        let stream = lex(r#""a \" b""#, LexerConfig::default());
        assert_eq!(stream.tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(stream.tokens[0].lexeme, r#""a \" b""#);
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let stream = lex("\"open", LexerConfig::default());
        assert_eq!(stream.tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(stream.tokens[0].lexeme, "\"open");
        assert_eq!(stream.tokens[1].kind, TokenKind::EndOfFile);
    }

    #[test]
    fn test_eof_span_is_source_length() {
        let source = "let x = 1;";
        let stream = lex(source, LexerConfig::default());
        let eof = stream.tokens.last().unwrap();
        assert_eq!(eof.span, Span::new(source.len(), source.len()));
    }

    #[test]
    fn test_comment_trivia_attaches_to_next_token() {
        let stream = lex("// intro\nlet x = 1;", LexerConfig::default());
        let first = &stream.tokens[0];
        assert!(first.is_keyword("let"));
        assert_eq!(first.leading_trivia.len(), 1);
        assert_eq!(first.leading_trivia[0].kind, TriviaKind::Comment);
        assert_eq!(first.leading_trivia[0].text, "// intro");
    }

    #[test]
    fn test_trailing_trivia_lands_on_eof() {
        let config = LexerConfig { capture_whitespace: true, capture_comments: true };
        let stream = lex("  let x = 1\n// trailing comment\n", config);

        let first = &stream.tokens[0];
        assert!(first.is_keyword("let"));
        assert_eq!(first.leading_trivia.len(), 1);
        assert_eq!(first.leading_trivia[0].kind, TriviaKind::Whitespace);
        assert_eq!(first.leading_trivia[0].text, "  ");

        let eof = stream.tokens.last().unwrap();
        assert!(eof
            .leading_trivia
            .iter()
            .any(|t| t.kind == TriviaKind::Comment && t.text == "// trailing comment"));
    }

    #[test]
    fn test_round_trip_with_full_capture() {
        let source = "  let x = 1; // note\n\nfn  add\t(a, b)\n";
        let config = LexerConfig { capture_whitespace: true, capture_comments: true };
        let stream = lex(source, config);

        let mut rebuilt = String::new();
        for token in stream.iter() {
            for trivia in &token.leading_trivia {
                rebuilt.push_str(&trivia.text);
            }
            rebuilt.push_str(&token.lexeme);
        }
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_token_kind_mix() {
        let observed = kinds("let x = \"hi\" + 4;");
        assert_eq!(
            observed,
            vec![
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::Symbol,
                TokenKind::StringLiteral,
                TokenKind::Symbol,
                TokenKind::Number,
                TokenKind::Symbol,
                TokenKind::EndOfFile,
            ]
        );
    }
}
