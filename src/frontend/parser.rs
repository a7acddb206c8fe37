//! Parser for the Sable language.
//!
//! Statements are parsed by recursive descent; expressions use precedence
//! climbing over a fixed operator table, with right-associative assignment
//! and left-associative everything else. The parser is fail-fast: the first
//! structural problem aborts the current request with a [`ParseError`].

use crate::frontend::ast::{AstContext, AstKind, NodeId};
use crate::frontend::token::{Token, TokenKind, TokenStream};
use crate::utils::errors::{ParseError, ParseResult};
use crate::utils::span::Span;

/// Lowest precedence at which binary operators are consumed.
const MIN_PRECEDENCE: i32 = 1;

fn precedence_for(token: &Token) -> i32 {
    if token.kind != TokenKind::Symbol {
        return -1;
    }
    match token.lexeme.as_str() {
        "=" | "+=" | "-=" | "*=" | "/=" => 1,
        "||" => 2,
        "&&" => 3,
        "==" | "!=" => 4,
        "<" | ">" | "<=" | ">=" => 5,
        "+" | "-" => 6,
        "*" | "/" | "%" => 7,
        _ => -1,
    }
}

fn is_assignment_operator(token: &Token) -> bool {
    token.kind == TokenKind::Symbol
        && matches!(token.lexeme.as_str(), "=" | "+=" | "-=" | "*=" | "/=")
}

fn is_unary_prefix(token: &Token) -> bool {
    match token.kind {
        TokenKind::Symbol => matches!(token.lexeme.as_str(), "!" | "-" | "+"),
        TokenKind::Keyword => token.lexeme == "await",
        _ => false,
    }
}

/// A parser over a token stream, allocating nodes into an [`AstContext`].
pub struct Parser<'a> {
    tokens: &'a TokenStream,
    context: &'a mut AstContext,
    index: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    pub fn new(tokens: &'a TokenStream, context: &'a mut AstContext) -> Self {
        Self {
            tokens,
            context,
            index: 0,
        }
    }

    /// Parse statements until end of file and return the Module node.
    pub fn parse_module(&mut self) -> ParseResult<NodeId> {
        let module_id =
            self.context
                .create_node(AstKind::Module, self.tokens.covering_span(), "");

        while !self.at_end() {
            let stmt = self.parse_statement()?;
            self.context.node_mut(module_id).children.push(stmt);
        }

        Ok(module_id)
    }

    /// Parse a single expression at minimum precedence.
    pub fn parse_expression(&mut self) -> ParseResult<NodeId> {
        self.parse_expression_at(MIN_PRECEDENCE)
    }

    fn parse_statement(&mut self) -> ParseResult<NodeId> {
        if self.check_keyword("let") {
            return self.parse_let_statement();
        }
        if self.check_keyword("return") {
            return self.parse_return_statement();
        }
        if self.check_symbol("{") {
            return self.parse_block_statement();
        }

        let expr = self.parse_expression()?;
        let semi = self.consume_symbol(";", "expected ';' after expression")?;
        let span = self.context.node(expr).span.merge(&semi.span);
        let stmt = self.context.create_node(AstKind::ExpressionStmt, span, "");
        self.context.node_mut(stmt).children.push(expr);
        Ok(stmt)
    }

    fn parse_block_statement(&mut self) -> ParseResult<NodeId> {
        let open = self.consume_symbol("{", "expected '{'")?;
        let block_id = self.context.create_node(AstKind::BlockStmt, open.span, "");

        while !self.at_end() && !self.check_symbol("}") {
            let stmt = self.parse_statement()?;
            self.context.node_mut(block_id).children.push(stmt);
        }

        let close = self.consume_symbol("}", "expected '}' to close block")?;
        self.context.node_mut(block_id).span = open.span.merge(&close.span);
        Ok(block_id)
    }

    fn parse_let_statement(&mut self) -> ParseResult<NodeId> {
        let let_token = self.consume_keyword("let", "expected 'let'")?;
        let is_mutable = self.match_keyword("mut");

        let ident = self.consume_identifier("expected identifier after 'let'")?;
        let name_id =
            self.context
                .create_node(AstKind::IdentifierExpr, ident.span, ident.lexeme.clone());

        self.consume_symbol("=", "expected '=' in let binding")?;
        let initializer = self.parse_expression()?;
        let semi = self.consume_symbol(";", "expected ';' after let binding")?;

        let value = if is_mutable { "mut" } else { "let" };
        let let_id =
            self.context
                .create_node(AstKind::LetStmt, let_token.span.merge(&semi.span), value);
        self.context
            .node_mut(let_id)
            .children
            .extend([name_id, initializer]);
        Ok(let_id)
    }

    fn parse_return_statement(&mut self) -> ParseResult<NodeId> {
        let return_token = self.consume_keyword("return", "expected 'return'")?;
        let value = if self.check_symbol(";") {
            None
        } else {
            Some(self.parse_expression()?)
        };
        let semi = self.consume_symbol(";", "expected ';' after return")?;

        let return_id = self.context.create_node(
            AstKind::ReturnStmt,
            return_token.span.merge(&semi.span),
            "",
        );
        if let Some(value) = value {
            self.context.node_mut(return_id).children.push(value);
        }
        Ok(return_id)
    }

    fn parse_expression_at(&mut self, min_precedence: i32) -> ParseResult<NodeId> {
        let mut left = self.parse_prefix_expression()?;

        while !self.at_end() {
            let op = self.current().clone();
            let precedence = precedence_for(&op);
            if precedence < min_precedence || op.kind != TokenKind::Symbol {
                break;
            }

            self.advance();
            let is_assignment = is_assignment_operator(&op);
            // Assignment consumes its rhs at the same precedence (right-assoc);
            // everything else at precedence + 1 (left-assoc).
            let next_precedence = if is_assignment { precedence } else { precedence + 1 };
            let right = self.parse_expression_at(next_precedence)?;

            let span = self
                .context
                .node(left)
                .span
                .merge(&self.context.node(right).span);
            let kind = if is_assignment {
                AstKind::AssignmentExpr
            } else {
                AstKind::BinaryExpr
            };
            let expr = self.context.create_node(kind, span, op.lexeme);
            self.context.node_mut(expr).children.extend([left, right]);
            left = expr;
        }

        Ok(left)
    }

    fn parse_prefix_expression(&mut self) -> ParseResult<NodeId> {
        if self.at_end() {
            return Err(self.error_here("unexpected end of input"));
        }

        let token = self.current().clone();
        if is_unary_prefix(&token) {
            self.advance();
            let operand = self.parse_expression_at(precedence_for(&token))?;
            let span = token.span.merge(&self.context.node(operand).span);
            let expr = self.context.create_node(AstKind::UnaryExpr, span, token.lexeme);
            self.context.node_mut(expr).children.push(operand);
            return Ok(expr);
        }

        let primary = self.parse_primary_expression()?;
        self.parse_call_expression(primary)
    }

    fn parse_primary_expression(&mut self) -> ParseResult<NodeId> {
        if self.at_end() {
            return Err(self.error_here("unexpected end of input"));
        }

        let token = self.advance().clone();
        match token.kind {
            TokenKind::Identifier => Ok(self.context.create_node(
                AstKind::IdentifierExpr,
                token.span,
                token.lexeme,
            )),
            TokenKind::Number | TokenKind::StringLiteral => Ok(self.context.create_node(
                AstKind::LiteralExpr,
                token.span,
                token.lexeme,
            )),
            // Keywords in expression position are preserved as literals so the
            // semantic layer can resolve spellings like `true` and `false`.
            TokenKind::Keyword => Ok(self.context.create_node(
                AstKind::LiteralExpr,
                token.span,
                token.lexeme,
            )),
            TokenKind::Symbol if token.lexeme == "(" => {
                let inner = self.parse_expression()?;
                let closing = self.consume_symbol(")", "expected ')' after expression")?;
                let span = token.span.merge(&closing.span);
                let group = self.context.create_node(AstKind::GroupExpr, span, "");
                self.context.node_mut(group).children.push(inner);
                Ok(group)
            }
            _ => Err(ParseError::new(
                "unexpected token in primary expression",
                token.span,
            )),
        }
    }

    fn parse_call_expression(&mut self, callee: NodeId) -> ParseResult<NodeId> {
        let mut current_callee = callee;
        let mut current_span = self.context.node(callee).span;

        while self.match_symbol("(") {
            let mut args = Vec::new();
            if !self.check_symbol(")") {
                loop {
                    args.push(self.parse_expression()?);
                    if !self.match_symbol(",") {
                        break;
                    }
                }
            }

            let close = self.consume_symbol(")", "expected ')' after arguments")?;
            let span = current_span.merge(&close.span);
            let call = self.context.create_node(AstKind::CallExpr, span, "");
            self.context.node_mut(call).children.push(current_callee);
            self.context.node_mut(call).children.extend(args);

            current_callee = call;
            current_span = span;
        }

        Ok(current_callee)
    }

    // Helper methods

    fn at_end(&self) -> bool {
        self.index >= self.tokens.len() || self.current().kind == TokenKind::EndOfFile
    }

    fn current(&self) -> &Token {
        let clamped = self.index.min(self.tokens.len().saturating_sub(1));
        &self.tokens.tokens[clamped]
    }

    fn advance(&mut self) -> &Token {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        &self.tokens.tokens[self.index - 1]
    }

    fn check_symbol(&self, symbol: &str) -> bool {
        !self.at_end() && self.current().is_symbol(symbol)
    }

    fn check_keyword(&self, keyword: &str) -> bool {
        !self.at_end() && self.current().is_keyword(keyword)
    }

    fn match_symbol(&mut self, symbol: &str) -> bool {
        if self.check_symbol(symbol) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume_symbol(&mut self, symbol: &str, message: &str) -> ParseResult<Token> {
        if self.check_symbol(symbol) {
            Ok(self.advance().clone())
        } else {
            Err(self.error_here(message))
        }
    }

    fn consume_keyword(&mut self, keyword: &str, message: &str) -> ParseResult<Token> {
        if self.check_keyword(keyword) {
            Ok(self.advance().clone())
        } else {
            Err(self.error_here(message))
        }
    }

    fn consume_identifier(&mut self, message: &str) -> ParseResult<Token> {
        if !self.at_end() && self.current().kind == TokenKind::Identifier {
            Ok(self.advance().clone())
        } else {
            Err(self.error_here(message))
        }
    }

    fn error_here(&self, message: &str) -> ParseError {
        let span = if self.tokens.is_empty() {
            Span::dummy()
        } else {
            self.current().span
        };
        ParseError::new(message, span)
    }
}

/// Parse a module (sequence of statements) from a token stream.
pub fn parse_module(tokens: &TokenStream, context: &mut AstContext) -> ParseResult<NodeId> {
    Parser::new(tokens, context).parse_module()
}

/// Parse a single expression from a token stream.
pub fn parse_expression(tokens: &TokenStream, context: &mut AstContext) -> ParseResult<NodeId> {
    Parser::new(tokens, context).parse_expression()
}
