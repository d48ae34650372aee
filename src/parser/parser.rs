//! Parser state and the top-level parsing loop.
//!
//! The parser indexes into a fully materialized token vector with one
//! cursor. `advance` consumes the current token, `peek` looks ahead
//! without consuming. The cursor never moves past the trailing `EOF`.

use std::rc::Rc;

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::stmt::{parse_function_definition, parse_top_level_expression};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// A token vector that does not end in `EOF` gets one appended, so
    /// lookahead always has something to land on.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or(Position(0, Rc::clone(&file)));

            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span {
                    start: end.clone(),
                    end
                }
            ));
        }

        Parser {
            tokens,
            pos: 0,
            file,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.peek(0)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Looks `n` tokens past the current one. Looking past the end yields `EOF`.
    pub fn peek(&self, n: usize) -> &Token {
        let index = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Consumes the current token and returns it.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        if self.tokens[index].kind != TokenKind::EOF {
            self.pos = index + 1;
        }

        &self.tokens[index]
    }

    /// Expects a token of the specified kind, failing with `UnexpectedToken`.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            ));
        }

        Ok(self.advance().clone())
    }

    /// Expects a token of the specified kind, failing with `message` if absent.
    pub fn expect_detailed(
        &mut self,
        expected_kind: TokenKind,
        message: &str,
    ) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            Ok(self.advance().clone())
        } else {
            Err(self.unexpected(message))
        }
    }

    /// Builds an error pointing at the current token.
    pub fn unexpected(&self, message: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from(message),
            },
            token.span.start.clone(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns the end position of the last consumed token.
    pub fn get_last_end(&self) -> Position {
        match self.pos.checked_sub(1) {
            Some(index) => self.tokens[index].span.end.clone(),
            None => Position(0, Rc::clone(&self.file)),
        }
    }
}

/// Parses a stream of tokens into the sequence of top-level nodes.
///
/// Function definitions are kept as they are; every other top-level
/// expression is wrapped into an implicit entry function so both share
/// one representation.
///
/// # Arguments
///
/// * `tokens` - Vector of tokens to parse
/// * `file` - Reference-counted string containing the source file name
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Vec<Node>, Error> {
    let mut parser = Parser::new(tokens, file);
    let mut nodes = vec![];

    while parser.has_tokens() {
        if parser.current_token_kind() == TokenKind::Func {
            nodes.push(parse_function_definition(&mut parser)?);
        } else {
            match parse_top_level_expression(&mut parser)? {
                Some(node) => nodes.push(node),
                None => break,
            }
        }
    }

    Ok(nodes)
}
