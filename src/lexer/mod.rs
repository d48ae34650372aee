//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into the fully materialized token stream the parser indexes into. It handles:
//!
//! - Tokenization of source code using an anchored regex pattern table
//! - Recognition of keywords, identifiers, numeric literals and operators
//! - Token position tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
