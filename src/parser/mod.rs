//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms a
//! materialized token stream into a sequence of top-level nodes. It handles:
//!
//! - Function definitions and their labelled, annotated parameters
//! - Primary expressions (numbers, variables, calls, parentheses, `if`, `return`)
//! - Binary expressions by operator-precedence climbing
//! - Wrapping bare top-level expressions into the implicit entry function
//!
//! Every structural mismatch is returned as an `Error`; there is no recovery
//! past a malformed construct.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
