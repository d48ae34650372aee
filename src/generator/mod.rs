//! Code generation module for the compiler.
//!
//! This module lowers the syntax tree into LLVM IR through `inkwell`. It handles:
//!
//! - The build context threaded through every lowering call (scope, module, builder)
//! - Per-variant lowering of nodes into IR values
//! - Function definition with per-function scoping
//! - Structured control flow for conditionals, merged with a phi
//! - Verification, textual output and JIT execution of the finished module

pub mod context;
pub mod expr;
pub mod generator;
pub mod stmt;
