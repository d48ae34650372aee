//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and lowering
//! - A coarse `ErrorKind` grouping so drivers can decide abort-vs-skip
//! - Helpful error messages and suggestions

pub mod errors;
