/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The closed `Node` union and its S-expression rendering
/// - expressions: Numbers, variables, binary operators, calls and conditionals
/// - statements: Function definitions and returns
/// - types: The value types a function can declare
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;
