use crate::Span;

use super::{ast::Node, types::ValueType};

/// A declared parameter. The label and the variable name are the same
/// identifier; the type annotation is checked for presence only.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionArgument {
    pub label: String,
    pub variable_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionNode {
    pub name: String,
    pub arguments: Vec<FunctionArgument>,
    pub return_type: ValueType,
    pub body: Box<Node>,
    /// Set on the implicit wrapper of a bare top-level expression
    pub is_entry: bool,
    pub span: Span,
}

/// `return` with an optional value. It yields its value rather than
/// terminating the block, function bodies being single expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnNode {
    pub body: Option<Box<Node>>,
    pub span: Span,
}

/// Name of the implicit function every bare top-level expression is wrapped in.
pub const ENTRY_FUNCTION_NAME: &str = "main";
