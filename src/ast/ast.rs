use std::fmt::Display;

use crate::Span;

use super::{
    expressions::{BinaryExpressionNode, CallExpressionNode, IfElseNode, NumberNode, VariableNode},
    statements::{FunctionNode, ReturnNode},
};

/// A node of the syntax tree.
///
/// The set of variants is closed: every pass over the tree is an exhaustive
/// `match`, so adding a variant fails to compile until each pass handles it.
/// Children are owned exclusively by their parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(NumberNode),
    Variable(VariableNode),
    BinaryExpression(BinaryExpressionNode),
    Function(FunctionNode),
    CallExpression(CallExpressionNode),
    IfElse(IfElseNode),
    Return(ReturnNode),
}

impl Node {
    pub fn get_span(&self) -> &Span {
        match self {
            Node::Number(node) => &node.span,
            Node::Variable(node) => &node.span,
            Node::BinaryExpression(node) => &node.span,
            Node::Function(node) => &node.span,
            Node::CallExpression(node) => &node.span,
            Node::IfElse(node) => &node.span,
            Node::Return(node) => &node.span,
        }
    }
}

/// Renders the tree as an S-expression, e.g. `(+ 2 (* 3 4))`.
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Number(node) => write!(f, "{}", node.value),
            Node::Variable(node) => write!(f, "{}", node.identifier),
            Node::BinaryExpression(node) => {
                write!(f, "({} {} {})", node.operator, node.lhs, node.rhs)
            }
            Node::Function(node) => {
                let arguments = node
                    .arguments
                    .iter()
                    .map(|argument| argument.variable_name.as_str())
                    .collect::<Vec<&str>>()
                    .join(" ");

                write!(
                    f,
                    "(func {} ({}) -> {} {})",
                    node.name, arguments, node.return_type, node.body
                )
            }
            Node::CallExpression(node) => {
                write!(f, "(call {}", node.callee)?;
                for argument in &node.arguments {
                    write!(f, " ({}: {})", argument.label, argument.value)?;
                }
                write!(f, ")")
            }
            Node::IfElse(node) => {
                write!(f, "(if {} {}", node.condition, node.then_body)?;
                if let Some(else_body) = &node.else_body {
                    write!(f, " {}", else_body)?;
                }
                write!(f, ")")
            }
            Node::Return(node) => match &node.body {
                Some(body) => write!(f, "(return {})", body),
                None => write!(f, "(return)"),
            },
        }
    }
}
