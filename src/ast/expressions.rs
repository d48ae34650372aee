use std::fmt::Display;

use crate::Span;

use super::ast::Node;

/// Number literal. Integer and floating literals both land here.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberNode {
    pub value: f64,
    pub span: Span,
}

/// Reference to a function parameter, resolved at lowering time.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableNode {
    pub identifier: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    LessThan,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::LessThan => "<",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpressionNode {
    pub operator: BinaryOperator,
    pub lhs: Box<Node>,
    pub rhs: Box<Node>,
    pub span: Span,
}

/// A labelled call argument, `label: value`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallArgument {
    pub label: String,
    pub value: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpressionNode {
    pub callee: String,
    pub arguments: Vec<CallArgument>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfElseNode {
    pub condition: Box<Node>,
    pub then_body: Box<Node>,
    pub else_body: Option<Box<Node>>,
    pub span: Span,
}
