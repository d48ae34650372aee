use std::rc::Rc;

use crate::{Position, Span};

use super::{
    ast::Node,
    expressions::{
        BinaryExpressionNode, BinaryOperator, CallArgument, CallExpressionNode, IfElseNode,
        NumberNode, VariableNode,
    },
    statements::{FunctionArgument, FunctionNode, ReturnNode},
    types::ValueType,
};

fn span() -> Span {
    Span {
        start: Position(0, Rc::new("test.fl".to_string())),
        end: Position(0, Rc::new("test.fl".to_string())),
    }
}

fn number(value: f64) -> Node {
    Node::Number(NumberNode { value, span: span() })
}

fn variable(identifier: &str) -> Node {
    Node::Variable(VariableNode {
        identifier: identifier.to_string(),
        span: span(),
    })
}

fn binary(operator: BinaryOperator, lhs: Node, rhs: Node) -> Node {
    Node::BinaryExpression(BinaryExpressionNode {
        operator,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
        span: span(),
    })
}

#[test]
fn test_display_binary_expression() {
    let node = binary(
        BinaryOperator::Add,
        number(2.0),
        binary(BinaryOperator::Mul, number(3.0), number(4.5)),
    );

    assert_eq!(node.to_string(), "(+ 2 (* 3 4.5))");
}

#[test]
fn test_display_function() {
    let node = Node::Function(FunctionNode {
        name: "add".to_string(),
        arguments: vec![
            FunctionArgument {
                label: "a".to_string(),
                variable_name: "a".to_string(),
            },
            FunctionArgument {
                label: "b".to_string(),
                variable_name: "b".to_string(),
            },
        ],
        return_type: ValueType::Double,
        body: Box::new(binary(BinaryOperator::Add, variable("a"), variable("b"))),
        is_entry: false,
        span: span(),
    });

    assert_eq!(node.to_string(), "(func add (a b) -> Double (+ a b))");
}

#[test]
fn test_display_call_if_and_return() {
    let call = Node::CallExpression(CallExpressionNode {
        callee: "add".to_string(),
        arguments: vec![
            CallArgument {
                label: "a".to_string(),
                value: number(1.0),
            },
            CallArgument {
                label: "b".to_string(),
                value: number(2.0),
            },
        ],
        span: span(),
    });
    assert_eq!(call.to_string(), "(call add (a: 1) (b: 2))");

    let conditional = Node::IfElse(IfElseNode {
        condition: Box::new(binary(BinaryOperator::LessThan, variable("x"), number(1.0))),
        then_body: Box::new(number(1.0)),
        else_body: None,
        span: span(),
    });
    assert_eq!(conditional.to_string(), "(if (< x 1) 1)");

    let bare_return = Node::Return(ReturnNode {
        body: None,
        span: span(),
    });
    assert_eq!(bare_return.to_string(), "(return)");
}

#[test]
fn test_value_type_annotations() {
    assert_eq!(ValueType::from_annotation("Int"), ValueType::Double);
    assert_eq!(ValueType::from_annotation("Double"), ValueType::Double);
    assert_eq!(ValueType::from_annotation("Void"), ValueType::Void);
}
