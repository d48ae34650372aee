//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language's constructs including:
//! - Operator precedence and associativity
//! - Function definitions and calls
//! - Conditionals and returns
//! - Structural errors

use std::rc::Rc;

use crate::{
    ast::{ast::Node, expressions::BinaryOperator},
    errors::errors::{Error, ErrorKind},
    lexer::{lexer::tokenize, tokens::TokenKind},
};

use super::parser::{parse, Parser};

fn parse_source(source: &str) -> Result<Vec<Node>, Error> {
    let tokens = tokenize(source.to_string(), Some("test.fl".to_string())).unwrap();
    parse(tokens, Rc::new("test.fl".to_string()))
}

/// Parses a single bare expression and renders the body of its entry function.
fn parse_body(source: &str) -> String {
    let nodes = parse_source(source).unwrap();
    assert_eq!(nodes.len(), 1);

    match &nodes[0] {
        Node::Function(function) => {
            assert_eq!(function.name, "main");
            function.body.to_string()
        }
        other => panic!("expected an entry function, found {}", other),
    }
}

#[test]
fn test_parse_number() {
    assert_eq!(parse_body("42"), "42");
    assert_eq!(parse_body("3.25"), "3.25");
}

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(parse_body("2 + 3 * 4"), "(+ 2 (* 3 4))");
}

#[test]
fn test_equal_precedence_is_left_associative() {
    assert_eq!(parse_body("8 - 3 - 2"), "(- (- 8 3) 2)");
    assert_eq!(parse_body("16 / 4 / 2"), "(/ (/ 16 4) 2)");
}

#[test]
fn test_mixed_precedence_chain() {
    assert_eq!(
        parse_body("1 * 2 + 3 * 4 - 5"),
        "(- (+ (* 1 2) (* 3 4)) 5)"
    );
    assert_eq!(parse_body("1 + 2 * 3 * 4 + 5"), "(+ (+ 1 (* (* 2 3) 4)) 5)");
}

#[test]
fn test_less_than_binds_loosest() {
    assert_eq!(parse_body("a + 1 < b * 2"), "(< (+ a 1) (* b 2))");
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(parse_body("(2 + 3) * 4"), "(* (+ 2 3) 4)");
}

#[test]
fn test_binary_node_structure() {
    let nodes = parse_source("2 + 3 * 4").unwrap();
    let Node::Function(function) = &nodes[0] else {
        panic!("expected an entry function");
    };
    let Node::BinaryExpression(add) = function.body.as_ref() else {
        panic!("expected a binary expression");
    };

    assert_eq!(add.operator, BinaryOperator::Add);
    assert!(matches!(add.lhs.as_ref(), Node::Number(number) if number.value == 2.0));
    assert!(
        matches!(add.rhs.as_ref(), Node::BinaryExpression(mul) if mul.operator == BinaryOperator::Mul)
    );
}

#[test]
fn test_parse_function_definition() {
    let nodes = parse_source("func add(a: Int, b: Int) -> Int { a + b }").unwrap();

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].to_string(), "(func add (a b) -> Double (+ a b))");

    let Node::Function(function) = &nodes[0] else {
        panic!("expected a function");
    };
    assert_eq!(function.arguments[0].label, "a");
    assert_eq!(function.arguments[0].variable_name, "a");
}

#[test]
fn test_parse_void_function() {
    let nodes = parse_source("func noop() -> Void { return }").unwrap();

    assert_eq!(nodes[0].to_string(), "(func noop () -> Void (return))");
}

#[test]
fn test_parse_call_expression() {
    assert_eq!(
        parse_body("add(a: 1, b: 2 * 3)"),
        "(call add (a: 1) (b: (* 2 3)))"
    );
    assert_eq!(parse_body("now()"), "(call now)");
}

#[test]
fn test_identifier_without_paren_is_variable() {
    let nodes = parse_source("x").unwrap();
    let Node::Function(function) = &nodes[0] else {
        panic!("expected an entry function");
    };

    assert!(matches!(function.body.as_ref(), Node::Variable(variable) if variable.identifier == "x"));
}

#[test]
fn test_parse_if_else() {
    assert_eq!(parse_body("if x < 1 { 2 } else { 3 }"), "(if (< x 1) 2 3)");
    assert_eq!(parse_body("if x { 1 }"), "(if x 1)");
    assert_eq!(
        parse_body("if a { 1 } else if b { 2 } else { 3 }"),
        "(if a 1 (if b 2 3))"
    );
}

#[test]
fn test_parse_return() {
    let nodes = parse_source("func double(x: Int) -> Int { return x * 2 }").unwrap();
    assert_eq!(nodes[0].to_string(), "(func double (x) -> Double (return (* x 2)))");

    assert_eq!(parse_body("return"), "(return)");
}

#[test]
fn test_top_level_units_in_order() {
    let nodes = parse_source("func one() -> Int { 1 } one() 2").unwrap();

    let names: Vec<&str> = nodes
        .iter()
        .map(|node| match node {
            Node::Function(function) => function.name.as_str(),
            _ => "",
        })
        .collect();
    assert_eq!(names, ["one", "main", "main"]);
}

#[test]
fn test_parse_empty_source() {
    assert!(parse_source("").unwrap().is_empty());
    assert!(parse_source("// only a comment").unwrap().is_empty());
}

#[test]
fn test_parse_is_idempotent() {
    let source = "func f(x: Int) -> Int { if x < 2 { x } else { x * f(x: x - 1) } } f(x: 5)";

    assert_eq!(parse_source(source).unwrap(), parse_source(source).unwrap());
}

#[test]
fn test_missing_arrow() {
    let error = parse_source("func f() Int { 1 }").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.kind(), ErrorKind::Parse);
    assert_eq!(error.get_position().0, 9);
}

#[test]
fn test_missing_close_paren() {
    let error = parse_source("(1 + 2").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Parse);
    assert_eq!(error.get_position().0, 6);
}

#[test]
fn test_missing_operand() {
    let error = parse_source("1 +").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Parse);
}

#[test]
fn test_unlabelled_call_argument() {
    let error = parse_source("f(1)").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_missing_parameter_type() {
    let error = parse_source("func f(x) -> Int { x }").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Parse);
}

#[test]
fn test_unexpected_token() {
    let error = parse_source("}").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_unsupported_operator() {
    let error = parse_source("1 % 2").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Unimplemented);
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_cursor_stops_at_eof() {
    let tokens = tokenize("a b".to_string(), None).unwrap();
    let mut parser = Parser::new(tokens, Rc::new("shell".to_string()));

    assert_eq!(parser.peek(1).value, "b");
    assert_eq!(parser.peek(10).kind, TokenKind::EOF);

    assert_eq!(parser.advance().value, "a");
    assert_eq!(parser.advance().value, "b");
    assert_eq!(parser.advance().kind, TokenKind::EOF);
    assert_eq!(parser.advance().kind, TokenKind::EOF);
    assert!(!parser.has_tokens());
}

#[test]
fn test_missing_eof_is_appended() {
    let mut tokens = tokenize("1 + 2".to_string(), None).unwrap();
    tokens.pop();

    let nodes = parse(tokens, Rc::new("shell".to_string())).unwrap();
    assert_eq!(nodes.len(), 1);
}

#[test]
fn test_expect_reports_unexpected_token() {
    let tokens = tokenize("a".to_string(), None).unwrap();
    let mut parser = Parser::new(tokens, Rc::new("shell".to_string()));

    let error = parser.expect(TokenKind::Colon).unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_position().0, 0);

    assert_eq!(parser.expect(TokenKind::Identifier).unwrap().value, "a");
    assert_eq!(parser.current_token_kind(), TokenKind::EOF);
}
