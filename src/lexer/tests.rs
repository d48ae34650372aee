//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers and floats)
//! - Operators and punctuation
//! - Comments
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};

#[test]
fn test_tokenize_keywords() {
    let source = "func if else return".to_string();
    let tokens = tokenize(source, Some("test.fl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Func);
    assert_eq!(tokens[1].kind, TokenKind::If);
    assert_eq!(tokens[2].kind, TokenKind::Else);
    assert_eq!(tokens[3].kind, TokenKind::Return);
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore functional".to_string();
    let tokens = tokenize(source, Some("test.fl".to_string())).unwrap();

    let values: Vec<&str> = tokens[..5].iter().map(|t| t.value.as_str()).collect();
    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Identifier));
    assert_eq!(values, ["foo", "bar", "baz_123", "_underscore", "functional"]);
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100.5".to_string();
    let tokens = tokenize(source, Some("test.fl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Integer);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Integer);
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].kind, TokenKind::Float);
    assert_eq!(tokens[3].value, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / < == <= % >".to_string();
    let tokens = tokenize(source, Some("test.fl".to_string())).unwrap();

    let symbols: Vec<&str> = tokens[..9].iter().map(|t| t.value.as_str()).collect();
    assert!(tokens[..9].iter().all(|t| t.kind == TokenKind::Operator));
    assert_eq!(symbols, ["+", "-", "*", "/", "<", "==", "<=", "%", ">"]);
    assert_eq!(tokens[9].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) { } : , ->".to_string();
    let tokens = tokenize(source, Some("test.fl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::Colon);
    assert_eq!(tokens[5].kind, TokenKind::Comma);
    assert_eq!(tokens[6].kind, TokenKind::Arrow);
    assert_eq!(tokens[7].kind, TokenKind::EOF);
}

#[test]
fn test_arrow_is_not_minus() {
    let source = "a->b-c".to_string();
    let tokens = tokenize(source, Some("test.fl".to_string())).unwrap();

    assert_eq!(tokens[1].kind, TokenKind::Arrow);
    assert_eq!(tokens[3].kind, TokenKind::Operator);
    assert_eq!(tokens[3].value, "-");
}

#[test]
fn test_tokenize_comments() {
    let source = "1 + 2 // trailing comment\n3".to_string();
    let tokens = tokenize(source, Some("test.fl".to_string())).unwrap();

    assert_eq!(tokens.len(), 5); // 1, +, 2, 3, EOF
    assert_eq!(tokens[3].value, "3");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_function_declaration() {
    let source = "func add(a: Int, b: Int) -> Int { a + b }".to_string();
    let tokens = tokenize(source, Some("test.fl".to_string())).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::Func,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Identifier,
            TokenKind::CloseParen,
            TokenKind::Arrow,
            TokenKind::Identifier,
            TokenKind::OpenCurly,
            TokenKind::Identifier,
            TokenKind::Operator,
            TokenKind::Identifier,
            TokenKind::CloseCurly,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_token_spans() {
    let source = "  foo 12".to_string();
    let tokens = tokenize(source, Some("test.fl".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.0, 2);
    assert_eq!(tokens[0].span.end.0, 5);
    assert_eq!(tokens[1].span.start.0, 6);
    assert_eq!(tokens[1].span.end.0, 8);
    assert_eq!(tokens[2].span.start.0, 8);
}

#[test]
fn test_tokenize_unrecognized_token() {
    let source = "1 + @".to_string();
    let result = tokenize(source, Some("test.fl".to_string()));

    let error = result.unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_tokenize_empty_source() {
    let tokens = tokenize(String::new(), None).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!(tokens[0].span.start.1.as_str(), "shell");
}
