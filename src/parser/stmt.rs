use crate::{
    ast::{
        ast::Node,
        statements::{FunctionArgument, FunctionNode, ReturnNode, ENTRY_FUNCTION_NAME},
        types::ValueType,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    expr::{parse_expression, parse_required_expression, starts_expression},
    parser::Parser,
};

/// `name: Type`. The annotation must be present but is not kept.
pub fn parse_function_definition_argument(parser: &mut Parser) -> Result<FunctionArgument, Error> {
    let name = parser
        .expect_detailed(TokenKind::Identifier, "expected function argument")?
        .value;
    parser.expect_detailed(TokenKind::Colon, "expected colon")?;
    parser.expect_detailed(TokenKind::Identifier, "expected type label")?;

    Ok(FunctionArgument {
        label: name.clone(),
        variable_name: name,
    })
}

/// `func NAME ( [arg (, arg)*] ) -> TYPE { EXPR }`
pub fn parse_function_definition(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser
        .expect_detailed(TokenKind::Func, "required func keyword")?
        .span
        .start;

    let name = parser
        .expect_detailed(TokenKind::Identifier, "expected function name")?
        .value;

    parser.expect_detailed(TokenKind::OpenParen, "required left paren")?;

    let mut arguments = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_function_definition_argument(parser)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect_detailed(TokenKind::CloseParen, "required right paren")?;
    parser.expect_detailed(TokenKind::Arrow, "required right arrow")?;

    let return_type = parser
        .expect_detailed(TokenKind::Identifier, "require return type")?
        .value;

    parser.expect_detailed(TokenKind::OpenCurly, "require left brace")?;
    let body = parse_required_expression(parser, "expected function body")?;
    let close = parser.expect_detailed(TokenKind::CloseCurly, "require right brace")?;

    Ok(Node::Function(FunctionNode {
        name,
        arguments,
        return_type: ValueType::from_annotation(&return_type),
        body: Box::new(body),
        is_entry: false,
        span: Span {
            start,
            end: close.span.end,
        },
    }))
}

/// `return [EXPR]`. Without a following expression the return carries no value.
pub fn parse_return(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.expect(TokenKind::Return)?;

    let body = if starts_expression(parser.current_token()) {
        parse_expression(parser)?.map(Box::new)
    } else {
        None
    };

    Ok(Node::Return(ReturnNode {
        body,
        span: Span {
            start: token.span.start,
            end: parser.get_last_end(),
        },
    }))
}

/// Wraps a bare top-level expression into the implicit entry function.
pub fn parse_top_level_expression(parser: &mut Parser) -> Result<Option<Node>, Error> {
    let Some(expression) = parse_expression(parser)? else {
        return Ok(None);
    };

    Ok(Some(Node::Function(FunctionNode {
        name: String::from(ENTRY_FUNCTION_NAME),
        arguments: vec![],
        return_type: ValueType::Double,
        span: expression.get_span().clone(),
        body: Box::new(expression),
        is_entry: true,
    })))
}
