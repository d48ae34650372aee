use crate::{
    ast::{
        ast::Node,
        expressions::{
            BinaryExpressionNode, CallArgument, CallExpressionNode, IfElseNode, NumberNode,
            VariableNode,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Span,
};

use super::{
    lookups::{extract_binary_operator, token_precedence, BindingPower},
    parser::Parser,
    stmt::{parse_function_definition, parse_return},
};

/// Parses one full expression. `None` means the input ended first.
pub fn parse_expression(parser: &mut Parser) -> Result<Option<Node>, Error> {
    let Some(lhs) = parse_primary(parser)? else {
        return Ok(None);
    };

    parse_binary_operator_rhs(parser, BindingPower::Default.value(), lhs).map(Some)
}

/// Like `parse_expression`, but running out of input is an error.
pub fn parse_required_expression(parser: &mut Parser, message: &str) -> Result<Node, Error> {
    match parse_expression(parser)? {
        Some(node) => Ok(node),
        None => Err(parser.unexpected(message)),
    }
}

pub fn parse_primary(parser: &mut Parser) -> Result<Option<Node>, Error> {
    match parser.current_token_kind() {
        TokenKind::Identifier => parse_identifier_expression(parser).map(Some),
        TokenKind::Integer | TokenKind::Float => parse_number(parser).map(Some),
        TokenKind::OpenParen => parse_paren(parser).map(Some),
        TokenKind::Func => parse_function_definition(parser).map(Some),
        TokenKind::Return => parse_return(parser).map(Some),
        TokenKind::If => parse_if_else(parser).map(Some),
        TokenKind::EOF => Ok(None),
        _ => {
            let token = parser.current_token();
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            ))
        }
    }
}

/// Whether `token` can begin a primary expression.
pub fn starts_expression(token: &Token) -> bool {
    token.is_one_of_many(&[
        TokenKind::Identifier,
        TokenKind::Integer,
        TokenKind::Float,
        TokenKind::OpenParen,
        TokenKind::Func,
        TokenKind::Return,
        TokenKind::If,
    ])
}

fn extract_number_literal(token: &Token) -> Option<Result<f64, Error>> {
    match token.kind {
        TokenKind::Integer | TokenKind::Float => Some(token.value.parse::<f64>().map_err(|_| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            )
        })),
        _ => None,
    }
}

pub fn parse_number(parser: &mut Parser) -> Result<Node, Error> {
    let Some(value) = extract_number_literal(parser.current_token()) else {
        return Err(parser.unexpected("any number is expected"));
    };
    let value = value?;

    Ok(Node::Number(NumberNode {
        value,
        span: parser.advance().span.clone(),
    }))
}

/// Parses a variable reference, or a call if the name is followed by `(`.
///
/// Call arguments are `label: expression` pairs separated by commas.
pub fn parse_identifier_expression(parser: &mut Parser) -> Result<Node, Error> {
    let identifier = parser.expect_detailed(TokenKind::Identifier, "any identifier is expected")?;

    if parser.current_token_kind() != TokenKind::OpenParen {
        return Ok(Node::Variable(VariableNode {
            identifier: identifier.value,
            span: identifier.span,
        }));
    }

    parser.advance();

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let label = parser
            .expect_detailed(TokenKind::Identifier, "expected an argument label")?
            .value;
        parser.expect_detailed(TokenKind::Colon, "expected `:` after the argument label")?;
        let value = parse_required_expression(parser, "expected an argument value")?;

        arguments.push(CallArgument { label, value });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    let close = parser.expect_detailed(
        TokenKind::CloseParen,
        "expected `)` to close the argument list",
    )?;

    Ok(Node::CallExpression(CallExpressionNode {
        callee: identifier.value,
        arguments,
        span: Span {
            start: identifier.span.start,
            end: close.span.end,
        },
    }))
}

/// Precedence climbing over an already parsed left operand.
///
/// Operators binding looser than `expression_precedence` end the loop. When
/// the operator after a right operand binds tighter than the one just
/// consumed, that operand is first extended with everything binding tighter
/// (threshold `precedence + 1`). Equal precedence chains therefore nest to
/// the left.
pub fn parse_binary_operator_rhs(
    parser: &mut Parser,
    expression_precedence: i32,
    lhs: Node,
) -> Result<Node, Error> {
    let mut current_lhs = lhs;

    loop {
        let Some(operator) = extract_binary_operator(parser.current_token())? else {
            return Ok(current_lhs);
        };
        let operator_precedence = token_precedence(parser.current_token())?;

        if operator_precedence < expression_precedence {
            return Ok(current_lhs);
        }

        parser.advance();

        let Some(mut rhs) = parse_primary(parser)? else {
            return Err(parser.unexpected(&format!(
                "expected an operand after `{}`",
                operator
            )));
        };

        let next_precedence = token_precedence(parser.current_token())?;
        if operator_precedence < next_precedence {
            rhs = parse_binary_operator_rhs(parser, operator_precedence + 1, rhs)?;
        }

        let span = Span {
            start: current_lhs.get_span().start.clone(),
            end: rhs.get_span().end.clone(),
        };

        current_lhs = Node::BinaryExpression(BinaryExpressionNode {
            operator,
            lhs: Box::new(current_lhs),
            rhs: Box::new(rhs),
            span,
        });
    }
}

pub fn parse_paren(parser: &mut Parser) -> Result<Node, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expression = parse_required_expression(parser, "expected an expression after `(`")?;
    parser.expect_detailed(TokenKind::CloseParen, "expected `)`")?;

    Ok(expression)
}

/// `if COND { EXPR } [else { EXPR } | else if ...]`
pub fn parse_if_else(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.expect(TokenKind::If)?.span.start;

    let condition = parse_required_expression(parser, "expected a condition after `if`")?;
    let then_body = parse_branch(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            Some(Box::new(parse_if_else(parser)?))
        } else {
            Some(Box::new(parse_branch(parser)?))
        }
    } else {
        None
    };

    Ok(Node::IfElse(IfElseNode {
        condition: Box::new(condition),
        then_body: Box::new(then_body),
        else_body,
        span: Span {
            start,
            end: parser.get_last_end(),
        },
    }))
}

fn parse_branch(parser: &mut Parser) -> Result<Node, Error> {
    parser.expect_detailed(TokenKind::OpenCurly, "expected `{` to open the branch")?;
    let body = parse_required_expression(parser, "expected an expression in the branch")?;
    parser.expect_detailed(TokenKind::CloseCurly, "expected `}` to close the branch")?;

    Ok(body)
}
