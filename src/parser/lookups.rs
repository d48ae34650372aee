use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::expressions::BinaryOperator,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

/// Operator precedence tiers. Higher binds tighter.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    /// Anything that is not a binary operator
    None = -1,
    Default = 0,
    Relational = 10,
    Additive = 20,
    Multiplicative = 40,
}

impl BindingPower {
    pub fn value(self) -> i32 {
        self as i32
    }
}

lazy_static! {
    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, (BinaryOperator, BindingPower)> = {
        let mut map = HashMap::new();
        map.insert("<", (BinaryOperator::LessThan, BindingPower::Relational));
        map.insert("+", (BinaryOperator::Add, BindingPower::Additive));
        map.insert("-", (BinaryOperator::Sub, BindingPower::Additive));
        map.insert("*", (BinaryOperator::Mul, BindingPower::Multiplicative));
        map.insert("/", (BinaryOperator::Div, BindingPower::Multiplicative));
        map
    };
}

pub fn binding_power(operator: BinaryOperator) -> BindingPower {
    OPERATOR_LOOKUP
        .get(operator.symbol())
        .map(|(_, binding_power)| *binding_power)
        .unwrap_or(BindingPower::None)
}

/// Classifies a token as a binary operator.
///
/// Non-operator tokens yield `Ok(None)`. Operator symbols the lexer knows
/// but that have no meaning here (`==`, `%`, ...) are an error rather than
/// the end of the expression.
pub fn extract_binary_operator(token: &Token) -> Result<Option<BinaryOperator>, Error> {
    if token.kind != TokenKind::Operator {
        return Ok(None);
    }

    match OPERATOR_LOOKUP.get(token.value.as_str()) {
        Some((operator, _)) => Ok(Some(*operator)),
        None => Err(Error::new(
            ErrorImpl::NotImplementedError {
                construct: format!("operator `{}`", token.value),
            },
            token.span.start.clone(),
        )),
    }
}

/// Precedence of the operator at `token`, `BindingPower::None` if it is not one.
pub fn token_precedence(token: &Token) -> Result<i32, Error> {
    Ok(extract_binary_operator(token)?
        .map(binding_power)
        .unwrap_or(BindingPower::None)
        .value())
}
