use std::fmt::Display;

/// The value types a function may produce.
///
/// The language has a single numeric type; every numeric annotation
/// (`Int`, `Double`, `Float`, ...) maps onto it. `Void` is only valid as a
/// return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Double,
    Void,
}

impl ValueType {
    pub fn from_annotation(annotation: &str) -> Self {
        match annotation {
            "Void" => ValueType::Void,
            _ => ValueType::Double,
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Double => write!(f, "Double"),
            ValueType::Void => write!(f, "Void"),
        }
    }
}
