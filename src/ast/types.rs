use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// The static types of NanoScript.
///
/// `Unknown` never appears in source. The type checker assigns it to
/// expressions it could not resolve so that enclosing expressions can keep
/// being checked without reporting the same problem again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    Bool,
    Unknown,
}

impl Type {
    /// Maps a type keyword (`int`, `float`, `bool`) to its type.
    pub fn from_token_kind(kind: TokenKind) -> Option<Type> {
        match kind {
            TokenKind::TypeInt => Some(Type::Int),
            TokenKind::TypeFloat => Some(Type::Float),
            TokenKind::TypeBool => Some(Type::Bool),
            _ => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    pub fn is_known(self) -> bool {
        self != Type::Unknown
    }

    /// Whether a value of type `actual` may initialise a slot of this type.
    ///
    /// Exact matches are accepted, plus the single widening `int` -> `float`.
    pub fn accepts(self, actual: Type) -> bool {
        self == actual || (self == Type::Float && actual == Type::Int)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Bool => write!(f, "bool"),
            Type::Unknown => write!(f, "unknown"),
        }
    }
}
