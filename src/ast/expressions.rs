use crate::lexer::tokens::Token;

use super::{ast::Expr, types::Type};

// LITERALS

/// Value of a literal, parsed from the token's raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Literal {
    pub fn get_type(&self) -> Type {
        match self {
            Literal::Int(_) => Type::Int,
            Literal::Float(_) => Type::Float,
            Literal::Bool(_) => Type::Bool,
        }
    }
}

/// Literal Expression
/// Represents an int, float or bool literal in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: Literal,
    pub line: u32,
}

/// Variable Expression
/// Represents a reference to a variable or function by name.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    pub name: Token,
}

// COMPLEX

/// Binary Expression
/// Represents arithmetic, comparison, equality and logical operations.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

/// Grouping Expression
/// A parenthesised expression.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    pub expression: Box<Expr>,
}

/// Unary Expression
/// Represents `!` or `-` applied to an operand.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Token,
    pub right: Box<Expr>,
}

/// Assignment Expression
/// The target is always a bare variable name; the parser rejects anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub name: Token,
    pub value: Box<Expr>,
}

/// Call Expression
/// `paren` is the closing parenthesis, used to locate diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub paren: Token,
    pub arguments: Vec<Expr>,
}
