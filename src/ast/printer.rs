//! S-expression rendering of the AST, used by `--dump-ast` and by tests to
//! assert tree shape.

use std::fmt::{Display, Formatter, Result};

use super::{
    ast::{Expr, Stmt},
    expressions::Literal,
};

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Literal::Int(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{:?}", value),
            Literal::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expr::Assignment(expr) => write!(f, "(= {} {})", expr.name.lexeme, expr.value),
            Expr::Binary(expr) => {
                write!(f, "({} {} {})", expr.operator.lexeme, expr.left, expr.right)
            }
            Expr::Call(expr) => {
                write!(f, "(call {}", expr.callee)?;
                for argument in &expr.arguments {
                    write!(f, " {}", argument)?;
                }
                write!(f, ")")
            }
            Expr::Grouping(expr) => write!(f, "(group {})", expr.expression),
            Expr::Literal(expr) => write!(f, "{}", expr.value),
            Expr::Unary(expr) => write!(f, "({} {})", expr.operator.lexeme, expr.right),
            Expr::Variable(expr) => write!(f, "{}", expr.name.lexeme),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Stmt::Block(block) => {
                write!(f, "(block")?;
                for stmt in block.iter() {
                    write!(f, " {}", stmt)?;
                }
                write!(f, ")")
            }
            Stmt::Expression(stmt) => write!(f, "(; {})", stmt.expression),
            Stmt::FnDecl(stmt) => {
                write!(f, "(func {} {} (", stmt.return_type, stmt.name.lexeme)?;
                for (i, param) in stmt.parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{} {}", param.param_type, param.name.lexeme)?;
                }
                write!(f, ")")?;
                for body_stmt in &stmt.body {
                    write!(f, " {}", body_stmt)?;
                }
                write!(f, ")")
            }
            Stmt::If(stmt) => {
                write!(f, "(if {} {}", stmt.condition, stmt.then_body)?;
                if let Some(else_body) = &stmt.else_body {
                    write!(f, " {}", else_body)?;
                }
                write!(f, ")")
            }
            Stmt::Print(stmt) => write!(f, "(print {})", stmt.expression),
            Stmt::Return(stmt) => match &stmt.value {
                Some(value) => write!(f, "(return {})", value),
                None => write!(f, "(return)"),
            },
            Stmt::VarDecl(stmt) => match &stmt.initializer {
                Some(initializer) => {
                    write!(f, "(var {} {} {})", stmt.var_type, stmt.name.lexeme, initializer)
                }
                None => write!(f, "(var {} {})", stmt.var_type, stmt.name.lexeme),
            },
            Stmt::While(stmt) => write!(f, "(while {} {})", stmt.condition, stmt.body),
        }
    }
}
