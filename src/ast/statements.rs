use std::slice::Iter;

use crate::lexer::tokens::Token;

use super::{ast::{Expr, Stmt}, types::Type};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub name: Token,
    pub var_type: Type,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub keyword: Token,
    pub condition: Expr,
    pub then_body: Box<Stmt>,
    pub else_body: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub keyword: Token,
    pub condition: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub keyword: Token,
    pub expression: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Token,
    pub param_type: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub name: Token,
    pub return_type: Type,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Stmt>,
}

impl FnDeclStmt {
    pub fn parameter_types(&self) -> Vec<Type> {
        self.parameters.iter().map(|param| param.param_type).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub keyword: Token,
    pub value: Option<Expr>,
}
