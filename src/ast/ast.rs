use super::{
    expressions::{
        AssignmentExpr, BinaryExpr, CallExpr, GroupingExpr, LiteralExpr, UnaryExpr, VariableExpr,
    },
    statements::{
        BlockStmt, ExpressionStmt, FnDeclStmt, IfStmt, PrintStmt, ReturnStmt, VarDeclStmt,
        WhileStmt,
    },
};

/// Statement
///
/// Every statement form of NanoScript. Consumers match exhaustively, so adding
/// a variant is a compile error everywhere it must be handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(BlockStmt),
    Expression(ExpressionStmt),
    FnDecl(FnDeclStmt),
    If(IfStmt),
    Print(PrintStmt),
    Return(ReturnStmt),
    VarDecl(VarDeclStmt),
    While(WhileStmt),
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Assignment(AssignmentExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
    Grouping(GroupingExpr),
    Literal(LiteralExpr),
    Unary(UnaryExpr),
    Variable(VariableExpr),
}

impl Expr {
    /// Line used when reporting a diagnostic against this expression.
    pub fn line(&self) -> u32 {
        match self {
            Expr::Assignment(expr) => expr.name.line,
            Expr::Binary(expr) => expr.operator.line,
            Expr::Call(expr) => expr.paren.line,
            Expr::Grouping(expr) => expr.expression.line(),
            Expr::Literal(expr) => expr.line,
            Expr::Unary(expr) => expr.operator.line,
            Expr::Variable(expr) => expr.name.line,
        }
    }
}
