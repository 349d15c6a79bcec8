use tracing::debug;

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::{AssignmentExpr, BinaryExpr, CallExpr, UnaryExpr},
        statements::{FnDeclStmt, IfStmt, ReturnStmt, VarDeclStmt, WhileStmt},
        types::Type,
    },
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::tokens::TokenKind,
};

use super::{
    annotations::{Site, TypeAnnotation},
    options::CheckOptions,
    symbol_table::{SymbolInfo, SymbolKind, SymbolTable},
};

/// State of one analysis run.
///
/// Errors are reported as they are found and never stop the walk; an
/// expression that could not be typed evaluates to [`Type::Unknown`].
pub struct TypeChecker<'a> {
    pub symbols: SymbolTable,
    pub options: CheckOptions,
    /// Return type of the function whose body is being checked.
    pub current_function: Option<Type>,
    pub annotations: Vec<TypeAnnotation>,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> TypeChecker<'a> {
    pub fn new(options: CheckOptions, diagnostics: &'a mut Diagnostics) -> Self {
        TypeChecker {
            symbols: SymbolTable::new(),
            options,
            current_function: None,
            annotations: vec![],
            diagnostics,
        }
    }

    pub fn report(&mut self, error: ErrorImpl, line: u32) {
        self.diagnostics.report(Error::new(error, line));
    }

    pub fn annotate(&mut self, site: Site, line: u32, ty: Type) {
        self.annotations.push(TypeAnnotation { site, line, ty });
    }

    /// Declared type of `name`, if it is in scope.
    pub fn fetch_symbol_type(&self, name: &str) -> Option<Type> {
        self.symbols.lookup(name).map(|info| info.ty)
    }
}

fn type_check_binary(type_checker: &mut TypeChecker, binary: &BinaryExpr) -> Type {
    let left = type_check_expr(type_checker, &binary.left);
    let right = type_check_expr(type_checker, &binary.right);
    let operator = &binary.operator;

    match operator.kind {
        TokenKind::Plus | TokenKind::Dash | TokenKind::Star | TokenKind::Slash => {
            if !left.is_known() || !right.is_known() {
                Type::Unknown
            } else if left == Type::Int && right == Type::Int {
                Type::Int
            } else if left.is_numeric() && right.is_numeric() {
                Type::Float
            } else {
                type_checker.report(
                    ErrorImpl::OperandsMustBeNumbers {
                        operator: operator.lexeme.clone(),
                    },
                    operator.line,
                );
                Type::Unknown
            }
        }
        TokenKind::Less
        | TokenKind::LessEquals
        | TokenKind::Greater
        | TokenKind::GreaterEquals
        | TokenKind::Equals
        | TokenKind::NotEquals => {
            let comparable = (left.is_numeric() && right.is_numeric())
                || (left == Type::Bool && right == Type::Bool);
            if left.is_known() && right.is_known() && !comparable {
                type_checker.report(ErrorImpl::IncompatibleComparison { left, right }, operator.line);
            }
            Type::Bool
        }
        TokenKind::And | TokenKind::Or => {
            if !type_checker.options.strict_operands {
                return right;
            }
            if !left.is_known() || !right.is_known() {
                Type::Unknown
            } else if left == Type::Bool && right == Type::Bool {
                Type::Bool
            } else {
                type_checker.report(
                    ErrorImpl::OperandsMustBeBooleans {
                        operator: operator.lexeme.clone(),
                    },
                    operator.line,
                );
                Type::Unknown
            }
        }
        _ => Type::Unknown,
    }
}

fn type_check_unary(type_checker: &mut TypeChecker, unary: &UnaryExpr) -> Type {
    let operand = type_check_expr(type_checker, &unary.right);
    let operator = &unary.operator;
    let strict = type_checker.options.strict_operands;

    match operator.kind {
        TokenKind::Not => {
            let valid = operand == Type::Bool;
            if operand.is_known() && !valid {
                type_checker.report(
                    ErrorImpl::ExpectedBoolean {
                        operator: operator.lexeme.clone(),
                    },
                    operator.line,
                );
            }
            match (strict, valid) {
                (true, true) => Type::Bool,
                (true, false) => Type::Unknown,
                (false, _) => operand,
            }
        }
        TokenKind::Dash => {
            if !strict || !operand.is_known() || operand.is_numeric() {
                return operand;
            }
            type_checker.report(
                ErrorImpl::OperandMustBeNumber {
                    operator: operator.lexeme.clone(),
                },
                operator.line,
            );
            Type::Unknown
        }
        _ => operand,
    }
}

fn type_check_assignment(type_checker: &mut TypeChecker, assignment: &AssignmentExpr) -> Type {
    let value = type_check_expr(type_checker, &assignment.value);
    let name = &assignment.name;

    match type_checker.fetch_symbol_type(&name.lexeme) {
        Some(declared) => {
            // No widening here, unlike initializers.
            if value.is_known() && declared != value {
                type_checker.report(
                    ErrorImpl::AssignmentTypeMismatch {
                        expected: declared,
                        received: value,
                    },
                    name.line,
                );
            }
            declared
        }
        None => {
            type_checker.report(
                ErrorImpl::VariableNotDeclared {
                    variable: name.lexeme.clone(),
                },
                name.line,
            );
            value
        }
    }
}

fn type_check_call(type_checker: &mut TypeChecker, call: &CallExpr) -> Type {
    let callee_type = type_check_expr(type_checker, &call.callee);
    let arguments: Vec<Type> = call
        .arguments
        .iter()
        .map(|argument| type_check_expr(type_checker, argument))
        .collect();

    if !type_checker.options.check_call_signatures {
        return callee_type;
    }

    // Only named callees carry a signature.
    let Expr::Variable(callee) = call.callee.as_ref() else {
        return callee_type;
    };
    let Some(info) = type_checker.symbols.lookup(&callee.name.lexeme).cloned() else {
        return callee_type;
    };

    match info.kind {
        SymbolKind::Variable => {
            type_checker.report(
                ErrorImpl::NotCallable {
                    name: callee.name.lexeme.clone(),
                },
                call.paren.line,
            );
            Type::Unknown
        }
        SymbolKind::Function { parameters } => {
            if parameters.len() != arguments.len() {
                type_checker.report(
                    ErrorImpl::ArgumentCountMismatch {
                        expected: parameters.len(),
                        received: arguments.len(),
                    },
                    call.paren.line,
                );
            } else {
                for (expected, received) in parameters.iter().zip(arguments.iter()) {
                    if received.is_known() && !expected.accepts(*received) {
                        type_checker.report(
                            ErrorImpl::ArgumentTypeMatchError {
                                expected: *expected,
                                received: *received,
                            },
                            call.paren.line,
                        );
                    }
                }
            }
            callee_type
        }
    }
}

pub fn type_check_expr(type_checker: &mut TypeChecker, ast: &Expr) -> Type {
    match ast {
        Expr::Literal(literal) => literal.value.get_type(),
        Expr::Grouping(grouping) => type_check_expr(type_checker, &grouping.expression),
        Expr::Variable(variable) => match type_checker.fetch_symbol_type(&variable.name.lexeme) {
            Some(ty) => ty,
            None => {
                type_checker.report(
                    ErrorImpl::VariableNotDeclared {
                        variable: variable.name.lexeme.clone(),
                    },
                    variable.name.line,
                );
                Type::Unknown
            }
        },
        Expr::Assignment(assignment) => type_check_assignment(type_checker, assignment),
        Expr::Binary(binary) => type_check_binary(type_checker, binary),
        Expr::Unary(unary) => type_check_unary(type_checker, unary),
        Expr::Call(call) => type_check_call(type_checker, call),
    }
}

fn type_check_var_decl(type_checker: &mut TypeChecker, var_decl: &VarDeclStmt) {
    let declared = var_decl.var_type;
    let name = &var_decl.name;

    if let Some(initializer) = &var_decl.initializer {
        let actual = type_check_expr(type_checker, initializer);
        type_checker.annotate(Site::Initializer, name.line, actual);

        if actual.is_known() && !declared.accepts(actual) {
            type_checker.report(
                ErrorImpl::InitializerTypeMismatch {
                    expected: declared,
                    received: actual,
                },
                name.line,
            );
        }
    }

    let info = SymbolInfo::variable(declared, var_decl.initializer.is_some());
    if !type_checker.symbols.declare(&name.lexeme, info) {
        type_checker.report(
            ErrorImpl::VariableAlreadyDeclared {
                variable: name.lexeme.clone(),
            },
            name.line,
        );
    }
}

fn type_check_fn_decl(type_checker: &mut TypeChecker, fn_decl: &FnDeclStmt) {
    let name = &fn_decl.name;

    // Declared before the body so the function can call itself.
    let info = SymbolInfo::function(fn_decl.return_type, fn_decl.parameter_types());
    if !type_checker.symbols.declare(&name.lexeme, info) {
        type_checker.report(
            ErrorImpl::FunctionAlreadyDeclared {
                function: name.lexeme.clone(),
            },
            name.line,
        );
    }

    let enclosing = type_checker.current_function.replace(fn_decl.return_type);
    type_checker.symbols.begin_scope();

    for parameter in fn_decl.parameters.iter() {
        let info = SymbolInfo::variable(parameter.param_type, true);
        if !type_checker.symbols.declare(&parameter.name.lexeme, info) {
            type_checker.report(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: parameter.name.lexeme.clone(),
                },
                parameter.name.line,
            );
        }
    }

    for stmt in fn_decl.body.iter() {
        type_check_stmt(type_checker, stmt);
    }

    type_checker.symbols.end_scope();
    type_checker.current_function = enclosing;
}

fn type_check_return(type_checker: &mut TypeChecker, return_stmt: &ReturnStmt) {
    let line = return_stmt.keyword.line;
    let expected = type_checker.current_function;

    if expected.is_none() {
        type_checker.report(ErrorImpl::ReturnOutsideFunction, line);
    }

    let Some(value) = &return_stmt.value else {
        return;
    };
    let actual = type_check_expr(type_checker, value);
    type_checker.annotate(Site::Return, line, actual);

    if let Some(expected) = expected {
        // Exact match only, no int -> float widening.
        if actual.is_known() && actual != expected {
            type_checker.report(
                ErrorImpl::ReturnTypeMismatch {
                    expected,
                    received: actual,
                },
                line,
            );
        }
    }
}

fn type_check_condition(type_checker: &mut TypeChecker, condition: &Expr, line: u32) {
    let ty = type_check_expr(type_checker, condition);
    type_checker.annotate(Site::Condition, line, ty);

    if type_checker.options.strict_conditions && ty.is_known() && ty != Type::Bool {
        type_checker.report(ErrorImpl::ConditionNotBoolean { received: ty }, line);
    }
}

fn type_check_if(type_checker: &mut TypeChecker, if_stmt: &IfStmt) {
    type_check_condition(type_checker, &if_stmt.condition, if_stmt.keyword.line);
    type_check_stmt(type_checker, &if_stmt.then_body);
    if let Some(else_body) = &if_stmt.else_body {
        type_check_stmt(type_checker, else_body);
    }
}

fn type_check_while(type_checker: &mut TypeChecker, while_stmt: &WhileStmt) {
    type_check_condition(type_checker, &while_stmt.condition, while_stmt.keyword.line);
    type_check_stmt(type_checker, &while_stmt.body);
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, ast: &Stmt) {
    match ast {
        Stmt::Block(block) => type_check_block(type_checker, &block.body),
        Stmt::Expression(expression_stmt) => {
            let expression = &expression_stmt.expression;
            let ty = type_check_expr(type_checker, expression);
            type_checker.annotate(Site::Expression, expression.line(), ty);
        }
        Stmt::Print(print_stmt) => {
            let ty = type_check_expr(type_checker, &print_stmt.expression);
            type_checker.annotate(Site::Print, print_stmt.keyword.line, ty);
        }
        Stmt::VarDecl(var_decl) => type_check_var_decl(type_checker, var_decl),
        Stmt::FnDecl(fn_decl) => type_check_fn_decl(type_checker, fn_decl),
        Stmt::Return(return_stmt) => type_check_return(type_checker, return_stmt),
        Stmt::If(if_stmt) => type_check_if(type_checker, if_stmt),
        Stmt::While(while_stmt) => type_check_while(type_checker, while_stmt),
    }
}

/// Checks the statements of a block in a fresh scope.
pub fn type_check_block(type_checker: &mut TypeChecker, body: &[Stmt]) {
    type_checker.symbols.begin_scope();
    for stmt in body.iter() {
        type_check_stmt(type_checker, stmt);
    }
    type_checker.symbols.end_scope();
}

/// Walks a whole program once, reporting semantic errors into `diagnostics`.
///
/// Names must be declared before use; there is no hoisting, not even for
/// top-level functions. Returns the type of every statement-level expression
/// in source order.
pub fn type_check(
    ast: &[Stmt],
    options: CheckOptions,
    diagnostics: &mut Diagnostics,
) -> Vec<TypeAnnotation> {
    let before = diagnostics.len();
    let mut type_checker = TypeChecker::new(options, diagnostics);

    for stmt in ast.iter() {
        type_check_stmt(&mut type_checker, stmt);
    }

    let TypeChecker { annotations, diagnostics, .. } = type_checker;
    debug!(
        annotations = annotations.len(),
        errors = diagnostics.len() - before,
        "semantic analysis finished"
    );

    annotations
}
