use std::fmt::Display;

use thiserror::Error;

use crate::ast::types::Type;

/// A single diagnostic: what went wrong and on which source line.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error: {internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    line: u32,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, line: u32) -> Self {
        Error {
            internal_error: error_impl,
            line,
        }
    }

    pub fn get_line(&self) -> u32 {
        self.line
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The bare message without the `[line N]` prefix.
    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedType { .. } => "ExpectedType",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::TooManyArguments { .. } => "TooManyArguments",
            ErrorImpl::TooManyParameters { .. } => "TooManyParameters",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::InitializerTypeMismatch { .. } => "InitializerTypeMismatch",
            ErrorImpl::AssignmentTypeMismatch { .. } => "AssignmentTypeMismatch",
            ErrorImpl::OperandsMustBeNumbers { .. } => "OperandsMustBeNumbers",
            ErrorImpl::OperandMustBeNumber { .. } => "OperandMustBeNumber",
            ErrorImpl::OperandsMustBeBooleans { .. } => "OperandsMustBeBooleans",
            ErrorImpl::IncompatibleComparison { .. } => "IncompatibleComparison",
            ErrorImpl::ExpectedBoolean { .. } => "ExpectedBoolean",
            ErrorImpl::ConditionNotBoolean { .. } => "ConditionNotBoolean",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { expected, found } if expected.contains("';'") => {
                ErrorTip::Suggestion(format!(
                    "Unexpected token: `{}`, did you miss a semicolon?",
                    found
                ))
            }
            ErrorImpl::UnexpectedToken { found, .. }
            | ErrorImpl::ExpectedExpression { found } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", found))
            }
            ErrorImpl::ExpectedType { found, .. } => ErrorTip::Suggestion(format!(
                "Unknown type `{}`, expected one of `int`, `float` or `bool`",
                found
            )),
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "Split the expression or block into smaller pieces",
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::VariableNotDeclared { variable } => ErrorTip::Suggestion(format!(
                "Declare `{}` with `var <type> {};` before using it",
                variable, variable
            )),
            ErrorImpl::AssignmentTypeMismatch {
                expected: Type::Float,
                received: Type::Int,
            } => ErrorTip::Suggestion(String::from(
                "`int` only widens to `float` in declarations, not in assignments",
            )),
            ErrorImpl::ReturnTypeMismatch {
                expected: Type::Float,
                received: Type::Int,
            } => ErrorTip::Suggestion(String::from(
                "`int` only widens to `float` in declarations, not in return values",
            )),
            _ => ErrorTip::None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Scanning
    #[error("Unexpected character '{character}'.")]
    UnexpectedCharacter { character: char },
    #[error("Unterminated string.")]
    UnterminatedString,

    // Parsing
    #[error("{expected}")]
    UnexpectedToken { expected: String, found: String },
    #[error("{expected}")]
    ExpectedType { expected: String, found: String },
    #[error("Expect expression.")]
    ExpectedExpression { found: String },
    #[error("Invalid number literal '{token}'.")]
    NumberParseError { token: String },
    #[error("Invalid assignment target.")]
    InvalidAssignmentTarget,
    #[error("Can't have more than {max} arguments.")]
    TooManyArguments { max: usize },
    #[error("Can't have more than {max} parameters.")]
    TooManyParameters { max: usize },
    #[error("Nesting is too deep (maximum {max} levels).")]
    NestingTooDeep { max: usize },

    // Semantic analysis
    #[error("Variable '{variable}' already declared in this scope.")]
    VariableAlreadyDeclared { variable: String },
    #[error("Function '{function}' already declared in this scope.")]
    FunctionAlreadyDeclared { function: String },
    #[error("Undefined variable '{variable}'.")]
    VariableNotDeclared { variable: String },
    #[error("Type mismatch in initialization: expected {expected}, got {received}.")]
    InitializerTypeMismatch { expected: Type, received: Type },
    #[error("Type mismatch in assignment: expected {expected}, got {received}.")]
    AssignmentTypeMismatch { expected: Type, received: Type },
    #[error("Operands of '{operator}' must be numbers.")]
    OperandsMustBeNumbers { operator: String },
    #[error("Operand of '{operator}' must be a number.")]
    OperandMustBeNumber { operator: String },
    #[error("Operands of '{operator}' must be booleans.")]
    OperandsMustBeBooleans { operator: String },
    #[error("Cannot compare incompatible types {left} and {right}.")]
    IncompatibleComparison { left: Type, right: Type },
    #[error("Expected boolean for '{operator}' operator.")]
    ExpectedBoolean { operator: String },
    #[error("Condition must be a boolean, got {received}.")]
    ConditionNotBoolean { received: Type },
    #[error("Cannot return from top-level code.")]
    ReturnOutsideFunction,
    #[error("Return value does not match function type: expected {expected}, got {received}.")]
    ReturnTypeMismatch { expected: Type, received: Type },
    #[error("Can only call functions, '{name}' is a variable.")]
    NotCallable { name: String },
    #[error("Expected {expected} arguments but got {received}.")]
    ArgumentCountMismatch { expected: usize, received: usize },
    #[error("Argument type mismatch: expected {expected}, got {received}.")]
    ArgumentTypeMatchError { expected: Type, received: Type },
}
