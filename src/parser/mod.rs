//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a list of top-level statements. It uses a Pratt parser for
//! expressions with proper operator precedence and handles:
//!
//! - Declarations (`var`, `func`) and statements (`if`, `while`, `print`, `return`, blocks)
//! - Expressions (assignment, logical, equality, comparison, arithmetic, unary, calls)
//! - Type keywords in declarations
//! - Panic-mode error recovery at declaration boundaries
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
