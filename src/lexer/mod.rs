//! Lexical analysis module.
//!
//! This module contains the scanner that converts NanoScript source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, type names, identifiers, literals, and operators
//! - Line tracking for diagnostics
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
