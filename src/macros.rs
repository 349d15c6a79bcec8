//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed-text tokens
//!
//! These macros reduce boilerplate in the lexer pattern table.

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntLiteral, "42".to_string(), Some("42".to_string()), 1);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $literal:expr, $line:expr) => {
        Token {
            kind: $kind,
            lexeme: $lexeme,
            literal: $literal,
            line: $line,
        }
    };
}

/// Creates a default lexer handler for punctuation and operators.
///
/// The generated handler pushes a token with the given kind on the current
/// line and advances the lexer past the fixed text.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            let line = lexer.line;
            lexer.push(MK_TOKEN!($kind, String::from($value), None, line));
            lexer.advance_n($value.len());
        }
    };
}
