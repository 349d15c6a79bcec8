//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, type names and identifiers
//! - Integer and float literals
//! - Operators and punctuation
//! - Comments, whitespace and line tracking
//! - Error cases

use crate::errors::diagnostics::Diagnostics;

use super::{
    lexer::tokenize,
    tokens::{Token, TokenKind},
};

fn scan(source: &str) -> (Vec<Token>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(source, &mut diagnostics);
    (tokens, diagnostics)
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let (tokens, diagnostics) =
        scan("and else false func if or print return true var while int float bool");

    assert!(!diagnostics.had_error());
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::And,
            TokenKind::Else,
            TokenKind::False,
            TokenKind::Func,
            TokenKind::If,
            TokenKind::Or,
            TokenKind::Print,
            TokenKind::Return,
            TokenKind::True,
            TokenKind::Var,
            TokenKind::While,
            TokenKind::TypeInt,
            TokenKind::TypeFloat,
            TokenKind::TypeBool,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let (tokens, _) = scan("foo bar_1 _under Printer variable");

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].lexeme, "foo");
    assert_eq!(tokens[1].lexeme, "bar_1");
    assert_eq!(tokens[2].lexeme, "_under");
    // Keywords only match whole words.
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let (tokens, _) = scan("42 3.14 0 100.5");

    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[0].literal.as_deref(), Some("42"));
    assert_eq!(tokens[1].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[1].literal.as_deref(), Some("3.14"));
    assert_eq!(tokens[2].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[3].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_trailing_dot_is_not_part_of_number() {
    let (tokens, _) = scan("1.");

    assert_eq!(kinds(&tokens), vec![TokenKind::IntLiteral, TokenKind::Dot, TokenKind::EOF]);
}

#[test]
fn test_boolean_literals_carry_raw_text() {
    let (tokens, _) = scan("true false");

    assert_eq!(tokens[0].literal.as_deref(), Some("true"));
    assert_eq!(tokens[1].literal.as_deref(), Some("false"));
}

#[test]
fn test_tokenize_operators() {
    let (tokens, _) = scan("+ - * / == != < > <= >= = !");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    let (tokens, _) = scan("( ) { } . , ;");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_operators_without_whitespace() {
    let (tokens, _) = scan("x>=1==y");

    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Identifier,
            TokenKind::GreaterEquals,
            TokenKind::IntLiteral,
            TokenKind::Equals,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    let (tokens, diagnostics) = scan("var int x = 1; // trailing comment\n// whole line\nprint(x);");

    assert!(!diagnostics.had_error());
    assert_eq!(tokens[6].kind, TokenKind::Print);
    assert_eq!(tokens[6].line, 3);
}

#[test]
fn test_line_numbers_advance_on_newlines() {
    let (tokens, _) = scan("var\nint\n\nx");

    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 2);
    assert_eq!(tokens[2].line, 4);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
    assert_eq!(tokens[3].line, 4);
}

#[test]
fn test_tokenize_strings() {
    let (tokens, diagnostics) = scan("\"hello\" \"two\nlines\" x");

    assert!(!diagnostics.had_error());
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, "\"hello\"");
    assert_eq!(tokens[0].literal.as_deref(), Some("hello"));
    assert_eq!(tokens[1].literal.as_deref(), Some("two\nlines"));
    assert_eq!(tokens[1].line, 1);
    assert_eq!(tokens[2].line, 2);
}

#[test]
fn test_unterminated_string_is_reported() {
    let (tokens, diagnostics) = scan("print(1);\n\"never closed");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.errors()[0].get_error_name(), "UnterminatedString");
    assert_eq!(diagnostics.errors()[0].get_line(), 2);
    assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EOF));
}

#[test]
fn test_unexpected_characters_are_skipped() {
    let (tokens, diagnostics) = scan("var int x = 1 @ 2;\n#");

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.errors()[0].message(), "Unexpected character '@'.");
    assert_eq!(diagnostics.errors()[0].get_line(), 1);
    assert_eq!(diagnostics.errors()[1].get_line(), 2);
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::Var,
            TokenKind::TypeInt,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::IntLiteral,
            TokenKind::IntLiteral,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_empty_source_is_just_eof() {
    let (tokens, diagnostics) = scan("");

    assert!(!diagnostics.had_error());
    assert_eq!(kinds(&tokens), vec![TokenKind::EOF]);
    assert_eq!(tokens[0].line, 1);
}
