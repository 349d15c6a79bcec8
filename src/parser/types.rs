//! Type parsing implementation.
//!
//! NanoScript types are single keywords (`int`, `float`, `bool`), so only
//! NUD handlers are registered. Anything else where a type is required is a
//! fatal error for the enclosing declaration.

use std::collections::HashMap;

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser<'_>) -> Result<Type, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
pub fn create_token_type_lookups(parser: &mut Parser<'_>) {
    parser.type_nud(TokenKind::TypeInt, parse_keyword_type);
    parser.type_nud(TokenKind::TypeFloat, parse_keyword_type);
    parser.type_nud(TokenKind::TypeBool, parse_keyword_type);
}

pub fn parse_keyword_type(parser: &mut Parser<'_>) -> Result<Type, Error> {
    let token = parser.advance().clone();
    Type::from_token_kind(token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::ExpectedType {
                expected: String::from("Expect type."),
                found: token.describe(),
            },
            token.line,
        )
    })
}

/// Parses a type keyword, failing with `message` when the current token is
/// not one.
pub fn parse_type(parser: &mut Parser<'_>, message: &str) -> Result<Type, Error> {
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        let token = parser.current_token();
        return Err(Error::new(
            ErrorImpl::ExpectedType {
                expected: message.to_string(),
                found: token.describe(),
            },
            token.line,
        ));
    };

    nud(parser)
}
