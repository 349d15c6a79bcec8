//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parsing entry point.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! It maintains lookup tables for:
//! - Declaration handlers (`func`, `var`)
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers
//!
//! Syntax errors travel up as `Err` until the nearest declaration, where they
//! are reported and the parser resynchronizes on a statement boundary.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::ast::Stmt,
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, DeclLookup, LEDHandler, LEDLookup,
        NUDHandler, NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_declaration,
    types::{create_token_type_lookups, TypeNUDHandler, TypeNUDLookup},
};

/// Deepest nesting the parser follows before giving up on a declaration.
///
/// Every nested declaration, statement and expression counts one level, as
/// does each operator folded into a left-associative chain. This bounds the
/// recursion of the parser and of everything that later walks the tree.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and maintains lookup tables for
/// parsing declarations, statements, expressions, and types. Errors that do
/// not abort the current declaration are reported straight into `diagnostics`.
pub struct Parser<'a> {
    /// The list of tokens to parse, always ending with EOF
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Collector shared with the rest of the pipeline
    diagnostics: &'a mut Diagnostics,
    /// Current nesting level, see [`MAX_NESTING_DEPTH`]
    nesting_depth: usize,
    /// Lookup table for declaration handlers
    decl_lookup: DeclLookup,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type handlers
    type_nud_lookup: TypeNUDLookup,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser instance.
    ///
    /// A stream that does not end with EOF gets one appended on the line of
    /// its last token, so the cursor can never run off the end.
    pub fn new(mut tokens: Vec<Token>, diagnostics: &'a mut Diagnostics) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let line = tokens.last().map(|token| token.line).unwrap_or(1);
            tokens.push(Token {
                kind: TokenKind::EOF,
                lexeme: String::new(),
                literal: None,
                line,
            });
        }

        Parser {
            tokens,
            pos: 0,
            diagnostics,
            nesting_depth: 0,
            decl_lookup: HashMap::new(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the most recently consumed token.
    pub fn previous_token(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    /// Advances to the next token and returns the one just consumed.
    ///
    /// The cursor never moves past EOF.
    pub fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous_token()
    }

    pub fn is_at_end(&self) -> bool {
        self.current_token_kind() == TokenKind::EOF
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        !self.is_at_end()
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.current_token_kind() == kind
    }

    /// Consumes the current token if it has the given kind.
    pub fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a token of the specified kind.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `message` - Diagnostic text used when the expectation fails
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise an
    /// `UnexpectedToken` error located on the current token's line.
    pub fn expect(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        if self.check(expected_kind) {
            return Ok(self.advance().clone());
        }

        let token = self.current_token();
        Err(Error::new(
            ErrorImpl::UnexpectedToken {
                expected: message.to_string(),
                found: token.describe(),
            },
            token.line,
        ))
    }

    /// Records an error that does not abort the current declaration.
    pub fn report(&mut self, error: Error) {
        self.diagnostics.report(error);
    }

    /// Discards tokens until a likely statement boundary.
    ///
    /// Stops right after a `;`, before a declaration or statement keyword, or
    /// at end of input. Always consumes at least one token when not at EOF.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous_token().kind == TokenKind::Semicolon {
                break;
            }
            if self.current_token_kind().starts_statement() {
                break;
            }
            self.advance();
        }

        trace!(
            line = self.current_token().line,
            "resynchronized at {}",
            self.current_token_kind()
        );
    }

    /// Goes one nesting level deeper.
    ///
    /// Fails with `NestingTooDeep` once [`MAX_NESTING_DEPTH`] is exceeded.
    /// The level is given back by the enclosing [`Parser::nested`] call.
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            let line = self.current_token().line;
            trace!(line, depth = self.nesting_depth, "nesting limit reached");
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    max: MAX_NESTING_DEPTH,
                },
                line,
            ));
        }

        self.nesting_depth += 1;
        Ok(())
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// Every level entered while `parse` runs, including those entered with
    /// [`Parser::enter_nesting`], is released when it returns.
    pub fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let depth = self.nesting_depth;
        let result = match self.enter_nesting() {
            Ok(()) => parse(self),
            Err(error) => Err(error),
        };
        self.nesting_depth = depth;
        result
    }

    /// Discards the rest of a declaration that nested too deeply.
    ///
    /// Works like [`Parser::synchronize`] but skips whole `{ ... }` groups
    /// and never consumes the `}` that closes an enclosing block.
    pub fn synchronize_nested(&mut self) {
        let mut open_braces = 0usize;

        while !self.is_at_end() {
            let kind = self.advance().kind;
            match kind {
                TokenKind::OpenCurly => open_braces += 1,
                TokenKind::CloseCurly => open_braces = open_braces.saturating_sub(1),
                _ => {}
            }

            if open_braces > 0 {
                continue;
            }
            if matches!(kind, TokenKind::Semicolon | TokenKind::CloseCurly) {
                break;
            }

            let next = self.current_token_kind();
            if next == TokenKind::CloseCurly || next.starts_statement() {
                break;
            }
        }

        trace!(
            line = self.current_token().line,
            "skipped nested declaration, resuming at {}",
            self.current_token_kind()
        );
    }

    /// Returns a reference to the declaration lookup table.
    pub fn get_decl_lookup(&self) -> &DeclLookup {
        &self.decl_lookup
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Returns a reference to the type lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Binding power of the current token, `Default` for non-operators.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current_token_kind())
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a declaration handler for a token.
    ///
    /// Declarations are only accepted where the grammar allows a declaration
    /// (top level and directly inside blocks), not as the body of `if`/`while`.
    pub fn decl(&mut self, kind: TokenKind, decl_fn: StmtHandler) {
        self.decl_lookup.insert(kind, decl_fn);
    }

    /// Registers a type handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }
}

/// Parses a stream of tokens into a list of top-level statements.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses declarations until EOF. Syntax
/// errors are reported into `diagnostics`; the returned list holds every
/// declaration that parsed successfully.
pub fn parse(tokens: Vec<Token>, diagnostics: &mut Diagnostics) -> Vec<Stmt> {
    let mut parser = Parser::new(tokens, diagnostics);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let mut body = vec![];

    while parser.has_tokens() {
        if let Some(stmt) = parse_declaration(&mut parser) {
            body.push(stmt);
        }
    }

    debug!(statements = body.len(), "parsed program");

    body
}
