use crate::{
    ast::{
        ast::Stmt,
        statements::{
            BlockStmt, ExpressionStmt, FnDeclStmt, IfStmt, Parameter, PrintStmt, ReturnStmt,
            VarDeclStmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{
        expr::{parse_expr, MAX_ARGUMENTS},
        lookups::BindingPower,
    },
};

use super::{parser::Parser, types::parse_type};

/// Parses one declaration, recovering from any syntax error inside it.
///
/// This is the only place fatal syntax errors are caught: the error is
/// reported, the parser skips to the next statement boundary and `None` is
/// returned so the caller simply moves on. A declaration that nests too deeply
/// is skipped as a whole, braces included.
pub fn parse_declaration(parser: &mut Parser<'_>) -> Option<Stmt> {
    let result = parser.nested(|parser| {
        let handler = parser.get_decl_lookup().get(&parser.current_token_kind()).copied();
        match handler {
            Some(handler) => handler(parser),
            None => parse_stmt(parser),
        }
    });

    match result {
        Ok(stmt) => Some(stmt),
        Err(error) => {
            let too_deep = matches!(error.get_kind(), ErrorImpl::NestingTooDeep { .. });
            parser.report(error);
            if too_deep {
                parser.synchronize_nested();
            } else {
                parser.synchronize();
            }
            None
        }
    }
}

pub fn parse_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    parser.nested(parse_nested_stmt)
}

fn parse_nested_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::Semicolon, "Expect ';' after expression.")?;

    Ok(Stmt::Expression(ExpressionStmt { expression }))
}

pub fn parse_var_decl_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    parser.advance();

    let var_type = parse_type(parser, "Expect variable type after 'var'.")?;
    let name = parser.expect(TokenKind::Identifier, "Expect variable name.")?;

    let initializer = if parser.matches(TokenKind::Assignment) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(
        TokenKind::Semicolon,
        "Expect ';' after variable declaration.",
    )?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        name,
        var_type,
        initializer,
    }))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    parser.advance();

    let return_type = parse_type(
        parser,
        "Expected return type (int/float/bool) before function name.",
    )?;
    let name = parser.expect(TokenKind::Identifier, "Expect function name.")?;

    parser.expect(TokenKind::OpenParen, "Expect '(' after function name.")?;

    let mut parameters = Vec::new();
    if !parser.check(TokenKind::CloseParen) {
        loop {
            if parameters.len() == MAX_ARGUMENTS {
                let line = parser.current_token().line;
                parser.report(Error::new(
                    ErrorImpl::TooManyParameters { max: MAX_ARGUMENTS },
                    line,
                ));
            }

            let param_type = parse_type(parser, "Expect parameter type.")?;
            let param_name = parser.expect(TokenKind::Identifier, "Expect parameter name.")?;
            parameters.push(Parameter {
                name: param_name,
                param_type,
            });

            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen, "Expect ')' after parameters.")?;
    parser.expect(TokenKind::OpenCurly, "Expect '{' before function body.")?;

    let body = parse_block_body(parser)?;

    Ok(Stmt::FnDecl(FnDeclStmt {
        name,
        return_type,
        parameters,
        body,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let keyword = parser.advance().clone();

    parser.expect(TokenKind::OpenParen, "Expect '(' after 'if'.")?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen, "Expect ')' after if condition.")?;

    let then_body = parse_stmt(parser)?;

    // A dangling else belongs to the innermost if.
    let else_body = if parser.matches(TokenKind::Else) {
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        keyword,
        condition,
        then_body: Box::new(then_body),
        else_body,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let keyword = parser.advance().clone();

    parser.expect(TokenKind::OpenParen, "Expect '(' after 'while'.")?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen, "Expect ')' after condition.")?;

    let body = parse_stmt(parser)?;

    Ok(Stmt::While(WhileStmt {
        keyword,
        condition,
        body: Box::new(body),
    }))
}

pub fn parse_print_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let keyword = parser.advance().clone();

    parser.expect(TokenKind::OpenParen, "Expect '(' after 'print'.")?;
    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen, "Expect ')' after value.")?;
    parser.expect(TokenKind::Semicolon, "Expect ';' after value.")?;

    Ok(Stmt::Print(PrintStmt {
        keyword,
        expression,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    let keyword = parser.advance().clone();

    let value = if !parser.check(TokenKind::Semicolon) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon, "Expect ';' after return value.")?;

    Ok(Stmt::Return(ReturnStmt { keyword, value }))
}

pub fn parse_block_stmt(parser: &mut Parser<'_>) -> Result<Stmt, Error> {
    parser.advance();

    let body = parse_block_body(parser)?;

    Ok(Stmt::Block(BlockStmt { body }))
}

/// Parses declarations up to and including the closing `}`.
///
/// Errors inside the block are recovered per declaration, so only a missing
/// `}` escapes from here.
pub fn parse_block_body(parser: &mut Parser<'_>) -> Result<Vec<Stmt>, Error> {
    let mut statements = Vec::new();
    while !parser.check(TokenKind::CloseCurly) && parser.has_tokens() {
        if let Some(stmt) = parse_declaration(parser) {
            statements.push(stmt);
        }
    }

    parser.expect(TokenKind::CloseCurly, "Expect '}' after block.")?;

    Ok(statements)
}
