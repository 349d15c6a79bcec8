use tracing::trace;

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            AssignmentExpr, BinaryExpr, CallExpr, GroupingExpr, Literal, LiteralExpr, UnaryExpr,
            VariableExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Upper bound on call arguments and function parameters.
pub const MAX_ARGUMENTS: usize = 255;

pub fn parse_expr(parser: &mut Parser<'_>, bp: BindingPower) -> Result<Expr, Error> {
    parser.nested(|parser| parse_nested_expr(parser, bp))
}

fn parse_nested_expr(parser: &mut Parser<'_>, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = parser.get_nud_lookup().get(&token_kind).copied();
    let Some(nud) = nud else {
        let token = parser.current_token();
        return Err(Error::new(
            ErrorImpl::ExpectedExpression { found: token.describe() },
            token.line,
        ));
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };

        // Folding deepens the tree on the left.
        parser.enter_nesting()?;
        let led_bp = parser.current_binding_power();
        left = led(parser, left, led_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let token = parser.advance().clone();
    if token.kind == TokenKind::Identifier {
        return Ok(Expr::Variable(VariableExpr { name: token }));
    }

    let text = token.literal.as_deref().unwrap_or(&token.lexeme);
    let value = match token.kind {
        TokenKind::IntLiteral => text.parse::<i64>().map(Literal::Int).ok(),
        TokenKind::FloatLiteral => text.parse::<f64>().map(Literal::Float).ok(),
        TokenKind::True => Some(Literal::Bool(true)),
        TokenKind::False => Some(Literal::Bool(false)),
        _ => {
            return Err(Error::new(
                ErrorImpl::ExpectedExpression { found: token.describe() },
                token.line,
            ))
        }
    };

    match value {
        Some(value) => Ok(Expr::Literal(LiteralExpr { value, line: token.line })),
        None => Err(Error::new(
            ErrorImpl::NumberParseError { token: text.to_string() },
            token.line,
        )),
    }
}

pub fn parse_binary_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator = parser.advance().clone();

    // Same-level operators stay in the caller's loop, so chains fold left.
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    let operator = parser.advance().clone();
    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(UnaryExpr {
        operator,
        right: Box::new(right),
    }))
}

pub fn parse_assignment_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let equals = parser.advance().clone();
    // Right associative: the value may itself be an assignment.
    let value = parse_expr(parser, BindingPower::Default)?;

    match left {
        Expr::Variable(target) => Ok(Expr::Assignment(AssignmentExpr {
            name: target.name,
            value: Box::new(value),
        })),
        _ => {
            trace!(line = equals.line, "rejected assignment target {}", left);
            parser.report(Error::new(ErrorImpl::InvalidAssignmentTarget, equals.line));
            Ok(left)
        }
    }
}

pub fn parse_grouping_expr(parser: &mut Parser<'_>) -> Result<Expr, Error> {
    parser.advance();
    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen, "Expect ')' after expression.")?;

    Ok(Expr::Grouping(GroupingExpr {
        expression: Box::new(expression),
    }))
}

pub fn parse_call_expr(
    parser: &mut Parser<'_>,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();

    let mut arguments = vec![];

    if !parser.check(TokenKind::CloseParen) {
        loop {
            if arguments.len() == MAX_ARGUMENTS {
                let line = parser.current_token().line;
                parser.report(Error::new(
                    ErrorImpl::TooManyArguments { max: MAX_ARGUMENTS },
                    line,
                ));
            }
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    let paren = parser.expect(TokenKind::CloseParen, "Expect ')' after arguments.")?;

    Ok(Expr::Call(CallExpr {
        callee: Box::new(left),
        paren,
        arguments,
    }))
}
