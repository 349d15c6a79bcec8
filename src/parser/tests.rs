//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Variable and function declarations
//! - Expressions, precedence and associativity
//! - Control flow statements
//! - Error reporting and panic-mode recovery

use crate::{
    ast::{ast::Stmt, types::Type},
    errors::diagnostics::Diagnostics,
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
};

use super::parser::parse;

fn parse_source(source: &str) -> (Vec<Stmt>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(source, &mut diagnostics);
    let statements = parse(tokens, &mut diagnostics);
    (statements, diagnostics)
}

fn render(source: &str) -> Vec<String> {
    let (statements, diagnostics) = parse_source(source);
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        diagnostics.errors()
    );
    statements.iter().map(|stmt| stmt.to_string()).collect()
}

#[test]
fn test_parse_variable_declaration() {
    assert_eq!(render("var int x = 42;"), vec!["(var int x 42)"]);
    assert_eq!(render("var float f;"), vec!["(var float f)"]);
}

#[test]
fn test_parse_function_declaration() {
    let (statements, diagnostics) = parse_source("func int add(int a, float b) { return a + b; }");

    assert!(diagnostics.is_empty());
    assert_eq!(
        statements[0].to_string(),
        "(func int add (int a float b) (return (+ a b)))"
    );

    let Stmt::FnDecl(decl) = &statements[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(decl.return_type, Type::Int);
    assert_eq!(decl.parameter_types(), vec![Type::Int, Type::Float]);
}

#[test]
fn test_parse_function_without_parameters() {
    assert_eq!(
        render("func bool ok() { return true; }"),
        vec!["(func bool ok () (return true))"]
    );
}

#[test]
fn test_precedence_of_factor_over_term() {
    assert_eq!(render("1 + 2 * 3;"), vec!["(; (+ 1 (* 2 3)))"]);
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_eq!(render("1 - 2 - 3;"), vec!["(; (- (- 1 2) 3))"]);
    assert_eq!(render("8 / 4 / 2;"), vec!["(; (/ (/ 8 4) 2))"]);
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(render("x = y = 3;"), vec!["(; (= x (= y 3)))"]);
}

#[test]
fn test_logical_precedence() {
    assert_eq!(
        render("a or b and c == d;"),
        vec!["(; (or a (and b (== c d))))"]
    );
}

#[test]
fn test_comparison_binds_tighter_than_equality() {
    assert_eq!(render("1 < 2 == true;"), vec!["(; (== (< 1 2) true))"]);
}

#[test]
fn test_unary_expressions() {
    assert_eq!(render("-x * 2;"), vec!["(; (* (- x) 2))"]);
    assert_eq!(render("!!done;"), vec!["(; (! (! done)))"]);
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(render("(1 + 2) * 3;"), vec!["(; (* (group (+ 1 2)) 3))"]);
}

#[test]
fn test_calls_chain() {
    assert_eq!(render("f(1, x)(2);"), vec!["(; (call (call f 1 x) 2))"]);
    assert_eq!(render("-f();"), vec!["(; (- (call f)))"]);
}

#[test]
fn test_parse_literals() {
    assert_eq!(render("print(3.5);"), vec!["(print 3.5)"]);
    assert_eq!(render("print(false);"), vec!["(print false)"]);
}

#[test]
fn test_parse_if_else_statement() {
    assert_eq!(
        render("if (x > 0) print(x); else { print(0); }"),
        vec!["(if (> x 0) (print x) (block (print 0)))"]
    );
}

#[test]
fn test_dangling_else_binds_to_nearest_if() {
    assert_eq!(
        render("if (a) if (b) print(1); else print(2);"),
        vec!["(if a (if b (print 1) (print 2)))"]
    );
}

#[test]
fn test_parse_while_loop() {
    assert_eq!(
        render("while (x < 10) { x = x + 1; }"),
        vec!["(while (< x 10) (block (; (= x (+ x 1)))))"]
    );
}

#[test]
fn test_parse_return_without_value() {
    assert_eq!(render("return;"), vec!["(return)"]);
}

#[test]
fn test_parse_nested_blocks() {
    assert_eq!(
        render("{ var int x = 10; { var int y = 20; } }"),
        vec!["(block (var int x 10) (block (var int y 20)))"]
    );
}

#[test]
fn test_parse_empty_program() {
    let (statements, diagnostics) = parse_source("");

    assert!(statements.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_missing_semicolon_is_reported() {
    let (statements, diagnostics) = parse_source("var int x = 42");

    assert!(statements.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.errors()[0].message(),
        "Expect ';' after variable declaration."
    );
}

#[test]
fn test_missing_type_is_reported() {
    let (_, diagnostics) = parse_source("var x = 1;");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.errors()[0].get_error_name(), "ExpectedType");
    assert_eq!(
        diagnostics.errors()[0].message(),
        "Expect variable type after 'var'."
    );
}

#[test]
fn test_invalid_assignment_target_is_not_fatal() {
    let (statements, diagnostics) = parse_source("1 + 2 = 3; print(1);");

    assert_eq!(diagnostics.count_of("InvalidAssignmentTarget"), 1);
    assert_eq!(diagnostics.len(), 1);
    // The left side survives and parsing carries on.
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].to_string(), "(; (+ 1 2))");
}

#[test]
fn test_each_malformed_statement_reports_once() {
    let (statements, diagnostics) =
        parse_source("var int = 1;\nprint(1);\nvar float y = ;\nprint(2);");

    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.errors()[0].get_line(), 1);
    assert_eq!(diagnostics.errors()[1].get_line(), 3);
    assert_eq!(statements.len(), 2);
}

#[test]
fn test_recovery_stops_at_statement_keyword() {
    let (statements, diagnostics) = parse_source("x = = 2 print(5);");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.errors()[0].get_error_name(), "ExpectedExpression");
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].to_string(), "(print 5)");
}

#[test]
fn test_errors_inside_block_recover_inside_block() {
    let (statements, diagnostics) = parse_source("{ print(; var int ok = 1; }");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].to_string(), "(block (var int ok 1))");
}

#[test]
fn test_unclosed_block_is_reported() {
    let (statements, diagnostics) = parse_source("{ print(1);");

    assert!(statements.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.errors()[0].message(), "Expect '}' after block.");
}

#[test]
fn test_declaration_not_allowed_as_if_body() {
    let (_, diagnostics) = parse_source("if (true) var int x = 1;");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.errors()[0].get_error_name(), "ExpectedExpression");
}

#[test]
fn test_integer_overflow_is_fatal() {
    let (statements, diagnostics) = parse_source("var int big = 99999999999999999999;");

    assert!(statements.is_empty());
    assert_eq!(diagnostics.count_of("NumberParseError"), 1);
}

#[test]
fn test_too_many_arguments_reported_once() {
    let arguments = vec!["1"; 300].join(", ");
    let (statements, diagnostics) = parse_source(&format!("f({});", arguments));

    assert_eq!(statements.len(), 1);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.errors()[0].message(),
        "Can't have more than 255 arguments."
    );
}

#[test]
fn test_too_many_parameters_reported_once() {
    let parameters = (0..256)
        .map(|i| format!("int p{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    let (statements, diagnostics) = parse_source(&format!("func int f({}) {{ }}", parameters));

    assert_eq!(statements.len(), 1);
    assert_eq!(diagnostics.count_of("TooManyParameters"), 1);
}

#[test]
fn test_stream_without_eof_is_repaired() {
    let tokens = vec![
        Token {
            kind: TokenKind::Print,
            lexeme: String::from("print"),
            literal: None,
            line: 1,
        },
        Token {
            kind: TokenKind::OpenParen,
            lexeme: String::from("("),
            literal: None,
            line: 1,
        },
        Token {
            kind: TokenKind::IntLiteral,
            lexeme: String::from("1"),
            literal: Some(String::from("1")),
            line: 1,
        },
        Token {
            kind: TokenKind::CloseParen,
            lexeme: String::from(")"),
            literal: None,
            line: 1,
        },
        Token {
            kind: TokenKind::Semicolon,
            lexeme: String::from(";"),
            literal: None,
            line: 1,
        },
    ];
    let mut diagnostics = Diagnostics::new();
    let statements = parse(tokens, &mut diagnostics);

    assert!(diagnostics.is_empty());
    assert_eq!(statements.len(), 1);
}

#[test]
fn test_missing_expression_at_eof() {
    let (_, diagnostics) = parse_source("print(");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.errors()[0].message(), "Expect expression.");
}

#[test]
fn test_deep_parentheses_report_once() {
    let depth = 5000;
    let source = format!(
        "print({}1{});\nprint(2);",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    let (statements, diagnostics) = parse_source(&source);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.count_of("NestingTooDeep"), 1);
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].to_string(), "(print 2)");
}

#[test]
fn test_deep_unary_chain_reports_once() {
    let (statements, diagnostics) = parse_source(&format!("print({}1);", "-".repeat(50_000)));

    assert!(statements.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.count_of("NestingTooDeep"), 1);
}

#[test]
fn test_deep_blocks_report_once_and_keep_outer_blocks() {
    let depth = 1000;
    let source = format!(
        "{}print(1);{}\nprint(2);",
        "{".repeat(depth),
        "}".repeat(depth)
    );
    let (statements, diagnostics) = parse_source(&source);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.count_of("NestingTooDeep"), 1);
    assert_eq!(statements.len(), 2);
    assert!(matches!(statements[0], Stmt::Block(_)));
}

#[test]
fn test_long_operator_chain_is_bounded() {
    let short = vec!["1"; 100].join(" + ");
    assert_eq!(parse_source(&format!("print({});", short)).1.len(), 0);

    let long = vec!["1"; 1000].join(" + ");
    let (statements, diagnostics) = parse_source(&format!("print({});", long));

    assert!(statements.is_empty());
    assert_eq!(diagnostics.count_of("NestingTooDeep"), 1);
}

#[test]
fn test_deep_if_chain_only_reports_nesting() {
    let source = format!("{}print(1);", "if (true) ".repeat(1000));
    let (_, diagnostics) = parse_source(&source);

    assert!(!diagnostics.is_empty());
    assert_eq!(diagnostics.count_of("NestingTooDeep"), diagnostics.len());
}

#[test]
fn test_moderate_nesting_is_accepted() {
    let source = format!(
        "{{ {}print({}1{}); {}}}",
        "{ ".repeat(20),
        "(".repeat(50),
        ")".repeat(50),
        "} ".repeat(20)
    );

    assert_eq!(render(&source).len(), 1);
}

#[test]
fn test_recovery_at_closing_brace_consumes_it() {
    let (statements, diagnostics) = parse_source("{ print(1) } print(2);");

    assert!(statements.is_empty());
    let messages: Vec<String> = diagnostics.iter().map(|error| error.message()).collect();
    assert_eq!(
        messages,
        vec!["Expect ';' after value.", "Expect '}' after block."]
    );
}
