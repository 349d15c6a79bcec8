#![allow(clippy::module_inception)]

use tracing::debug;

use crate::{
    ast::ast::Stmt,
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorTip},
    },
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::parse,
    type_checker::{annotations::TypeAnnotation, options::CheckOptions, type_checker::type_check},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;


extern crate regex;

/// Pipeline phase that reported the first error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Scan,
    Parse,
    Analyze,
}

impl Phase {
    /// Process exit status for a run that failed in this phase.
    pub fn exit_code(self) -> u8 {
        match self {
            Phase::Scan | Phase::Parse => 65,
            Phase::Analyze => 70,
        }
    }
}

/// Everything one run of the front end produced.
#[derive(Debug)]
pub struct Compilation {
    pub statements: Vec<Stmt>,
    pub annotations: Vec<TypeAnnotation>,
    pub diagnostics: Diagnostics,
    pub failed_phase: Option<Phase>,
    /// False only when parsing produced nothing worth analyzing.
    pub analyzed: bool,
}

impl Compilation {
    pub fn succeeded(&self) -> bool {
        self.failed_phase.is_none()
    }
}

/// Scans, parses and analyzes `source`.
pub fn compile_source(source: &str, options: CheckOptions) -> Compilation {
    let mut diagnostics = Diagnostics::new();
    let tokens = tokenize(source, &mut diagnostics);
    let failed_phase = diagnostics.had_error().then_some(Phase::Scan);

    compile_from(tokens, options, diagnostics, failed_phase)
}

/// Parses and analyzes an already scanned token stream.
pub fn compile_tokens(tokens: Vec<Token>, options: CheckOptions) -> Compilation {
    compile_from(tokens, options, Diagnostics::new(), None)
}

fn compile_from(
    tokens: Vec<Token>,
    options: CheckOptions,
    mut diagnostics: Diagnostics,
    mut failed_phase: Option<Phase>,
) -> Compilation {
    let before_parse = diagnostics.len();
    let statements = parse(tokens, &mut diagnostics);
    let parse_failed = diagnostics.len() > before_parse;
    if parse_failed {
        failed_phase = failed_phase.or(Some(Phase::Parse));
    }

    if parse_failed && statements.is_empty() {
        debug!("nothing parsed, skipping semantic analysis");
        return Compilation {
            statements,
            annotations: vec![],
            diagnostics,
            failed_phase,
            analyzed: false,
        };
    }

    let before_analysis = diagnostics.len();
    let annotations = type_check(&statements, options, &mut diagnostics);
    if diagnostics.len() > before_analysis {
        failed_phase = failed_phase.or(Some(Phase::Analyze));
    }

    Compilation {
        statements,
        annotations,
        diagnostics,
        failed_phase,
        analyzed: true,
    }
}

/// Returns the text of 1-based `line` in `source`.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    let index = (line as usize).checked_sub(1)?;
    source.lines().nth(index)
}

/// Formats a diagnostic with the offending source line.
///
/// ```text
/// [line 2] Error: Expect ';' after expression.
/// Error: UnexpectedToken (Unexpected token: `}`, did you miss a semicolon?)
/// -> script.ns
///   |
/// 2 | print(x)
///   |
/// ```
pub fn render_diagnostic(error: &Error, source: &str, file: &str) -> String {
    let line_string = error.get_line().to_string();
    let padding = line_string.len() + 2;
    let mut rendered = format!("{}\n", error);

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    rendered.push_str(&format!("-> {}\n", file));

    if let Some(line_text) = get_line(source, error.get_line()) {
        rendered.push_str(&format!("{:>padding$}\n", "|"));
        rendered.push_str(&format!("{} | {}\n", line_string, line_text.trim()));
        rendered.push_str(&format!("{:>padding$}", "|"));
    }

    rendered
}
