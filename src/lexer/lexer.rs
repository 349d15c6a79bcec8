use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(source: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        regex: Regex::new(source).expect("token pattern must be a valid regex"),
        handler,
    }
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins, so
    // two-character operators precede their one-character prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("^[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern("^[0-9]+(\\.[0-9]+)?", number_handler),
        pattern("^\\s+", skip_handler),
        pattern("^\"[^\"]*\"", string_handler),
        pattern("^\"[^\"]*", unterminated_string_handler),
        pattern("^//[^\\n]*", skip_handler),
        pattern("^\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern("^\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern("^\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern("^\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern("^==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern("^!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern("^!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern("^=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern("^<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern("^<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern("^>=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern("^>", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("^\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern("^;", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern("^,", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("^\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("^-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("^/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("^\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    errors: Vec<Error>,
    source: String,
    pos: usize,
    line: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            tokens: vec![],
            errors: vec![],
            source: source.to_string(),
            pos: 0,
            line: 1,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Text matched by `regex` at the cursor.
    fn matched(&self, regex: &Regex) -> String {
        regex
            .find(self.remainder())
            .map(|found| found.as_str().to_string())
            .unwrap_or_default()
    }

    fn count_lines(&mut self, text: &str) {
        self.line += text.matches('\n').count() as u32;
    }
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let kind = if matched.contains('.') {
        TokenKind::FloatLiteral
    } else {
        TokenKind::IntLiteral
    };

    let line = lexer.line;
    lexer.push(MK_TOKEN!(kind, matched.clone(), Some(matched.clone()), line));
    lexer.advance_n(matched.len());
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    lexer.count_lines(&matched);
    lexer.advance_n(matched.len());
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);
    let body = matched[1..matched.len() - 1].to_string();

    let line = lexer.line;
    lexer.push(MK_TOKEN!(TokenKind::String, matched.clone(), Some(body), line));
    lexer.count_lines(&matched);
    lexer.advance_n(matched.len());
}

fn unterminated_string_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = lexer.matched(regex);

    let line = lexer.line;
    lexer
        .errors
        .push(Error::new(ErrorImpl::UnterminatedString, line));
    lexer.count_lines(&matched);
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = lexer.matched(regex);
    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);
    let literal = match kind {
        TokenKind::True | TokenKind::False => Some(value.clone()),
        _ => None,
    };

    let line = lexer.line;
    lexer.push(MK_TOKEN!(kind, value.clone(), literal, line));
    lexer.advance_n(value.len());
}

/// Scans `source` into tokens terminated by a single EOF token.
///
/// Unrecognised characters and unterminated strings are reported to
/// `diagnostics` and skipped, so the returned stream is always well formed.
pub fn tokenize(source: &str, diagnostics: &mut Diagnostics) -> Vec<Token> {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let matched = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match matched {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                let character = lex.at();
                trace!(line = lex.line, %character, "unexpected character");
                let line = lex.line;
                lex.errors
                    .push(Error::new(ErrorImpl::UnexpectedCharacter { character }, line));
                lex.advance_n(character.len_utf8().max(1));
            }
        }
    }

    let line = lex.line;
    lex.push(MK_TOKEN!(TokenKind::EOF, String::new(), None, line));

    debug!(
        tokens = lex.tokens.len(),
        errors = lex.errors.len(),
        "scanned source"
    );

    for error in lex.errors {
        diagnostics.report(error);
    }
    lex.tokens
}
