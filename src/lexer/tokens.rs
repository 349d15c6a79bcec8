use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("and", TokenKind::And);
        map.insert("else", TokenKind::Else);
        map.insert("false", TokenKind::False);
        map.insert("func", TokenKind::Func);
        map.insert("if", TokenKind::If);
        map.insert("or", TokenKind::Or);
        map.insert("print", TokenKind::Print);
        map.insert("return", TokenKind::Return);
        map.insert("true", TokenKind::True);
        map.insert("var", TokenKind::Var);
        map.insert("while", TokenKind::While);
        map.insert("int", TokenKind::TypeInt);
        map.insert("float", TokenKind::TypeFloat);
        map.insert("bool", TokenKind::TypeBool);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,
    String,
    IntLiteral,
    FloatLiteral,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    And,
    Or,
    Else,
    False,
    Func,
    If,
    Print,
    Return,
    True,
    Var,
    While,
    TypeInt,
    TypeFloat,
    TypeBool,
}

impl TokenKind {
    /// Keywords that start a declaration or statement; used as recovery points.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Func
                | TokenKind::Var
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// Raw text of number and boolean literals, body of string literals.
    pub literal: Option<String>,
    pub line: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {} (line {})", self.kind, self.lexeme, literal, self.line),
            None => write!(f, "{} {} (line {})", self.kind, self.lexeme, self.line),
        }
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    /// How the token reads in a diagnostic.
    pub fn describe(&self) -> String {
        if self.kind == TokenKind::EOF {
            String::from("end of file")
        } else {
            self.lexeme.clone()
        }
    }

    pub fn debug(&self) {
        if self.is_one_of_many(&[
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::IntLiteral,
            TokenKind::FloatLiteral,
        ]) {
            println!("{:>4} {} ({})", self.line, self.kind, self.lexeme);
        } else {
            println!("{:>4} {} ()", self.line, self.kind);
        }
    }
}
