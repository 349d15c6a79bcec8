use std::fmt::Display;

use crate::ast::types::Type;

/// Where a statement-level expression sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Initializer,
    Print,
    Expression,
    Condition,
    Return,
}

/// Type inferred for a statement-level expression.
///
/// Produced alongside the tree instead of being written into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeAnnotation {
    pub site: Site,
    pub line: u32,
    pub ty: Type,
}

impl Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>4} {:?}: {}", self.line, self.site, self.ty)
    }
}
