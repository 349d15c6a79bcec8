use std::collections::HashMap;

use tracing::trace;

use crate::ast::types::Type;

#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable,
    /// Parameter types in declaration order.
    Function { parameters: Vec<Type> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolInfo {
    /// Declared type; for functions, the return type.
    pub ty: Type,
    pub initialized: bool,
    pub kind: SymbolKind,
}

impl SymbolInfo {
    pub fn variable(ty: Type, initialized: bool) -> Self {
        SymbolInfo {
            ty,
            initialized,
            kind: SymbolKind::Variable,
        }
    }

    pub fn function(return_type: Type, parameters: Vec<Type>) -> Self {
        SymbolInfo {
            ty: return_type,
            initialized: true,
            kind: SymbolKind::Function { parameters },
        }
    }
}

/// A single lexical scope.
#[derive(Debug, Default)]
pub struct Environment {
    pub symbol_lookup: HashMap<String, SymbolInfo>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            symbol_lookup: HashMap::new(),
        }
    }

    /// Inserts the symbol unless the name is already taken in this scope.
    pub fn declare_symbol(&mut self, name: &str, info: SymbolInfo) -> bool {
        if self.symbol_lookup.contains_key(name) {
            false
        } else {
            self.symbol_lookup.insert(name.to_string(), info);
            true
        }
    }

    pub fn get_symbol(&self, name: &str) -> Option<&SymbolInfo> {
        self.symbol_lookup.get(name)
    }
}

/// Stack of scopes, innermost last.
///
/// Starts with the global scope, which `end_scope` never removes.
#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<Environment>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Environment::new()],
        }
    }

    pub fn begin_scope(&mut self) {
        self.scopes.push(Environment::new());
        trace!(depth = self.depth(), "begin scope");
    }

    pub fn end_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
        trace!(depth = self.depth(), "end scope");
    }

    /// Declares `name` in the innermost scope.
    ///
    /// Returns false, leaving the existing entry untouched, when the name is
    /// already declared in that same scope. Shadowing outer scopes always
    /// succeeds.
    pub fn declare(&mut self, name: &str, info: SymbolInfo) -> bool {
        match self.scopes.last_mut() {
            Some(scope) => scope.declare_symbol(name, info),
            None => false,
        }
    }

    /// Finds the innermost declaration of `name`.
    pub fn lookup(&self, name: &str) -> Option<&SymbolInfo> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get_symbol(name))
    }

    /// Number of open scopes, the global scope included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}
