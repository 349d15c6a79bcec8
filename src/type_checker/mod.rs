//! Type checking and semantic analysis module.
//!
//! This module walks the AST once, in declaration order, while:
//!
//! - Resolving variable and function references through a scope stack
//! - Inferring the type of every expression
//! - Checking initializers, assignments, operators, conditions and returns
//! - Checking call arguments against the declared parameter types
//!
//! Semantic errors are reported into the shared `Diagnostics` and never stop
//! the walk. How strict some checks are is controlled by `CheckOptions`.

pub mod annotations;
pub mod options;
pub mod symbol_table;
pub mod type_checker;
