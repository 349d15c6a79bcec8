/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The closed `Expr` and `Stmt` sum types
/// - expressions: Node structs for each expression kind
/// - statements: Node structs for each statement kind
/// - types: The NanoScript type set
/// - printer: S-expression rendering
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
pub mod types;
