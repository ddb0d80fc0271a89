//! Expression Module
//!
//! Syntax tree, visitors over it, and the text lexer/parser

pub mod ast;
pub mod lexer;
pub mod operations;
pub mod parser;
pub mod serializer;
pub mod visitor;

pub use ast::*;
pub use lexer::Lexer;
pub use parser::{parse, Parser};
pub use serializer::serialize;
pub use visitor::ExprVisitor;
