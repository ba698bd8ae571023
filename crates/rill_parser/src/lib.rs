//! Lexer, AST and Pratt parser for the rill language.
//!
//! The pipeline is `source → Lexer → Parser → Program`; [`parse`] runs the
//! whole thing and hands back the program together with any parse errors.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::Lexer;
pub use parser::{parse, ParseError, Parser};
