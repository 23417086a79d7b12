//! DSL (Domain Specific Language) parser for netlist descriptions.
//!
//! This module provides a small line-oriented language for describing the
//! wiring of a design, which [`Graph::from_ast`](crate::Graph::from_ast)
//! turns into a graph.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist    = { line }
//! line       = comment | directive | statement | empty
//! comment    = ('#' | ';') { any_char }
//! directive  = ".graph" name
//!            | ".type" name kind [width]
//! statement  = "port" [name] direction type
//!            | "signal" [name] type
//!            | "param" name type [constant]
//!            | "expr" name op operand operand
//!            | "connect" name operand
//!
//! kind       = "bit" | "boolean" | "integer" | "string" | "vector"
//! direction  = "in" | "out" | "none"
//! op         = "add" | "sub" | "mul" | "div"
//! operand    = name | constant
//! constant   = integer | string | "true" | "false"
//! integer    = ['-' | '+'] digit+
//! string     = '"' { char | '\"' | '\\' | '\n' | '\t' } '"'
//! name       = (letter | '_') { letter | digit | '_' }
//! ```
//!
//! `connect a b` drives `a` from `b`. Integer and string constants become
//! fresh literals; `true`/`false` use the graph's shared boolean literals.
//!
//! # Example
//!
//! ```text
//! .graph counter
//! .type byte vector 8
//!
//! port   clk   in  bit
//! port   count out byte
//! signal acc   byte
//! param  STEP  integer 1
//!
//! expr    next add acc STEP
//! connect acc   next
//! connect count acc
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_int, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a netlist string into an AST.
pub fn parse(input: &str) -> Result<GraphAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    parser.parse()
}

/// Parse a netlist file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<GraphAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::GraphError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
