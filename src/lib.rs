//! # Introduction
//!
//! sprig is the front end for a small indentation-structured language. It
//! turns source text into an abstract syntax tree and nothing more: there is
//! no semantic analysis, evaluation or error recovery.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Tokenizer → Lexemes → LookaheadStream → Parser → AST
//! ```
//!
//! 1. [`parser::lexer`]: a character-at-a-time state machine producing a
//!    lossless [`parser::lexer::Lexeme`] sequence with indentation counts.
//! 2. [`parser::stream`]: single-token lookahead with conditional and
//!    assertive consumption.
//! 3. [`parser::parse`]: recursive descent over indentation, building
//!    [`parser::ast::Node`] trees.
//! 4. [`config`]: the fixed keyword and symbol tables.
//!
//! Any lexical or parse error aborts the whole pass.

pub mod config;
pub mod parser;

use config::Vocabulary;
use parser::ast::Node;
use parser::lexer::{LexError, Lexeme, Tokenizer};
use parser::parse::{ParseError, Parser};

/// Tokenize `source` with the default vocabulary.
pub fn tokenize(source: &str, path: &str) -> Result<Vec<Lexeme>, LexError> {
    Tokenizer::new(path, &Vocabulary::default()).tokenize(source)
}

/// Tokenize and parse `source` with the default vocabulary.
pub fn parse_source(source: &str, path: &str) -> Result<Node, ParseError> {
    Parser::new(source, path)?.parse_program()
}
