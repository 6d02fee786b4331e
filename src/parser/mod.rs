//! Source parser
//!
//! This module transforms sprig source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → lexemes)
//! - [`stream`]: One-token lookahead over the lexeme sequence
//! - [`parse`]: Parsing (lexemes → AST), with statement and expression rules
//!   split into sibling modules
//! - [`ast`]: AST node definitions and the tree dump
//!
//! # Language
//!
//! Blocks are structured by indentation only (spaces, no tabs). Statements
//! are `pass`, `def`, `return`, `if`/`elif`/`else` and bare expressions;
//! expressions are single lexemes with call suffixes and `==`.
//!
//! # Parser Implementation
//!
//! Hand-written state-machine tokenizer and recursive descent parser.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod stream;
