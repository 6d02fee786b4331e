//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a single-pass recursive descent over a [`LookaheadStream`]:
//! - This module: Parser struct, error type, and coordination
//! - `statements`: blocks, sub-blocks and statement forms, driven by the
//!   indentation carried on newline lexemes
//! - `expressions`: primaries, call chains, argument lists and `==`
//!
//! Parser methods are split across files using `impl Parser` blocks. Every
//! error is fatal: the parse stops at the first one and returns no tree.

use crate::config::Vocabulary;
use crate::parser::ast::{Node, SourceLocation};
use crate::parser::lexer::{LexError, Lexeme, LexemeKind, Tokenizer};
use crate::parser::stream::{Expect, LookaheadStream};
use std::fmt;
use tracing::debug;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Tokenizing failed before parsing started
    Lex(LexError),

    /// An assertive consume met the wrong lexeme
    UnexpectedToken {
        expected: String,
        found: String,
        location: SourceLocation,
    },

    /// A nested block is not deeper than its header, or does not dedent
    /// back to it
    IndentationMismatch {
        enclosing: usize,
        found: usize,
        location: SourceLocation,
    },

    /// Lexemes remain after the top-level block
    TrailingInput {
        found: String,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location(),
            ParseError::UnexpectedToken { location, .. }
            | ParseError::IndentationMismatch { location, .. }
            | ParseError::TrailingInput { location, .. } => *location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(err) => write!(f, "{}", err),
            ParseError::UnexpectedToken {
                expected,
                found,
                location,
            } => write!(
                f,
                "Unexpected token at line {}, column {}: expected {}, found {}",
                location.line, location.column, expected, found
            ),
            ParseError::IndentationMismatch {
                enclosing,
                found,
                location,
            } => write!(
                f,
                "Indentation mismatch at line {}, column {}: indent {} does not fit a block nested under indent {}",
                location.line, location.column, found, enclosing
            ),
            ParseError::TrailingInput { found, location } => write!(
                f,
                "Trailing input at line {}, column {}: parsing stopped before {}",
                location.line, location.column, found
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

/// Recursive descent parser for indentation-structured source
pub struct Parser {
    pub(crate) stream: LookaheadStream,
}

impl Parser {
    /// Tokenize `source` with the default vocabulary and prepare to parse it.
    pub fn new(source: &str, path: &str) -> Result<Self, ParseError> {
        Self::with_vocabulary(source, path, &Vocabulary::default())
    }

    pub fn with_vocabulary(
        source: &str,
        path: &str,
        vocab: &Vocabulary,
    ) -> Result<Self, ParseError> {
        let lexemes = Tokenizer::new(path, vocab).tokenize(source)?;
        Ok(Self::from_lexemes(lexemes))
    }

    pub fn from_lexemes(lexemes: Vec<Lexeme>) -> Self {
        Self {
            stream: LookaheadStream::from_lexemes(lexemes),
        }
    }

    /// Parse the entire program: one block at indent 0 that must consume
    /// every lexeme.
    pub fn parse_program(&mut self) -> Result<Node, ParseError> {
        let root = self.parse_block(0)?;

        if !self.stream.can_consume(Expect::kind(LexemeKind::Eof)) {
            let ahead = self.stream.peek();
            return Err(ParseError::TrailingInput {
                found: ahead.describe(),
                location: ahead.location,
            });
        }

        debug!(
            statements = root.len(),
            lexemes = self.stream.position(),
            "parsed program"
        );
        Ok(root)
    }

    // ===== Helper methods =====

    /// Indentation carried by the lookahead; zero for anything but a newline.
    pub(crate) fn indent_ahead(&self) -> usize {
        self.stream.peek().number
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.stream.peek().location
    }

    pub(crate) fn match_keyword(&mut self, keyword: &str) -> bool {
        self.stream
            .try_consume(Expect::kind(LexemeKind::Keyword).text(keyword))
    }

    pub(crate) fn check(&self, kind: LexemeKind) -> bool {
        self.stream.is_category(&[kind])
    }

    pub(crate) fn expect(&mut self, kind: LexemeKind) -> Result<Lexeme, ParseError> {
        self.stream.consume(Expect::kind(kind))
    }

    /// Skip one optional separator after a list element.
    pub(crate) fn skip_separator(&mut self) {
        self.stream
            .try_consume(Expect::kind(LexemeKind::Symbol).text(","));
        self.stream.try_consume(Expect::kind(LexemeKind::Newline));
    }
}
