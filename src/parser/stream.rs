//! One-token lookahead over a finished lexeme sequence
//!
//! Every parsing decision is made from [`LookaheadStream::peek`] alone. The
//! cursor only moves forward; once it runs past the last lexeme every read
//! yields the end-of-input sentinel.

use super::ast::SourceLocation;
use super::lexer::{Lexeme, LexemeKind};
use super::parse::ParseError;
use std::fmt;
use std::rc::Rc;

/// Predicate over the lookahead lexeme. Unset fields match anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Expect<'a> {
    kind: Option<LexemeKind>,
    text: Option<&'a str>,
    number: Option<usize>,
}

impl<'a> Expect<'a> {
    pub fn any() -> Self {
        Expect::default()
    }

    pub fn kind(kind: LexemeKind) -> Self {
        Expect {
            kind: Some(kind),
            ..Expect::default()
        }
    }

    pub fn text(mut self, text: &'a str) -> Self {
        self.text = Some(text);
        self
    }

    pub fn number(mut self, number: usize) -> Self {
        self.number = Some(number);
        self
    }

    pub fn matches(&self, lexeme: &Lexeme) -> bool {
        self.kind.map_or(true, |kind| lexeme.kind == kind)
            && self.text.map_or(true, |text| lexeme.text() == text)
            && self.number.map_or(true, |number| lexeme.number == number)
    }
}

impl fmt::Display for Expect<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{}", kind)?,
            None => write!(f, "any token")?,
        }
        if let Some(text) = self.text {
            write!(f, " '{}'", text)?;
        }
        if let Some(number) = self.number {
            write!(f, " (indent {})", number)?;
        }
        Ok(())
    }
}

/// Cursor over an owned lexeme sequence.
#[derive(Debug, Clone)]
pub struct LookaheadStream {
    lexemes: Vec<Lexeme>,
    index: usize,
    eof: Lexeme,
}

impl LookaheadStream {
    pub fn new(lexemes: Vec<Lexeme>, eof: Lexeme) -> Self {
        LookaheadStream {
            lexemes,
            index: 0,
            eof,
        }
    }

    /// Build a stream whose sentinel sits just past the last lexeme.
    pub fn from_lexemes(lexemes: Vec<Lexeme>) -> Self {
        let eof = match lexemes.last() {
            Some(last) => Lexeme::eof(
                last.path.clone(),
                last.start + last.string.len(),
                end_location(last),
            ),
            None => Lexeme::eof(Rc::from(""), 0, SourceLocation::new(1, 1)),
        };
        LookaheadStream::new(lexemes, eof)
    }

    /// Current lexeme, without consuming it.
    pub fn peek(&self) -> &Lexeme {
        self.lexemes.get(self.index).unwrap_or(&self.eof)
    }

    pub fn is_category(&self, kinds: &[LexemeKind]) -> bool {
        kinds.contains(&self.peek().kind)
    }

    pub fn can_consume(&self, expect: Expect<'_>) -> bool {
        expect.matches(self.peek())
    }

    /// Consume the current lexeme only if it matches.
    pub fn try_consume(&mut self, expect: Expect<'_>) -> bool {
        if self.can_consume(expect) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current lexeme, failing if it does not match.
    pub fn consume(&mut self, expect: Expect<'_>) -> Result<Lexeme, ParseError> {
        let current = self.peek().clone();
        if !expect.matches(&current) {
            return Err(ParseError::UnexpectedToken {
                expected: expect.to_string(),
                found: current.describe(),
                location: current.location,
            });
        }
        self.advance();
        Ok(current)
    }

    /// Number of lexemes consumed so far.
    pub fn position(&self) -> usize {
        self.index
    }

    fn advance(&mut self) {
        if self.index < self.lexemes.len() {
            self.index += 1;
        }
    }
}

/// Location of the character just past `lexeme`'s raw text.
fn end_location(lexeme: &Lexeme) -> SourceLocation {
    let mut location = lexeme.location;
    for ch in lexeme.string.chars() {
        if ch == '\n' {
            location.line += 1;
            location.column = 1;
        } else {
            location.column += 1;
        }
    }
    location
}
