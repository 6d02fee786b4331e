//! Lexer (tokenizer) for sprig source text
//!
//! Converts raw source text into a flat [`Lexeme`] sequence consumed by the
//! parser. The tokenizer is a character-at-a-time state machine: every state
//! either absorbs the current character into the accumulator or flushes the
//! pending lexeme and re-dispatches the character from the idle rules.
//!
//! The output is lossless. Line breaks, indentation, blank lines and comments
//! are carried by [`LexemeKind::Newline`] lexemes, and the spaces between two
//! tokens on a line are kept as trailing text of the lexeme they follow, so
//! concatenating every [`Lexeme::string`] reproduces the source exactly.

use super::ast::{quote_payload, SourceLocation};
use crate::config::Vocabulary;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Lexeme categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexemeKind {
    Word,
    Keyword,
    Symbol,
    Number,
    String,
    Member,
    Newline,
    LParen,   // (
    RParen,   // )
    LBrace,   // {
    RBrace,   // }
    LBracket, // [
    RBracket, // ]
    Eof,
}

impl LexemeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LexemeKind::Word => "word",
            LexemeKind::Keyword => "keyword",
            LexemeKind::Symbol => "symbol",
            LexemeKind::Number => "number",
            LexemeKind::String => "string",
            LexemeKind::Member => "member",
            LexemeKind::Newline => "newline",
            LexemeKind::LParen => "lparen",
            LexemeKind::RParen => "rparen",
            LexemeKind::LBrace => "lbrace",
            LexemeKind::RBrace => "rbrace",
            LexemeKind::LBracket => "lbracket",
            LexemeKind::RBracket => "rbracket",
            LexemeKind::Eof => "eof",
        }
    }
}

impl fmt::Display for LexemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified token with its source position.
///
/// `string` is the raw source text owned by this lexeme, including any
/// spaces that follow it on the same line. Use [`Lexeme::text`] for the
/// significant part. `number` is only meaningful on newline lexemes, where it
/// holds the indentation of the line that follows.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub string: String,
    pub number: usize,
    pub start: usize,
    pub stop: usize,
    pub location: SourceLocation,
    pub path: Rc<str>,
}

impl Lexeme {
    /// Synthetic end-of-input lexeme positioned at `offset`.
    pub fn eof(path: Rc<str>, offset: usize, location: SourceLocation) -> Self {
        Lexeme {
            kind: LexemeKind::Eof,
            string: String::new(),
            number: 0,
            start: offset,
            stop: offset,
            location,
            path,
        }
    }

    /// The lexeme's text without the inter-token spaces that trail it.
    pub fn text(&self) -> &str {
        match self.kind {
            LexemeKind::Newline => &self.string,
            _ => self.string.trim_end_matches(' '),
        }
    }

    /// Short human-readable description used in diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            LexemeKind::Eof => "end of input".to_string(),
            LexemeKind::Newline => format!("newline (indent {})", self.number),
            kind => format!("{} {}", kind, quote_payload(self.text())),
        }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}]@{} {}: {} {}",
            self.start,
            self.stop,
            self.path,
            self.kind,
            quote_payload(self.text()),
            self.number
        )
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// No tokenizer rule accepts this character
    UnrecognizedCharacter {
        ch: char,
        offset: usize,
        location: SourceLocation,
    },

    /// End of input reached inside a string literal
    UnterminatedLiteral {
        terminator: char,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnrecognizedCharacter { location, .. }
            | LexError::UnterminatedLiteral { location, .. } => *location,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnrecognizedCharacter {
                ch,
                offset,
                location,
            } => write!(
                f,
                "Unrecognized character at line {}, column {}: {:?} (byte offset {})",
                location.line, location.column, ch, offset
            ),
            LexError::UnterminatedLiteral {
                terminator,
                location,
            } => write!(
                f,
                "Unterminated literal at line {}, column {}: missing closing {}",
                location.line, location.column, terminator
            ),
        }
    }
}

impl std::error::Error for LexError {}

/// Tokenizer states. Each holds only what it needs to decide the next
/// character; the text itself lives in the shared accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    /// Line break, indentation and blank lines before the next logical line
    Newline,
    /// `#` up to the end of the line; folds back into `Newline`
    Comment,
    Word { member: bool },
    /// `r` or `b` that may prefix a string literal
    Sign,
    /// A lone `.` waiting for its next character
    Member,
    String { terminator: char, escape: bool },
    Symbol,
    Number { hex: bool, dot: bool },
}

/// Finite-state tokenizer over one source text.
pub struct Tokenizer<'v> {
    vocab: &'v Vocabulary,
    path: Rc<str>,
    lexemes: Vec<Lexeme>,
    state: State,
    buffer: String,
    indent: usize,
    start: usize,
    start_location: SourceLocation,
    offset: usize,
    location: SourceLocation,
}

impl<'v> Tokenizer<'v> {
    /// Create a tokenizer. Input starts at a line boundary, so the first
    /// lexeme is always a newline carrying the first line's indentation.
    pub fn new(path: &str, vocab: &'v Vocabulary) -> Self {
        Tokenizer {
            vocab,
            path: Rc::from(path),
            lexemes: Vec::new(),
            state: State::Newline,
            buffer: String::new(),
            indent: 0,
            start: 0,
            start_location: SourceLocation::new(1, 1),
            offset: 0,
            location: SourceLocation::new(1, 1),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(mut self, source: &str) -> Result<Vec<Lexeme>, LexError> {
        for (offset, ch) in source.char_indices() {
            self.offset = offset;
            self.step(ch)?;

            if ch == '\n' {
                self.location.line += 1;
                self.location.column = 1;
            } else {
                self.location.column += 1;
            }
        }
        self.offset = source.len();

        let path = self.path.clone();
        let lexemes = self.finish()?;
        debug!(path = %path, lexemes = lexemes.len(), "tokenized source");
        Ok(lexemes)
    }

    /// Feed one character to the current state.
    fn step(&mut self, ch: char) -> Result<(), LexError> {
        match self.state {
            State::Idle => self.dispatch(ch),

            State::Newline => match ch {
                '\n' => {
                    self.buffer.push(ch);
                    self.indent = 0;
                    Ok(())
                }
                ' ' => {
                    self.buffer.push(ch);
                    self.indent += 1;
                    Ok(())
                }
                '#' => {
                    self.buffer.push(ch);
                    self.state = State::Comment;
                    Ok(())
                }
                _ => {
                    self.flush(LexemeKind::Newline);
                    self.dispatch(ch)
                }
            },

            State::Comment => {
                self.buffer.push(ch);
                if ch == '\n' {
                    self.indent = 0;
                    self.state = State::Newline;
                }
                Ok(())
            }

            State::Word { member } => {
                if ch.is_alphanumeric() || ch == '_' {
                    self.buffer.push(ch);
                    Ok(())
                } else {
                    self.flush(word_kind(member));
                    self.dispatch(ch)
                }
            }

            State::Sign => {
                if ch == '"' || ch == '\'' {
                    self.buffer.push(ch);
                    self.state = State::String {
                        terminator: ch,
                        escape: false,
                    };
                    Ok(())
                } else {
                    // Not a string prefix after all: the letter starts a word.
                    self.state = State::Word { member: false };
                    self.step(ch)
                }
            }

            State::Member => {
                if ch.is_alphabetic() {
                    self.buffer.push(ch);
                    self.state = State::Word { member: true };
                    Ok(())
                } else if ch.is_ascii_digit() {
                    self.buffer.push(ch);
                    self.state = State::Number {
                        hex: false,
                        dot: true,
                    };
                    Ok(())
                } else {
                    self.dot_as_symbol()?;
                    self.step(ch)
                }
            }

            State::String { terminator, escape } => {
                self.buffer.push(ch);
                if escape {
                    self.state = State::String {
                        terminator,
                        escape: false,
                    };
                } else if ch == terminator {
                    self.flush(LexemeKind::String);
                } else if ch == '\\' {
                    self.state = State::String {
                        terminator,
                        escape: true,
                    };
                }
                Ok(())
            }

            State::Symbol => {
                // Greedy: keep extending while the longer string is still a symbol.
                self.buffer.push(ch);
                if self.vocab.is_symbol(&self.buffer) {
                    Ok(())
                } else {
                    self.buffer.pop();
                    self.flush(LexemeKind::Symbol);
                    self.dispatch(ch)
                }
            }

            State::Number { hex, dot } => {
                let next = if hex {
                    ch.is_ascii_hexdigit().then_some(State::Number { hex, dot })
                } else if (ch == 'x' || ch == 'X') && self.buffer == "0" {
                    Some(State::Number { hex: true, dot })
                } else if ch == '.' && !dot {
                    Some(State::Number { hex, dot: true })
                } else {
                    ch.is_ascii_digit().then_some(State::Number { hex, dot })
                };

                match next {
                    Some(state) => {
                        self.buffer.push(ch);
                        self.state = state;
                        Ok(())
                    }
                    None => {
                        self.flush(LexemeKind::Number);
                        self.dispatch(ch)
                    }
                }
            }
        }
    }

    /// First-character rules, applied from the idle state.
    fn dispatch(&mut self, ch: char) -> Result<(), LexError> {
        self.begin();

        if let Some(kind) = bracket_kind(ch) {
            self.buffer.push(ch);
            self.flush(kind);
            return Ok(());
        }

        let state = match ch {
            'r' | 'b' => State::Sign,
            c if c.is_alphabetic() || c == '_' => State::Word { member: false },
            c if c.is_ascii_digit() => State::Number {
                hex: false,
                dot: false,
            },
            '.' => State::Member,
            '"' | '\'' => State::String {
                terminator: ch,
                escape: false,
            },
            ' ' => {
                // Inter-token spaces trail the lexeme they follow.
                if let Some(last) = self.lexemes.last_mut() {
                    last.string.push(ch);
                }
                return Ok(());
            }
            '\n' => {
                self.indent = 0;
                State::Newline
            }
            '#' => {
                self.indent = 0;
                State::Comment
            }
            c if self.vocab.is_symbol(c.encode_utf8(&mut [0u8; 4])) => State::Symbol,
            _ => {
                return Err(LexError::UnrecognizedCharacter {
                    ch,
                    offset: self.offset,
                    location: self.location,
                })
            }
        };

        self.buffer.push(ch);
        self.state = state;
        Ok(())
    }

    /// A `.` that starts neither a member nor a number is only valid as a
    /// configured symbol.
    fn dot_as_symbol(&mut self) -> Result<(), LexError> {
        if self.vocab.is_symbol(&self.buffer) {
            self.state = State::Symbol;
            Ok(())
        } else {
            Err(LexError::UnrecognizedCharacter {
                ch: '.',
                offset: self.start,
                location: self.start_location,
            })
        }
    }

    /// Flush whatever is pending at end of input.
    fn finish(mut self) -> Result<Vec<Lexeme>, LexError> {
        match self.state {
            State::Idle => {}
            State::Newline | State::Comment => {
                // End of input closes every open block.
                self.indent = 0;
                self.flush(LexemeKind::Newline);
            }
            State::Word { member } => self.flush(word_kind(member)),
            State::Sign => self.flush(LexemeKind::Word),
            State::Member => {
                self.dot_as_symbol()?;
                self.flush(LexemeKind::Symbol);
            }
            State::String { terminator, .. } => {
                return Err(LexError::UnterminatedLiteral {
                    terminator,
                    location: self.start_location,
                });
            }
            State::Symbol => self.flush(LexemeKind::Symbol),
            State::Number { .. } => self.flush(LexemeKind::Number),
        }
        Ok(self.lexemes)
    }

    /// Mark the current character as the start of a new lexeme.
    fn begin(&mut self) {
        self.buffer.clear();
        self.start = self.offset;
        self.start_location = self.location;
        self.state = State::Idle;
    }

    /// Move the accumulator into a finished lexeme and return to idle.
    fn flush(&mut self, kind: LexemeKind) {
        let string = std::mem::take(&mut self.buffer);
        let kind = if kind == LexemeKind::Word && self.vocab.is_keyword(&string) {
            LexemeKind::Keyword
        } else {
            kind
        };
        let number = if kind == LexemeKind::Newline {
            self.indent
        } else {
            0
        };

        self.lexemes.push(Lexeme {
            kind,
            start: self.start,
            stop: self.start + string.len(),
            string,
            number,
            location: self.start_location,
            path: self.path.clone(),
        });
        self.state = State::Idle;
    }
}

/// Brackets are emitted immediately without entering a state.
fn bracket_kind(ch: char) -> Option<LexemeKind> {
    match ch {
        '(' => Some(LexemeKind::LParen),
        ')' => Some(LexemeKind::RParen),
        '{' => Some(LexemeKind::LBrace),
        '}' => Some(LexemeKind::RBrace),
        '[' => Some(LexemeKind::LBracket),
        ']' => Some(LexemeKind::RBracket),
        _ => None,
    }
}

fn word_kind(member: bool) -> LexemeKind {
    if member {
        LexemeKind::Member
    } else {
        LexemeKind::Word
    }
}
