//! Expression parsing implementation
//!
//! Expressions are deliberately small: a primary (any single lexeme),
//! followed by any number of call suffixes, optionally followed by a
//! right-recursive `==` comparison.
//!
//! ```text
//! expression ::= primary { call }* [ '==' expression ]
//! call       ::= '(' { expression [','] [NEWLINE] }* ')'
//! argv       ::= '(' { WORD [','] [NEWLINE] }* ')'
//! ```
//!
//! Calls associate to the left, so `f(a)(b)` is `call(call(f, a), b)`.

use crate::parser::ast::{Node, NodeKind};
use crate::parser::lexer::LexemeKind;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::stream::Expect;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Node, ParseError> {
        let mut expr = self.parse_primary()?;

        while self.check(LexemeKind::LParen) {
            expr = self.parse_call(expr)?;
        }

        if self
            .stream
            .try_consume(Expect::kind(LexemeKind::Symbol).text("=="))
        {
            let rhs = self.parse_expression()?;
            let mut eq = Node::new(NodeKind::Eq, expr.location);
            eq.push(expr);
            eq.push(rhs);
            expr = eq;
        }

        Ok(expr)
    }

    /// Turn the next lexeme, whatever it is, into a leaf.
    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        if self.check(LexemeKind::Eof) {
            return Err(ParseError::UnexpectedToken {
                expected: "expression".to_string(),
                found: self.stream.peek().describe(),
                location: self.current_location(),
            });
        }

        let lexeme = self.stream.consume(Expect::any())?;
        Ok(Node::leaf(
            NodeKind::from(lexeme.kind),
            lexeme.text(),
            lexeme.location,
        ))
    }

    /// Parse one parenthesised argument list applied to `callee`.
    fn parse_call(&mut self, callee: Node) -> Result<Node, ParseError> {
        let mut call = Node::new(NodeKind::Call, callee.location);
        call.push(callee);

        self.expect(LexemeKind::LParen)?;
        self.stream.try_consume(Expect::kind(LexemeKind::Newline));
        while !self.check(LexemeKind::RParen) {
            call.push(self.parse_expression()?);
            self.skip_separator();
        }
        self.expect(LexemeKind::RParen)?;

        Ok(call)
    }

    /// Parse a parameter list: parenthesised words.
    pub(crate) fn parse_argv(&mut self) -> Result<Node, ParseError> {
        let open = self.expect(LexemeKind::LParen)?;
        let mut argv = Node::new(NodeKind::Argv, open.location);

        self.stream.try_consume(Expect::kind(LexemeKind::Newline));
        while !self.check(LexemeKind::RParen) {
            argv.push(self.parse_identifier()?);
            self.skip_separator();
        }
        self.expect(LexemeKind::RParen)?;

        Ok(argv)
    }

    fn parse_identifier(&mut self) -> Result<Node, ParseError> {
        let word = self.expect(LexemeKind::Word)?;
        Ok(Node::leaf(NodeKind::Ident, word.text(), word.location))
    }
}
