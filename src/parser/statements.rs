//! Statement and block parsing
//!
//! Blocks are delimited purely by indentation: every statement is preceded by
//! a newline lexeme whose `number` is the indent of its line.
//!
//! # Grammar
//!
//! ```text
//! block(n)     ::= { NEWLINE(n) statement }*
//! sub_block(n) ::= block(m)            where m = lookahead indent, m > n,
//!                                      and the indent after it is <= n
//! statement    ::= 'pass'
//!                | 'def' [WORD] argv sub_block
//!                | 'return' expression
//!                | 'if' expression sub_block
//!                | 'elif' expression sub_block
//!                | 'else' sub_block
//!                | expression [sub_block]
//! ```
//!
//! An expression followed by a deeper block becomes a `call` node whose first
//! child is the expression and whose remaining children are the block's
//! statements.

use crate::parser::ast::{Node, NodeKind};
use crate::parser::lexer::LexemeKind;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::stream::Expect;
use tracing::trace;

impl Parser {
    /// Parse statements while the lookahead is a newline at exactly `indent`.
    pub(crate) fn parse_block(&mut self, indent: usize) -> Result<Node, ParseError> {
        trace!(indent, "entering block");
        let mut block = Node::new(NodeKind::Block, self.current_location());

        while self
            .stream
            .try_consume(Expect::kind(LexemeKind::Newline).number(indent))
        {
            // The final newline of the input carries no statement.
            if self.check(LexemeKind::Eof) {
                break;
            }
            if let Some(statement) = self.parse_statement(indent)? {
                block.push(statement);
            }
        }

        trace!(indent, statements = block.len(), "leaving block");
        Ok(block)
    }

    /// Whether the lookahead opens a block deeper than `indent`.
    pub(crate) fn has_sub_block(&self, indent: usize) -> bool {
        self.indent_ahead() > indent
    }

    /// Parse a block nested under a statement at `indent`.
    pub(crate) fn parse_sub_block(&mut self, indent: usize) -> Result<Node, ParseError> {
        if !self.has_sub_block(indent) {
            return Err(ParseError::IndentationMismatch {
                enclosing: indent,
                found: self.indent_ahead(),
                location: self.current_location(),
            });
        }

        let block = self.parse_block(self.indent_ahead())?;

        if self.indent_ahead() > indent {
            return Err(ParseError::IndentationMismatch {
                enclosing: indent,
                found: self.indent_ahead(),
                location: self.current_location(),
            });
        }
        Ok(block)
    }

    /// Parse one statement. `pass` produces no node.
    pub(crate) fn parse_statement(&mut self, indent: usize) -> Result<Option<Node>, ParseError> {
        let location = self.current_location();

        if self.match_keyword("pass") {
            return Ok(None);
        }

        if self.match_keyword("def") {
            let mut def = Node::new(NodeKind::Def, location);
            if self.check(LexemeKind::Word) {
                def.payload = self.expect(LexemeKind::Word)?.text().to_string();
            }
            def.push(self.parse_argv()?);
            def.extend(self.parse_sub_block(indent)?);
            return Ok(Some(def));
        }

        if self.match_keyword("return") {
            let mut ret = Node::new(NodeKind::Return, location);
            ret.push(self.parse_expression()?);
            return Ok(Some(ret));
        }

        if self.match_keyword("if") {
            return self.parse_conditional(NodeKind::If, indent).map(Some);
        }

        if self.match_keyword("elif") {
            return self.parse_conditional(NodeKind::Elif, indent).map(Some);
        }

        if self.match_keyword("else") {
            let mut node = Node::new(NodeKind::Else, location);
            node.push(self.parse_sub_block(indent)?);
            return Ok(Some(node));
        }

        let expr = self.parse_expression()?;
        if !self.has_sub_block(indent) {
            return Ok(Some(expr));
        }

        // Call shorthand: the header expression leads the nested statements.
        let mut call = self.parse_sub_block(indent)?;
        call.kind = NodeKind::Call;
        call.location = expr.location;
        call.insert(0, expr);
        Ok(Some(call))
    }

    /// `if`/`elif` body: condition followed by its nested block.
    fn parse_conditional(&mut self, kind: NodeKind, indent: usize) -> Result<Node, ParseError> {
        let mut node = Node::new(kind, self.current_location());
        node.push(self.parse_expression()?);
        node.push(self.parse_sub_block(indent)?);
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{Node, NodeKind, SourceLocation};
    use crate::parser::lexer::LexemeKind;
    use crate::parser::parse::{ParseError, Parser};

    fn parse(source: &str) -> Result<Node, ParseError> {
        Parser::new(source, "test")?.parse_program()
    }

    fn kinds(node: &Node) -> Vec<NodeKind> {
        node.iter().map(|n| n.kind).collect()
    }

    #[test]
    fn test_pass_produces_nothing() {
        let program = parse("pass\npass\nx").unwrap();
        assert_eq!(kinds(&program), vec![NodeKind::Ident]);
    }

    #[test]
    fn test_if_elif_else() {
        let source = "if a == b\n  x\nelif c\n  y\nelse\n  z\n";
        let program = parse(source).unwrap();
        assert_eq!(
            kinds(&program),
            vec![NodeKind::If, NodeKind::Elif, NodeKind::Else]
        );

        let if_node = &program[0];
        assert_eq!(kinds(if_node), vec![NodeKind::Eq, NodeKind::Block]);
        assert_eq!(if_node[1][0].payload, "x");

        let else_node = &program[2];
        assert_eq!(kinds(else_node), vec![NodeKind::Block]);
        assert_eq!(else_node[0][0].payload, "z");
    }

    #[test]
    fn test_anonymous_def() {
        let program = parse("def ()\n    pass\n").unwrap();
        let def = &program[0];
        assert_eq!(def.kind, NodeKind::Def);
        assert_eq!(def.payload, "");
        assert_eq!(kinds(def), vec![NodeKind::Argv]);
        assert!(def[0].is_empty());
    }

    #[test]
    fn test_nested_blocks() {
        let source = "def f(a,\n      b)\n    if a\n        return b\n    return a\nf(1, 2)\n";
        let program = parse(source).unwrap();
        assert_eq!(kinds(&program), vec![NodeKind::Def, NodeKind::Call]);

        let def = &program[0];
        assert_eq!(
            kinds(def),
            vec![NodeKind::Argv, NodeKind::If, NodeKind::Return]
        );
        let params: Vec<&str> = def[0].iter().map(|n| n.payload.as_str()).collect();
        assert_eq!(params, vec!["a", "b"]);
        assert_eq!(def[1][1][0].kind, NodeKind::Return);
    }

    #[test]
    fn test_blank_lines_and_comments_inside_blocks() {
        let source = "if x\n\n    # note\n    y\n\n    z\n";
        let program = parse(source).unwrap();
        assert_eq!(program[0][1].len(), 2);
    }

    #[test]
    fn test_call_shorthand() {
        let source = "with(lock)\n    a\n    b\n";
        let program = parse(source).unwrap();
        let call = &program[0];
        assert_eq!(call.kind, NodeKind::Call);
        assert_eq!(
            kinds(call),
            vec![NodeKind::Call, NodeKind::Ident, NodeKind::Ident]
        );
        assert_eq!(call[0][0].payload, "with");
        assert_eq!(call[2].payload, "b");
        assert_eq!(call.location, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_sub_block_not_deeper() {
        let err = parse("if x\npass").unwrap_err();
        assert!(matches!(
            err,
            ParseError::IndentationMismatch {
                enclosing: 0,
                found: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_sub_block_missing_newline() {
        let err = parse("else pass").unwrap_err();
        assert!(matches!(err, ParseError::IndentationMismatch { .. }));
    }

    #[test]
    fn test_sub_block_fails_to_dedent() {
        let err = parse("if x\n        a\n    b\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::IndentationMismatch {
                enclosing: 0,
                found: 4,
                location: SourceLocation::new(2, 10),
            }
        );
    }

    #[test]
    fn test_return_keyword_operand() {
        let program = parse("return 'done'").unwrap();
        let ret = &program[0];
        assert_eq!(ret.kind, NodeKind::Return);
        assert_eq!(ret[0].kind, NodeKind::Token(LexemeKind::String));
        assert_eq!(ret[0].payload, "'done'");
    }

    #[test]
    fn test_return_at_end_of_input() {
        let err = parse("return").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }
}
