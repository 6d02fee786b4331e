// AST (Abstract Syntax Tree) definitions for sprig

use super::lexer::LexemeKind;
use std::fmt;
use std::ops::Index;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Node tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Block,
    Def,
    Argv,
    Ident,
    Call,
    Return,
    If,
    Elif,
    Else,
    Eq,
    /// A primary expression other than a plain word, tagged with the lexeme
    /// category it came from (number, string, member, keyword, ...)
    Token(LexemeKind),
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Block => "block",
            NodeKind::Def => "def",
            NodeKind::Argv => "argv",
            NodeKind::Ident => "ident",
            NodeKind::Call => "call",
            NodeKind::Return => "return",
            NodeKind::If => "if",
            NodeKind::Elif => "elif",
            NodeKind::Else => "else",
            NodeKind::Eq => "eq",
            NodeKind::Token(kind) => kind.as_str(),
        }
    }
}

impl From<LexemeKind> for NodeKind {
    fn from(kind: LexemeKind) -> Self {
        match kind {
            LexemeKind::Word => NodeKind::Ident,
            other => NodeKind::Token(other),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tree node: a tag, a string payload and the children it exclusively owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub payload: String,
    pub children: Vec<Node>,
    pub location: SourceLocation,
}

impl Node {
    pub fn new(kind: NodeKind, location: SourceLocation) -> Self {
        Node {
            kind,
            payload: String::new(),
            children: Vec::new(),
            location,
        }
    }

    pub fn leaf(kind: NodeKind, payload: impl Into<String>, location: SourceLocation) -> Self {
        Node {
            kind,
            payload: payload.into(),
            children: Vec::new(),
            location,
        }
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn insert(&mut self, index: usize, child: Node) {
        self.children.insert(index, child);
    }

    pub fn extend(&mut self, children: impl IntoIterator<Item = Node>) {
        self.children.extend(children);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }

    /// Write this node and its subtree, each level indented two more spaces.
    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(
            f,
            "{:indent$}{}: {}",
            "",
            self.kind,
            quote_payload(&self.payload),
            indent = depth * 2
        )?;
        for child in &self.children {
            writeln!(f)?;
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl Index<usize> for Node {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.children[index]
    }
}

impl IntoIterator for Node {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.into_iter()
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

/// Renders the indented tree dump, one `kind: 'payload'` line per node.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// Quote a payload for display: single quotes unless the text contains a
/// single quote and no double quote.
pub fn quote_payload(payload: &str) -> String {
    let quote = if payload.contains('\'') && !payload.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(payload.len() + 2);
    out.push(quote);
    for ch in payload.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    #[test]
    fn test_quote_payload() {
        assert_eq!(quote_payload(""), "''");
        assert_eq!(quote_payload("x"), "'x'");
        assert_eq!(quote_payload("it's"), "\"it's\"");
        assert_eq!(quote_payload("'a' \"b\""), "'\\'a\\' \"b\"'");
        assert_eq!(quote_payload("a\\n\n"), "'a\\\\n\\n'");
    }

    #[test]
    fn test_tree_dump() {
        let mut call = Node::new(NodeKind::Call, loc());
        call.push(Node::leaf(NodeKind::Ident, "f", loc()));
        call.push(Node::leaf(NodeKind::Token(LexemeKind::Number), "1", loc()));
        let mut block = Node::new(NodeKind::Block, loc());
        block.push(call);

        assert_eq!(
            block.to_string(),
            "block: ''\n  call: ''\n    ident: 'f'\n    number: '1'"
        );
    }

    #[test]
    fn test_child_editing() {
        let mut node = Node::new(NodeKind::Block, loc());
        node.push(Node::leaf(NodeKind::Ident, "b", loc()));
        node.insert(0, Node::leaf(NodeKind::Ident, "a", loc()));
        node.extend(vec![Node::leaf(NodeKind::Ident, "c", loc())]);

        let names: Vec<&str> = node.iter().map(|n| n.payload.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(node.len(), 3);
        assert_eq!(node[1].payload, "b");
    }

    #[test]
    fn test_word_maps_to_ident() {
        assert_eq!(NodeKind::from(LexemeKind::Word), NodeKind::Ident);
        assert_eq!(
            NodeKind::from(LexemeKind::String).to_string(),
            "string"
        );
    }
}
