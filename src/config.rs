// Fixed vocabulary for the tokenizer

use rustc_hash::FxHashSet;

/// Words reclassified from `word` to `keyword` when they complete.
pub const KEYWORDS: &[&str] = &["if", "elif", "else", "pass", "def", "return"];

/// Recognized symbol strings. Multi-character entries are matched greedily,
/// so every prefix of a multi-character symbol must itself be listed.
pub const SYMBOLS: &[&str] = &[",", "=", "==", "!", "!="];

/// Lookup sets built once from the keyword and symbol tables.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    symbols: FxHashSet<String>,
    keywords: FxHashSet<String>,
}

impl Vocabulary {
    pub fn new(symbols: &[&str], keywords: &[&str]) -> Self {
        Vocabulary {
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn is_symbol(&self, candidate: &str) -> bool {
        self.symbols.contains(candidate)
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::new(SYMBOLS, KEYWORDS)
    }
}
