//! Rule-table tokenizer
//!
//!     The tokenizer keeps a single cursor. At each position it asks the grammar for the first
//!     matching rule; when nothing matches it emits exactly one character as plain text. Every
//!     step advances the cursor, so a run takes at most `input.len()` steps and the tokens
//!     always cover the input exactly.
//!
//!     The decision at a position depends only on the text from the cursor onwards. Adjacent
//!     tokens of the same category are kept separate.

use super::rules::Grammar;
use crate::metta::token::{Category, Token};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Tokenizer {
    grammar: Grammar,
}

impl Tokenizer {
    pub fn new(grammar: Grammar) -> Self {
        Tokenizer { grammar }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Split `input` into classified tokens. Never fails.
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < input.len() {
            let rest = &input[pos..];
            let (category, len) = self
                .grammar
                .match_at(rest)
                .unwrap_or_else(|| (Category::PlainText, first_char_len(rest)));
            tokens.push(Token::from_source(category, input, pos..pos + len));
            pos += len;
        }

        debug!(
            grammar = self.grammar.name(),
            bytes = input.len(),
            tokens = tokens.len(),
            "tokenized"
        );
        tokens
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer::new(Grammar::metta())
    }
}

fn first_char_len(rest: &str) -> usize {
    rest.chars().next().map_or(1, char::len_utf8)
}
