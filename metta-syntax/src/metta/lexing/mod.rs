//! Lexing
//!
//! This module turns source text into a flat, lossless sequence of classified tokens.
//!
//! Structure:
//!     [rules] holds the ordered rule tables (the grammar) and [tokenizer] the cursor loop
//! that applies them. Grammars are plain values passed into the tokenizer, so individual rules
//! can be tested in isolation and several grammars can coexist.

pub mod rules;
pub mod tokenizer;

pub use rules::{Grammar, GrammarBuilder, GrammarKind, Matcher, Pattern, Rule, DEFAULT_KEYWORDS};
pub use tokenizer::Tokenizer;

use crate::metta::token::Token;
use once_cell::sync::Lazy;

static DEFAULT_TOKENIZER: Lazy<Tokenizer> = Lazy::new(Tokenizer::default);

/// Tokenize with the default metta grammar.
pub fn tokenize(input: &str) -> Vec<Token> {
    DEFAULT_TOKENIZER.tokenize(input)
}
