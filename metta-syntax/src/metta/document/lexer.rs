//! Fence lexer for tutorial text
//!
//! The logos lexer splits text into runs that are enough to find code fences: backtick runs,
//! lowercase words (candidate language tags), newlines, and everything else. The four token
//! classes start with disjoint characters, so every input lexes without errors.

use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    #[regex("`+")]
    Backticks,

    #[regex("[a-z]+")]
    Tag,

    #[token("\n")]
    Newline,

    #[regex(r"[^`a-z\n]+")]
    Other,
}

/// Lex `source` into pieces with their byte ranges.
pub fn pieces(source: &str) -> Vec<(Piece, Range<usize>)> {
    let mut lexer = Piece::lexer(source);
    let mut out = Vec::new();

    while let Some(result) = lexer.next() {
        // The token classes cover every character; an error would only drop text.
        let piece = result.unwrap_or(Piece::Other);
        out.push((piece, lexer.span()));
    }

    out
}
