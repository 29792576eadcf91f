//! Detokenizer
//!
//! Converts tokens back into source text. Tokens keep their exact source slice, so this is a
//! plain concatenation; it exists for round-trip testing and for callers that edit token
//! streams and want the text back.

use super::core::Token;

/// Concatenate token text in order.
pub fn detokenize(tokens: &[Token]) -> String {
    let mut out = String::with_capacity(tokens.iter().map(|t| t.text.len()).sum());
    for token in tokens {
        out.push_str(&token.text);
    }
    out
}
