//! One token per line, for debugging rule tables.

use super::registry::{FormatError, Formatter};
use crate::metta::token::{unroll, TokenNode};

pub struct TokenListFormatter;

impl Formatter for TokenListFormatter {
    fn name(&self) -> &str {
        "tokens"
    }

    fn format_tokens(&self, nodes: &[TokenNode]) -> Result<String, FormatError> {
        Ok(unroll(nodes)
            .iter()
            .map(|token| format!("{}\t{:?}\n", token.category, token.text))
            .collect())
    }

    fn description(&self) -> &str {
        "category<TAB>text, one token per line"
    }
}
