//! Token tree representation
//!
//! Token streams handed to the annotator and the formats are either a flat list of leaves or a
//! tree whose composite nodes group related tokens (one composite per source line, or whatever
//! grouping a host renderer uses). Both shapes are the same type: a sequence of [`TokenNode`].
//!
//! # Design Principles
//!
//! 1. **Lossless**: leaves are never dropped or merged, so [`text`] of any tree equals the
//!    input that produced it.
//! 2. **Unrollable**: any tree can be unrolled back into the flat, document-ordered leaf list.

use super::core::Token;
use serde::{Serialize, Serializer};

/// A node in a token tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenNode {
    Leaf(Token),
    Composite(Vec<TokenNode>),
}

impl TokenNode {
    /// Document-ordered leaves below (or at) this node.
    pub fn unroll(&self) -> Vec<Token> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<Token>) {
        match self {
            TokenNode::Leaf(token) => out.push(token.clone()),
            TokenNode::Composite(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            TokenNode::Leaf(_) => 1,
            TokenNode::Composite(children) => children.iter().map(TokenNode::leaf_count).sum(),
        }
    }

    fn push_text(&self, out: &mut String) {
        match self {
            TokenNode::Leaf(token) => out.push_str(&token.text),
            TokenNode::Composite(children) => {
                for child in children {
                    child.push_text(out);
                }
            }
        }
    }
}

impl From<Token> for TokenNode {
    fn from(token: Token) -> Self {
        TokenNode::Leaf(token)
    }
}

impl Serialize for TokenNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TokenNode::Leaf(token) => token.serialize(serializer),
            TokenNode::Composite(children) => children.serialize(serializer),
        }
    }
}

/// Wrap a flat token list as leaves.
pub fn leaves(tokens: Vec<Token>) -> Vec<TokenNode> {
    tokens.into_iter().map(TokenNode::Leaf).collect()
}

/// Flatten a sequence of nodes into document-ordered leaves.
pub fn unroll(nodes: &[TokenNode]) -> Vec<Token> {
    let mut out = Vec::new();
    for node in nodes {
        node.collect_leaves(&mut out);
    }
    out
}

/// Concatenated text of a sequence of nodes.
pub fn text(nodes: &[TokenNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.push_text(&mut out);
    }
    out
}

/// Group a flat token list into one composite per source line.
///
/// The newline ends its own line. A token spanning several lines (a block comment or a
/// multi-line string) belongs to the line it starts on. A trailing line with no tokens is not
/// emitted, so `"a\n"` groups into a single line.
pub fn group_lines(tokens: Vec<Token>) -> Vec<TokenNode> {
    let mut lines = Vec::new();
    let mut current = Vec::new();

    for token in tokens {
        let ends_line = token.text.ends_with('\n');
        current.push(TokenNode::Leaf(token));
        if ends_line {
            lines.push(TokenNode::Composite(std::mem::take(&mut current)));
        }
    }

    if !current.is_empty() {
        lines.push(TokenNode::Composite(current));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metta::token::Category;

    fn plain(text: &str, start: usize) -> Token {
        Token::new(Category::PlainText, text, start..start + text.len())
    }

    #[test]
    fn test_flat_unroll() {
        let tokens = vec![plain("a", 0), plain(" ", 1), plain("b", 2)];
        let nodes = leaves(tokens.clone());
        assert_eq!(unroll(&nodes), tokens);
    }

    #[test]
    fn test_empty_unroll() {
        assert_eq!(unroll(&[]), vec![]);
        assert_eq!(text(&[]), "");
    }

    #[test]
    fn test_nested_unroll_keeps_document_order() {
        let nodes = vec![
            TokenNode::Leaf(plain("a", 0)),
            TokenNode::Composite(vec![
                TokenNode::Leaf(plain("b", 1)),
                TokenNode::Composite(vec![TokenNode::Leaf(plain("c", 2))]),
            ]),
            TokenNode::Leaf(plain("d", 3)),
        ];
        let unrolled: Vec<String> = unroll(&nodes).into_iter().map(|t| t.text).collect();
        assert_eq!(unrolled, vec!["a", "b", "c", "d"]);
        assert_eq!(text(&nodes), "abcd");
        assert_eq!(nodes[1].leaf_count(), 2);
    }

    #[test]
    fn test_group_lines() {
        let tokens = vec![plain("a", 0), plain("\n", 1), plain("b", 2), plain("\n", 3)];
        let lines = group_lines(tokens);
        assert_eq!(lines.len(), 2);
        assert_eq!(text(&lines[..1]), "a\n");
        assert_eq!(text(&lines[1..]), "b\n");
    }

    #[test]
    fn test_group_lines_without_trailing_newline() {
        let tokens = vec![plain("\n", 0), plain("x", 1)];
        let lines = group_lines(tokens);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], TokenNode::Composite(vec![TokenNode::Leaf(plain("\n", 0))]));
        assert_eq!(lines[1], TokenNode::Composite(vec![TokenNode::Leaf(plain("x", 1))]));
    }

    #[test]
    fn test_group_lines_empty() {
        assert!(group_lines(vec![]).is_empty());
    }
}
