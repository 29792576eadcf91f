//! Bracket-depth annotation
//!
//!     Parenthesis tokens are relabeled with their nesting depth so a renderer can color each
//!     level differently. The depth is folded into a small cycle (6 by default), so the exact
//!     level is not recoverable from the label, only its color slot.
//!
//! Stack Discipline
//!
//!     - `(` takes the depth class of the current stack size, then pushes.
//!     - `)` pops, then takes the depth class of the stack size after the pop, so a closer
//!       always shares its opener's class.
//!     - `)` on an empty stack becomes `bracket-unmatched` and leaves the stack alone; depth
//!       tracking carries on from zero.
//!
//!     One stack is shared across the whole tree, so nesting depth is global to the input
//!     rather than reset per composite. Openers still on the stack at the end are reported
//!     but keep their `bracket-open` label.

use super::mapper::{walk_nodes, NodeMapper};
use crate::metta::token::{leaves, Category, DepthClass, Token, TokenNode, DEFAULT_DEPTH_CYCLE};
use std::ops::Range;

/// An open parenthesis waiting for its closer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenParen {
    /// Document-order leaf index of the opener.
    pub index: usize,
    /// Nesting depth at the time the opener was seen.
    pub depth: usize,
    pub span: Range<usize>,
}

/// LIFO of open parentheses. Its length is the current nesting depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketStack {
    open: Vec<OpenParen>,
}

impl BracketStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn push(&mut self, index: usize, span: Range<usize>) -> &OpenParen {
        let depth = self.open.len();
        self.open.push(OpenParen { index, depth, span });
        &self.open[depth]
    }

    pub fn pop(&mut self) -> Option<OpenParen> {
        self.open.pop()
    }

    pub fn into_open(self) -> Vec<OpenParen> {
        self.open
    }
}

/// Parentheses that could not be paired during annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationReport {
    /// Spans of closers with no opener.
    pub unmatched: Vec<Range<usize>>,
    /// Spans of openers never closed, in document order.
    pub unclosed: Vec<Range<usize>>,
}

impl AnnotationReport {
    pub fn is_balanced(&self) -> bool {
        self.unmatched.is_empty() && self.unclosed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Paren {
    Open,
    Close,
}

fn paren_kind(token: &Token) -> Option<Paren> {
    let relabelable = matches!(token.category, Category::Bracket | Category::PlainText)
        || token.category.is_paren();
    if !relabelable {
        return None;
    }
    match token.text.as_str() {
        "(" => Some(Paren::Open),
        ")" => Some(Paren::Close),
        _ => None,
    }
}

/// Mapper that relabels parentheses using one shared stack.
#[derive(Debug, Clone)]
pub struct BracketAnnotator {
    cycle: u8,
    stack: BracketStack,
    next_index: usize,
    unmatched: Vec<Range<usize>>,
}

impl BracketAnnotator {
    pub fn new(cycle: u8) -> Self {
        BracketAnnotator {
            cycle: cycle.max(1),
            stack: BracketStack::new(),
            next_index: 0,
            unmatched: Vec::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    fn relabel(&mut self, token: Token) -> Token {
        let index = self.next_index;
        self.next_index += 1;

        match paren_kind(&token) {
            Some(Paren::Open) => {
                let depth = self.stack.push(index, token.span.clone()).depth;
                token.relabel(Category::BracketOpen(DepthClass::new(depth, self.cycle)))
            }
            Some(Paren::Close) => match self.stack.pop() {
                Some(_) => {
                    let depth = DepthClass::new(self.stack.depth(), self.cycle);
                    token.relabel(Category::BracketClose(depth))
                }
                None => {
                    self.unmatched.push(token.span.clone());
                    token.relabel(Category::BracketUnmatched)
                }
            },
            None => token,
        }
    }

    pub fn finish(self) -> AnnotationReport {
        AnnotationReport {
            unmatched: self.unmatched,
            unclosed: self
                .stack
                .into_open()
                .into_iter()
                .map(|open| open.span)
                .collect(),
        }
    }
}

impl Default for BracketAnnotator {
    fn default() -> Self {
        BracketAnnotator::new(DEFAULT_DEPTH_CYCLE)
    }
}

impl NodeMapper for BracketAnnotator {
    fn map_leaf(&mut self, token: Token) -> TokenNode {
        TokenNode::Leaf(self.relabel(token))
    }
}

/// Annotate a token tree with the default depth cycle.
pub fn annotate(nodes: Vec<TokenNode>) -> Vec<TokenNode> {
    annotate_with_report(nodes, DEFAULT_DEPTH_CYCLE).0
}

/// Annotate a flat token list with the default depth cycle.
pub fn annotate_flat(tokens: Vec<Token>) -> Vec<Token> {
    let mut annotator = BracketAnnotator::default();
    tokens.into_iter().map(|t| annotator.relabel(t)).collect()
}

/// Annotate a token tree and report the parentheses that could not be paired.
pub fn annotate_with_report(nodes: Vec<TokenNode>, cycle: u8) -> (Vec<TokenNode>, AnnotationReport) {
    let mut annotator = BracketAnnotator::new(cycle);
    let nodes = walk_nodes(nodes, &mut annotator);
    (nodes, annotator.finish())
}

/// Flat variant of [`annotate_with_report`].
pub fn annotate_flat_with_report(tokens: Vec<Token>, cycle: u8) -> (Vec<Token>, AnnotationReport) {
    let (nodes, report) = annotate_with_report(leaves(tokens), cycle);
    let tokens = nodes
        .into_iter()
        .filter_map(|node| match node {
            TokenNode::Leaf(token) => Some(token),
            TokenNode::Composite(_) => None,
        })
        .collect();
    (tokens, report)
}
