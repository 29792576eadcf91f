//! Core token types
//!
//!     A token is the atomic output unit of the highlighter: a category plus the exact slice of
//!     source text it covers. Tokens never overlap and never drop characters, so concatenating
//!     their text always reproduces the input.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Range;

/// Number of depth classes a nesting level cycles through.
pub const DEFAULT_DEPTH_CYCLE: u8 = 6;

/// Nesting depth folded into a small cyclic range, used only for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepthClass(u8);

impl DepthClass {
    /// Fold a true nesting depth into `0..cycle`. A zero cycle is treated as 1.
    pub fn new(depth: usize, cycle: u8) -> Self {
        let cycle = usize::from(cycle.max(1));
        // depth % cycle < cycle <= u8::MAX
        DepthClass((depth % cycle) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DepthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Syntax category assigned to a token.
///
/// The tokenizer only ever produces the raw [`Category::Bracket`] for brackets. The annotator
/// rewrites parentheses into [`Category::BracketOpen`], [`Category::BracketClose`] or
/// [`Category::BracketUnmatched`]; square and curly brackets stay `Bracket`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Comment,
    String,
    Variable,
    NamespaceRef,
    Keyword,
    Operator,
    Number,
    FunctionName,
    Bracket,
    BracketOpen(DepthClass),
    BracketClose(DepthClass),
    BracketUnmatched,
    Punctuation,
    PlainText,
}

impl Category {
    /// Stable kebab-case name shared by every output format.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Comment => "comment",
            Category::String => "string",
            Category::Variable => "variable",
            Category::NamespaceRef => "namespace-ref",
            Category::Keyword => "keyword",
            Category::Operator => "operator",
            Category::Number => "number",
            Category::FunctionName => "function-name",
            Category::Bracket => "bracket",
            Category::BracketOpen(_) => "bracket-open",
            Category::BracketClose(_) => "bracket-close",
            Category::BracketUnmatched => "bracket-unmatched",
            Category::Punctuation => "punctuation",
            Category::PlainText => "plain-text",
        }
    }

    /// Depth class of an annotated parenthesis, `None` for everything else.
    pub fn depth_class(&self) -> Option<DepthClass> {
        match self {
            Category::BracketOpen(depth) | Category::BracketClose(depth) => Some(*depth),
            _ => None,
        }
    }

    pub fn is_paren(&self) -> bool {
        matches!(
            self,
            Category::BracketOpen(_) | Category::BracketClose(_) | Category::BracketUnmatched
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.depth_class() {
            Some(depth) => write!(f, "{}({})", self.name(), depth),
            None => f.write_str(self.name()),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A classified slice of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub category: Category,
    pub text: String,
    /// Byte range of `text` inside the tokenized input.
    pub span: Range<usize>,
}

impl Token {
    pub fn new(category: Category, text: impl Into<String>, span: Range<usize>) -> Self {
        Token {
            category,
            text: text.into(),
            span,
        }
    }

    /// Build a token from a slice of `source`.
    pub fn from_source(category: Category, source: &str, span: Range<usize>) -> Self {
        Token::new(category, &source[span.clone()], span)
    }

    /// Same token with a different category.
    pub fn relabel(self, category: Category) -> Self {
        Token { category, ..self }
    }

    pub fn depth_class(&self) -> Option<DepthClass> {
        self.category.depth_class()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.category, self.text)
    }
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    depth: Option<u8>,
    text: &'a str,
    start: usize,
    end: usize,
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TokenRecord {
            category: self.category,
            depth: self.depth_class().map(DepthClass::get),
            text: &self.text,
            start: self.span.start,
            end: self.span.end,
        }
        .serialize(serializer)
    }
}
