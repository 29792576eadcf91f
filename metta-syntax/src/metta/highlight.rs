//! Highlighting entry point
//!
//! [`Highlighter`] bundles a tokenizer and a depth cycle and runs the full pipeline. It holds
//! no per-request state, so one instance can serve any number of code blocks, from any number
//! of threads.

use crate::metta::annotating::{annotate_flat_with_report, annotate_with_report, AnnotationReport};
use crate::metta::lexing::{GrammarBuilder, GrammarKind, Tokenizer, DEFAULT_KEYWORDS};
use crate::metta::token::{group_lines, Token, TokenNode, DEFAULT_DEPTH_CYCLE};
use std::fmt;
use std::ops::Range;
use tracing::{debug, warn};

/// Knobs for building a [`Highlighter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSettings {
    pub grammar: GrammarKind,
    pub depth_cycle: u8,
    pub keywords: Vec<String>,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        HighlightSettings {
            grammar: GrammarKind::Metta,
            depth_cycle: DEFAULT_DEPTH_CYCLE,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Errors raised while building a highlighter from settings.
#[derive(Debug, Clone)]
pub enum SettingsError {
    /// The depth cycle must be at least 1
    ZeroDepthCycle,
    /// A keyword produced an invalid pattern
    InvalidKeyword(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::ZeroDepthCycle => write!(f, "depth_cycle must be at least 1"),
            SettingsError::InvalidKeyword(msg) => write!(f, "Invalid keyword list: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

#[derive(Debug, Clone)]
pub struct Highlighter {
    tokenizer: Tokenizer,
    cycle: u8,
}

impl Highlighter {
    pub fn new(tokenizer: Tokenizer, cycle: u8) -> Self {
        Highlighter {
            tokenizer,
            cycle: cycle.max(1),
        }
    }

    pub fn from_settings(settings: &HighlightSettings) -> Result<Self, SettingsError> {
        if settings.depth_cycle == 0 {
            return Err(SettingsError::ZeroDepthCycle);
        }
        let grammar = GrammarBuilder::new(settings.grammar)
            .keywords(settings.keywords.iter().cloned())
            .build()
            .map_err(|e| SettingsError::InvalidKeyword(e.to_string()))?;
        debug!(
            grammar = %settings.grammar,
            rules = grammar.rules().len(),
            cycle = settings.depth_cycle,
            "highlighter ready"
        );
        Ok(Highlighter::new(Tokenizer::new(grammar), settings.depth_cycle))
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn cycle(&self) -> u8 {
        self.cycle
    }

    /// Tokenize and annotate into a flat token list.
    pub fn highlight(&self, source: &str) -> Vec<Token> {
        annotate_flat_with_report(self.tokenizer.tokenize(source), self.cycle).0
    }

    /// Tokenize, group by line and annotate. Nesting depth carries across lines.
    pub fn highlight_lines(&self, source: &str) -> Vec<TokenNode> {
        let lines = group_lines(self.tokenizer.tokenize(source));
        annotate_with_report(lines, self.cycle).0
    }

    /// Report the parentheses in `source` that cannot be paired.
    pub fn check(&self, source: &str) -> AnnotationReport {
        let (_, report) = annotate_flat_with_report(self.tokenizer.tokenize(source), self.cycle);
        if !report.is_balanced() {
            warn!(
                unmatched = report.unmatched.len(),
                unclosed = report.unclosed.len(),
                "unbalanced parentheses"
            );
        }
        report
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Highlighter::new(Tokenizer::default(), DEFAULT_DEPTH_CYCLE)
    }
}

/// 1-based line and column (in chars) of byte `offset` in `source`.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Human-readable diagnostics for an annotation report, one per problem, in source order.
pub fn describe_report(source: &str, report: &AnnotationReport) -> Vec<String> {
    let mut problems: Vec<(&Range<usize>, &str)> = report
        .unmatched
        .iter()
        .map(|span| (span, "unmatched closing parenthesis"))
        .chain(
            report
                .unclosed
                .iter()
                .map(|span| (span, "unclosed opening parenthesis")),
        )
        .collect();
    problems.sort_by_key(|(span, _)| span.start);

    problems
        .into_iter()
        .map(|(span, message)| {
            let (line, column) = line_col(source, span.start);
            format!("{}:{}: {}", line, column, message)
        })
        .collect()
}
