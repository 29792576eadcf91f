//! Block assembly
//!
//! Fence Rules
//!
//!     - An opener is three backticks, an optional lowercase tag and a newline. In a longer
//!       backtick run only the last three open the fence; the rest stay text.
//!     - The block closes at the next three backticks anywhere, even mid-line.
//!     - An opener without a closer is not a block and stays in the surrounding text.
//!     - Tag `mermaid` makes a diagram, an empty tag a code block without language.
//!
//! Text between blocks is trimmed and split into paragraphs at blank lines.

use super::lexer::{pieces, Piece};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::ops::Range;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n+").unwrap());

const FENCE: usize = 3;
const DIAGRAM_TAG: &str = "mermaid";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Block {
    Paragraph { text: String },
    Code { language: Option<String>, code: String },
    Diagram { source: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    /// Code blocks as `(language, code)` pairs, in order.
    pub fn code_blocks(&self) -> impl Iterator<Item = (Option<&str>, &str)> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Code { language, code } => Some((language.as_deref(), code.as_str())),
            _ => None,
        })
    }
}

struct Fence {
    /// Byte range of the opener, backticks through newline.
    open: Range<usize>,
    tag: Range<usize>,
}

/// Opener starting in piece `i`, considering only bytes from `cursor` on.
fn opener_at(list: &[(Piece, Range<usize>)], i: usize, cursor: usize) -> Option<Fence> {
    let (piece, span) = &list[i];
    if *piece != Piece::Backticks || span.end.saturating_sub(span.start.max(cursor)) < FENCE {
        return None;
    }
    let start = span.end - FENCE;
    match list.get(i + 1) {
        Some((Piece::Newline, nl)) => Some(Fence {
            open: start..nl.end,
            tag: span.end..span.end,
        }),
        Some((Piece::Tag, tag)) => match list.get(i + 2) {
            Some((Piece::Newline, nl)) => Some(Fence {
                open: start..nl.end,
                tag: tag.clone(),
            }),
            _ => None,
        },
        _ => None,
    }
}

/// First closing fence at or after piece `from`: returns its start and the piece index.
fn closer_from(list: &[(Piece, Range<usize>)], from: usize) -> Option<(usize, usize)> {
    list.iter()
        .enumerate()
        .skip(from)
        .find(|(_, (piece, span))| *piece == Piece::Backticks && span.len() >= FENCE)
        .map(|(i, (_, span))| (span.start, i))
}

/// Split tutorial text into paragraphs, code blocks and diagrams.
pub fn parse_document(source: &str) -> Document {
    let list = pieces(source);
    let mut blocks = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;
    let mut i = 0;

    while i < list.len() {
        let Some(fence) = opener_at(&list, i, cursor) else {
            i += 1;
            continue;
        };
        let after_open = if fence.tag.is_empty() { i + 2 } else { i + 3 };
        let Some((close_start, close_piece)) = closer_from(&list, after_open) else {
            break;
        };

        push_paragraphs(&mut blocks, &source[text_start..fence.open.start]);
        let tag = &source[fence.tag.clone()];
        let body = source[fence.open.end..close_start].to_string();
        blocks.push(match tag {
            DIAGRAM_TAG => Block::Diagram { source: body },
            "" => Block::Code {
                language: None,
                code: body,
            },
            other => Block::Code {
                language: Some(other.to_string()),
                code: body,
            },
        });

        cursor = close_start + FENCE;
        text_start = cursor;
        // The closing run may hold the backticks of the next opener.
        i = close_piece;
    }

    push_paragraphs(&mut blocks, &source[text_start..]);
    Document { blocks }
}

fn push_paragraphs(blocks: &mut Vec<Block>, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    for paragraph in PARAGRAPH_BREAK.split(text) {
        if !paragraph.trim().is_empty() {
            blocks.push(Block::Paragraph {
                text: paragraph.to_string(),
            });
        }
    }
}
