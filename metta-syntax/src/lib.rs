//! # metta-syntax
//!
//! Best-effort syntax highlighting for MeTTa source text.
//!
//! Data Flow
//!
//!     raw text -> [lexing] tokenizer -> flat tokens -> (optional) [token] line grouping
//!     -> [annotating] bracket-depth annotator -> annotated tokens -> [formats]
//!
//! Neither stage can fail. Unknown characters degrade to plain text and unmatched closing
//! parentheses degrade to an error-styled token, so a code block is always displayable.
//!
//! The [document](metta::document) module splits tutorial text into paragraphs, fenced code
//! blocks and diagram blocks; code blocks are then highlighted with the same pipeline.

pub mod metta;

pub use metta::highlight::{HighlightSettings, Highlighter};
pub use metta::lexing::tokenize;
pub use metta::token::{Category, DepthClass, Token, TokenNode};
