//! Tutorial text documents
//!
//! Chapter and contribution text is plain prose with fenced blocks. Parsing is total: any
//! text produces a document, and malformed fences simply stay part of the prose.

pub mod blocks;
pub mod lexer;

pub use blocks::{parse_document, Block, Document};
