//! Token types shared by the tokenizer, the annotator and the output formats.
//!
//! Token Layers
//!
//!     Leaf Tokens:
//!         Produced by the rule-table tokenizer, one per rule match. See [core](core).
//!
//!     Token Trees:
//!         Leaves grouped into composite nodes, either by a host renderer or by
//!         [group_lines](stream::group_lines). The annotator walks both shapes with one shared
//!         bracket stack. See [stream](stream).

pub mod core;
pub mod formatting;
pub mod stream;

pub use core::{Category, DepthClass, Token, DEFAULT_DEPTH_CYCLE};
pub use formatting::detokenize;
pub use stream::{group_lines, leaves, text, unroll, TokenNode};
