//! Output formats for highlighted tokens
//!
//! Each format implements [`Formatter`] and is registered by name in a [`FormatRegistry`].
//! Formats receive the annotated token tree; flat lists are just trees without composites.

pub mod ansi;
pub mod html;
pub mod registry;
pub mod serialized;
pub mod simple;

pub use ansi::AnsiFormatter;
pub use html::{escape_html, render_document_html, HtmlFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serialized::{JsonFormatter, YamlFormatter};
pub use simple::TokenListFormatter;
