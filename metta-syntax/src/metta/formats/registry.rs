//! Named output formats
//!
//! A [`FormatRegistry`] maps format names (`html`, `ansi`, ...) to [`Formatter`]s. The CLI and
//! the config layer only ever deal in names; the registry turns a name plus an annotated token
//! tree into output text.

use crate::metta::token::TokenNode;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No formatter is registered under this name
    FormatNotFound(String),
    /// A serializer rejected the token tree
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Renders annotated tokens. Composites are lines when the tree came from
/// [`group_lines`](crate::metta::token::group_lines); formats without a notion of lines may
/// simply unroll them.
pub trait Formatter: Send + Sync {
    fn name(&self) -> &str;

    fn format_tokens(&self, nodes: &[TokenNode]) -> Result<String, FormatError>;

    /// One line for `--list-formats`.
    fn description(&self) -> &str {
        ""
    }
}

#[derive(Default)]
pub struct FormatRegistry {
    // Ordered so listings come out sorted.
    formatters: BTreeMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// html, ansi, json, yaml and tokens.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::HtmlFormatter::default());
        registry.register(super::AnsiFormatter::default());
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry.register(super::TokenListFormatter);
        registry
    }

    /// Add `formatter` under its own name, replacing any formatter already using that name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(Box::as_ref)
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Render `nodes` with the formatter called `format`.
    pub fn format(&self, nodes: &[TokenNode], format: &str) -> Result<String, FormatError> {
        match self.get(format) {
            Some(formatter) => formatter.format_tokens(nodes),
            None => Err(FormatError::FormatNotFound(format.to_string())),
        }
    }

    /// Registered names in sorted order.
    pub fn list_formats(&self) -> Vec<&str> {
        self.formatters.keys().map(String::as_str).collect()
    }

    /// `(name, description)` pairs in sorted order.
    pub fn descriptions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.formatters
            .iter()
            .map(|(name, formatter)| (name.as_str(), formatter.description()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metta::token::leaves;
    use crate::metta::lexing::tokenize;

    struct UpperFormatter;

    impl Formatter for UpperFormatter {
        fn name(&self) -> &str {
            "upper"
        }

        fn format_tokens(&self, nodes: &[TokenNode]) -> Result<String, FormatError> {
            Ok(crate::metta::token::text(nodes).to_uppercase())
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert!(registry.list_formats().is_empty());
    }

    #[test]
    fn test_register_and_format() {
        let mut registry = FormatRegistry::new();
        registry.register(UpperFormatter);
        assert!(registry.has("upper"));
        let nodes = leaves(tokenize("(abc)"));
        assert_eq!(registry.format(&nodes, "upper").unwrap(), "(ABC)");
    }

    #[test]
    fn test_format_not_found() {
        let registry = FormatRegistry::new();
        let result = registry.format(&[], "nonexistent");
        assert_eq!(
            result,
            Err(FormatError::FormatNotFound("nonexistent".to_string()))
        );
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = FormatRegistry::with_defaults();
        registry.register(super::super::HtmlFormatter::with_line_numbers(true));
        let html = registry
            .format(&[TokenNode::Composite(leaves(tokenize("x")))], "html")
            .unwrap();
        assert!(html.contains("data-line=\"1\""));
        assert_eq!(registry.list_formats().len(), 5);
    }

    #[test]
    fn test_descriptions_are_listed() {
        let registry = FormatRegistry::with_defaults();
        let names: Vec<&str> = registry.descriptions().map(|(name, _)| name).collect();
        assert_eq!(names, registry.list_formats());
        assert!(registry.descriptions().all(|(_, description)| !description.is_empty()));
    }

    #[test]
    fn test_default_formats() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(
            registry.list_formats(),
            vec!["ansi", "html", "json", "tokens", "yaml"]
        );
    }
}
