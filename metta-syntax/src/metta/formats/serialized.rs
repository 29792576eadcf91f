//! Serialized token output (JSON, YAML)
//!
//! Leaves serialize as `{category, depth?, text, start, end}` records and composites as
//! nested arrays, so the tree shape survives.

use super::registry::{FormatError, Formatter};
use crate::metta::token::TokenNode;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn format_tokens(&self, nodes: &[TokenNode]) -> Result<String, FormatError> {
        serde_json::to_string_pretty(nodes)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Annotated tokens as pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn format_tokens(&self, nodes: &[TokenNode]) -> Result<String, FormatError> {
        serde_yaml::to_string(nodes).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Annotated tokens as YAML"
    }
}
