//! Shared configuration loader for the MeTTa highlighting toolchain.
//!
//! `defaults/metta.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MettaConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use metta_syntax::metta::lexing::GrammarKind;
use metta_syntax::HighlightSettings;
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/metta.default.toml");

/// Top-level configuration consumed by the toolchain.
#[derive(Debug, Clone, Deserialize)]
pub struct MettaConfig {
    pub highlight: HighlightConfig,
    pub render: RenderConfig,
}

/// Tokenizer and annotator knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightConfig {
    pub grammar: String,
    pub depth_cycle: u8,
    pub keywords: Vec<String>,
}

impl HighlightConfig {
    /// Validate and convert into library settings.
    pub fn settings(&self) -> Result<HighlightSettings, ConfigError> {
        let grammar = self
            .grammar
            .parse::<GrammarKind>()
            .map_err(ConfigError::Message)?;
        if self.depth_cycle == 0 {
            return Err(ConfigError::Message(
                "highlight.depth_cycle must be at least 1".to_string(),
            ));
        }
        Ok(HighlightSettings {
            grammar,
            depth_cycle: self.depth_cycle,
            keywords: self.keywords.clone(),
        })
    }
}

/// Output knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub format: String,
    pub line_numbers: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MettaConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MettaConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.highlight.grammar, "metta");
        assert_eq!(config.highlight.depth_cycle, 6);
        assert_eq!(config.highlight.keywords, vec!["Type!".to_string()]);
        assert_eq!(config.render.format, "ansi");
        assert!(!config.render.line_numbers);
    }

    #[test]
    fn defaults_match_library_defaults() {
        let settings = load_defaults().unwrap().highlight.settings().unwrap();
        assert_eq!(settings, HighlightSettings::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("highlight.grammar", "editor")
            .expect("override to apply")
            .set_override("highlight.depth_cycle", 3i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let settings = config.highlight.settings().unwrap();
        assert_eq!(settings.grammar, GrammarKind::Editor);
        assert_eq!(settings.depth_cycle, 3);
    }

    #[test]
    fn rejects_unknown_grammar() {
        let config = Loader::new()
            .set_override("highlight.grammar", "prism")
            .unwrap()
            .build()
            .unwrap();
        assert!(config.highlight.settings().is_err());
    }

    #[test]
    fn rejects_zero_cycle() {
        let config = Loader::new()
            .set_override("highlight.depth_cycle", 0i64)
            .unwrap()
            .build()
            .unwrap();
        assert!(config.highlight.settings().is_err());
    }

    #[test]
    fn layers_user_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user.toml");
        std::fs::write(&path, "[render]\nformat = \"html\"\n").unwrap();

        let config = Loader::new().with_file(&path).build().unwrap();
        assert_eq!(config.render.format, "html");
        assert_eq!(config.highlight.grammar, "metta");
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new().with_file("/nonexistent/metta.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/metta.toml")
            .build()
            .unwrap();
        assert_eq!(config.render.format, "ansi");
    }
}
