use metta_config::ConfigError;
use metta_syntax::metta::formats::FormatError;
use metta_syntax::metta::highlight::SettingsError;
use std::fmt;

/// Failures that stop the CLI before any output is written.
#[derive(Debug)]
pub enum CliError {
    /// The input file (or stdin) could not be read
    Input(String, std::io::Error),
    Config(ConfigError),
    Settings(SettingsError),
    Format(FormatError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Input(path, e) => write!(f, "Cannot read {}: {}", path, e),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Settings(e) => write!(f, "Invalid highlight settings: {}", e),
            CliError::Format(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<SettingsError> for CliError {
    fn from(e: SettingsError) -> Self {
        CliError::Settings(e)
    }
}

impl From<FormatError> for CliError {
    fn from(e: FormatError) -> Self {
        CliError::Format(e)
    }
}
