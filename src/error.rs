use std::path::PathBuf;

/// Errors from asking the move oracle for a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("move oracle unavailable: {0}")]
    Unavailable(String),

    #[error("move oracle answered with HTTP status {0}")]
    Status(u16),

    #[error("move oracle suggested {suggestion:?}, which is not a playable column")]
    InvalidSuggestion { suggestion: String },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
