//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A name that is emitted as an identifier is not one
    #[error("Invalid identifier for field '{field}': '{value}'. {hint}")]
    InvalidIdentifier {
        field: String,
        value: String,
        hint: String,
    },

    /// Required string field is empty
    #[error("Field '{0}' must not be empty")]
    Empty(String),

    /// Two fields that must differ are equal
    #[error("Fields '{first}' and '{second}' must differ (both are '{value}')")]
    Conflict {
        first: String,
        second: String,
        value: String,
    },

    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Unknown name policy
    #[error("Unknown name policy '{0}'. Valid policies: path, strip_extension, file_stem")]
    UnknownNamePolicy(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create an invalid identifier error with a hint
    pub fn invalid_identifier(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            field: field.into(),
            value: value.into(),
            hint: "Use letters, digits, '_' or '$', not starting with a digit.".to_string(),
        }
    }
}
