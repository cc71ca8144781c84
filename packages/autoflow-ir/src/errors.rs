//! Error types for autoflow-ir
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

use crate::config::ConfigError;
use crate::shared::models::Span;

/// Main error type for transform operations
#[derive(Debug, Error)]
pub enum TransformError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source text could not be turned into a syntax tree
    #[error("Parse error in {file_path} at {span}: {message}")]
    Parse {
        file_path: String,
        message: String,
        span: Span,
    },

    /// An internal matcher invariant was broken. Aborts the whole unit.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// The host cannot supply a capability the rewrite depends on
    #[error("Host capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An input cannot be given its own path under the output directory
    #[error("Output error for {path}: {message}")]
    Output { path: String, message: String },
}

impl TransformError {
    /// Create a parse error
    pub fn parse(file_path: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        TransformError::Parse {
            file_path: file_path.into(),
            message: message.into(),
            span,
        }
    }

    /// Create a contract violation
    pub fn contract_violation(msg: impl Into<String>) -> Self {
        TransformError::ContractViolation(msg.into())
    }

    /// Create an output placement error
    pub fn output(path: impl Into<String>, message: impl Into<String>) -> Self {
        TransformError::Output {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a capability error
    pub fn capability_unavailable(msg: impl Into<String>) -> Self {
        TransformError::CapabilityUnavailable(msg.into())
    }

    /// Whether the error points at a bug in the rewrite engine rather than at the input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            TransformError::ContractViolation(_) | TransformError::CapabilityUnavailable(_)
        )
    }
}

/// Result type alias for transform operations
pub type Result<T> = std::result::Result<T, TransformError>;
