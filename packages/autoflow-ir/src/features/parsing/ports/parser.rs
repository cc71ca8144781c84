//! Parser port (interface)
//!
//! Defines the contract for turning source text into a [`SourceUnit`].

use crate::errors::Result;
use crate::features::parsing::domain::SourceUnit;

/// Parser trait - abstraction over parsing implementation
pub trait Parser: Send + Sync {
    /// Parse source code into a SourceUnit named `file_path`
    fn parse(&self, source: &str, file_path: &str) -> Result<SourceUnit>;

    /// Check if this parser supports the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Get supported language name
    fn language_name(&self) -> &'static str;
}
