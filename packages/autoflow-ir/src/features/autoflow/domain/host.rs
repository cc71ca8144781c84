//! Host capabilities
//!
//! The rewrite consumes two capabilities it does not implement itself:
//! detecting whether a function value carries the async qualifier, and
//! deriving a class identity string from a file path.

use std::sync::Arc;

use crate::shared::models::Function;

/// Capability probe: does this function value carry the async qualifier?
///
/// Injected at construction time. A transformer built without one fails on
/// first use instead of silently skipping rewrites.
pub trait AsyncQualifierProbe: Send + Sync {
    fn detect_async_qualifier(&self, function: &Function) -> bool;
}

/// Reads the qualifier flag recorded by the parser
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxFlagProbe;

impl AsyncQualifierProbe for SyntaxFlagProbe {
    fn detect_async_qualifier(&self, function: &Function) -> bool {
        function.is_async
    }
}

impl<F> AsyncQualifierProbe for F
where
    F: Fn(&Function) -> bool + Send + Sync,
{
    fn detect_async_qualifier(&self, function: &Function) -> bool {
        self(function)
    }
}

/// Pluggable file path → identity string function
pub type IdentityNamer = Arc<dyn Fn(&str) -> String + Send + Sync>;
