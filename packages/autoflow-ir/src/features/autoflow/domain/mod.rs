//! Autoflow domain: tree visitor, pass context and host capabilities

pub mod context;
pub mod fold;
pub mod host;
pub mod visit;

pub use context::{PassContext, TargetRefs};
pub use fold::Fold;
pub use host::{AsyncQualifierProbe, IdentityNamer, SyntaxFlagProbe};
pub use visit::Visit;
