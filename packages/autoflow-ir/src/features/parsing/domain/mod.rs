//! Parsing domain
//!
//! The syntax tree itself lives in `shared::models`; this module only adds
//! what is specific to reading source text.

mod reference_directives;

pub use crate::shared::models::SourceUnit;
pub use reference_directives::ReferenceDirectives;
