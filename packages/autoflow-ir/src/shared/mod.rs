//! Shared module - Common types and utilities
//!
//! This module contains types that are shared across all features.
//! It has no tree-sitter dependency: the syntax tree here is what the
//! parser produces and what the rewrite and the printer consume.

#[macro_use]
pub mod macros;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
pub use utils::scope_stack::ScopeStack;
