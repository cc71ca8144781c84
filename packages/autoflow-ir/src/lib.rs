/*
 * Autoflow IR - async-to-flow rewrite pass for mobx-keystone models
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Syntax tree model, Span, logging macros, utilities
 * - features/    : Vertical slices (parsing → autoflow rewrite → printing)
 * - pipeline/    : Per-file and batch orchestration
 * - config/      : Transform configuration (builder + YAML)
 *
 * One invocation rewrites one source unit and owns all of its state,
 * so batches run in parallel on the rayon pool.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::should_implement_trait)] // from_str returns ConfigResult

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities (declared first so the logging macros are in scope)
#[macro_use]
pub mod shared;

/// Error types
pub mod errors;

/// Configuration system
pub mod config;

/// Feature modules (parsing, autoflow rewrite, printing)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{NamePolicy, TransformConfig};
pub use errors::{Result, TransformError};
pub use features::autoflow::{
    create_transformer, AsyncQualifierProbe, AutoflowTransformer, IdentityNamer,
    SyntaxFlagProbe, TransformOptions, TransformOutcome,
};
pub use features::parsing::{Parser, TreeSitterParser};
pub use features::printing::{Printer, TypeScriptPrinter};
pub use pipeline::{ProcessResult, UnitProcessor};
pub use shared::models::SourceUnit;
