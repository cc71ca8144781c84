//! Parsing Feature
//!
//! Turns TypeScript source text into the shared syntax tree.
//!
//! ## Structure
//! - `domain/` - SourceUnit re-export, reference directive scanning
//! - `ports/` - Parser trait
//! - `application/` - ParseFileUseCase
//! - `infrastructure/` - TreeSitterParser and the syntax tree lowering

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::ParseFileUseCase;
pub use domain::ReferenceDirectives;
pub use infrastructure::TreeSitterParser;
pub use ports::Parser;
