//! Printing Feature
//!
//! Serializes the shared syntax tree back to TypeScript source.
//!
//! ## Structure
//! - `ports/` - Printer trait
//! - `infrastructure/` - TypeScriptPrinter

pub mod infrastructure;
pub mod ports;

pub use infrastructure::TypeScriptPrinter;
pub use ports::Printer;
