//! Printer port (interface)

use crate::shared::models::SourceUnit;

/// Printer trait - abstraction over source emission
pub trait Printer: Send + Sync {
    /// Render a whole unit as source text
    fn print_unit(&self, unit: &SourceUnit) -> String;
}
