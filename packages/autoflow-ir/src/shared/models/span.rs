//! Source location types
//!
//! Only used to report where parsing failed; the syntax tree itself
//! carries no positions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Span in source code (1-indexed lines, 1-indexed columns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Create a zero span (0:0-0:0)
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_col, self.end_line, self.end_col
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains_line() {
        let span = Span::new(10, 1, 20, 1);
        assert!(span.contains_line(10));
        assert!(span.contains_line(15));
        assert!(span.contains_line(20));
        assert!(!span.contains_line(9));
        assert!(!span.contains_line(21));
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(1, 2, 3, 4).to_string(), "1:2-3:4");
    }
}
