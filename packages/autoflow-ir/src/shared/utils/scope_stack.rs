//! Scope stack for enclosing class names
//!
//! Tracks nested class declarations during a rewrite so that a synthesized
//! `this` parameter can be typed to the innermost enclosing class.

/// Scope stack for managing enclosing class names
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    scopes: Vec<String>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new scope (empty string for an anonymous class)
    pub fn push(&mut self, name: impl Into<String>) {
        self.scopes.push(name.into());
    }

    /// Pop the current scope
    pub fn pop(&mut self) -> Option<String> {
        self.scopes.pop()
    }

    /// Get current scope name
    pub fn current(&self) -> Option<&str> {
        self.scopes.last().map(|s| s.as_str())
    }

    /// Innermost name, or "" outside any scope
    pub fn current_or_empty(&self) -> &str {
        self.current().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_stack_current() {
        let mut stack = ScopeStack::new();
        assert_eq!(stack.current_or_empty(), "");
        stack.push("Outer");
        stack.push("");
        assert_eq!(stack.current(), Some(""));
        assert_eq!(stack.pop(), Some(String::new()));
        assert_eq!(stack.current_or_empty(), "Outer");
        assert_eq!(stack.pop(), Some("Outer".to_string()));
        assert_eq!(stack.pop(), None);
    }
}
