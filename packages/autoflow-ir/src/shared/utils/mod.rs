//! Shared utilities

pub mod scope_stack;
pub mod words;
