//! Printing infrastructure

mod typescript;

pub use typescript::TypeScriptPrinter;
