//! Tree-sitter based parser implementation

pub mod languages;
mod lowering;
mod parser;

pub use parser::TreeSitterParser;
