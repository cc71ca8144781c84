//! Tree-sitter parser implementation
//!
//! This is where tree-sitter dependency lives.

use std::path::Path;

use tree_sitter::{Node, Parser as TSParser};

use super::lowering::Lowering;
use crate::errors::{Result, TransformError};
use crate::features::parsing::domain::{ReferenceDirectives, SourceUnit};
use crate::features::parsing::ports::Parser;
use crate::shared::models::Span;

/// Tree-sitter based parser
pub struct TreeSitterParser {
    language: TreeSitterLanguage,
}

/// Supported tree-sitter languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeSitterLanguage {
    TypeScript,
    Tsx,
}

impl TreeSitterParser {
    /// Create a TypeScript parser
    pub fn typescript() -> Self {
        Self {
            language: TreeSitterLanguage::TypeScript,
        }
    }

    /// Create a TSX parser
    pub fn tsx() -> Self {
        Self {
            language: TreeSitterLanguage::Tsx,
        }
    }

    /// Parser matching the file extension (`.tsx` → TSX, anything else → TypeScript)
    pub fn for_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some("tsx") => Self::tsx(),
            _ => Self::typescript(),
        }
    }

    /// Get the tree-sitter language
    fn get_ts_language(&self) -> tree_sitter::Language {
        match self.language {
            TreeSitterLanguage::TypeScript => tree_sitter_typescript::language_typescript(),
            TreeSitterLanguage::Tsx => tree_sitter_typescript::language_tsx(),
        }
    }

    /// First `ERROR` or missing node, depth first
    fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
        children
            .into_iter()
            .filter(|child| child.has_error())
            .find_map(Self::first_error)
    }

    fn span_of(node: Node) -> Span {
        Span::new(
            node.start_position().row as u32 + 1,
            node.start_position().column as u32 + 1,
            node.end_position().row as u32 + 1,
            node.end_position().column as u32 + 1,
        )
    }
}

impl Parser for TreeSitterParser {
    fn parse(&self, source: &str, file_path: &str) -> Result<SourceUnit> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.get_ts_language())
            .map_err(|e| {
                TransformError::parse(file_path, format!("Failed to set language: {}", e), Span::zero())
            })?;

        let tree = parser.parse(source, None).ok_or_else(|| {
            TransformError::parse(file_path, "Failed to parse source code", Span::zero())
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let node = Self::first_error(root).unwrap_or(root);
            let message = if node.is_missing() {
                format!("missing {}", node.kind())
            } else {
                let text = source.get(node.byte_range()).unwrap_or("");
                format!("unexpected syntax `{}`", text.lines().next().unwrap_or(""))
            };
            return Err(TransformError::parse(file_path, message, Self::span_of(node)));
        }

        let statements = Lowering::new(source).program(root);
        let directives = ReferenceDirectives::scan(source);

        let mut unit = SourceUnit::new(file_path, statements);
        unit.referenced_files = directives.paths;
        unit.type_reference_directives = directives.types;
        unit.lib_reference_directives = directives.libs;

        debug!(
            "parsed {} ({} top-level statements)",
            file_path,
            unit.statements.len()
        );
        Ok(unit)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        match self.language {
            TreeSitterLanguage::TypeScript => matches!(ext, "ts" | "mts" | "cts"),
            TreeSitterLanguage::Tsx => ext == "tsx",
        }
    }

    fn language_name(&self) -> &'static str {
        match self.language {
            TreeSitterLanguage::TypeScript => "typescript",
            TreeSitterLanguage::Tsx => "tsx",
        }
    }
}
