//! Parse file use case

use std::path::Path;

use crate::errors::Result;
use crate::features::parsing::domain::SourceUnit;
use crate::features::parsing::ports::Parser;

/// Parse file use case
pub struct ParseFileUseCase<P: Parser> {
    parser: P,
}

impl<P: Parser> ParseFileUseCase<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Execute the parse operation
    pub fn execute(&self, source: &str, file_path: &str) -> Result<SourceUnit> {
        self.parser.parse(source, file_path)
    }

    /// Read `path` from disk and parse it under its display name
    pub fn execute_file(&self, path: &Path) -> Result<SourceUnit> {
        let source = std::fs::read_to_string(path)?;
        self.parser.parse(&source, &path.to_string_lossy())
    }

    /// Whether the wrapped parser handles `path`
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.parser.supports_extension(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransformError;
    use crate::shared::models::Span;

    // Mock parser for testing
    struct MockParser;

    impl Parser for MockParser {
        fn parse(&self, source: &str, file_path: &str) -> Result<SourceUnit> {
            if source.contains("@@") {
                return Err(TransformError::parse(file_path, "bad token", Span::new(1, 1, 1, 3)));
            }
            Ok(SourceUnit::new(file_path, Vec::new()))
        }

        fn supports_extension(&self, ext: &str) -> bool {
            ext == "ts"
        }

        fn language_name(&self) -> &'static str {
            "typescript"
        }
    }

    #[test]
    fn test_parse_file_use_case() {
        let use_case = ParseFileUseCase::new(MockParser);
        let unit = use_case.execute("class A {}", "types.d.ts").unwrap();
        assert!(unit.is_declaration_file);
        assert!(use_case.execute("@@", "a.ts").is_err());
    }

    #[test]
    fn test_accepts_by_extension() {
        let use_case = ParseFileUseCase::new(MockParser);
        assert!(use_case.accepts(Path::new("src/a.ts")));
        assert!(!use_case.accepts(Path::new("src/a.py")));
        assert!(!use_case.accepts(Path::new("Makefile")));
    }

    #[test]
    fn test_execute_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.ts");
        std::fs::write(&path, "class A {}").unwrap();

        let use_case = ParseFileUseCase::new(MockParser);
        let unit = use_case.execute_file(&path).unwrap();
        assert!(unit.file_name.ends_with("model.ts"));

        let missing = use_case.execute_file(&dir.path().join("missing.ts"));
        assert!(matches!(missing, Err(TransformError::Io(_))));
    }
}
