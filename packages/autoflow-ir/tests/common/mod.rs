//! Shared helpers for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use autoflow_ir::{
    Parser, Printer, ProcessResult, SourceUnit, TransformOptions, TreeSitterParser,
    TypeScriptPrinter, UnitProcessor,
};

pub fn parse(source: &str, file_path: &str) -> Arc<SourceUnit> {
    Arc::new(
        TreeSitterParser::for_path(file_path)
            .parse(source, file_path)
            .expect("test source should parse"),
    )
}

pub fn print(unit: &SourceUnit) -> String {
    TypeScriptPrinter::new().print_unit(unit)
}

pub fn process(source: &str, file_path: &str) -> ProcessResult {
    process_with(TransformOptions::default(), source, file_path)
}

pub fn process_with(options: TransformOptions, source: &str, file_path: &str) -> ProcessResult {
    UnitProcessor::new(options)
        .expect("options should be valid")
        .process_source(source, file_path)
        .expect("source should transform")
}

/// Rewritten output for a source that is expected to change
pub fn rewrite(source: &str) -> String {
    let result = process(source, "x.ts");
    assert!(result.changed, "expected a rewrite for:\n{source}");
    result.output
}
