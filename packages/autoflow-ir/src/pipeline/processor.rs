//! Per-file processing
//!
//! Each file gets its own parse tree and its own transform pass, so a batch
//! runs on the rayon pool without any shared mutable state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;

use super::result::ProcessResult;
use crate::errors::Result;
use crate::features::autoflow::{AutoflowTransformer, TransformOptions};
use crate::features::parsing::{Parser, TreeSitterParser};
use crate::features::printing::{Printer, TypeScriptPrinter};

pub struct UnitProcessor {
    transformer: AutoflowTransformer,
    printer: TypeScriptPrinter,
}

impl UnitProcessor {
    pub fn new(options: TransformOptions) -> Result<Self> {
        Ok(Self::with_transformer(AutoflowTransformer::new(options)?))
    }

    pub fn with_transformer(transformer: AutoflowTransformer) -> Self {
        Self {
            transformer,
            printer: TypeScriptPrinter::new(),
        }
    }

    /// Parse, transform and print one unit held in memory
    ///
    /// An unchanged unit's output is `source` itself, not a reprint.
    pub fn process_source(&self, source: &str, file_path: &str) -> Result<ProcessResult> {
        let parser = TreeSitterParser::for_path(file_path);
        let unit = Arc::new(parser.parse(source, file_path)?);
        let outcome = self.transformer.transform(&unit)?;

        let changed = outcome.is_rewritten();
        let output = if changed {
            self.printer.print_unit(outcome.unit())
        } else {
            source.to_string()
        };

        Ok(ProcessResult {
            file_path: file_path.to_string(),
            changed,
            output,
        })
    }

    pub fn process_file(&self, path: &Path) -> Result<ProcessResult> {
        let source = std::fs::read_to_string(path)?;
        self.process_source(&source, &path.to_string_lossy())
    }

    /// Process files in parallel; results keep the input order
    pub fn process_batch(&self, paths: &[PathBuf]) -> Vec<Result<ProcessResult>> {
        info!("process_batch: {} file(s)", paths.len());
        let results: Vec<Result<ProcessResult>> = paths
            .par_iter()
            .map(|path| self.process_file(path))
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!("process_batch: {} of {} file(s) failed", failed, paths.len());
        }
        results
    }
}
