//! Pipeline orchestration
//!
//! parse → transform → print, for one file or a batch of files.

pub mod output;
pub mod processor;
pub mod result;

pub use output::OutputTree;
pub use processor::UnitProcessor;
pub use result::{BatchSummary, ProcessResult};
