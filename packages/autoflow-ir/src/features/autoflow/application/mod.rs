//! Autoflow application layer

mod options;
mod transformer;

pub use options::TransformOptions;
pub use transformer::{create_transformer, AutoflowTransformer, TransformOutcome};
