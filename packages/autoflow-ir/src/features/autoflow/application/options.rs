//! Transform options
//!
//! What a caller may pass to [`create_transformer`](super::create_transformer):
//! the configuration plus an optional file path → identity string function.

use std::fmt;
use std::sync::Arc;

use crate::config::TransformConfig;
use crate::features::autoflow::domain::IdentityNamer;

#[derive(Clone, Default)]
pub struct TransformOptions {
    pub config: TransformConfig,
    /// Overrides `config.identity_name` when set
    pub identity_name_from_path: Option<IdentityNamer>,
}

impl TransformOptions {
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            identity_name_from_path: None,
        }
    }

    pub fn target_package_name(mut self, name: impl Into<String>) -> Self {
        self.config = self.config.target_package_name(name);
        self
    }

    pub fn identity_name_from_path<F>(mut self, namer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.identity_name_from_path = Some(Arc::new(namer));
        self
    }

    /// Identity string for a class declared in `file_path`
    pub fn identity_name_for(&self, file_path: &str) -> String {
        match &self.identity_name_from_path {
            Some(namer) => namer(file_path),
            None => self.config.identity_name.apply(file_path),
        }
    }
}

impl fmt::Debug for TransformOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformOptions")
            .field("config", &self.config)
            .field(
                "identity_name_from_path",
                &self.identity_name_from_path.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}
