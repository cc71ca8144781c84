//! Configuration System
//!
//! Two levels:
//! - Level 1: Builder API (defaults target `mobx-keystone`)
//! - Level 2: YAML file (versioned schema, `version: 1`)
//!
//! # Examples
//!
//! ```rust,ignore
//! use autoflow_ir::config::TransformConfig;
//!
//! // Level 1: defaults, with an override
//! let config = TransformConfig::default().target_package_name("my-keystone-fork");
//!
//! // Level 2: YAML
//! let config = TransformConfig::from_yaml("autoflow.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod transform_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use transform_config::{NamePolicy, TransformConfig, DEFAULT_TARGET_PACKAGE};
pub use validation::Validatable;
