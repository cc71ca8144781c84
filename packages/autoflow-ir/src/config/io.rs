//! Configuration I/O (YAML loading)
//!
//! Schema v1:
//!
//! ```yaml
//! version: 1
//! transform:
//!   target_package_name: mobx-keystone
//!   identity_name: file_stem
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::transform_config::TransformConfig;
use super::validation::Validatable;

const SUPPORTED_VERSIONS: [u32; 1] = [1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    /// Transform settings; omitted fields keep their defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformConfig>,
}

impl TransformConfig {
    /// Load and validate a configuration from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a configuration from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        // Version check
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = file.transform.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Export as YAML (schema v1)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            transform: Some(self.clone()),
        };
        serde_yaml::to_string(&file).map_err(ConfigError::Yaml)
    }
}
