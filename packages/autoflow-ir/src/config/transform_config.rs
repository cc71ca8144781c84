//! Transform configuration
//!
//! Names the package the rewritten code imports from, the trigger markers
//! the rewrite looks for, and the target-package members it emits.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use crate::shared::utils::words::is_identifier;

/// Package the injected namespace import points at
pub const DEFAULT_TARGET_PACKAGE: &str = "mobx-keystone";

/// How a class identity string is derived from the unit's file path
/// when no explicit namer function is supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamePolicy {
    /// The file path verbatim (`a/b/Test.ts`)
    #[default]
    Path,
    /// The file path without its extension (`a/b/Test`)
    StripExtension,
    /// Only the file name without extension (`Test`)
    FileStem,
}

impl NamePolicy {
    /// Apply the policy to a file path
    pub fn apply(&self, file_path: &str) -> String {
        match self {
            Self::Path => file_path.to_string(),
            Self::StripExtension => {
                let stem_len = Path::new(file_path)
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::len);
                let name_start = file_path.rfind('/').map_or(0, |i| i + 1);
                match stem_len {
                    Some(len) => file_path[..name_start + len].to_string(),
                    None => file_path.to_string(),
                }
            }
            Self::FileStem => Path::new(file_path)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(file_path)
                .to_string(),
        }
    }

    /// Parse policy from string
    pub fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "path" => Ok(Self::Path),
            "strip_extension" => Ok(Self::StripExtension),
            "file_stem" => Ok(Self::FileStem),
            _ => Err(ConfigError::UnknownNamePolicy(s.to_string())),
        }
    }
}

/// Transform configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformConfig {
    /// Package path used in the synthesized namespace import
    pub target_package_name: String,

    /// Decorator / wrapper-call name that marks an async member for conversion
    pub flow_trigger: String,

    /// Class decorator name that marks a class for an identity annotation
    pub model_trigger: String,

    /// Target-package member wrapping the converted generator function
    pub async_adapter: String,

    /// Target-package member wrapping each former suspension point
    pub await_adapter: String,

    /// Target-package decorator ensured on every converted property
    pub flow_annotation: String,

    /// Target-package class decorator carrying the identity string
    pub identity_annotation: String,

    /// Identity string derivation when no namer function is supplied
    pub identity_name: NamePolicy,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            target_package_name: DEFAULT_TARGET_PACKAGE.to_string(),
            flow_trigger: "autoFlow".to_string(),
            model_trigger: "autoModel".to_string(),
            async_adapter: "_async".to_string(),
            await_adapter: "_await".to_string(),
            flow_annotation: "modelFlow".to_string(),
            identity_annotation: "model".to_string(),
            identity_name: NamePolicy::Path,
        }
    }
}

impl TransformConfig {
    pub fn target_package_name(mut self, name: impl Into<String>) -> Self {
        self.target_package_name = name.into();
        self
    }

    pub fn flow_trigger(mut self, name: impl Into<String>) -> Self {
        self.flow_trigger = name.into();
        self
    }

    pub fn model_trigger(mut self, name: impl Into<String>) -> Self {
        self.model_trigger = name.into();
        self
    }

    pub fn async_adapter(mut self, name: impl Into<String>) -> Self {
        self.async_adapter = name.into();
        self
    }

    pub fn await_adapter(mut self, name: impl Into<String>) -> Self {
        self.await_adapter = name.into();
        self
    }

    pub fn flow_annotation(mut self, name: impl Into<String>) -> Self {
        self.flow_annotation = name.into();
        self
    }

    pub fn identity_annotation(mut self, name: impl Into<String>) -> Self {
        self.identity_annotation = name.into();
        self
    }

    pub fn identity_name(mut self, policy: NamePolicy) -> Self {
        self.identity_name = policy;
        self
    }

    fn identifier_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("flow_trigger", &self.flow_trigger),
            ("model_trigger", &self.model_trigger),
            ("async_adapter", &self.async_adapter),
            ("await_adapter", &self.await_adapter),
            ("flow_annotation", &self.flow_annotation),
            ("identity_annotation", &self.identity_annotation),
        ]
    }
}

impl Validatable for TransformConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.target_package_name.trim().is_empty() {
            return Err(ConfigError::Empty("target_package_name".to_string()));
        }

        for (field, value) in self.identifier_fields() {
            if !is_identifier(value) {
                return Err(ConfigError::invalid_identifier(field, value));
            }
        }

        // A trigger equal to its target would make the normalizer drop what it inserts
        if self.flow_trigger == self.flow_annotation {
            return Err(ConfigError::Conflict {
                first: "flow_trigger".to_string(),
                second: "flow_annotation".to_string(),
                value: self.flow_trigger.clone(),
            });
        }
        if self.model_trigger == self.identity_annotation {
            return Err(ConfigError::Conflict {
                first: "model_trigger".to_string(),
                second: "identity_annotation".to_string(),
                value: self.model_trigger.clone(),
            });
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "TransformConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_mobx_keystone() {
        let config = TransformConfig::default();
        assert_eq!(config.target_package_name, "mobx-keystone");
        assert_eq!(config.flow_trigger, "autoFlow");
        assert_eq!(config.model_trigger, "autoModel");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = TransformConfig::default()
            .target_package_name("keystone-fork")
            .flow_annotation("flow")
            .identity_name(NamePolicy::FileStem);
        assert_eq!(config.target_package_name, "keystone-fork");
        assert_eq!(config.flow_annotation, "flow");
        assert_eq!(config.identity_name, NamePolicy::FileStem);
    }

    #[test]
    fn test_validation_rejects_bad_identifier() {
        let config = TransformConfig::default().async_adapter("a-sync");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_empty_package() {
        let config = TransformConfig::default().target_package_name("  ");
        assert!(matches!(config.validate(), Err(ConfigError::Empty(_))));
    }

    #[test]
    fn test_validation_rejects_trigger_equal_to_target() {
        let config = TransformConfig::default().flow_trigger("modelFlow");
        assert!(matches!(config.validate(), Err(ConfigError::Conflict { .. })));
    }

    #[test]
    fn test_name_policies() {
        assert_eq!(NamePolicy::Path.apply("a/b/Test.ts"), "a/b/Test.ts");
        assert_eq!(NamePolicy::StripExtension.apply("a/b/Test.ts"), "a/b/Test");
        assert_eq!(NamePolicy::StripExtension.apply("Test.tsx"), "Test");
        assert_eq!(NamePolicy::FileStem.apply("a/b/Test.ts"), "Test");
    }

    #[test]
    fn test_name_policy_from_str() {
        assert_eq!(NamePolicy::from_str("FILE_STEM").unwrap(), NamePolicy::FileStem);
        assert!(NamePolicy::from_str("hash").is_err());
    }
}
