//! Configuration validation
//!
//! Provides the validation trait implemented by configuration objects.

use super::error::ConfigResult;

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// use autoflow_ir::config::Validatable;
///
/// fn build<C: Validatable>(config: C) -> Result<Thing, ConfigError> {
///     config.validate()?;
///     // ... build
/// }
/// ```
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

impl<T: Validatable> Validatable for Option<T> {
    fn validate(&self) -> ConfigResult<()> {
        match self {
            Some(config) => config.validate(),
            None => Ok(()),
        }
    }
}
