//! Configuration traits.

use crate::error::ConfigError;

/// Trait for types that can be validated.
///
/// # Example
///
/// ```rust
/// use dompet_core::config::Validatable;
/// use dompet_core::error::ConfigError;
///
/// struct ProviderSettings {
///     timeout: u64,
/// }
///
/// impl Validatable for ProviderSettings {
///     fn validate(&self) -> Result<(), ConfigError> {
///         if self.timeout == 0 {
///             return Err(ConfigError::invalid_value("timeout", "must be a positive integer"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validates the configuration.
    ///
    /// Returns `Ok(())` if the configuration is valid, or the first
    /// `ConfigError` found.
    fn validate(&self) -> Result<(), ConfigError>;
}
