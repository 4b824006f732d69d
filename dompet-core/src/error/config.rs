//! Configuration-related error types.
//!
//! Covers invalid values, missing or malformed configuration files,
//! environment overrides, and lookups of providers that are not configured.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error type.
///
/// # Examples
///
/// ```
/// use dompet_core::error::ConfigError;
///
/// let error = ConfigError::invalid_value("timeout", "must be a positive integer");
/// assert!(error.to_string().contains("timeout"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigError {
    /// Configuration value is invalid.
    #[error("[Config] Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted path of the field with the invalid value.
        field: String,
        /// Reason why the value is invalid.
        reason: String,
    },

    /// Configuration file does not exist.
    #[error("[Config] Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the configuration file.
        path: String,
    },

    /// Configuration file exists but could not be read.
    #[error("[Config] Failed to read file '{path}': {reason}")]
    FileReadError {
        /// Path to the configuration file.
        path: String,
        /// Reason for the read failure.
        reason: String,
    },

    /// Configuration file could not be written.
    #[error("[Config] Failed to write file '{path}': {reason}")]
    FileWriteError {
        /// Path to the configuration file.
        path: String,
        /// Reason for the write failure.
        reason: String,
    },

    /// Configuration file has an unsupported extension or malformed content.
    #[error("[Config] Invalid format in '{path}': {reason}")]
    InvalidFormat {
        /// Path to the configuration file.
        path: String,
        /// Reason for the format error.
        reason: String,
    },

    /// Environment variable has invalid value.
    #[error("[Config] Invalid environment variable '{name}': {reason}")]
    InvalidEnvVar {
        /// Name of the environment variable.
        name: String,
        /// Reason why the value is invalid.
        reason: String,
    },

    /// No configuration exists for the requested provider.
    #[error("[Config] Provider '{provider}' not found in configuration")]
    ProviderNotConfigured {
        /// Name of the provider that was requested.
        provider: String,
    },
}

impl ConfigError {
    /// Returns true if this error is recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.severity().is_recoverable()
    }

    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        use super::ErrorSeverity;
        match self {
            Self::InvalidValue { .. } | Self::InvalidFormat { .. } | Self::InvalidEnvVar { .. } => {
                ErrorSeverity::Fatal
            }
            Self::FileNotFound { .. } | Self::FileReadError { .. } | Self::FileWriteError { .. } => {
                ErrorSeverity::Warning
            }
            Self::ProviderNotConfigured { .. } => ErrorSeverity::Info,
        }
    }

    /// Returns true if this error means something was looked up and not found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. } | Self::ProviderNotConfigured { .. }
        )
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid format error.
    #[must_use]
    pub fn invalid_format(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
