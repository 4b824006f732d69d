//! Error types and handling framework.
//!
//! The error system is organized in three layers:
//! - [`ConfigError`] - invalid settings, unreadable or malformed config files
//! - [`ProviderError`] - a single wallet provider failed (HTTP status, transport,
//!   or a precondition such as "not authenticated")
//! - [`GatewayError`] - the façade could not resolve a provider, or a provider
//!   error was translated at the gateway boundary
//!
//! [`DompetError`] unifies all three for callers that want a single type.
//!
//! # Example
//!
//! ```
//! use dompet_core::error::{DompetError, ProviderError};
//!
//! let error = ProviderError::not_authenticated("ovo");
//! let top: DompetError = error.into();
//! assert_eq!(top.category(), "provider");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Free-form structured context attached to provider and gateway errors.
pub type ContextMap = serde_json::Map<String, serde_json::Value>;

/// Error severity levels for categorizing errors.
///
/// - `Fatal`: the call can never succeed without a configuration change
/// - `Recoverable`: the call may succeed if the caller retries it
/// - `Warning`: the call failed for a reason the caller should act on
/// - `Info`: an expected condition, such as an unknown provider lookup
///
/// # Examples
///
/// ```
/// use dompet_core::error::ErrorSeverity;
///
/// let severity = ErrorSeverity::Recoverable;
/// assert!(severity.is_recoverable());
/// assert!(!severity.is_fatal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Unrecoverable error requiring a configuration change.
    Fatal,

    /// Error that may go away when the caller retries.
    #[default]
    Recoverable,

    /// Non-transient failure the caller should handle.
    Warning,

    /// Informational condition.
    Info,
}

impl ErrorSeverity {
    /// Returns true if retrying the failed call may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error is fatal (unrecoverable).
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }

    /// Returns the severity as a static string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "FATAL",
            Self::Recoverable => "RECOVERABLE",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

mod config;
mod gateway;
mod provider;

pub use config::ConfigError;
pub use gateway::{GatewayError, GatewayErrorKind};
pub use provider::{ProviderError, ProviderErrorKind};

/// Top-level error type for Dompet.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DompetError {
    /// Configuration error.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Provider-level error.
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Gateway-level error.
    #[error("{0}")]
    Gateway(#[from] GatewayError),
}

impl DompetError {
    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(e) => e.severity(),
            Self::Provider(e) => e.severity(),
            Self::Gateway(e) => e.severity(),
        }
    }

    /// Returns true if this error is recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.severity().is_recoverable()
    }

    /// Returns the error category as a string.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Provider(_) => "provider",
            Self::Gateway(_) => "gateway",
        }
    }

    /// Returns the inner config error, if this is a config error.
    #[must_use]
    pub fn as_config_error(&self) -> Option<&ConfigError> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the inner provider error, if this is a provider error.
    #[must_use]
    pub fn as_provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the inner gateway error, if this is a gateway error.
    #[must_use]
    pub fn as_gateway_error(&self) -> Option<&GatewayError> {
        match self {
            Self::Gateway(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized Result type for Dompet operations.
pub type Result<T> = std::result::Result<T, DompetError>;
