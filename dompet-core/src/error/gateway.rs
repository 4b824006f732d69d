//! Gateway-level error type.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{ContextMap, ErrorSeverity, ProviderError};

/// What kind of failure a [`GatewayError`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorKind {
    /// The requested provider is not registered.
    UnknownProvider,
    /// A provider call failed; the original error is the source.
    Provider,
    /// The gateway was misconfigured or misused.
    Configuration,
}

/// Error surfaced by the gateway façade.
///
/// Provider failures are wrapped with a prefix naming the high-level
/// operation, keeping the original [`ProviderError`] as `source`.
///
/// # Examples
///
/// ```
/// use dompet_core::error::{GatewayError, ProviderError};
///
/// let cause = ProviderError::not_authenticated("ovo");
/// let error = GatewayError::from_provider("Failed to get balance", cause);
/// assert_eq!(error.provider(), Some("ovo"));
/// assert!(error.message().starts_with("Failed to get balance: "));
/// assert!(error.provider_error().is_some());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("[Gateway] {message}")]
pub struct GatewayError {
    kind: GatewayErrorKind,
    message: String,
    code: u16,
    provider: Option<String>,
    context: ContextMap,
    source: Option<Box<ProviderError>>,
}

impl GatewayError {
    /// The requested provider name is not registered.
    #[must_use]
    pub fn unknown_provider(requested: &str, available: &[String]) -> Self {
        let listed = if available.is_empty() {
            "none".to_string()
        } else {
            available.join(", ")
        };
        let mut context = ContextMap::new();
        context.insert("requested".to_string(), Value::from(requested));
        context.insert(
            "available".to_string(),
            Value::Array(available.iter().cloned().map(Value::String).collect()),
        );
        Self {
            kind: GatewayErrorKind::UnknownProvider,
            message: format!("Provider '{requested}' not found. Available providers: {listed}"),
            code: 404,
            provider: Some(requested.to_string()),
            context,
            source: None,
        }
    }

    /// Wraps a provider failure, preserving its code, provider, and context.
    #[must_use]
    pub fn from_provider(operation: &str, error: ProviderError) -> Self {
        Self {
            kind: GatewayErrorKind::Provider,
            message: format!("{operation}: {}", error.message()),
            code: error.code(),
            provider: Some(error.provider().to_string()),
            context: error.context().clone(),
            source: Some(Box::new(error)),
        }
    }

    /// The gateway was misconfigured or misused.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: GatewayErrorKind::Configuration,
            message: message.into(),
            code: 0,
            provider: None,
            context: ContextMap::new(),
            source: None,
        }
    }

    /// Adds a context entry, consuming and returning the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Adds a context entry in place.
    pub fn add_context(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Returns the failure kind.
    #[must_use]
    pub fn kind(&self) -> GatewayErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the error code.
    #[must_use]
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Returns the provider involved, if any.
    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Returns the attached context.
    #[must_use]
    pub fn context(&self) -> &ContextMap {
        &self.context
    }

    /// Returns the wrapped provider error, if any.
    #[must_use]
    pub fn provider_error(&self) -> Option<&ProviderError> {
        self.source.as_deref()
    }

    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match (&self.kind, &self.source) {
            (GatewayErrorKind::Provider, Some(source)) => source.severity(),
            (GatewayErrorKind::UnknownProvider, _) => ErrorSeverity::Info,
            _ => ErrorSeverity::Fatal,
        }
    }
}
