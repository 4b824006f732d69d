//! Provider-level error type.
//!
//! A [`ProviderError`] is raised by a single wallet adapter. It records which
//! provider failed, which upstream endpoint was involved (if a request was
//! attempted at all), the parsed upstream response, and free-form context.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{ContextMap, ErrorSeverity};

/// What kind of failure a [`ProviderError`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    /// Upstream answered with HTTP status >= 400.
    HttpStatus,
    /// The request never produced a response (connection refused, timeout, ...).
    Transport,
    /// An authenticated-only operation was called without a session.
    NotAuthenticated,
    /// Code verification was attempted before a successful login.
    NotLoggedIn,
    /// A credential required by the provider is not configured.
    MissingCredentials,
    /// Upstream answered successfully but the payload is unusable.
    InvalidResponse,
    /// The outgoing request could not be built.
    InvalidRequest,
}

impl ProviderErrorKind {
    /// Returns the kind as a static string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HttpStatus => "http_status",
            Self::Transport => "transport",
            Self::NotAuthenticated => "not_authenticated",
            Self::NotLoggedIn => "not_logged_in",
            Self::MissingCredentials => "missing_credentials",
            Self::InvalidResponse => "invalid_response",
            Self::InvalidRequest => "invalid_request",
        }
    }
}

/// Error raised by a wallet provider.
///
/// Precondition failures (`NotAuthenticated`, `NotLoggedIn`,
/// `MissingCredentials`) never reach the network, so they carry no endpoint.
///
/// # Examples
///
/// ```
/// use dompet_core::error::{ProviderError, ProviderErrorKind};
///
/// let error = ProviderError::not_authenticated("ovo");
/// assert_eq!(error.kind(), ProviderErrorKind::NotAuthenticated);
/// assert!(error.endpoint().is_none());
/// assert!(error.to_string().contains("Not authenticated"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("[Provider] {provider}: {message}")]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
    code: u16,
    provider: String,
    endpoint: Option<String>,
    raw_response: Option<Value>,
    context: ContextMap,
}

impl ProviderError {
    /// Creates a provider error with no endpoint, response, or context.
    #[must_use]
    pub fn new(
        kind: ProviderErrorKind,
        provider: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            code: 0,
            provider: provider.into(),
            endpoint: None,
            raw_response: None,
            context: ContextMap::new(),
        }
    }

    /// Upstream returned HTTP status >= 400.
    ///
    /// The message uses the upstream `message` field when the body has one.
    #[must_use]
    pub fn http_status(
        provider: impl Into<String>,
        endpoint: impl Into<String>,
        status: u16,
        body: Value,
    ) -> Self {
        let endpoint = endpoint.into();
        let message = match body.get("message").and_then(Value::as_str) {
            Some(upstream) => format!("HTTP {status} from {endpoint}: {upstream}"),
            None => format!("HTTP {status} from {endpoint}"),
        };
        let mut error = Self::new(ProviderErrorKind::HttpStatus, provider, message);
        error.code = status;
        error.endpoint = Some(endpoint);
        error.context.insert("status".to_string(), Value::from(status));
        error
            .context
            .insert("response".to_string(), body.clone());
        error.raw_response = Some(body);
        error
    }

    /// The request failed before any response arrived.
    #[must_use]
    pub fn transport(
        provider: impl Into<String>,
        endpoint: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let endpoint = endpoint.into();
        let reason = reason.into();
        let mut error = Self::new(
            ProviderErrorKind::Transport,
            provider,
            format!("Request to {endpoint} failed: {reason}"),
        );
        error.endpoint = Some(endpoint);
        error
            .context
            .insert("transport_error".to_string(), Value::String(reason));
        error
    }

    /// An authenticated-only operation was called without a session.
    #[must_use]
    pub fn not_authenticated(provider: impl Into<String>) -> Self {
        let mut error = Self::new(
            ProviderErrorKind::NotAuthenticated,
            provider,
            "Not authenticated. Please login first.",
        );
        error.code = 401;
        error
    }

    /// Verification was attempted before `login` established a session.
    #[must_use]
    pub fn not_logged_in(provider: impl Into<String>) -> Self {
        Self::new(
            ProviderErrorKind::NotLoggedIn,
            provider,
            "No pending login. Please call login first.",
        )
    }

    /// A credential such as a password is not configured.
    #[must_use]
    pub fn missing_credentials(provider: impl Into<String>, field: &str) -> Self {
        Self::new(
            ProviderErrorKind::MissingCredentials,
            provider,
            format!("Missing credential '{field}' in provider settings"),
        )
        .with_context("field", field)
    }

    /// Upstream answered successfully with an unusable payload.
    #[must_use]
    pub fn invalid_response(
        provider: impl Into<String>,
        endpoint: impl Into<String>,
        reason: impl Into<String>,
        body: Value,
    ) -> Self {
        let mut error = Self::new(ProviderErrorKind::InvalidResponse, provider, reason);
        error.endpoint = Some(endpoint.into());
        error.raw_response = Some(body);
        error
    }

    /// The request body could not be encoded; nothing was sent.
    #[must_use]
    pub fn invalid_request(
        provider: impl Into<String>,
        endpoint: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let endpoint = endpoint.into();
        let mut error = Self::new(
            ProviderErrorKind::InvalidRequest,
            provider,
            format!("Could not build request to {endpoint}: {}", reason.into()),
        );
        error.endpoint = Some(endpoint);
        error
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
    pub fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the error code (HTTP status where applicable, 0 otherwise).
    #[must_use]
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Returns the provider name.
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Returns the upstream endpoint, if a request was attempted.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Returns the parsed upstream response body, if any.
    #[must_use]
    pub fn raw_response(&self) -> Option<&Value> {
        self.raw_response.as_ref()
    }

    /// Returns the attached context.
    #[must_use]
    pub fn context(&self) -> &ContextMap {
        &self.context
    }

    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self.kind {
            ProviderErrorKind::Transport => ErrorSeverity::Recoverable,
            ProviderErrorKind::HttpStatus if self.code >= 500 => ErrorSeverity::Recoverable,
            ProviderErrorKind::MissingCredentials => ErrorSeverity::Fatal,
            ProviderErrorKind::HttpStatus
            | ProviderErrorKind::NotAuthenticated
            | ProviderErrorKind::NotLoggedIn
            | ProviderErrorKind::InvalidResponse
            | ProviderErrorKind::InvalidRequest => ErrorSeverity::Warning,
        }
    }

    /// Returns true if retrying the call may succeed.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.severity().is_recoverable()
    }
}
