//! Per-provider request descriptor.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

use dompet_core::config::DEFAULT_TIMEOUT;

/// How the auth token is presented to the upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "header", rename_all = "snake_case")]
pub enum AuthHeader {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `<name>: <token>`
    Raw(String),
}

impl AuthHeader {
    /// Renders the header for `token`.
    #[must_use]
    pub fn render(&self, token: &str) -> (String, String) {
        match self {
            Self::Bearer => ("Authorization".to_string(), format!("Bearer {token}")),
            Self::Raw(name) => (name.clone(), token.to_string()),
        }
    }
}

/// Everything the shared executor needs to talk to one provider.
///
/// Settings keys read by [`from_settings`](Self::from_settings): `base_url`,
/// `timeout` (seconds), and `user_agent`. Missing or mistyped keys fall back
/// to the provider's defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Lower-case provider name used in errors and logs.
    pub name: String,

    /// Base URL without trailing slash.
    pub base_url: String,

    /// `User-Agent` header value.
    pub user_agent: String,

    /// Auth token header shape.
    pub auth_header: AuthHeader,

    /// Header carrying the session identifier, if the provider uses one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_header: Option<String>,

    /// Static headers sent on every request.
    #[serde(default)]
    pub extra_headers: Vec<(String, String)>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT
}

impl ProviderDescriptor {
    /// Creates a descriptor with the default timeout and no extra headers.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
        auth_header: AuthHeader,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
            auth_header,
            session_header: None,
            extra_headers: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the session header name.
    #[must_use]
    pub fn session_header(mut self, name: impl Into<String>) -> Self {
        self.session_header = Some(name.into());
        self
    }

    /// Adds a static header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((key.into(), value.into()));
        self
    }

    /// Applies `base_url`, `timeout`, and `user_agent` from provider settings.
    #[must_use]
    pub fn from_settings(mut self, settings: &Map<String, Value>) -> Self {
        if let Some(url) = settings.get("base_url").and_then(Value::as_str) {
            self.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(timeout) = settings
            .get("timeout")
            .and_then(Value::as_u64)
            .filter(|t| *t > 0)
        {
            self.timeout_secs = timeout;
        }
        if let Some(agent) = settings.get("user_agent").and_then(Value::as_str) {
            self.user_agent = agent.to_string();
        }
        self
    }

    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the absolute URL for `endpoint`.
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("{}{}", self.base_url, endpoint)
        }
    }
}
