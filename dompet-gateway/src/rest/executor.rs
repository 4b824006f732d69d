//! Shared request executor.
//!
//! Each provider owns a [`RequestExecutor`] configured by its
//! [`ProviderDescriptor`]; the providers themselves only shape payloads and
//! normalize responses.

use reqwest::Method;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use dompet_core::error::ProviderError;
use dompet_core::traits::AuthState;

use super::client::{HttpRequest, HttpTransport};
use super::config::ProviderDescriptor;

/// Credentials attached to a single request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionHeaders<'a> {
    /// Auth token, sent through the descriptor's auth header.
    pub auth_token: Option<&'a str>,
    /// Session identifier, sent through the descriptor's session header.
    pub session_id: Option<&'a str>,
}

impl<'a> SessionHeaders<'a> {
    /// No credentials.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            auth_token: None,
            session_id: None,
        }
    }

    /// Credentials currently held by `state`.
    ///
    /// The token is only included once the state is authenticated.
    #[must_use]
    pub fn from_state(state: &'a AuthState) -> Self {
        Self {
            auth_token: state.token(),
            session_id: state.session_id.as_deref().filter(|s| !s.is_empty()),
        }
    }
}

/// Builds, sends, and classifies upstream requests for one provider.
#[derive(Clone)]
pub struct RequestExecutor {
    descriptor: ProviderDescriptor,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl RequestExecutor {
    /// Creates an executor.
    #[must_use]
    pub fn new(descriptor: ProviderDescriptor, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            descriptor,
            transport,
        }
    }

    /// Returns the descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    /// Sends one request and returns the parsed response body.
    ///
    /// Bodies that are not JSON come back as `{"raw": <text>}` and an empty
    /// body as `{}`.
    ///
    /// # Errors
    ///
    /// - `HttpStatus` when upstream answers with status >= 400
    /// - `Transport` when no response arrives
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        session: SessionHeaders<'_>,
    ) -> Result<Value, ProviderError> {
        let provider = self.descriptor.name.as_str();
        let request = self.build_request(method, endpoint, body, session);

        debug!(
            provider,
            method = %request.method,
            endpoint,
            "Calling upstream"
        );

        let response = self.transport.send(request).await.map_err(|e| {
            warn!(provider, endpoint, error = %e, "Upstream request failed");
            ProviderError::transport(provider, endpoint, e.to_string())
        })?;

        let parsed = parse_body(&response.body);

        if response.status >= 400 {
            warn!(
                provider,
                endpoint,
                status = response.status,
                "Upstream returned error status"
            );
            return Err(ProviderError::http_status(
                provider,
                endpoint,
                response.status,
                parsed,
            ));
        }

        debug!(provider, endpoint, status = response.status, "Upstream responded");
        Ok(parsed)
    }

    fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        session: SessionHeaders<'_>,
    ) -> HttpRequest {
        let d = &self.descriptor;
        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), d.user_agent.clone()),
        ];
        headers.extend(d.extra_headers.iter().cloned());

        if let Some(token) = session.auth_token {
            headers.push(d.auth_header.render(token));
        }
        if let (Some(name), Some(session_id)) = (&d.session_header, session.session_id) {
            headers.push((name.clone(), session_id.to_string()));
        }

        let body = if is_write(&method) {
            body.map(Value::to_string)
        } else {
            None
        };

        HttpRequest {
            method,
            url: d.url(endpoint),
            headers,
            body,
            timeout: d.timeout(),
        }
    }
}

fn is_write(method: &Method) -> bool {
    *method == Method::POST
        || *method == Method::PUT
        || *method == Method::PATCH
        || *method == Method::DELETE
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Map::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "raw": text }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::client::{HttpResponse, TransportError};
    use crate::rest::config::AuthHeader;
    use async_trait::async_trait;
    use dompet_core::error::ProviderErrorKind;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Scripted {
        replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn reply(self, reply: Result<HttpResponse, TransportError>) -> Self {
            self.replies.lock().push_back(reply);
            self
        }
    }

    #[async_trait]
    impl HttpTransport for Scripted {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.sent.lock().push(request);
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
        }
    }

    fn executor(transport: Arc<Scripted>) -> RequestExecutor {
        let descriptor = ProviderDescriptor::new(
            "gopay",
            "https://api.gojekapi.com",
            "GoPay/1.0",
            AuthHeader::Bearer,
        )
        .session_header("X-Session-ID")
        .header("X-Platform", "Android");
        RequestExecutor::new(descriptor, transport)
    }

    #[tokio::test]
    async fn test_headers_and_body() {
        let transport = Arc::new(Scripted::default().reply(Ok(HttpResponse::new(200, r#"{"ok":true}"#))));
        let exec = executor(transport.clone());

        let body = json!({"phone": "0812"});
        let session = SessionHeaders {
            auth_token: Some("tok"),
            session_id: Some("sess"),
        };
        let result = exec
            .execute(Method::POST, "/v5/customers/verify_otp", Some(&body), session)
            .await
            .unwrap();
        assert_eq!(result, json!({"ok": true}));

        let sent = transport.sent.lock();
        let req = &sent[0];
        assert_eq!(req.url, "https://api.gojekapi.com/v5/customers/verify_otp");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("user-agent"), Some("GoPay/1.0"));
        assert_eq!(req.header("authorization"), Some("Bearer tok"));
        assert_eq!(req.header("x-session-id"), Some("sess"));
        assert_eq!(req.header("x-platform"), Some("Android"));
        assert_eq!(req.body.as_deref(), Some(r#"{"phone":"0812"}"#));
        assert_eq!(req.timeout, std::time::Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_get_sends_no_body_or_credentials_when_absent() {
        let transport = Arc::new(Scripted::default());
        let exec = executor(transport.clone());

        exec.execute(Method::GET, "/wallet/profile", Some(&json!({"x": 1})), SessionHeaders::none())
            .await
            .unwrap();

        let sent = transport.sent.lock();
        assert!(sent[0].body.is_none());
        assert!(sent[0].header("authorization").is_none());
        assert!(sent[0].header("x-session-id").is_none());
    }

    #[tokio::test]
    async fn test_error_status_becomes_http_status_error() {
        let transport = Arc::new(
            Scripted::default().reply(Ok(HttpResponse::new(401, r#"{"message":"token expired"}"#))),
        );
        let err = executor(transport)
            .execute(Method::GET, "/wallet/profile", None, SessionHeaders::none())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ProviderErrorKind::HttpStatus);
        assert_eq!(err.code(), 401);
        assert_eq!(err.endpoint(), Some("/wallet/profile"));
        assert_eq!(err.context()["status"], json!(401));
        assert_eq!(err.context()["response"], json!({"message": "token expired"}));
        assert!(err.message().contains("token expired"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let transport = Arc::new(
            Scripted::default().reply(Err(TransportError::Connect("connection refused".into()))),
        );
        let err = executor(transport)
            .execute(Method::DELETE, "/v3/auth/token", None, SessionHeaders::none())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ProviderErrorKind::Transport);
        assert!(
            err.context()["transport_error"]
                .as_str()
                .unwrap()
                .contains("connection refused")
        );
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), json!({}));
        assert_eq!(parse_body("<html>oops</html>"), json!({"raw": "<html>oops</html>"}));
        assert_eq!(parse_body(r#"{"a":1}"#), json!({"a": 1}));
    }

    #[test]
    fn test_session_headers_from_state() {
        let mut state = AuthState::default();
        state.begin("0812", Some("sess-9".to_string()));
        let headers = SessionHeaders::from_state(&state);
        assert_eq!(headers.session_id, Some("sess-9"));
        assert_eq!(headers.auth_token, None);

        state.grant("tok".to_string());
        assert_eq!(SessionHeaders::from_state(&state).auth_token, Some("tok"));
    }
}
