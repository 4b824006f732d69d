//! Scripted transport shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use dompet_core::config::ConfigTree;
use dompet_gateway::rest::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;

/// Replays queued responses in order and records every request.
///
/// When the queue is empty it answers `200 {}`.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.replies
            .lock()
            .push_back(Ok(HttpResponse::new(status, body.to_string())));
        self
    }

    pub fn reply_text(&self, status: u16, body: &str) -> &Self {
        self.replies
            .lock()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(&self, error: TransportError) -> &Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_call(&self) -> HttpRequest {
        self.calls
            .lock()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.lock().push(request);
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
    }
}

/// Unwraps a `json!` object literal.
pub fn tree(value: Value) -> ConfigTree {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

/// Parses the JSON body of a recorded request.
pub fn body(request: &HttpRequest) -> Value {
    serde_json::from_str(request.body.as_deref().expect("request has no body"))
        .expect("request body is not JSON")
}
