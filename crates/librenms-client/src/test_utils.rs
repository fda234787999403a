//! Test utilities for unit testing the client
//!
//! `StubTransport` answers from canned responses keyed by method and URL and
//! records every request it receives.

use crate::client::LibreNmsClient;
use crate::common::{ApiRequest, ApiResponse, Transport};
use crate::config::ClientConfig;
use crate::error::LibreNmsError;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A request as seen by the stub
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Header value as a string, if present
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

/// Transport serving canned responses
///
/// A route keeps answering with the same response until it is replaced.
/// Requests to unknown routes panic so a missing setup is obvious.
#[derive(Clone, Default)]
pub struct StubTransport {
    routes: Arc<Mutex<HashMap<(Method, String), ApiResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method url` with `status` and `body`
    pub fn respond(&self, method: Method, url: &str, status: u16, body: Value) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, url.to_string()), ApiResponse::new(status, body));
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for StubTransport {
    async fn request(&self, request: ApiRequest<'_>) -> Result<ApiResponse, LibreNmsError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method.clone(),
            url: request.url.to_string(),
            headers: request.headers.clone(),
            body: request.body.cloned(),
        });

        let key = (request.method.clone(), request.url.to_string());
        match self.routes.lock().unwrap().get(&key) {
            Some(response) => Ok(response.clone()),
            None => panic!("no canned response for {} {}", key.0, key.1),
        }
    }
}

/// Helper to create a client wired to a fresh stub
pub fn stub_client(base_url: &str) -> (LibreNmsClient<StubTransport>, StubTransport) {
    let stub = StubTransport::new();
    let client = LibreNmsClient::with_transport(ClientConfig::new(base_url, "test-token"), stub.clone())
        .unwrap();
    (client, stub)
}
