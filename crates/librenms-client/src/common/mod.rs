//! Common utilities for the LibreNMS API client
//!
//! Provides the transport seam and the reqwest-backed transport used by
//! default, plus header construction shared by every request.

pub mod envelope;

use crate::config::ClientConfig;
use crate::error::LibreNmsError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::debug;

/// Header carrying the LibreNMS API token
pub const AUTH_HEADER: &str = "x-auth-token";

/// A single outgoing API request
#[derive(Debug, Clone, Copy)]
pub struct ApiRequest<'a> {
    pub method: &'a Method,
    pub url: &'a str,
    pub headers: &'a HeaderMap,
    pub body: Option<&'a Value>,
}

/// Status and decoded JSON body of a response
///
/// An empty body decodes as `Value::Null`. A non-JSON body on a failed
/// status is kept as `Value::String` holding the raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// Create a response from a status and body
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP exchange
///
/// Implementations only move bytes and decode JSON; status interpretation
/// is done by the client so every transport gets the same error mapping.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the status with the decoded body
    async fn request(&self, request: ApiRequest<'_>) -> Result<ApiResponse, LibreNmsError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport honouring the configured timeout
    pub fn new(config: &ClientConfig) -> Result<Self, LibreNmsError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(LibreNmsError::Http)?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: ApiRequest<'_>) -> Result<ApiResponse, LibreNmsError> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url)
            .headers(request.headers.clone());

        if let Some(body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(LibreNmsError::Http)?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        response_from_text(status, text)
    }
}

/// Build a response from a status and raw body text
///
/// Success bodies must be JSON. Error bodies from proxies and web servers
/// often are not, so those fall back to the raw text and keep their status.
pub fn response_from_text(status: u16, text: String) -> Result<ApiResponse, LibreNmsError> {
    let mut response = ApiResponse::new(status, Value::Null);
    if response.is_success() {
        response.body = decode_body(&text)?;
    } else if !text.trim().is_empty() {
        response.body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    }
    Ok(response)
}

/// Decode a response body, treating an empty body as `null`
pub fn decode_body(text: &str) -> Result<Value, LibreNmsError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| {
        debug!(
            "error decoding response body: {} - Response (first 500 chars): {}",
            e,
            text.chars().take(500).collect::<String>()
        );
        LibreNmsError::Serialization(e)
    })
}

/// Build the headers sent with every request
pub fn build_headers(config: &ClientConfig) -> Result<HeaderMap, LibreNmsError> {
    let mut headers = HeaderMap::new();

    for (name, value) in config.extra_headers() {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            LibreNmsError::InvalidConfig(format!("invalid header name {:?}: {}", name, e))
        })?;
        headers.insert(name, header_value(value, "extra header")?);
    }

    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, header_value(config.user_agent(), "user agent")?);

    let mut token = header_value(config.auth_token(), "auth token")?;
    token.set_sensitive(true);
    headers.insert(AUTH_HEADER, token);

    Ok(headers)
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue, LibreNmsError> {
    HeaderValue::from_str(value)
        .map_err(|_| LibreNmsError::InvalidConfig(format!("{} is not a valid header value", what)))
}

/// Percent-encode a value for use as one URL path segment
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
