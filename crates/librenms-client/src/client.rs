//! LibreNMS API client
//!
//! Implements the LibreNMS v0 REST API for devices, services, alerts and
//! alert rules. Paths are relative to the configured base URL, e.g.
//! `https://librenms.example.com/api/v0/devices/`.

use crate::common::envelope::{first_group, first_object, take_objects};
use crate::common::{build_headers, path_segment, ApiRequest, HttpTransport, Transport};
use crate::config::ClientConfig;
use crate::error::LibreNmsError;
use crate::librenms_trait::LibreNmsApi;
use crate::models::*;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

/// LibreNMS API client
///
/// Every method performs exactly one request and holds no state between
/// calls, so a client can be shared freely across tasks.
pub struct LibreNmsClient<T = HttpTransport> {
    transport: T,
    base_url: String,
    headers: HeaderMap,
}

impl LibreNmsClient<HttpTransport> {
    /// Create a new LibreNMS client using reqwest
    ///
    /// # Arguments
    /// * `config` - Base URL, token and request options
    pub fn new(config: ClientConfig) -> Result<Self, LibreNmsError> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> LibreNmsClient<T> {
    /// Create a client that sends requests through `transport`
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, LibreNmsError> {
        config.validate()?;
        let headers = build_headers(&config)?;

        Ok(Self {
            transport,
            base_url: config.base_url().to_string(),
            headers,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build a full URL from a path relative to the base URL
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one request and map non-success statuses to errors
    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, LibreNmsError> {
        let url = self.build_url(path);
        match body {
            Some(body) => debug!("{} {} with body: {}", method, url, body),
            None => debug!("{} {}", method, url),
        }

        let response = self
            .transport
            .request(ApiRequest {
                method: &method,
                url: &url,
                headers: &self.headers,
                body,
            })
            .await?;

        if response.is_success() {
            return Ok(response.body);
        }

        let status = response.status;
        let message = error_message(&response.body);
        warn!("{} {} failed: {} - {}", method, path, status, message);

        Err(match status {
            401 | 403 => LibreNmsError::Authentication(format!("{} - {}", status, message)),
            404 => LibreNmsError::NotFound(format!("{} {} - {}", method, path, message)),
            _ => LibreNmsError::Api { status, message },
        })
    }

    async fn get(&self, path: &str) -> Result<Value, LibreNmsError> {
        self.send(Method::GET, path, None).await
    }

    /// Validate the API token by requesting the system endpoint
    ///
    /// # Returns
    /// * `Ok(())` - Token is valid and LibreNMS is reachable
    /// * `Err(LibreNmsError)` - Token is invalid or LibreNMS is unreachable
    pub async fn validate_token(&self) -> Result<(), LibreNmsError> {
        debug!("Validating LibreNMS token and connectivity");
        self.get("system").await?;
        debug!("Token validated successfully");
        Ok(())
    }

    /// Get an alert rule by ID
    ///
    /// # Returns
    /// * `Ok(AlertRule)` - The first entry of `rules`
    /// * `Err(LibreNmsError::NotFound)` - If `rules` is missing or empty
    pub async fn get_alert_rule(&self, rule_id: u64) -> Result<AlertRule, LibreNmsError> {
        let body = self.get(&format!("rules/{}", rule_id)).await?;
        first_object(body, "rules", &format!("Alert rule {}", rule_id))
    }

    /// Get an alert by ID
    ///
    /// Returns the full response body without unwrapping.
    pub async fn get_alert(&self, alert_id: u64) -> Result<Value, LibreNmsError> {
        self.get(&format!("alert/{}", alert_id)).await
    }

    /// List alerts
    pub async fn list_alerts(&self) -> Result<Vec<Alert>, LibreNmsError> {
        let body = self.get("alerts").await?;
        take_objects(body, "alerts")
    }

    /// List services in the given state
    ///
    /// # Returns
    /// * `Ok(Vec<Service>)` - The first group of `services`
    /// * `Err(LibreNmsError::NotFound)` - If `services` is missing or empty
    pub async fn list_services_by_state(&self, state: ServiceState) -> Result<Vec<Service>, LibreNmsError> {
        let body = self.get(&format!("services?state={}", state)).await?;
        first_group(body, "services", &format!("Services in state {}", state))
    }

    /// List services in critical state
    ///
    /// Returns the first group of `services` as a list, so a response of
    /// `{"services": [[{"service_id": 1, ...}]]}` yields a one-element
    /// vector holding that service.
    pub async fn list_critical_services(&self) -> Result<Vec<Service>, LibreNmsError> {
        self.list_services_by_state(ServiceState::Critical).await
    }

    /// List all devices
    pub async fn list_devices(&self) -> Result<Vec<Device>, LibreNmsError> {
        let body = self.get("devices/").await?;
        take_objects(body, "devices")
    }

    /// Get a device by ID
    ///
    /// # Returns
    /// * `Ok(Device)` - The first entry of `devices`
    /// * `Err(LibreNmsError::NotFound)` - If the device does not exist
    pub async fn get_device(&self, device_id: u64) -> Result<Device, LibreNmsError> {
        let body = self.get(&format!("devices/{}", device_id)).await?;
        first_object(body, "devices", &format!("Device {}", device_id))
    }

    /// Get a device by hostname
    pub async fn get_device_by_hostname(&self, hostname: &str) -> Result<Device, LibreNmsError> {
        let body = self.get(&format!("devices/{}", host_segment(hostname)?)).await?;
        first_object(body, "devices", &format!("Device {}", hostname))
    }

    /// Get the services configured on a device
    ///
    /// Returns the first group of `services`, which LibreNMS fills with the
    /// services of the requested host.
    pub async fn get_services_for_device(&self, hostname: &str) -> Result<Vec<Service>, LibreNmsError> {
        let body = self.get(&format!("services/{}", host_segment(hostname)?)).await?;
        first_group(body, "services", &format!("Services for {}", hostname))
    }

    /// Add a service to a device
    ///
    /// `data` is sent as-is; see [`NewService`] for a typed body.
    pub async fn add_service_for_device(&self, hostname: &str, data: &Value) -> Result<Value, LibreNmsError> {
        self.send(Method::POST, &format!("services/{}", host_segment(hostname)?), Some(data))
            .await
    }

    /// Delete a service by ID
    pub async fn delete_service_by_id(&self, service_id: u64) -> Result<Value, LibreNmsError> {
        self.send(Method::DELETE, &format!("services/{}", service_id), None).await
    }

    /// Edit a service by ID
    ///
    /// Several LibreNMS releases ignore or reject PATCH on services; check
    /// the returned body rather than assuming the edit applied.
    pub async fn edit_service_by_id(&self, service_id: u64, data: &Value) -> Result<Value, LibreNmsError> {
        debug!("Editing service {} (PATCH support varies by LibreNMS release)", service_id);
        self.send(Method::PATCH, &format!("services/{}", service_id), Some(data))
            .await
    }
}

/// Encode a hostname as a path segment, refusing an empty one
///
/// An empty hostname would address the collection endpoint instead of a host.
fn host_segment(hostname: &str) -> Result<String, LibreNmsError> {
    if hostname.trim().is_empty() {
        return Err(LibreNmsError::InvalidRequest("hostname must not be empty".to_string()));
    }
    Ok(path_segment(hostname))
}

/// Extract a readable message from an error body
fn error_message(body: &Value) -> String {
    match body.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => match body {
            Value::Null => "empty response body".to_string(),
            Value::String(raw) => raw.chars().take(500).collect(),
            other => other.to_string(),
        },
    }
}

#[async_trait::async_trait]
impl<T: Transport> LibreNmsApi for LibreNmsClient<T> {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_token(&self) -> Result<(), LibreNmsError> {
        self.validate_token().await
    }

    async fn get_alert_rule(&self, rule_id: u64) -> Result<AlertRule, LibreNmsError> {
        self.get_alert_rule(rule_id).await
    }

    async fn get_alert(&self, alert_id: u64) -> Result<Value, LibreNmsError> {
        self.get_alert(alert_id).await
    }

    async fn list_alerts(&self) -> Result<Vec<Alert>, LibreNmsError> {
        self.list_alerts().await
    }

    async fn list_devices(&self) -> Result<Vec<Device>, LibreNmsError> {
        self.list_devices().await
    }

    async fn get_device(&self, device_id: u64) -> Result<Device, LibreNmsError> {
        self.get_device(device_id).await
    }

    async fn get_device_by_hostname(&self, hostname: &str) -> Result<Device, LibreNmsError> {
        self.get_device_by_hostname(hostname).await
    }

    async fn list_services_by_state(&self, state: ServiceState) -> Result<Vec<Service>, LibreNmsError> {
        self.list_services_by_state(state).await
    }

    async fn list_critical_services(&self) -> Result<Vec<Service>, LibreNmsError> {
        self.list_critical_services().await
    }

    async fn get_services_for_device(&self, hostname: &str) -> Result<Vec<Service>, LibreNmsError> {
        self.get_services_for_device(hostname).await
    }

    async fn add_service_for_device(&self, hostname: &str, data: &Value) -> Result<Value, LibreNmsError> {
        self.add_service_for_device(hostname, data).await
    }

    async fn delete_service_by_id(&self, service_id: u64) -> Result<Value, LibreNmsError> {
        self.delete_service_by_id(service_id).await
    }

    async fn edit_service_by_id(&self, service_id: u64, data: &Value) -> Result<Value, LibreNmsError> {
        self.edit_service_by_id(service_id, data).await
    }
}
