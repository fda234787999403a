//! LibreNmsApi trait for mocking
//!
//! This trait abstracts the LibreNMS client so consumers can substitute their
//! own implementation in unit tests. The composite lookups are provided
//! methods built on the primitive calls, so every implementation filters and
//! matches the same way.

use crate::error::LibreNmsError;
use crate::models::*;
use serde_json::Value;
use tracing::debug;

/// Trait for LibreNMS API operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait LibreNmsApi: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate the API token
    async fn validate_token(&self) -> Result<(), LibreNmsError>;

    // Alerts
    async fn get_alert_rule(&self, rule_id: u64) -> Result<AlertRule, LibreNmsError>;
    async fn get_alert(&self, alert_id: u64) -> Result<Value, LibreNmsError>;
    async fn list_alerts(&self) -> Result<Vec<Alert>, LibreNmsError>;

    // Devices
    async fn list_devices(&self) -> Result<Vec<Device>, LibreNmsError>;
    async fn get_device(&self, device_id: u64) -> Result<Device, LibreNmsError>;
    async fn get_device_by_hostname(&self, hostname: &str) -> Result<Device, LibreNmsError>;

    // Services
    async fn list_services_by_state(&self, state: ServiceState) -> Result<Vec<Service>, LibreNmsError>;
    async fn list_critical_services(&self) -> Result<Vec<Service>, LibreNmsError>;
    async fn get_services_for_device(&self, hostname: &str) -> Result<Vec<Service>, LibreNmsError>;
    async fn add_service_for_device(&self, hostname: &str, data: &Value) -> Result<Value, LibreNmsError>;
    async fn delete_service_by_id(&self, service_id: u64) -> Result<Value, LibreNmsError>;
    async fn edit_service_by_id(&self, service_id: u64, data: &Value) -> Result<Value, LibreNmsError>;

    /// List devices, keeping only those whose `os` equals `os_type`
    ///
    /// Filtering happens after fetching the full inventory. `None` or an
    /// empty filter returns every device. Order is preserved.
    async fn list_devices_by_type(&self, os_type: Option<&str>) -> Result<Vec<Device>, LibreNmsError> {
        let devices = self.list_devices().await?;
        match os_type {
            Some(os) if !os.is_empty() => {
                let matching: Vec<Device> = devices
                    .into_iter()
                    .filter(|device| device.get("os").and_then(Value::as_str) == Some(os))
                    .collect();
                debug!("{} devices with os {}", matching.len(), os);
                Ok(matching)
            }
            _ => Ok(devices),
        }
    }

    /// Find the service on `hostname` whose `service_desc` equals `service_desc`
    ///
    /// # Returns
    /// * `Ok(Some(Service))` - The first matching service
    /// * `Ok(None)` - The host has no such service, or no services at all
    /// * `Err(LibreNmsError)` - If the request fails
    async fn service_already_added(
        &self,
        hostname: &str,
        service_desc: &str,
    ) -> Result<Option<Service>, LibreNmsError> {
        let services = match self.get_services_for_device(hostname).await {
            Ok(services) => services,
            Err(LibreNmsError::NotFound(reason)) => {
                debug!("No services for {}: {}", hostname, reason);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        Ok(services
            .into_iter()
            .find(|service| service.get("service_desc").and_then(Value::as_str) == Some(service_desc)))
    }
}
