//! LibreNMS API models
//!
//! Devices, services, alerts and rules are passed through as JSON objects;
//! their fields are defined by the LibreNMS version in use.
//! See: https://docs.librenms.org/API/

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A JSON object as returned by LibreNMS
pub type JsonObject = Map<String, Value>;

/// Device entry from `devices`
pub type Device = JsonObject;

/// Service entry from `services`
pub type Service = JsonObject;

/// Alert body from `alert/{id}` or entry from `alerts`
pub type Alert = JsonObject;

/// Alert rule entry from `rules`
pub type AlertRule = JsonObject;

/// Service check state, as used by the `state` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    /// Numeric code LibreNMS uses for this state
    pub fn code(self) -> u8 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }
}

impl From<ServiceState> for u8 {
    fn from(state: ServiceState) -> Self {
        state.code()
    }
}

impl TryFrom<u8> for ServiceState {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ServiceState::Ok),
            1 => Ok(ServiceState::Warning),
            2 => Ok(ServiceState::Critical),
            3 => Ok(ServiceState::Unknown),
            other => Err(format!("unknown service state {}", other)),
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Request body for adding a service to a device
///
/// Unset fields are left out of the body so LibreNMS applies its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewService {
    /// Check type, e.g. "ping" or "http"
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Extra arguments passed to the check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore: Option<bool>,
}

impl NewService {
    /// Create a service of the given check type
    pub fn new(service_type: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            ..Default::default()
        }
    }

    /// Convert to the JSON body sent to LibreNMS
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_state_codes() {
        assert_eq!(ServiceState::Ok.code(), 0);
        assert_eq!(ServiceState::Critical.code(), 2);
        assert_eq!(ServiceState::Critical.to_string(), "2");
        assert_eq!(ServiceState::try_from(3), Ok(ServiceState::Unknown));
        assert!(ServiceState::try_from(9).is_err());
    }

    #[test]
    fn test_service_state_serde_uses_codes() {
        assert_eq!(serde_json::to_value(ServiceState::Warning).expect("serialize"), json!(1));
        let state: ServiceState = serde_json::from_value(json!(2)).expect("deserialize");
        assert_eq!(state, ServiceState::Critical);
    }

    #[test]
    fn test_new_service_omits_unset_fields() {
        let mut service = NewService::new("http");
        service.desc = Some("web frontend".to_string());

        assert_eq!(
            service.to_json().expect("json"),
            json!({"type": "http", "desc": "web frontend"})
        );
    }
}
