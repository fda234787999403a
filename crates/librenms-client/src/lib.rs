//! LibreNMS REST API Client
//!
//! A Rust client library for the LibreNMS v0 REST API.
//! Each method performs one request and unwraps the response envelope,
//! returning devices, services, alerts and alert rules as JSON objects.
//!
//! # Example
//!
//! ```no_run
//! use librenms_client::{ClientConfig, LibreNmsApi, LibreNmsClient, NewService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let config = ClientConfig::new("https://librenms.example.com/api/v0", "your-api-token");
//! let client = LibreNmsClient::new(config)?;
//!
//! // Critical services
//! for service in client.list_critical_services().await? {
//!     println!("{:?}", service);
//! }
//!
//! // Add a ping check unless one already exists
//! if client.service_already_added("core-sw1", "ping").await?.is_none() {
//!     let mut ping = NewService::new("ping");
//!     ping.desc = Some("ping".to_string());
//!     client.add_service_for_device("core-sw1", &ping.to_json()?).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Devices**: list, fetch by id or hostname, filter by OS
//! - **Services**: list by state, per device, add, edit, delete
//! - **Alerts**: fetch alerts and alert rules
//! - **Pluggable transport**: any [`Transport`] can replace reqwest

pub mod client;
pub mod common;
pub mod config;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod librenms_trait;
#[cfg(test)]
mod test_utils;

pub use client::LibreNmsClient;
pub use common::{ApiRequest, ApiResponse, HttpTransport, Transport};
pub use config::ClientConfig;
pub use error::LibreNmsError;
pub use models::*;
pub use librenms_trait::LibreNmsApi;
