//! Client configuration
//!
//! Holds everything needed to address a LibreNMS instance: the API base URL,
//! the auth token, and the request options passed to the transport.

use crate::error::LibreNmsError;
use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API base URL (e.g. `https://librenms/api/v0/`)
pub const ENV_URL: &str = "LIBRENMS_URL";
/// Environment variable holding the API token
pub const ENV_TOKEN: &str = "LIBRENMS_TOKEN";
/// Environment variable overriding the `User-Agent` header
pub const ENV_USER_AGENT: &str = "LIBRENMS_USER_AGENT";
/// Environment variable overriding the request timeout, in whole seconds
pub const ENV_TIMEOUT_SECS: &str = "LIBRENMS_TIMEOUT_SECS";

/// LibreNMS client configuration
///
/// The base URL is normalised to end with a single `/`, so resource paths
/// such as `devices/` can be appended directly.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    auth_token: String,
    user_agent: String,
    timeout: Duration,
    extra_headers: BTreeMap<String, String>,
}

impl ClientConfig {
    /// Create a configuration with default user agent and timeout
    ///
    /// # Arguments
    /// * `base_url` - LibreNMS API root (e.g., "https://librenms.example.com/api/v0")
    /// * `auth_token` - API token sent as `X-Auth-Token`
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            auth_token: auth_token.into(),
            user_agent: default_user_agent(),
            timeout: DEFAULT_TIMEOUT,
            extra_headers: BTreeMap::new(),
        }
    }

    /// Load configuration from `LIBRENMS_*` environment variables
    pub fn from_env() -> Result<Self, LibreNmsError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LibreNmsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_URL).ok_or_else(|| {
            LibreNmsError::InvalidConfig(format!("{} environment variable is required", ENV_URL))
        })?;
        let token = lookup(ENV_TOKEN).ok_or_else(|| {
            LibreNmsError::InvalidConfig(format!("{} environment variable is required", ENV_TOKEN))
        })?;

        let mut config = Self::new(base_url, token);

        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            config = config.with_user_agent(user_agent);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                LibreNmsError::InvalidConfig(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
            if secs == 0 {
                return Err(LibreNmsError::InvalidConfig(format!(
                    "{} must be greater than zero",
                    ENV_TIMEOUT_SECS
                )));
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Override the `User-Agent` header
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a header sent with every request (e.g. `Accept-Language`)
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    /// Get the base URL, always ending with `/`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the API token
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// Get the `User-Agent` header value
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Get the request timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the extra headers
    pub fn extra_headers(&self) -> &BTreeMap<String, String> {
        &self.extra_headers
    }

    /// Check the values that would otherwise fail on first request
    pub fn validate(&self) -> Result<(), LibreNmsError> {
        if self.auth_token.trim().is_empty() {
            return Err(LibreNmsError::InvalidConfig("auth token is empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(LibreNmsError::InvalidConfig("timeout must be greater than zero".to_string()));
        }
        if self.base_url == "/" {
            return Err(LibreNmsError::InvalidConfig("base URL is empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(LibreNmsError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        Ok(())
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("auth_token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("extra_headers", &self.extra_headers)
            .finish()
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
