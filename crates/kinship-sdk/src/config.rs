//! Client configuration.

use crate::error::SdkError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default gateway base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8888/api";

/// Health probe timeout in seconds
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 5;

/// Gateway client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Seconds before the health probe reports the gateway unavailable
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_health_timeout_secs() -> u64 {
    DEFAULT_HEALTH_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            health_timeout_secs: default_health_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Health probe timeout
    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SdkError> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| SdkError::InvalidEndpoint(format!("{}: {}", self.base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(SdkError::InvalidEndpoint(format!(
                "{}: scheme must be http or https",
                self.base_url
            )));
        }

        if url.cannot_be_a_base() {
            return Err(SdkError::InvalidEndpoint(self.base_url.clone()));
        }

        if self.health_timeout_secs == 0 {
            return Err(SdkError::InvalidEndpoint(
                "health_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
