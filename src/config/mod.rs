// Service configuration module

use serde::{Deserialize, Serialize};

use crate::error::{MediaError, Result};

/// Credentials and endpoints for the storage service
///
/// Built once at startup (directly or via [`ServiceConfig::from_env`]) and
/// handed to [`crate::MediaClient::new`]; nothing reads ambient globals
/// after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Account name, becomes a path segment of every API and delivery URL
    pub cloud_name: String,

    /// API key used for HTTP basic auth on admin calls
    pub api_key: String,

    /// API secret; also the HMAC key for signed delivery URLs
    pub api_secret: String,

    /// Base URL of the upload/admin API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Base URL of the CDN delivery host used in signed URLs
    #[serde(default = "default_delivery_base")]
    pub delivery_base: String,
}

fn default_api_base() -> String {
    "https://api.mediavault.io".to_string()
}

fn default_delivery_base() -> String {
    "https://cdn.mediavault.io".to_string()
}

impl ServiceConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_base: default_api_base(),
            delivery_base: default_delivery_base(),
        }
    }

    /// Build a config from the environment
    ///
    /// Required variables:
    /// - `MEDIAVAULT_CLOUD_NAME`
    /// - `MEDIAVAULT_API_KEY`
    /// - `MEDIAVAULT_API_SECRET`
    ///
    /// Optional overrides: `MEDIAVAULT_API_BASE`, `MEDIAVAULT_DELIVERY_BASE`.
    pub fn from_env() -> Result<Self> {
        let cloud_name = require_env("MEDIAVAULT_CLOUD_NAME")?;
        let api_key = require_env("MEDIAVAULT_API_KEY")?;
        let api_secret = require_env("MEDIAVAULT_API_SECRET")?;

        let mut config = Self::new(cloud_name, api_key, api_secret);
        if let Ok(base) = std::env::var("MEDIAVAULT_API_BASE") {
            config.api_base = base;
        }
        if let Ok(base) = std::env::var("MEDIAVAULT_DELIVERY_BASE") {
            config.delivery_base = base;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reject configs with empty credentials or endpoints
    pub fn validate(&self) -> Result<()> {
        if self.cloud_name.is_empty() {
            return Err(MediaError::Config("cloud name cannot be empty".to_string()));
        }
        if self.api_key.is_empty() {
            return Err(MediaError::Config("api key cannot be empty".to_string()));
        }
        if self.api_secret.is_empty() {
            return Err(MediaError::Config("api secret cannot be empty".to_string()));
        }
        if self.api_base.is_empty() {
            return Err(MediaError::Config("api base url cannot be empty".to_string()));
        }
        if self.delivery_base.is_empty() {
            return Err(MediaError::Config(
                "delivery base url cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// API base with any trailing slash removed
    pub(crate) fn api_root(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    /// Delivery base with any trailing slash removed
    pub(crate) fn delivery_root(&self) -> &str {
        self.delivery_base.trim_end_matches('/')
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| MediaError::Config(format!("{} is not set", name)))
}
