//! Configuration Module
//!
//! Handles loading and managing client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default storefront API base URL.
pub const DEFAULT_BASE_URL: &str = "https://clothing-store.liara.run";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the storefront REST API
    pub base_url: String,
    /// Per-request transport timeout in seconds
    pub request_timeout_secs: u64,
    /// How long the session stays logged out after an explicit logout, in seconds
    pub logout_cooldown_secs: u64,
    /// How long a cache entry stays fresh before it needs a refetch, in seconds
    pub stale_time_secs: u64,
    /// Background revalidation sweep interval in seconds
    pub revalidate_interval_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STOREFRONT_API_URL` - API base URL (default: production storefront)
    /// - `REQUEST_TIMEOUT` - Request timeout in seconds (default: 30)
    /// - `LOGOUT_COOLDOWN` - Logout cooldown in seconds (default: 5)
    /// - `STALE_TIME` - Cache staleness window in seconds (default: 60)
    /// - `REVALIDATE_INTERVAL` - Revalidation sweep interval in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("STOREFRONT_API_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout_secs: env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            logout_cooldown_secs: env::var("LOGOUT_COOLDOWN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            stale_time_secs: env::var("STALE_TIME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            revalidate_interval_secs: env::var("REVALIDATE_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Logout cooldown as a Duration.
    pub fn logout_cooldown(&self) -> Duration {
        Duration::from_secs(self.logout_cooldown_secs)
    }

    /// Cache staleness window as a Duration.
    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            logout_cooldown_secs: 5,
            stale_time_secs: 60,
            revalidate_interval_secs: 60,
        }
    }
}
