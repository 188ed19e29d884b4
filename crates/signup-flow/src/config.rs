//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// OTP service configuration
    #[serde(default)]
    pub otp: OtpServiceConfig,

    /// Account service configuration
    #[serde(default)]
    pub account: AccountServiceConfig,

    /// Flow configuration
    #[serde(default)]
    pub flow: FlowConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpServiceConfig {
    /// Code issuance/verification endpoint base URL
    #[serde(default = "default_otp_url")]
    pub service_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountServiceConfig {
    /// Account-creation endpoint base URL
    #[serde(default = "default_account_url")]
    pub service_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowConfig {
    /// Resend cooldown after each issuance
    #[serde(default = "default_resend_cooldown", with = "humantime_serde")]
    pub resend_cooldown: Duration,

    /// Delay between creation success and the redirect
    #[serde(default = "default_redirect_delay", with = "humantime_serde")]
    pub redirect_delay: Duration,

    /// How long a verified-phone proof stays usable for a creation retry
    #[serde(default = "default_verified_ttl", with = "humantime_serde")]
    pub verified_ttl: Duration,

    /// Locale for status messages and redirect paths
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Callback URL captured at flow entry (sanitized before use)
    #[serde(default)]
    pub callback_url: Option<String>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default implementations
impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            service_url: default_otp_url(),
        }
    }
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            service_url: default_account_url(),
        }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            resend_cooldown: default_resend_cooldown(),
            redirect_delay: default_redirect_delay(),
            verified_ttl: default_verified_ttl(),
            locale: default_locale(),
            callback_url: None,
            log_level: default_log_level(),
        }
    }
}

// Default value functions
fn default_otp_url() -> String {
    "http://localhost:4010".into()
}

fn default_account_url() -> String {
    "http://localhost:4020".into()
}

fn default_resend_cooldown() -> Duration {
    Duration::from_secs(300)
}

fn default_redirect_delay() -> Duration {
    Duration::from_secs(2)
}

fn default_verified_ttl() -> Duration {
    Duration::from_secs(300)
}

fn default_locale() -> String {
    "en".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FlowConfig::default();
        assert_eq!(config.resend_cooldown, Duration::from_secs(300));
        assert_eq!(config.redirect_delay, Duration::from_secs(2));
        assert_eq!(config.locale, "en");
        assert!(config.callback_url.is_none());
    }
}
