//! Gateway client configuration
//!
//! Loaded once from environment variables at startup. Missing required
//! values prevent the client from being constructed so misconfiguration
//! surfaces at boot, not on the first payment.

use crate::error::{GatewayError, GatewayResult};
use std::env;
use std::time::Duration;

/// Deployment environment of the provider account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "sandbox" => Some(Self::Sandbox),
            "production" => Some(Self::Production),
            _ => None,
        }
    }

    /// Value sent in the provider's target-environment header
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

/// Configuration for the mobile-money collection gateway
#[derive(Debug, Clone)]
pub struct MomoConfig {
    /// Provider API base URL
    pub base_url: String,
    /// Subscription key sent on every request
    pub subscription_key: String,
    /// Application user id for token requests
    pub api_user: String,
    /// Application secret for token requests
    pub api_key: String,
    /// Host the provider delivers asynchronous callbacks to
    pub callback_host: String,
    /// Deployment environment; selects currency and the target-environment header
    pub environment: Environment,
    /// Currency used for all sandbox submissions
    pub sandbox_currency: String,
    /// Currency used for all production submissions
    pub production_currency: String,
    /// Timeout for token requests in seconds
    pub auth_timeout_secs: u64,
    /// Timeout for payment-submission requests in seconds
    pub submit_timeout_secs: u64,
    /// Timeout for status-query requests in seconds
    pub status_timeout_secs: u64,
}

impl MomoConfig {
    pub fn from_env() -> GatewayResult<Self> {
        let environment = match env::var("MOMO_ENVIRONMENT") {
            Ok(value) => Environment::parse(value.trim()).ok_or_else(|| {
                GatewayError::ConfigurationMissing {
                    name: "MOMO_ENVIRONMENT (must be 'sandbox' or 'production')".to_string(),
                }
            })?,
            Err(_) => Environment::Sandbox,
        };

        let config = Self {
            base_url: required("MOMO_BASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            subscription_key: required("MOMO_SUBSCRIPTION_KEY")?,
            api_user: required("MOMO_API_USER")?,
            api_key: required("MOMO_API_KEY")?,
            callback_host: required("MOMO_CALLBACK_HOST")?,
            environment,
            sandbox_currency: optional("MOMO_SANDBOX_CURRENCY", "EUR"),
            production_currency: optional("MOMO_PRODUCTION_CURRENCY", "RWF"),
            auth_timeout_secs: optional_u64("MOMO_AUTH_TIMEOUT_SECS", 10),
            submit_timeout_secs: optional_u64("MOMO_SUBMIT_TIMEOUT_SECS", 20),
            status_timeout_secs: optional_u64("MOMO_STATUS_TIMEOUT_SECS", 30),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GatewayResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(missing("MOMO_BASE_URL"));
        }
        if self.sandbox_currency.trim().is_empty() {
            return Err(missing("MOMO_SANDBOX_CURRENCY"));
        }
        if self.production_currency.trim().is_empty() {
            return Err(missing("MOMO_PRODUCTION_CURRENCY"));
        }
        if self.auth_timeout_secs == 0 {
            return Err(missing("MOMO_AUTH_TIMEOUT_SECS (must be greater than 0)"));
        }
        // Provider processing latency grows auth < submit < status; the
        // timeouts must keep that ordering.
        if self.submit_timeout_secs < self.auth_timeout_secs {
            return Err(missing(
                "MOMO_SUBMIT_TIMEOUT_SECS (must be >= MOMO_AUTH_TIMEOUT_SECS)",
            ));
        }
        if self.status_timeout_secs < self.submit_timeout_secs {
            return Err(missing(
                "MOMO_STATUS_TIMEOUT_SECS (must be >= MOMO_SUBMIT_TIMEOUT_SECS)",
            ));
        }
        Ok(())
    }

    /// Currency is fixed per deployment environment, never caller-selected
    pub fn currency(&self) -> &str {
        match self.environment {
            Environment::Sandbox => &self.sandbox_currency,
            Environment::Production => &self.production_currency,
        }
    }

    pub fn auth_timeout(&self) -> Duration {
        Duration::from_secs(self.auth_timeout_secs)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs)
    }
}

fn required(name: &str) -> GatewayResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(missing(name)),
    }
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn optional_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn missing(name: &str) -> GatewayError {
    GatewayError::ConfigurationMissing {
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> MomoConfig {
        MomoConfig {
            base_url: "https://sandbox.momodeveloper.mtn.com".to_string(),
            subscription_key: "sub-key".to_string(),
            api_user: "api-user".to_string(),
            api_key: "api-key".to_string(),
            callback_host: "https://example.com/webhooks/momo".to_string(),
            environment: Environment::Sandbox,
            sandbox_currency: "EUR".to_string(),
            production_currency: "RWF".to_string(),
            auth_timeout_secs: 10,
            submit_timeout_secs: 20,
            status_timeout_secs: 30,
        }
    }

    #[test]
    fn currency_follows_environment() {
        let mut config = base_config();
        assert_eq!(config.currency(), "EUR");
        config.environment = Environment::Production;
        assert_eq!(config.currency(), "RWF");
    }

    #[test]
    fn validate_rejects_inverted_timeouts() {
        let mut config = base_config();
        config.submit_timeout_secs = 5;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, GatewayError::ConfigurationMissing { .. }));
    }

    #[test]
    fn validate_rejects_empty_currency() {
        let mut config = base_config();
        config.sandbox_currency = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn environment_parse_rejects_unknown() {
        assert_eq!(Environment::parse("sandbox"), Some(Environment::Sandbox));
        assert_eq!(
            Environment::parse("production"),
            Some(Environment::Production)
        );
        assert_eq!(Environment::parse("staging"), None);
    }

    #[test]
    fn from_env_fails_without_required_values() {
        std::env::remove_var("MOMO_BASE_URL");

        let config = MomoConfig::from_env();
        assert!(config.is_err(), "config should fail without base url");
    }
}
