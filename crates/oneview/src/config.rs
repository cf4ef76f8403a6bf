//! Client and polling configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::OneViewError;

/// REST API version sent in `X-API-Version` unless overridden.
pub const DEFAULT_API_VERSION: u32 = 120;

/// Login domain used when none is configured.
pub const DEFAULT_LOGIN_DOMAIN: &str = "LOCAL";

/// Task state that marks a finished operation.
pub const DEFAULT_COMPLETED_STATE: &str = "Completed";

/// Connection settings for a OneView appliance.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Appliance base URL, e.g. `https://oneview.example.com`.
    pub endpoint: String,
    /// Login user.
    pub username: String,
    /// Login password. Never serialized.
    #[serde(skip_serializing)]
    pub password: String,
    /// Authentication directory; `LOCAL` for appliance accounts.
    pub auth_login_domain: String,
    /// REST API version.
    pub api_version: u32,
    /// Accept self-signed appliance certificates.
    pub accept_invalid_certs: bool,
    /// Per-request timeout.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            username: String::new(),
            password: String::new(),
            auth_login_domain: DEFAULT_LOGIN_DOMAIN.to_string(),
            api_version: DEFAULT_API_VERSION,
            accept_invalid_certs: false,
            request_timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("auth_login_domain", &self.auth_login_domain)
            .field("api_version", &self.api_version)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Check that the settings can be used to build a client.
    ///
    /// # Errors
    /// Returns [`OneViewError::Config`] for a missing or non-HTTP endpoint
    /// or missing credentials.
    pub fn validate(&self) -> Result<(), OneViewError> {
        if self.endpoint.is_empty() {
            return Err(OneViewError::Config("endpoint is required".into()));
        }
        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(OneViewError::Config(format!(
                "endpoint must be an http(s) URL: {}",
                self.endpoint
            )));
        }
        if self.username.is_empty() || self.password.is_empty() {
            return Err(OneViewError::Config(
                "username and password are required".into(),
            ));
        }
        Ok(())
    }

    /// Endpoint without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}

/// How a provisioning task is polled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Remote task state that ends the wait successfully.
    pub completed_state: String,
    /// Remote task states that end the wait as failed.
    pub failure_states: Vec<String>,
    /// Delay unit; each pass sleeps `wait_secs` of these.
    pub base_delay_ms: u64,
    /// Wait interval assigned to new tasks.
    pub wait_secs: u32,
    /// Poll passes allowed before giving up.
    pub max_iterations: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            completed_state: DEFAULT_COMPLETED_STATE.to_string(),
            failure_states: vec!["Error".into(), "Killed".into(), "Terminated".into()],
            base_delay_ms: 1000,
            wait_secs: 10,
            max_iterations: 36,
        }
    }
}

impl PollConfig {
    /// Delay unit as a [`Duration`].
    #[must_use]
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Sleep for one poll pass: `wait_secs` base delays, saturating at
    /// [`Duration::MAX`].
    #[must_use]
    pub fn pass_delay(&self, wait_secs: u32) -> Duration {
        self.base_delay()
            .checked_mul(wait_secs)
            .unwrap_or(Duration::MAX)
    }

    /// Whether `state` is the completed marker (case-insensitive).
    #[must_use]
    pub fn is_completed(&self, state: &str) -> bool {
        state.eq_ignore_ascii_case(&self.completed_state)
    }

    /// Whether `state` is one of the failure markers (case-insensitive).
    #[must_use]
    pub fn is_failure(&self, state: &str) -> bool {
        self.failure_states
            .iter()
            .any(|s| state.eq_ignore_ascii_case(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_config_default() {
        let config = PollConfig::default();
        assert_eq!(config.wait_secs, 10);
        assert_eq!(config.max_iterations, 36);
        assert_eq!(config.base_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_state_matching_ignores_case() {
        let config = PollConfig::default();
        assert!(config.is_completed("Completed"));
        assert!(config.is_completed("COMPLETED"));
        assert!(!config.is_completed("Running"));
        assert!(config.is_failure("error"));
        assert!(!config.is_failure("Warning"));
    }

    #[test]
    fn test_client_config_validate() {
        let mut config = ClientConfig::default();
        assert!(matches!(config.validate(), Err(OneViewError::Config(_))));

        config.endpoint = "oneview.local".into();
        config.username = "admin".into();
        config.password = "secret".into();
        assert!(config.validate().is_err());

        config.endpoint = "https://oneview.local/".into();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), "https://oneview.local");
    }

    #[test]
    fn test_client_config_debug_redacts_password() {
        let config = ClientConfig {
            password: "hunter2".into(),
            ..ClientConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_client_config_serialize_omits_password() {
        let config = ClientConfig {
            endpoint: "https://oneview.local".into(),
            username: "admin".into(),
            password: "hunter2".into(),
            ..ClientConfig::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["username"], "admin");
        assert!(!value.to_string().contains("hunter2"));

        let read: ClientConfig = serde_json::from_str(
            r#"{"endpoint": "https://oneview.local", "username": "admin", "password": "hunter2"}"#,
        )
        .unwrap();
        assert_eq!(read.password, "hunter2");
    }

    #[test]
    fn test_pass_delay_saturates() {
        let config = PollConfig::default();
        assert_eq!(config.pass_delay(10), Duration::from_secs(10));
        assert_eq!(config.pass_delay(0), Duration::ZERO);

        let config = PollConfig {
            base_delay_ms: u64::MAX,
            ..PollConfig::default()
        };
        assert_eq!(config.pass_delay(10), Duration::MAX);
    }

    #[test]
    fn test_poll_config_partial_deserialize() {
        let config: PollConfig = serde_json::from_str(r#"{"max_iterations": 5}"#).unwrap();
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.completed_state, "Completed");
    }
}
