//! Node configuration.
//!
//! Values are layered: built-in defaults, then an optional file, then
//! `GATEHOUSE_`-prefixed environment variables (`__` separates nested keys,
//! e.g. `GATEHOUSE_AUTH__SECRET`).

use config::{Config, Environment, File};
use gatehouse_auth::{AuthConfig, AuthError};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::observability::LogFormat;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "GATEHOUSE";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum NodeConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Authentication settings were rejected.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Configuration for the Gatehouse node.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    /// API listen address.
    pub api_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log output format (`pretty` or `json`).
    pub log_format: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Authentication settings.
    pub auth: AuthSettings,
}

/// Authentication settings.
#[derive(Clone, Deserialize)]
pub struct AuthSettings {
    /// Token signing secret. Required.
    #[serde(default)]
    pub secret: Option<String>,
    /// Token lifetime in seconds.
    pub token_ttl_secs: u64,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

impl NodeConfig {
    /// Load configuration from defaults, an optional file and the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, NodeConfigError> {
        Self::load_with_env(path, Self::environment())
    }

    /// Load configuration with an explicit environment source.
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, NodeConfigError> {
        let mut builder = Config::builder()
            .set_default("api_addr", "127.0.0.1:4000")?
            .set_default("log_level", "info")?
            .set_default("log_format", "pretty")?
            .set_default("request_timeout_secs", 30)?
            .set_default("auth.token_ttl_secs", 86_400)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: NodeConfig = builder.add_source(env).build()?.try_deserialize()?;
        Ok(config)
    }

    /// The environment source used by [`NodeConfig::load`].
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    /// Check values that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), NodeConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(NodeConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if !matches!(self.log_format.to_lowercase().as_str(), "pretty" | "json") {
            return Err(NodeConfigError::Invalid(format!(
                "log_format must be 'pretty' or 'json', got '{}'",
                self.log_format
            )));
        }

        self.to_auth_config()?;
        Ok(())
    }

    /// Build the authentication configuration.
    pub fn to_auth_config(&self) -> Result<AuthConfig, NodeConfigError> {
        Ok(AuthConfig::new(
            self.auth.secret.as_deref(),
            Duration::from_secs(self.auth.token_ttl_secs),
        )?)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parsed log format.
    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.log_format)
    }
}
