//! Application Configuration
//!
//! Loads configuration from files and environment variables.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::application::use_cases::forward::UpstreamOrigins;
use crate::domain::models::route_policy::PolicyTable;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Upstream service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// `BASE_URL`
    pub base_url: String,
    /// `BASE_V2_URL`
    pub base_v2_url: String,
    /// UI renderer that serves pages allowed by the gate
    #[serde(default)]
    pub frontend_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_client_ip_header")]
    pub client_ip_header: String,
}

impl UpstreamConfig {
    /// Upstream origins handed to the forward use case
    #[must_use]
    pub fn origins(&self) -> UpstreamOrigins {
        UpstreamOrigins {
            v1: self.base_url.clone(),
            v2: self.base_v2_url.clone(),
            frontend: self.frontend_url.clone().filter(|u| !u.trim().is_empty()),
            client_ip_header: self.client_ip_header.clone(),
        }
    }
}

/// Session token signing secret, wiped from memory on drop
#[derive(Clone, Default, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SessionSecret(String);

impl SessionSecret {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionSecret(***)")
    }
}

/// Session token configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Missing or empty means every token is treated as absent
    #[serde(default)]
    pub secret: SessionSecret,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: SessionSecret::default(),
            cookie_name: default_cookie_name(),
            leeway_secs: default_leeway_secs(),
        }
    }
}

/// Edge auth gate configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GateConfig {
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_register_path")]
    pub register_path: String,
    #[serde(default = "default_landing_path")]
    pub landing_path: String,
    #[serde(default = "default_callback_param")]
    pub callback_param: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            register_path: default_register_path(),
            landing_path: default_landing_path(),
            callback_param: default_callback_param(),
        }
    }
}

impl GateConfig {
    /// Build the policy table for these paths
    #[must_use]
    pub fn policy_table(&self) -> PolicyTable {
        PolicyTable::standard(&self.login_path, &self.register_path, &self.landing_path)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub json: bool,
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

        Config::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(true))
            // Merge environment-specific config if it exists
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Override with environment variables (e.g., APP__UPSTREAM__BASE_URL)
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Load configuration from an inline TOML document
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_client_ip_header() -> String {
    "x-client-ip".to_string()
}

fn default_cookie_name() -> String {
    "session-token".to_string()
}

fn default_leeway_secs() -> u64 {
    60
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_register_path() -> String {
    "/register".to_string()
}

fn default_landing_path() -> String {
    "/dashboard".to_string()
}

fn default_callback_param() -> String {
    "callbackUrl".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[server]
host = "127.0.0.1"
port = 8080

[upstream]
base_url = "http://backend:4000/api/"
base_v2_url = "http://backend:4000/api/v2"

[session]
secret = "a-secret"

[gate]
"#;

    #[test]
    fn test_defaults_are_applied() {
        let config = AppConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.upstream.client_ip_header, "x-client-ip");
        assert_eq!(config.session.cookie_name, "session-token");
        assert_eq!(config.gate.login_path, "/login");
        assert_eq!(config.gate.landing_path, "/dashboard");
        assert!(!config.log.json);
    }

    #[test]
    fn test_origins_resolve_configured_bases() {
        use crate::domain::models::proxy_route::UpstreamBase;

        let origins = AppConfig::from_toml(MINIMAL).unwrap().upstream.origins();
        assert_eq!(origins.base_for(UpstreamBase::V1), Some("http://backend:4000/api"));
        assert_eq!(origins.base_for(UpstreamBase::V2), Some("http://backend:4000/api/v2"));
        assert_eq!(origins.base_for(UpstreamBase::Frontend), None);
    }

    #[test]
    fn test_gate_policy_table_uses_configured_paths() {
        let source = MINIMAL.replace("[gate]", "[gate]\nlanding_path = \"/board\"");
        let config = AppConfig::from_toml(&source).unwrap();
        let table = config.gate.policy_table();
        assert_eq!(table.landing_path(), "/board");
        assert_eq!(table.login_path(), "/login");
    }

    #[test]
    fn test_secret_is_redacted_in_debug() {
        let config = AppConfig::from_toml(MINIMAL).unwrap();
        assert!(!format!("{config:?}").contains("a-secret"));
        assert_eq!(config.session.secret.expose(), "a-secret");
    }

    #[test]
    fn test_missing_secret_is_empty() {
        let source = MINIMAL.replace(r#"secret = "a-secret""#, "");
        let config = AppConfig::from_toml(&source).unwrap();
        assert!(config.session.secret.is_empty());
    }
}
