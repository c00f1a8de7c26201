//! Application configuration management with security considerations.
//!
//! Every value is read from the environment once at startup by
//! [init_config]. Sensitive fields are marked and must never be logged.

use anyhow::Context;
use envconfig::Envconfig;
use std::sync::OnceLock;

/// Application configuration read from environment variables.
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Host address for web server binding (NON-SENSITIVE)
    /// Example: "0.0.0.0", "localhost"
    #[envconfig(default = "localhost")]
    pub wep_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    /// Common values: 80 (HTTP), 443 (HTTPS), 8080 (dev)
    #[envconfig(default = "8080")]
    pub wep_server_port: u16,

    /// Path to SSL private key file (SENSITIVE PATH)
    /// Security: File should have 600 permissions
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file (NON-SENSITIVE)
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// 🔒 SENSITIVE: CSRF protection password (UUID format)
    /// Security: Generate using cryptographically secure random generator
    pub csrf_pass: String,

    /// 🔒 SENSITIVE: CSRF protection salt (UUID format)
    /// Rotation: Change with csrf_pass
    pub csrf_salt: String,

    /// 🔒 SENSITIVE: Logfire write token, metrics are only exported when set
    pub logfire_token: Option<String>,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Gets the server URL host with port for non-production environments
    pub fn url_host(&self) -> String {
        if self.is_prod() {
            return self.wep_server_host.to_string();
        }

        format!(
            "{host}:{port}",
            host = self.wep_server_host,
            port = self.wep_server_port
        )
    }

    /// Gets the appropriate protocol (HTTP/HTTPS) based on environment
    pub fn wep_server_protocol(&self) -> String {
        if self.is_prod() {
            return "https".into();
        }
        "http".into()
    }

    /// Constructs the complete base URL for the application
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.wep_server_protocol(), self.url_host())
    }
}

/// Global application configuration, set once by [init_config]
pub static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Loads [AppConfig] from the environment into [APP_CONFIG]
pub fn init_config() -> anyhow::Result<()> {
    let app_config = AppConfig::init_from_env()
        .context("failed to load application configuration from environment variables")?;

    APP_CONFIG
        .set(app_config)
        .map_err(|_| anyhow::anyhow!("application configuration was already initialized"))
}
