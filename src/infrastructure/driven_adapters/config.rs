//! Application Configuration
//!
//! Loads configuration from files and environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::models::UploadPolicy;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS; `*` allows any
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// JWT signing configuration. The secret is wiped from memory on drop.
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: i64,
}

fn default_session_ttl_secs() -> i64 {
    86_400
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("session_ttl_secs", &self.session_ttl_secs)
            .finish()
    }
}

/// Audio blob storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub tracks_dir: String,
    pub max_file_size_mb: u64,
    pub allowed_types: Vec<String>,
}

impl StorageConfig {
    #[must_use]
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }

    #[must_use]
    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy {
            max_file_size_bytes: self.max_file_size_bytes(),
            allowed_types: self.allowed_types.clone(),
        }
    }
}

/// Per-IP rate limiting
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub requests_per_second: u64,
    pub burst_size: u32,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Credentials of the administrator account ensured at startup
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct AdminConfig {
    pub login: String,
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `config/default.toml` is missing or a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

        Config::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(true))
            // Merge environment-specific config if it exists
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Override with environment variables (e.g., APP__SERVER__PORT)
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .with_list_parse_key("storage.allowed_types")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 8080

        [database]
        url = "postgres://localhost/music"
        max_connections = 5
        min_connections = 1

        [jwt]
        secret = "top-secret"

        [storage]
        tracks_dir = "./data/tracks"
        max_file_size_mb = 20
        allowed_types = ["audio/mpeg", "audio/mp3"]

        [rate_limit]
        requests_per_second = 10
        burst_size = 20
    "#;

    fn sample() -> AppConfig {
        Config::builder()
            .add_source(File::from_str(SAMPLE, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn should_apply_defaults_for_optional_sections() {
        let config = sample();
        assert_eq!(config.jwt.session_ttl_secs, 86_400);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.admin.is_none());
        assert!(config.server.allowed_origins.is_empty());
    }

    #[test]
    fn should_derive_upload_policy_in_bytes() {
        let policy = sample().storage.upload_policy();
        assert_eq!(policy.max_file_size_bytes, 20 * 1024 * 1024);
        assert!(policy.allows("audio/mp3"));
    }

    #[test]
    fn should_redact_secrets_in_debug_output() {
        let rendered = format!("{:?}", sample().jwt);
        assert!(!rendered.contains("top-secret"));
    }
}
