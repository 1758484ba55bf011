// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses the YAML config file, expands ${VAR} references, and applies env overrides
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Configuration loading for production deployment
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. The YAML file (`config/config.yml` unless overridden), with `${VAR}`
//!    references replaced from the environment
//! 3. Individual environment variables (`DATABASE_URL`, `JWT_SECRET`, ...)
//!
//! A `.env` file in the working directory is loaded into the environment first.

use anyhow::{anyhow, Context, Result};
use calorie_core::constants::{auth, fatsecret, ports, service};
use calorie_providers::{FatSecretConfig, FatSecretCredentials};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Config file read when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "config/config.yml";

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite {
        /// Database file
        path: PathBuf,
    },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for PostgreSQL URLs, which this build does not support
    pub fn parse_url(s: &str) -> Result<Self> {
        if s.starts_with("postgresql://") || s.starts_with("postgres://") {
            return Err(anyhow!(
                "PostgreSQL connection strings are not supported; use a sqlite: URL"
            ));
        }

        let path_str = s.strip_prefix("sqlite://").or_else(|| s.strip_prefix("sqlite:")).unwrap_or(s);
        if path_str == ":memory:" {
            Ok(Self::Memory)
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/calorie_compass.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Application identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppInfo {
    /// Application name
    pub name: String,
    /// Application version
    pub version: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: service::APP_NAME.to_owned(),
            version: service::VERSION.to_owned(),
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Listening port
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: ports::DEFAULT_HTTP_PORT,
        }
    }
}

/// Logger settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level logged when `RUST_LOG` is unset
    pub log_level: LogLevel,
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `sqlite:` URL or file path
    pub url: String,
    /// Maximum pooled connections
    pub pool_max: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DatabaseUrl::default().to_connection_string(),
            pool_max: 5,
        }
    }
}

/// JWT signing settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// HS256 signing secret
    pub secret: String,
    /// Token lifetime in hours
    pub expiration_hours: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expiration_hours: auth::DEFAULT_JWT_EXPIRY_HOURS,
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// Password hashing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: auth::DEFAULT_BCRYPT_COST,
        }
    }
}

/// FatSecret API settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FatSecretSettings {
    /// OAuth2 client id
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// OAuth1 consumer key
    pub consumer_key: String,
    /// OAuth1 consumer secret
    pub consumer_secret: String,
    /// REST endpoint
    pub base_url: String,
    /// Token endpoint
    pub token_url: String,
    /// Outbound request timeout
    pub timeout_secs: u64,
}

impl Default for FatSecretSettings {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            consumer_key: String::new(),
            consumer_secret: String::new(),
            base_url: fatsecret::API_BASE_URL.to_owned(),
            token_url: fatsecret::TOKEN_URL.to_owned(),
            timeout_secs: fatsecret::REQUEST_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for FatSecretSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FatSecretSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("token_url", &self.token_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Application identity
    pub app: AppInfo,
    /// HTTP listener
    pub http: HttpConfig,
    /// Logging
    pub logger: LoggerConfig,
    /// User database
    pub database: DatabaseConfig,
    /// JWT signing
    pub jwt: JwtConfig,
    /// Password hashing
    pub password: PasswordConfig,
    /// Nutrition API
    pub fatsecret: FatSecretSettings,
}

impl ServerConfig {
    /// Load configuration from `.env`, the YAML file, and environment overrides
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, an override has
    /// an invalid value, or validation fails
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {e}");
        }

        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        let mut config = match std::fs::read_to_string(path) {
            Ok(raw) => {
                info!("Loading configuration from {}", path.display());
                Self::from_yaml_str(&raw)
                    .with_context(|| format!("Invalid configuration file {}", path.display()))?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Configuration file {} not found, using defaults",
                    path.display()
                );
                Self::default()
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read configuration file {}", path.display()))
            }
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML after expanding `${VAR}` references
    ///
    /// # Errors
    ///
    /// Returns an error if the expanded document is not valid configuration YAML
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let expanded = expand_env_vars(raw);
        serde_yaml::from_str(&expanded).context("Failed to parse configuration YAML")
    }

    /// Apply individual environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric override cannot be parsed
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        env_parse("HTTP_PORT", &mut self.http.port)?;
        if let Ok(level) = env::var("LOG_LEVEL") {
            self.logger.log_level = LogLevel::from_str_or_default(&level);
        }

        if let Some(url) = env_string("DATABASE_URL").or_else(|| env_string("CONNECTION_STRING")) {
            self.database.url = url;
        }
        env_parse("DATABASE_POOL_MAX", &mut self.database.pool_max)?;

        env_set("JWT_SECRET", &mut self.jwt.secret);
        env_parse("JWT_EXPIRATION_HOURS", &mut self.jwt.expiration_hours)?;
        env_parse("BCRYPT_COST", &mut self.password.bcrypt_cost)?;

        env_set("FATSECRET_CLIENT_ID", &mut self.fatsecret.client_id);
        env_set("FATSECRET_CLIENT_SECRET", &mut self.fatsecret.client_secret);
        env_set("FATSECRET_CONSUMER_KEY", &mut self.fatsecret.consumer_key);
        env_set("FATSECRET_CONSUMER_SECRET", &mut self.fatsecret.consumer_secret);
        env_set("FATSECRET_BASE_URL", &mut self.fatsecret.base_url);
        env_set("FATSECRET_TOKEN_URL", &mut self.fatsecret.token_url);
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<()> {
        if self.http.port == 0 {
            return Err(anyhow!("http.port must be non-zero"));
        }
        if self.jwt.secret.trim().is_empty() {
            return Err(anyhow!("jwt.secret is required (set JWT_SECRET)"));
        }
        if self.jwt.expiration_hours <= 0 {
            return Err(anyhow!("jwt.expiration_hours must be positive"));
        }
        if self.jwt.expiration_hours > auth::MAX_JWT_EXPIRY_HOURS {
            return Err(anyhow!(
                "jwt.expiration_hours must be at most {}",
                auth::MAX_JWT_EXPIRY_HOURS
            ));
        }
        if self.database.pool_max == 0 {
            return Err(anyhow!("database.pool_max must be at least 1"));
        }
        if self.fatsecret.timeout_secs == 0 {
            return Err(anyhow!("fatsecret.timeout_secs must be positive"));
        }
        self.database_url()?;

        let fs = &self.fatsecret;
        if fs.client_id.is_empty() || fs.client_secret.is_empty() {
            warn!("FatSecret OAuth2 credentials missing; requests will be OAuth1-signed");
        }
        if fs.consumer_key.is_empty() || fs.consumer_secret.is_empty() {
            warn!("FatSecret OAuth1 consumer credentials missing; fallback signing will be rejected upstream");
        }

        Ok(())
    }

    /// Typed database location
    ///
    /// # Errors
    ///
    /// Returns an error if the URL names an unsupported backend
    pub fn database_url(&self) -> Result<DatabaseUrl> {
        DatabaseUrl::parse_url(&self.database.url)
    }

    /// FatSecret client configuration
    #[must_use]
    pub fn fatsecret_config(&self) -> FatSecretConfig {
        FatSecretConfig {
            credentials: FatSecretCredentials {
                client_id: self.fatsecret.client_id.clone(),
                client_secret: self.fatsecret.client_secret.clone(),
                consumer_key: self.fatsecret.consumer_key.clone(),
                consumer_secret: self.fatsecret.consumer_secret.clone(),
            },
            base_url: self.fatsecret.base_url.clone(),
            token_url: self.fatsecret.token_url.clone(),
            timeout: Duration::from_secs(self.fatsecret.timeout_secs),
            ..FatSecretConfig::default()
        }
    }

    /// One-line summary safe for logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} v{} on port {} (log level {}, database {}, jwt expiry {}h, fatsecret oauth2 {})",
            self.app.name,
            self.app.version,
            self.http.port,
            self.logger.log_level,
            self.database.url,
            self.jwt.expiration_hours,
            if self.fatsecret.client_id.is_empty() {
                "disabled"
            } else {
                "enabled"
            }
        )
    }
}

/// Replace `${VAR}` with the variable's value, or nothing when unset
fn expand_env_vars(raw: &str) -> String {
    let mut output = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        if let Some(end) = after.find('}') {
            let name = &after[..end];
            output.push_str(&env::var(name).unwrap_or_default());
            rest = &after[end + 1..];
        } else {
            output.push_str(&rest[start..]);
            rest = "";
        }
    }

    output.push_str(rest);
    output
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_set(key: &str, target: &mut String) {
    if let Some(value) = env_string(key) {
        *target = value;
    }
}

fn env_parse<T>(key: &str, target: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    if let Some(value) = env_string(key) {
        *target = value
            .parse()
            .map_err(|e| anyhow!("Invalid {key} value {value:?}: {e}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("bogus"), LogLevel::Info);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn test_database_url_parsing() {
        assert_eq!(DatabaseUrl::parse_url("sqlite::memory:").unwrap(), DatabaseUrl::Memory);
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/app.db").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/app.db")
            }
        );
        assert!(DatabaseUrl::parse_url("postgres://localhost/app").is_err());
    }

    #[test]
    fn test_expand_env_vars_leaves_unterminated_reference() {
        assert_eq!(expand_env_vars("plain: value"), "plain: value");
        assert_eq!(expand_env_vars("broken: ${OPEN"), "broken: ${OPEN");
    }

    #[test]
    fn test_validation_requires_jwt_secret() {
        let mut config = ServerConfig::default();
        assert!(config.validate().is_err());

        config.jwt.secret = "secret".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_caps_jwt_expiration() {
        let mut config = ServerConfig::default();
        config.jwt.secret = "secret".into();

        config.jwt.expiration_hours = auth::MAX_JWT_EXPIRY_HOURS;
        assert!(config.validate().is_ok());

        config.jwt.expiration_hours = 10_000_000_000;
        assert!(config.validate().is_err());
    }
}
