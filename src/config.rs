//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Server
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `PORT` - Shorthand for `0.0.0.0:{PORT}`, used when `LISTEN` is unset
//! - `BASE_URL` - Public base for short links (default: derived from the `Host` header)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! ## Link creation
//!
//! - `DEFAULT_VALIDITY_MINUTES` - Lifetime when a request omits `validity` (default: 30)
//! - `SHORTCODE_LENGTH` - Length of generated codes (default: 7, range: 3-32)
//! - `MAX_GENERATION_ATTEMPTS` - Random codes tried before giving up (default: 5, range: 1-100)
//!
//! ## Audit logging
//!
//! Remote audit logging is enabled by setting `AUDIT_LOG_URL`:
//!
//! ```bash
//! export AUDIT_LOG_URL="https://audit.example.com/logs"
//! export AUDIT_AUTH_URL="https://audit.example.com/auth"
//! export AUDIT_CLIENT_ID="..."
//! export AUDIT_CLIENT_SECRET="..."
//! ```
//!
//! Optional identity fields posted with the credentials: `AUDIT_EMAIL`,
//! `AUDIT_NAME`, `AUDIT_ROLL_NO`, `AUDIT_ACCESS_CODE`.
//!
//! - `AUDIT_STACK` - Stack label on every entry (default: `backend`)
//! - `AUDIT_QUEUE_CAPACITY` - Entry buffer size (default: 1000, min: 10)
//! - `AUDIT_TIMEOUT_SECS` - Per-request timeout (default: 5)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::application::services::{CreationPolicy, DEFAULT_MAX_GENERATION_ATTEMPTS};
use crate::domain::expiry::DEFAULT_VALIDITY_MINUTES;
use crate::infrastructure::audit::AuditCredentials;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, MIN_CODE_LENGTH};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Public base for short links. `None` derives it per request.
    pub base_url: Option<String>,
    pub log_level: String,
    pub log_format: String,

    pub default_validity_minutes: i64,
    pub shortcode_length: usize,
    pub max_generation_attempts: usize,

    pub audit: AuditConfig,
}

/// Remote audit log settings.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Log endpoint. Remote logging is disabled when unset.
    pub log_url: Option<String>,
    pub auth_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub roll_no: Option<String>,
    pub access_code: Option<String>,
    pub stack: String,
    pub queue_capacity: usize,
    pub timeout_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = Self::load_listen_addr();
        let base_url = optional_var("BASE_URL").map(|v| v.trim_end_matches('/').to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let default_validity_minutes =
            parse_var("DEFAULT_VALIDITY_MINUTES", DEFAULT_VALIDITY_MINUTES)?;
        let shortcode_length = parse_var("SHORTCODE_LENGTH", DEFAULT_CODE_LENGTH)?;
        let max_generation_attempts =
            parse_var("MAX_GENERATION_ATTEMPTS", DEFAULT_MAX_GENERATION_ATTEMPTS)?;

        let audit = AuditConfig {
            log_url: optional_var("AUDIT_LOG_URL"),
            auth_url: optional_var("AUDIT_AUTH_URL"),
            client_id: optional_var("AUDIT_CLIENT_ID"),
            client_secret: optional_var("AUDIT_CLIENT_SECRET"),
            email: optional_var("AUDIT_EMAIL"),
            name: optional_var("AUDIT_NAME"),
            roll_no: optional_var("AUDIT_ROLL_NO"),
            access_code: optional_var("AUDIT_ACCESS_CODE"),
            stack: env::var("AUDIT_STACK").unwrap_or_else(|_| "backend".to_string()),
            queue_capacity: parse_var("AUDIT_QUEUE_CAPACITY", 1000)?,
            timeout_secs: parse_var("AUDIT_TIMEOUT_SECS", 5)?,
        };

        Ok(Self {
            listen_addr,
            base_url,
            log_level,
            log_format,
            default_validity_minutes,
            shortcode_length,
            max_generation_attempts,
            audit,
        })
    }

    /// Loads the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. `0.0.0.0:{PORT}`
    /// 3. `0.0.0.0:3000`
    fn load_listen_addr() -> String {
        if let Some(listen) = optional_var("LISTEN") {
            return listen;
        }

        match optional_var("PORT") {
            Some(port) => format!("0.0.0.0:{}", port),
            None => "0.0.0.0:3000".to_string(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `base_url` is not an http(s) URL
    /// - a link creation setting is out of range
    /// - an audit setting is out of range or `AUDIT_LOG_URL` is malformed
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref base_url) = self.base_url
            && !base_url.starts_with("http://")
            && !base_url.starts_with("https://")
        {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                base_url
            );
        }

        if self.default_validity_minutes <= 0 {
            anyhow::bail!(
                "DEFAULT_VALIDITY_MINUTES must be positive, got {}",
                self.default_validity_minutes
            );
        }

        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.shortcode_length) {
            anyhow::bail!(
                "SHORTCODE_LENGTH must be between {} and {}, got {}",
                MIN_CODE_LENGTH,
                MAX_CODE_LENGTH,
                self.shortcode_length
            );
        }

        if self.max_generation_attempts == 0 || self.max_generation_attempts > 100 {
            anyhow::bail!(
                "MAX_GENERATION_ATTEMPTS must be between 1 and 100, got {}",
                self.max_generation_attempts
            );
        }

        self.audit.validate()
    }

    /// Link creation settings for the service layer.
    pub fn creation_policy(&self) -> CreationPolicy {
        CreationPolicy {
            default_validity_minutes: self.default_validity_minutes,
            code_length: self.shortcode_length,
            max_generation_attempts: self.max_generation_attempts,
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        match &self.base_url {
            Some(base_url) => tracing::info!("  Base URL: {}", base_url),
            None => tracing::info!("  Base URL: from Host header"),
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Links: validity {} min, code length {}, {} generation attempts",
            self.default_validity_minutes,
            self.shortcode_length,
            self.max_generation_attempts
        );

        match &self.audit.log_url {
            Some(log_url) => {
                tracing::info!("  Audit log: {} (stack: {})", log_url, self.audit.stack);
                tracing::info!(
                    "  Audit client: {}",
                    self.audit.client_id.as_deref().unwrap_or("-")
                );
                tracing::info!(
                    "  Audit secret: {}",
                    mask_secret(self.audit.client_secret.as_deref())
                );
            }
            None => tracing::info!("  Audit log: disabled"),
        }
        tracing::info!("  Audit queue capacity: {}", self.audit.queue_capacity);
    }
}

impl AuditConfig {
    /// Returns whether entries are delivered to a remote service.
    pub fn is_enabled(&self) -> bool {
        self.log_url.is_some()
    }

    /// Credentials posted to the auth endpoint.
    pub fn credentials(&self) -> AuditCredentials {
        AuditCredentials {
            email: self.email.clone(),
            name: self.name.clone(),
            roll_no: self.roll_no.clone(),
            access_code: self.access_code.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.queue_capacity < 10 {
            anyhow::bail!(
                "AUDIT_QUEUE_CAPACITY must be at least 10, got {}",
                self.queue_capacity
            );
        }

        if self.queue_capacity > 1_000_000 {
            anyhow::bail!(
                "AUDIT_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.queue_capacity
            );
        }

        if self.timeout_secs == 0 {
            anyhow::bail!("AUDIT_TIMEOUT_SECS must be greater than 0");
        }

        for (name, value) in [
            ("AUDIT_LOG_URL", &self.log_url),
            ("AUDIT_AUTH_URL", &self.auth_url),
        ] {
            if let Some(url) = value
                && !url.starts_with("http://")
                && !url.starts_with("https://")
            {
                anyhow::bail!(
                    "{} must start with 'http://' or 'https://', got '{}'",
                    name,
                    url
                );
            }
        }

        Ok(())
    }
}

/// Reads a variable, treating an empty value as unset.
fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses a variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", name, raw)),
        None => Ok(default),
    }
}

/// Masks a secret for logging, keeping only its first two characters.
///
/// - `None` → `-`
/// - `"abc"` → `***`
/// - `"s3cr3t-value"` → `s3***`
fn mask_secret(secret: Option<&str>) -> String {
    match secret {
        None => "-".to_string(),
        Some(s) if s.chars().count() <= 4 => "***".to_string(),
        Some(s) => format!("{}***", s.chars().take(2).collect::<String>()),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
