//! Centralized configuration for registry-cli.
//!
//! All environment variables are loaded and validated at startup to fail fast
//! on misconfiguration rather than halfway through a command.

use std::env;
use std::fmt;

use customer_domain::ValidationPolicy;

/// Log output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Configuration error.
#[derive(Debug)]
pub struct ConfigError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error for {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log format
    pub log_format: LogFormat,
    /// Seed for reproducible customer ids; random ids when unset
    pub id_seed: Option<u64>,
    /// Whether new customers are validated before being stored
    pub validation_policy: ValidationPolicy,
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Log format
        let log_format =
            LogFormat::from_str(&lookup("LOG_FORMAT").unwrap_or_else(|| "pretty".into()));

        // Customer id seed
        let id_seed = match lookup("CUSTOMER_ID_SEED").filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| ConfigError {
                field: "CUSTOMER_ID_SEED",
                message: format!("Invalid seed '{}': {}", raw, e),
            })?),
            None => None,
        };

        // Validation policy
        let strict = lookup("STRICT_VALIDATION").unwrap_or_default();
        let strict = strict.trim().to_lowercase();
        let validation_policy = if matches!(strict.as_str(), "1" | "true" | "yes") {
            ValidationPolicy::Strict
        } else {
            ValidationPolicy::Permissive
        };

        Ok(Self {
            log_format,
            id_seed,
            validation_policy,
        })
    }
}
