//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults match the shipped behavior.
//!
//! - `CENPHONE_CANCELLATION_WINDOW_HOURS` - Hours after creation during
//!   which an order may still be canceled (default: 24)
//! - `CENPHONE_MIN_PASSWORD_LENGTH` - Minimum accepted password length at
//!   registration (default: 6)

use thiserror::Error;

const DEFAULT_CANCELLATION_WINDOW_HOURS: i64 = 24;
const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hours after `order_date` during which cancellation is permitted.
    pub cancellation_window_hours: i64,
    /// Minimum accepted password length at registration.
    pub min_password_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cancellation_window_hours: DEFAULT_CANCELLATION_WINDOW_HOURS,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but does
    /// not parse, or parses to a nonsensical value (zero or negative).
    pub fn from_env() -> Result<Self, ConfigError> {
        let cancellation_window_hours = parse_env(
            "CENPHONE_CANCELLATION_WINDOW_HOURS",
            DEFAULT_CANCELLATION_WINDOW_HOURS,
        )?;
        if cancellation_window_hours <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CENPHONE_CANCELLATION_WINDOW_HOURS".to_owned(),
                "must be positive".to_owned(),
            ));
        }

        let min_password_length: usize =
            parse_env("CENPHONE_MIN_PASSWORD_LENGTH", DEFAULT_MIN_PASSWORD_LENGTH)?;
        if min_password_length == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CENPHONE_MIN_PASSWORD_LENGTH".to_owned(),
                "must be positive".to_owned(),
            ));
        }

        Ok(Self {
            cancellation_window_hours,
            min_password_length,
        })
    }
}

/// Read an optional environment variable, falling back to a default.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidEnvVar(name.to_owned(), raw)),
        Err(_) => Ok(default),
    }
}
