//! Unified error handling.
//!
//! Provides a unified [`AppError`] that callers at the outer edge (the CLI,
//! the test harness) can collect every layer's failures into. Nothing in
//! this subsystem is fatal to the process; each failure is reported back to
//! the caller as a value and surfaced as user-facing text via
//! [`AppError::user_message`].

use thiserror::Error;

use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::accounts::AccountError;
use crate::services::catalog::CatalogError;
use crate::services::orders::OrderError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Gateway operation failed.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Account operation failed.
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Order operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Checkout step failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

impl AppError {
    /// The text shown to the shopper for this failure.
    ///
    /// Validation and business-rule errors explain themselves; storage and
    /// configuration internals are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) | Self::Repository(_) => "Something went wrong, please try again".to_owned(),
            Self::Account(err) => match err {
                AccountError::InvalidCredentials => "Invalid email or password".to_owned(),
                AccountError::DuplicateAccount => {
                    "An account with this email or username already exists".to_owned()
                }
                AccountError::Repository(_) | AccountError::PasswordHash => {
                    "Something went wrong, please try again".to_owned()
                }
                other => other.to_string(),
            },
            Self::Catalog(err) => match err {
                CatalogError::Repository(_) => "Something went wrong, please try again".to_owned(),
                other => other.to_string(),
            },
            Self::Order(err) => order_message(err),
            Self::Checkout(err) => match err {
                CheckoutError::Order(order_err) => order_message(order_err),
                CheckoutError::Catalog(CatalogError::Repository(_)) => {
                    "Something went wrong, please try again".to_owned()
                }
                other => other.to_string(),
            },
        }
    }
}

fn order_message(err: &OrderError) -> String {
    match err {
        OrderError::Repository(_) => "Something went wrong, please try again".to_owned(),
        OrderError::CancellationWindowExpired { window_hours } => {
            format!("This order can no longer be canceled: it is older than {window_hours} hours")
        }
        other => other.to_string(),
    }
}

/// Result type alias for [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
