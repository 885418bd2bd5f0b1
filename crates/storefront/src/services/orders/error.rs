//! Order error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The referenced user does not exist.
    #[error("user not found")]
    UserNotFound,

    /// The referenced product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// The order does not exist.
    #[error("order not found")]
    OrderNotFound,

    /// An order already links this (user, product) pair.
    #[error("an order already exists for this user and product")]
    DuplicateOrder,

    /// The total amount is below zero.
    #[error("order amount cannot be negative")]
    NegativeAmount,

    /// The order is already canceled.
    #[error("order is already canceled")]
    AlreadyCanceled,

    /// The cancellation window has closed.
    #[error("order can no longer be canceled: more than {window_hours} hours old")]
    CancellationWindowExpired {
        /// Length of the window that was missed.
        window_hours: i64,
    },

    /// Gateway/storage error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}
