//! Storefront services.
//!
//! Thin managers over the [`crate::db::Store`] gateway:
//!
//! - [`accounts`] - registration, authentication, profile updates
//! - [`catalog`] - the phone catalog and product capture
//! - [`orders`] - the order ledger and its cancellation rule

pub mod accounts;
pub mod catalog;
pub mod orders;
