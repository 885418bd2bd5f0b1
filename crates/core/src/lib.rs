//! CenPhone Core - Shared types library.
//!
//! This crate provides common types used across all CenPhone components:
//! - `storefront` - Account, catalog, order, and checkout services
//! - `cli` - Command-line tools for driving the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, usernames,
//!   prices, and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
