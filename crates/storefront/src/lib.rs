//! CenPhone storefront - the order and account subsystem of the CenPhone
//! phone shop.
//!
//! Everything here is synchronous, blocking, request/response: an operation
//! runs to completion on the calling thread and either commits or fails
//! atomically against the injected persistence gateway.
//!
//! # Modules
//!
//! - [`db`] - The [`db::Store`] persistence gateway and the embedded
//!   [`db::MemoryStore`]
//! - [`models`] - Domain records (`User`, `Product`, `Order`) and the
//!   explicit [`models::Session`]
//! - [`services`] - `AccountDirectory`, the phone catalog, and the
//!   `OrderLedger`
//! - [`checkout`] - The four-checkpoint checkout workflow
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Unified [`AppError`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use error::{AppError, Result};
