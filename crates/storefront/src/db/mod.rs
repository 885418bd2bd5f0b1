//! Persistence gateway for the storefront.
//!
//! The storage engine itself is an external collaborator: every manager in
//! this crate talks to a [`Store`], a typed gateway over the three record
//! kinds (`User`, `Product`, `Order`). Calls are blocking and have eager
//! commit semantics: a mutating call either commits atomically or fails
//! leaving durable state unchanged.
//!
//! [`MemoryStore`] is the embedded reference implementation used by the
//! CLI and the test suites.

pub mod memory;

use thiserror::Error;

use cenphone_core::{Email, OrderId, ProductId, UserId};

use crate::models::{Order, Product, User};

pub use memory::MemoryStore;

/// Errors that can occur during gateway operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying store failed to commit; the mutation was rolled back.
    #[error("storage error: {0}")]
    Storage(String),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested record was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email, duplicate order pair).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Typed persistence gateway over the three storefront record kinds.
///
/// Uniqueness rules live at this layer so that check-and-insert is a single
/// atomic operation:
///
/// - `create_user` rejects a duplicate email or username with
///   [`RepositoryError::Conflict`].
/// - `create_order` rejects a second order for the same (user, product)
///   pair with [`RepositoryError::Conflict`].
pub trait Store {
    // =========================================================================
    // Users
    // =========================================================================

    /// Persist a new user.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the email or username is already taken
    /// (case-sensitive equality).
    fn create_user(&self, user: User) -> Result<(), RepositoryError>;

    /// Look up a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store cannot be read.
    fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Look up a user by email address.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store cannot be read.
    fn get_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Overwrite an existing user record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record with that ID exists.
    fn update_user(&self, user: User) -> Result<(), RepositoryError>;

    // =========================================================================
    // Products
    // =========================================================================

    /// Persist a new product.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if a product with that ID already exists.
    fn create_product(&self, product: Product) -> Result<(), RepositoryError>;

    /// Look up a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store cannot be read.
    fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Overwrite an existing product record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record with that ID exists.
    fn update_product(&self, product: Product) -> Result<(), RepositoryError>;

    /// Hard-delete a product.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record with that ID exists.
    fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError>;

    // =========================================================================
    // Orders
    // =========================================================================

    /// Persist a new order.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if an order already links the same
    /// (user, product) pair.
    fn create_order(&self, order: Order) -> Result<(), RepositoryError>;

    /// Look up an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store cannot be read.
    fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// All orders referencing the given user, in storage iteration order.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store cannot be read.
    fn get_orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError>;

    /// Overwrite an existing order record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record with that ID exists.
    fn update_order(&self, order: Order) -> Result<(), RepositoryError>;

    /// Hard-delete an order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record with that ID exists.
    fn delete_order(&self, id: OrderId) -> Result<(), RepositoryError>;
}
