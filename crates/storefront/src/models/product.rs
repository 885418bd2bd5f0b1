//! Product domain type.

use cenphone_core::{Price, ProductId, UserId};

/// A phone configuration captured at checkout time.
///
/// Products are immutable after capture except through the explicit update
/// path, and survive cancellation of the order that references them.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID, generated at capture time.
    pub id: ProductId,
    /// Phone make, e.g. "Apple".
    pub make: String,
    /// Phone model, e.g. "iPhone 15".
    pub model: String,
    /// Chosen color.
    pub color: String,
    /// Chosen storage capacity, e.g. "128 GB".
    pub storage: String,
    /// Price at capture time.
    pub price: Price,
    /// The shopper who configured this product, when known.
    pub owner: Option<UserId>,
}

impl Product {
    /// Make and model joined for display, e.g. "Apple iPhone 15".
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}
