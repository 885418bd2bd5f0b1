//! Order domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use cenphone_core::{OrderId, OrderStatus, ProductId, UserId};

/// An association record linking one user to one product.
///
/// `order_date` is stamped at creation and never changes; `total_amount`
/// is a snapshot of the product price at order time. At most one order may
/// reference a given (user, product) pair — the gateway enforces this at
/// insert.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The ordering user. Required, resolved at creation.
    pub user_id: UserId,
    /// The ordered product. Required, resolved at creation.
    pub product_id: ProductId,
    /// Creation timestamp. Immutable.
    pub order_date: DateTime<Utc>,
    /// Snapshot of the product price at order time.
    pub total_amount: Decimal,
    /// Lifecycle status.
    pub status: OrderStatus,
}
