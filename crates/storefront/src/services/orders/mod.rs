//! Order ledger service.
//!
//! Creates, looks up, updates, and cancels orders. Owns the
//! cancellation-window rule; the duplicate-order guard lives inside the
//! gateway insert so check-and-write is atomic.

mod error;

pub use error::OrderError;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use cenphone_core::{OrderId, OrderStatus, ProductId, UserId};

use crate::config::Config;
use crate::db::{RepositoryError, Store};
use crate::models::Order;

/// Ledger of orders placed through the storefront.
pub struct OrderLedger<'a, S> {
    store: &'a S,
    config: &'a Config,
}

impl<'a, S: Store> OrderLedger<'a, S> {
    /// Create a new ledger over the given store.
    #[must_use]
    pub const fn new(store: &'a S, config: &'a Config) -> Self {
        Self { store, config }
    }

    /// Create a new order linking a user and a product.
    ///
    /// Both references are resolved before anything is written. The order
    /// date is stamped with the current time and never changes afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::UserNotFound`] / [`OrderError::ProductNotFound`]
    /// for dangling references, [`OrderError::NegativeAmount`] for a
    /// negative total, [`OrderError::DuplicateOrder`] if an order for the
    /// same (user, product) pair exists, or [`OrderError::Repository`] if
    /// the write fails.
    pub fn create_order(
        &self,
        user_id: UserId,
        product_id: ProductId,
        total_amount: Decimal,
        status: OrderStatus,
    ) -> Result<Order, OrderError> {
        if self.store.get_user(user_id)?.is_none() {
            return Err(OrderError::UserNotFound);
        }
        if self.store.get_product(product_id)?.is_none() {
            return Err(OrderError::ProductNotFound);
        }
        if total_amount.is_sign_negative() && !total_amount.is_zero() {
            return Err(OrderError::NegativeAmount);
        }

        let order = Order {
            id: OrderId::generate(),
            user_id,
            product_id,
            order_date: Utc::now(),
            total_amount,
            status,
        };

        self.store.create_order(order.clone()).map_err(|e| match e {
            RepositoryError::Conflict(_) => OrderError::DuplicateOrder,
            other => OrderError::Repository(other),
        })?;

        tracing::info!(order_id = %order.id, user_id = %user_id, "order created");
        Ok(order)
    }

    /// Look up one order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::OrderNotFound`] if the ID resolves to nothing.
    pub fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.store.get_order(id)?.ok_or(OrderError::OrderNotFound)
    }

    /// All orders referencing the given user, in storage iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Repository`] if the store cannot be read.
    pub fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        Ok(self.store.get_orders_for_user(user_id)?)
    }

    /// Free-text filter over a user's orders.
    ///
    /// Matches case-insensitively against the order ID and the referenced
    /// product's make and model; an empty query returns everything.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Repository`] if the store cannot be read.
    pub fn search_orders(&self, user_id: UserId, query: &str) -> Result<Vec<Order>, OrderError> {
        let orders = self.store.get_orders_for_user(user_id)?;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(orders);
        }

        let mut matched = Vec::new();
        for order in orders {
            if order.id.to_string().to_lowercase().contains(&needle) {
                matched.push(order);
                continue;
            }
            let product_matches = self
                .store
                .get_product(order.product_id)?
                .is_some_and(|p| p.display_name().to_lowercase().contains(&needle));
            if product_matches {
                matched.push(order);
            }
        }
        Ok(matched)
    }

    /// Unconditionally overwrite an order's total amount and status.
    ///
    /// No transition validation: any status may follow any other. The
    /// order date is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::OrderNotFound`] if the ID resolves to
    /// nothing, [`OrderError::NegativeAmount`] for a negative total, or
    /// [`OrderError::Repository`] if the write fails.
    pub fn update_order(
        &self,
        id: OrderId,
        total_amount: Decimal,
        status: OrderStatus,
    ) -> Result<(), OrderError> {
        if total_amount.is_sign_negative() && !total_amount.is_zero() {
            return Err(OrderError::NegativeAmount);
        }

        let mut order = self.get_order(id)?;
        order.total_amount = total_amount;
        order.status = status;

        self.store.update_order(order).map_err(|e| match e {
            RepositoryError::NotFound => OrderError::OrderNotFound,
            other => OrderError::Repository(other),
        })?;

        tracing::info!(order_id = %id, %status, "order updated");
        Ok(())
    }

    /// Cancel an order, if it is still inside the cancellation window.
    ///
    /// The boundary is closed on the failure side: an order exactly
    /// `window` old can no longer be canceled.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::AlreadyCanceled`] for a second cancellation,
    /// [`OrderError::CancellationWindowExpired`] outside the window, or
    /// the update-path errors.
    pub fn cancel_order(&self, id: OrderId) -> Result<(), OrderError> {
        self.cancel_order_at(id, Utc::now())
    }

    /// [`Self::cancel_order`] with an explicit "now", for callers that
    /// already hold a timestamp.
    ///
    /// # Errors
    ///
    /// See [`Self::cancel_order`].
    pub fn cancel_order_at(&self, id: OrderId, now: DateTime<Utc>) -> Result<(), OrderError> {
        let order = self.get_order(id)?;

        if order.status == OrderStatus::Canceled {
            return Err(OrderError::AlreadyCanceled);
        }

        let window_hours = self.config.cancellation_window_hours;
        let age = now.signed_duration_since(order.order_date);
        if age >= Duration::hours(window_hours) {
            tracing::warn!(order_id = %id, age_hours = age.num_hours(), "cancellation window expired");
            return Err(OrderError::CancellationWindowExpired { window_hours });
        }

        self.update_order(id, order.total_amount, OrderStatus::Canceled)?;
        tracing::info!(order_id = %id, "order canceled");
        Ok(())
    }

    /// Hard-delete an order.
    ///
    /// Not reachable from the checkout flow; kept for administrative use.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::OrderNotFound`] if the ID resolves to
    /// nothing, or [`OrderError::Repository`] if the delete fails.
    pub fn delete_order(&self, id: OrderId) -> Result<(), OrderError> {
        self.store.delete_order(id).map_err(|e| match e {
            RepositoryError::NotFound => OrderError::OrderNotFound,
            other => OrderError::Repository(other),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use cenphone_core::{CurrencyCode, Email, Price, Username};

    use crate::db::MemoryStore;
    use crate::models::{Product, User};

    use super::*;

    struct Fixture {
        store: MemoryStore,
        config: Config,
        user_id: UserId,
        product_id: ProductId,
    }

    fn fixture() -> Fixture {
        let store = MemoryStore::new();

        let user = User {
            id: UserId::generate(),
            full_name: "Aditya Janjanam".to_owned(),
            address: "941 Progress Ave".to_owned(),
            city: "Toronto".to_owned(),
            province: "Ontario".to_owned(),
            country: "Canada".to_owned(),
            telephone: "+1 4165550119".to_owned(),
            email: Email::parse("aditya@example.com").unwrap(),
            username: Username::parse("aditya").unwrap(),
            password_hash: "$argon2id$stub".to_owned(),
            created_at: Utc::now(),
        };
        let product = Product {
            id: ProductId::generate(),
            make: "Apple".to_owned(),
            model: "iPhone 15".to_owned(),
            color: "Red".to_owned(),
            storage: "128 GB".to_owned(),
            price: Price::new(Decimal::from(899), CurrencyCode::USD).unwrap(),
            owner: Some(user.id),
        };

        let user_id = user.id;
        let product_id = product.id;
        store.create_user(user).unwrap();
        store.create_product(product).unwrap();

        Fixture {
            store,
            config: Config::default(),
            user_id,
            product_id,
        }
    }

    /// Insert an order directly through the gateway with a backdated
    /// creation time.
    fn backdated_order(fx: &Fixture, hours_old: i64) -> OrderId {
        let order = Order {
            id: OrderId::generate(),
            user_id: fx.user_id,
            product_id: fx.product_id,
            order_date: Utc::now() - Duration::hours(hours_old),
            total_amount: Decimal::from(899),
            status: OrderStatus::Confirmed,
        };
        let id = order.id;
        fx.store.create_order(order).unwrap();
        id
    }

    #[test]
    fn test_create_order_stamps_date_and_persists() {
        let fx = fixture();
        let ledger = OrderLedger::new(&fx.store, &fx.config);

        let before = Utc::now();
        let order = ledger
            .create_order(
                fx.user_id,
                fx.product_id,
                Decimal::from(899),
                OrderStatus::Confirmed,
            )
            .unwrap();

        assert_eq!(order.status, OrderStatus::Confirmed);
        assert!(order.order_date >= before);
        assert_eq!(
            fx.store.get_order(order.id).unwrap().map(|o| o.user_id),
            Some(fx.user_id)
        );
    }

    #[test]
    fn test_create_order_rejects_dangling_references() {
        let fx = fixture();
        let ledger = OrderLedger::new(&fx.store, &fx.config);

        assert!(matches!(
            ledger.create_order(
                UserId::generate(),
                fx.product_id,
                Decimal::from(899),
                OrderStatus::Confirmed
            ),
            Err(OrderError::UserNotFound)
        ));
        assert!(matches!(
            ledger.create_order(
                fx.user_id,
                ProductId::generate(),
                Decimal::from(899),
                OrderStatus::Confirmed
            ),
            Err(OrderError::ProductNotFound)
        ));
    }

    #[test]
    fn test_create_order_rejects_duplicate_pair() {
        let fx = fixture();
        let ledger = OrderLedger::new(&fx.store, &fx.config);

        ledger
            .create_order(
                fx.user_id,
                fx.product_id,
                Decimal::from(899),
                OrderStatus::Confirmed,
            )
            .unwrap();

        assert!(matches!(
            ledger.create_order(
                fx.user_id,
                fx.product_id,
                Decimal::from(499),
                OrderStatus::Confirmed
            ),
            Err(OrderError::DuplicateOrder)
        ));
    }

    #[test]
    fn test_create_order_rejects_negative_amount() {
        let fx = fixture();
        let ledger = OrderLedger::new(&fx.store, &fx.config);

        assert!(matches!(
            ledger.create_order(
                fx.user_id,
                fx.product_id,
                Decimal::from(-1),
                OrderStatus::Confirmed
            ),
            Err(OrderError::NegativeAmount)
        ));
    }

    #[test]
    fn test_update_order_overwrites_without_transition_rules() {
        let fx = fixture();
        let ledger = OrderLedger::new(&fx.store, &fx.config);

        let order = ledger
            .create_order(
                fx.user_id,
                fx.product_id,
                Decimal::from(899),
                OrderStatus::Confirmed,
            )
            .unwrap();

        // Any status may follow any other through this path.
        ledger
            .update_order(order.id, Decimal::from(899), OrderStatus::Delivered)
            .unwrap();
        ledger
            .update_order(order.id, Decimal::from(450), OrderStatus::Processing)
            .unwrap();

        let updated = ledger.get_order(order.id).unwrap();
        assert_eq!(updated.status, OrderStatus::Processing);
        assert_eq!(updated.total_amount, Decimal::from(450));
        assert_eq!(updated.order_date, order.order_date);
    }

    #[test]
    fn test_cancel_inside_window() {
        let fx = fixture();
        let ledger = OrderLedger::new(&fx.store, &fx.config);

        let order = ledger
            .create_order(
                fx.user_id,
                fx.product_id,
                Decimal::from(899),
                OrderStatus::Confirmed,
            )
            .unwrap();

        ledger.cancel_order(order.id).unwrap();
        assert_eq!(
            ledger.get_order(order.id).unwrap().status,
            OrderStatus::Canceled
        );
    }

    #[test]
    fn test_cancel_after_window_fails() {
        let fx = fixture();
        let ledger = OrderLedger::new(&fx.store, &fx.config);

        let id = backdated_order(&fx, 25);
        assert!(matches!(
            ledger.cancel_order(id),
            Err(OrderError::CancellationWindowExpired { window_hours: 24 })
        ));
        assert_eq!(ledger.get_order(id).unwrap().status, OrderStatus::Confirmed);
    }

    #[test]
    fn test_cancel_boundary_is_expired() {
        let fx = fixture();
        let ledger = OrderLedger::new(&fx.store, &fx.config);

        // Exactly 24h00m00s old: the closed failure side.
        let id = backdated_order(&fx, 0);
        let order = ledger.get_order(id).unwrap();
        let exactly_24h = order.order_date + Duration::hours(24);

        assert!(matches!(
            ledger.cancel_order_at(id, exactly_24h),
            Err(OrderError::CancellationWindowExpired { .. })
        ));
    }

    #[test]
    fn test_cancel_twice_fails() {
        let fx = fixture();
        let ledger = OrderLedger::new(&fx.store, &fx.config);

        let order = ledger
            .create_order(
                fx.user_id,
                fx.product_id,
                Decimal::from(899),
                OrderStatus::Confirmed,
            )
            .unwrap();

        ledger.cancel_order(order.id).unwrap();
        assert!(matches!(
            ledger.cancel_order(order.id),
            Err(OrderError::AlreadyCanceled)
        ));
    }

    #[test]
    fn test_search_orders_by_id_prefix_and_model() {
        let fx = fixture();
        let ledger = OrderLedger::new(&fx.store, &fx.config);

        let order = ledger
            .create_order(
                fx.user_id,
                fx.product_id,
                Decimal::from(899),
                OrderStatus::Confirmed,
            )
            .unwrap();

        let id_prefix: String = order.id.to_string().chars().take(8).collect();
        assert_eq!(ledger.search_orders(fx.user_id, &id_prefix).unwrap().len(), 1);
        assert_eq!(ledger.search_orders(fx.user_id, "iphone").unwrap().len(), 1);
        assert_eq!(ledger.search_orders(fx.user_id, "").unwrap().len(), 1);
        assert!(ledger.search_orders(fx.user_id, "galaxy").unwrap().is_empty());
    }

    #[test]
    fn test_delete_order() {
        let fx = fixture();
        let ledger = OrderLedger::new(&fx.store, &fx.config);

        let order = ledger
            .create_order(
                fx.user_id,
                fx.product_id,
                Decimal::from(899),
                OrderStatus::Confirmed,
            )
            .unwrap();

        ledger.delete_order(order.id).unwrap();
        assert!(matches!(
            ledger.get_order(order.id),
            Err(OrderError::OrderNotFound)
        ));
        assert!(matches!(
            ledger.delete_order(order.id),
            Err(OrderError::OrderNotFound)
        ));
    }
}
