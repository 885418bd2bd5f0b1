//! Embedded in-memory store.
//!
//! The reference [`Store`] implementation: three hash-map tables behind a
//! single `RwLock`. One writer at a time, which matches the storefront's
//! single-active-session model; every mutating call commits in full under
//! the write lock or returns an error without touching the tables.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use cenphone_core::{Email, OrderId, ProductId, UserId};

use super::{RepositoryError, Store};
use crate::models::{Order, Product, User};

/// In-memory implementation of the [`Store`] gateway.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    products: HashMap<ProductId, Product>,
    orders: HashMap<OrderId, Order>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, RepositoryError> {
        self.tables
            .read()
            .map_err(|_| RepositoryError::Storage("store lock poisoned".to_owned()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, RepositoryError> {
        self.tables
            .write()
            .map_err(|_| RepositoryError::Storage("store lock poisoned".to_owned()))
    }
}

impl Store for MemoryStore {
    fn create_user(&self, user: User) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict(
                "username already exists".to_owned(),
            ));
        }
        if tables.users.contains_key(&user.id) {
            return Err(RepositoryError::Conflict("user id already exists".to_owned()));
        }

        tables.users.insert(user.id, user);
        Ok(())
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    fn get_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    fn update_user(&self, user: User) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        if !tables.users.contains_key(&user.id) {
            return Err(RepositoryError::NotFound);
        }
        tables.users.insert(user.id, user);
        Ok(())
    }

    fn create_product(&self, product: Product) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        if tables.products.contains_key(&product.id) {
            return Err(RepositoryError::Conflict(
                "product id already exists".to_owned(),
            ));
        }
        tables.products.insert(product.id, product);
        Ok(())
    }

    fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    fn update_product(&self, product: Product) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        if !tables.products.contains_key(&product.id) {
            return Err(RepositoryError::NotFound);
        }
        tables.products.insert(product.id, product);
        Ok(())
    }

    fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        tables
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn create_order(&self, order: Order) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;

        // The duplicate-order guard lives inside the insert so the check
        // and the write happen under one lock.
        if tables
            .orders
            .values()
            .any(|o| o.user_id == order.user_id && o.product_id == order.product_id)
        {
            return Err(RepositoryError::Conflict(
                "order already exists for this user and product".to_owned(),
            ));
        }
        if tables.orders.contains_key(&order.id) {
            return Err(RepositoryError::Conflict(
                "order id already exists".to_owned(),
            ));
        }

        tables.orders.insert(order.id, order);
        Ok(())
    }

    fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.read()?.orders.get(&id).cloned())
    }

    fn get_orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .read()?
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    fn update_order(&self, order: Order) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        if !tables.orders.contains_key(&order.id) {
            return Err(RepositoryError::NotFound);
        }
        tables.orders.insert(order.id, order);
        Ok(())
    }

    fn delete_order(&self, id: OrderId) -> Result<(), RepositoryError> {
        let mut tables = self.write()?;
        tables
            .orders
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use cenphone_core::{CurrencyCode, Email, OrderStatus, Price, Username};

    use super::*;

    fn sample_user(email: &str, username: &str) -> User {
        User {
            id: UserId::generate(),
            full_name: "Ashna Paul".to_owned(),
            address: "941 Progress Ave".to_owned(),
            city: "Toronto".to_owned(),
            province: "Ontario".to_owned(),
            country: "Canada".to_owned(),
            telephone: "+1 4165550119".to_owned(),
            email: Email::parse(email).unwrap(),
            username: Username::parse(username).unwrap(),
            password_hash: "$argon2id$stub".to_owned(),
            created_at: Utc::now(),
        }
    }

    fn sample_product() -> Product {
        Product {
            id: ProductId::generate(),
            make: "Apple".to_owned(),
            model: "iPhone 15".to_owned(),
            color: "Red".to_owned(),
            storage: "128 GB".to_owned(),
            price: Price::new(Decimal::from(899), CurrencyCode::USD).unwrap(),
            owner: None,
        }
    }

    fn sample_order(user_id: UserId, product_id: ProductId) -> Order {
        Order {
            id: OrderId::generate(),
            user_id,
            product_id,
            order_date: Utc::now(),
            total_amount: Decimal::from(899),
            status: OrderStatus::Confirmed,
        }
    }

    #[test]
    fn test_user_roundtrip() {
        let store = MemoryStore::new();
        let user = sample_user("a@b.com", "ashna");
        store.create_user(user.clone()).unwrap();

        let by_id = store.get_user(user.id).unwrap().unwrap();
        assert_eq!(by_id.username, user.username);

        let by_email = store.get_user_by_email(&user.email).unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        store.create_user(sample_user("a@b.com", "first")).unwrap();

        let err = store
            .create_user(sample_user("a@b.com", "second"))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[test]
    fn test_duplicate_username_conflicts() {
        let store = MemoryStore::new();
        store.create_user(sample_user("a@b.com", "same")).unwrap();

        let err = store
            .create_user(sample_user("c@d.com", "same"))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[test]
    fn test_duplicate_order_pair_conflicts() {
        let store = MemoryStore::new();
        let user = sample_user("a@b.com", "ashna");
        let product = sample_product();
        store.create_user(user.clone()).unwrap();
        store.create_product(product.clone()).unwrap();

        store.create_order(sample_order(user.id, product.id)).unwrap();
        let err = store
            .create_order(sample_order(user.id, product.id))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[test]
    fn test_orders_for_user_filters_by_reference() {
        let store = MemoryStore::new();
        let alice = sample_user("alice@b.com", "alice");
        let bob = sample_user("bob@b.com", "bobby");
        let p1 = sample_product();
        let p2 = sample_product();
        store.create_user(alice.clone()).unwrap();
        store.create_user(bob.clone()).unwrap();
        store.create_product(p1.clone()).unwrap();
        store.create_product(p2.clone()).unwrap();

        store.create_order(sample_order(alice.id, p1.id)).unwrap();
        store.create_order(sample_order(bob.id, p2.id)).unwrap();

        let orders = store.get_orders_for_user(alice.id).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders.first().map(|o| o.product_id), Some(p1.id));
    }

    #[test]
    fn test_update_missing_record_is_not_found() {
        let store = MemoryStore::new();
        let err = store.update_product(sample_product()).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn test_delete_order_removes_record() {
        let store = MemoryStore::new();
        let user = sample_user("a@b.com", "ashna");
        let product = sample_product();
        store.create_user(user.clone()).unwrap();
        store.create_product(product.clone()).unwrap();

        let order = sample_order(user.id, product.id);
        store.create_order(order.clone()).unwrap();
        store.delete_order(order.id).unwrap();

        assert!(store.get_order(order.id).unwrap().is_none());
        assert!(matches!(
            store.delete_order(order.id),
            Err(RepositoryError::NotFound)
        ));
    }
}
