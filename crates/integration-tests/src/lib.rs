//! Integration tests for CenPhone.
//!
//! Each test builds a [`TestContext`]: a fresh embedded store plus the
//! services wired over it, the same way the CLI wires them. Tests then
//! exercise the public API end to end - no mocking of the gateway.
//!
//! # Test Categories
//!
//! - `accounts` - registration, authentication, profile updates
//! - `order_lifecycle` - creation, duplicate guard, cancellation window
//! - `checkout_flow` - the four-checkpoint workflow end to end

#![cfg_attr(not(test), forbid(unsafe_code))]

use secrecy::SecretString;

use cenphone_storefront::config::Config;
use cenphone_storefront::db::MemoryStore;
use cenphone_storefront::models::{Session, User};
use cenphone_storefront::services::accounts::{AccountDirectory, NewAccount};

/// A fresh store and configuration for one test.
pub struct TestContext {
    pub store: MemoryStore,
    pub config: Config,
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            config: Config::default(),
        }
    }

    /// Register a shopper with the given credentials and a fixed Toronto
    /// profile.
    ///
    /// # Errors
    ///
    /// Propagates registration failures from the account directory.
    pub fn register_shopper(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> cenphone_storefront::Result<User> {
        let directory = AccountDirectory::new(&self.store, &self.config);
        let user = directory.register(NewAccount {
            full_name: "Ashna Paul".to_owned(),
            address: "941 Progress Ave".to_owned(),
            city: "Toronto".to_owned(),
            province: "Ontario".to_owned(),
            country: "Canada".to_owned(),
            telephone: "+1 4165550119".to_owned(),
            email: email.to_owned(),
            username: username.to_owned(),
            password: SecretString::from(password),
            confirm_password: SecretString::from(password),
        })?;
        Ok(user)
    }

    /// Register a shopper and return a logged-in session for them.
    ///
    /// # Errors
    ///
    /// Propagates registration failures from the account directory.
    pub fn logged_in_shopper(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> cenphone_storefront::Result<(User, Session)> {
        let user = self.register_shopper(email, username, password)?;
        let mut session = Session::new();
        session.login(&user);
        Ok((user, session))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
