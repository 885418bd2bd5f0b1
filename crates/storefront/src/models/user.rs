//! User domain type.

use chrono::{DateTime, Utc};

use cenphone_core::{Email, UserId, Username};

/// A registered shopper.
///
/// `email` and `username` are unique across the store and immutable after
/// registration; the delivery fields and password may change via profile
/// update. Only the Argon2id hash of the password is ever persisted.
#[derive(Clone)]
pub struct User {
    /// Unique customer ID, generated at registration.
    pub id: UserId,
    /// Display name. Immutable post-registration.
    pub full_name: String,
    /// Delivery street address.
    pub address: String,
    /// Delivery city.
    pub city: String,
    /// Delivery province or state.
    pub province: String,
    /// Delivery country.
    pub country: String,
    /// Contact phone number, including country code.
    pub telephone: String,
    /// Login email. Unique, immutable post-registration.
    pub email: Email,
    /// Login username. Unique, immutable post-registration.
    pub username: Username,
    /// Argon2id hash of the login password.
    pub password_hash: String,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("full_name", &self.full_name)
            .field("address", &self.address)
            .field("city", &self.city)
            .field("province", &self.province)
            .field("country", &self.country)
            .field("telephone", &self.telephone)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}
