//! Account directory service.
//!
//! Registers and authenticates shoppers and applies profile updates.
//! Passwords travel as [`SecretString`] and are stored only as Argon2id
//! hashes.

mod error;

pub use error::AccountError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};

use cenphone_core::{Email, UserId, Username};

use crate::config::Config;
use crate::db::{RepositoryError, Store};
use crate::models::User;

/// Registration input: the full profile plus credentials.
#[derive(Debug)]
pub struct NewAccount {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub telephone: String,
    pub email: String,
    pub username: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// Profile update input.
///
/// Name, email, and username are immutable post-registration and therefore
/// absent here. The password changes only when a new one is supplied along
/// with a matching confirmation.
#[derive(Debug)]
pub struct ProfileUpdate {
    pub address: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub telephone: String,
    pub password: Option<SecretString>,
    pub confirm_password: Option<SecretString>,
}

/// Directory of shopper accounts.
pub struct AccountDirectory<'a, S> {
    store: &'a S,
    config: &'a Config,
}

impl<'a, S: Store> AccountDirectory<'a, S> {
    /// Create a new account directory over the given store.
    #[must_use]
    pub const fn new(store: &'a S, config: &'a Config) -> Self {
        Self { store, config }
    }

    /// Register a new account.
    ///
    /// Every rule is re-checked at this layer regardless of what the input
    /// form already validated: required fields, email and username shape,
    /// password strength and confirmation, and (atomically, inside the
    /// gateway insert) email/username uniqueness.
    ///
    /// # Errors
    ///
    /// Returns a validation variant for malformed input,
    /// [`AccountError::DuplicateAccount`] if the email or username is
    /// taken, or [`AccountError::Repository`] if the write fails.
    pub fn register(&self, account: NewAccount) -> Result<User, AccountError> {
        require_non_empty(&account.full_name, "full name")?;
        require_non_empty(&account.address, "address")?;
        require_non_empty(&account.city, "city")?;
        require_non_empty(&account.province, "province")?;
        require_non_empty(&account.country, "country")?;
        validate_telephone(&account.telephone)?;

        let email = Email::parse(&account.email)?;
        let username = Username::parse(&account.username)?;

        self.validate_password(&account.password)?;
        if account.password.expose_secret() != account.confirm_password.expose_secret() {
            return Err(AccountError::PasswordMismatch);
        }

        let password_hash = hash_password(&account.password)?;

        let user = User {
            id: UserId::generate(),
            full_name: account.full_name,
            address: account.address,
            city: account.city,
            province: account.province,
            country: account.country,
            telephone: account.telephone,
            email,
            username,
            password_hash,
            created_at: Utc::now(),
        };

        self.store.create_user(user.clone()).map_err(|e| match e {
            RepositoryError::Conflict(_) => AccountError::DuplicateAccount,
            other => AccountError::Repository(other),
        })?;

        tracing::info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    /// Authenticate with email and password.
    ///
    /// Success returns the user so a session can be established; treat
    /// `is_ok()` as the boolean answer. An unknown email and a wrong
    /// password are indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] when no account
    /// matches.
    pub fn authenticate(&self, email: &str, password: &SecretString) -> Result<User, AccountError> {
        let email = Email::parse(email)?;

        let Some(user) = self.store.get_user_by_email(&email)? else {
            tracing::debug!("authentication failed: unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        verify_password(password, &user.password_hash)?;

        tracing::info!(user_id = %user.id, "authenticated");
        Ok(user)
    }

    /// Overwrite the mutable profile fields of an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::UserNotFound`] if the ID resolves to
    /// nothing, a validation variant for malformed input, or
    /// [`AccountError::Repository`] if the write fails.
    pub fn update_profile(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<(), AccountError> {
        require_non_empty(&update.address, "address")?;
        require_non_empty(&update.city, "city")?;
        require_non_empty(&update.province, "province")?;
        require_non_empty(&update.country, "country")?;
        validate_telephone(&update.telephone)?;

        let mut user = self
            .store
            .get_user(user_id)?
            .ok_or(AccountError::UserNotFound)?;

        if let Some(password) = &update.password {
            let confirm = update
                .confirm_password
                .as_ref()
                .ok_or(AccountError::PasswordMismatch)?;
            if password.expose_secret() != confirm.expose_secret() {
                return Err(AccountError::PasswordMismatch);
            }
            self.validate_password(password)?;
            user.password_hash = hash_password(password)?;
        }

        user.address = update.address;
        user.city = update.city;
        user.province = update.province;
        user.country = update.country;
        user.telephone = update.telephone;

        self.store.update_user(user).map_err(|e| match e {
            RepositoryError::NotFound => AccountError::UserNotFound,
            other => AccountError::Repository(other),
        })?;

        tracing::info!(user_id = %user_id, "profile updated");
        Ok(())
    }

    fn validate_password(&self, password: &SecretString) -> Result<(), AccountError> {
        let min = self.config.min_password_length;
        if password.expose_secret().chars().count() < min {
            return Err(AccountError::WeakPassword(format!(
                "password must be at least {min} characters"
            )));
        }
        Ok(())
    }
}

fn require_non_empty(value: &str, field: &'static str) -> Result<(), AccountError> {
    if value.trim().is_empty() {
        return Err(AccountError::MissingField(field));
    }
    Ok(())
}

/// The telephone must carry at least a 10-digit subscriber number; any
/// formatting and country-code prefix around the digits is accepted.
fn validate_telephone(telephone: &str) -> Result<(), AccountError> {
    if telephone.chars().filter(char::is_ascii_digit).count() < 10 {
        return Err(AccountError::InvalidTelephone);
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &SecretString) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AccountError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &SecretString, hash: &str) -> Result<(), AccountError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AccountError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.expose_secret().as_bytes(), &parsed_hash)
        .map_err(|_| AccountError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::db::MemoryStore;

    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    fn new_account(email: &str, username: &str) -> NewAccount {
        NewAccount {
            full_name: "Ashna Paul".to_owned(),
            address: "941 Progress Ave".to_owned(),
            city: "Toronto".to_owned(),
            province: "Ontario".to_owned(),
            country: "Canada".to_owned(),
            telephone: "+1 4165550119".to_owned(),
            email: email.to_owned(),
            username: username.to_owned(),
            password: secret("secret1"),
            confirm_password: secret("secret1"),
        }
    }

    #[test]
    fn test_register_persists_and_hashes() {
        let store = MemoryStore::new();
        let config = Config::default();
        let directory = AccountDirectory::new(&store, &config);

        let user = directory.register(new_account("a@b.com", "ashna")).unwrap();
        assert_ne!(user.password_hash, "secret1");

        let stored = store.get_user(user.id).unwrap().unwrap();
        assert_eq!(stored.email.as_str(), "a@b.com");
    }

    #[test]
    fn test_register_rejects_empty_required_field() {
        let store = MemoryStore::new();
        let config = Config::default();
        let directory = AccountDirectory::new(&store, &config);

        let mut account = new_account("a@b.com", "ashna");
        account.city = "  ".to_owned();
        assert!(matches!(
            directory.register(account),
            Err(AccountError::MissingField("city"))
        ));
    }

    #[test]
    fn test_register_rejects_password_mismatch() {
        let store = MemoryStore::new();
        let config = Config::default();
        let directory = AccountDirectory::new(&store, &config);

        let mut account = new_account("a@b.com", "ashna");
        account.confirm_password = secret("different");
        assert!(matches!(
            directory.register(account),
            Err(AccountError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_register_rejects_short_password() {
        let store = MemoryStore::new();
        let config = Config::default();
        let directory = AccountDirectory::new(&store, &config);

        let mut account = new_account("a@b.com", "ashna");
        account.password = secret("abc");
        account.confirm_password = secret("abc");
        assert!(matches!(
            directory.register(account),
            Err(AccountError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_register_rejects_bad_telephone() {
        let store = MemoryStore::new();
        let config = Config::default();
        let directory = AccountDirectory::new(&store, &config);

        let mut account = new_account("a@b.com", "ashna");
        account.telephone = "+1 555".to_owned();
        assert!(matches!(
            directory.register(account),
            Err(AccountError::InvalidTelephone)
        ));
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        let config = Config::default();
        let directory = AccountDirectory::new(&store, &config);

        directory.register(new_account("a@b.com", "first")).unwrap();
        assert!(matches!(
            directory.register(new_account("a@b.com", "second")),
            Err(AccountError::DuplicateAccount)
        ));
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let store = MemoryStore::new();
        let config = Config::default();
        let directory = AccountDirectory::new(&store, &config);

        directory.register(new_account("a@b.com", "same")).unwrap();
        assert!(matches!(
            directory.register(new_account("c@d.com", "same")),
            Err(AccountError::DuplicateAccount)
        ));
    }

    #[test]
    fn test_authenticate_success_and_failure() {
        let store = MemoryStore::new();
        let config = Config::default();
        let directory = AccountDirectory::new(&store, &config);

        directory.register(new_account("a@b.com", "ashna")).unwrap();

        assert!(directory.authenticate("a@b.com", &secret("secret1")).is_ok());

        // Wrong password and unknown email are indistinguishable.
        assert!(matches!(
            directory.authenticate("a@b.com", &secret("wrong")),
            Err(AccountError::InvalidCredentials)
        ));
        assert!(matches!(
            directory.authenticate("nobody@b.com", &secret("secret1")),
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_update_profile_overwrites_mutable_fields_only() {
        let store = MemoryStore::new();
        let config = Config::default();
        let directory = AccountDirectory::new(&store, &config);

        let user = directory.register(new_account("a@b.com", "ashna")).unwrap();
        directory
            .update_profile(
                user.id,
                ProfileUpdate {
                    address: "300 Borough Dr".to_owned(),
                    city: "Scarborough".to_owned(),
                    province: "Ontario".to_owned(),
                    country: "Canada".to_owned(),
                    telephone: "+1 6475550184".to_owned(),
                    password: None,
                    confirm_password: None,
                },
            )
            .unwrap();

        let updated = store.get_user(user.id).unwrap().unwrap();
        assert_eq!(updated.address, "300 Borough Dr");
        assert_eq!(updated.email.as_str(), "a@b.com");
        assert_eq!(updated.password_hash, user.password_hash);
    }

    #[test]
    fn test_update_profile_changes_password_when_confirmed() {
        let store = MemoryStore::new();
        let config = Config::default();
        let directory = AccountDirectory::new(&store, &config);

        let user = directory.register(new_account("a@b.com", "ashna")).unwrap();
        directory
            .update_profile(
                user.id,
                ProfileUpdate {
                    address: user.address.clone(),
                    city: user.city.clone(),
                    province: user.province.clone(),
                    country: user.country.clone(),
                    telephone: user.telephone.clone(),
                    password: Some(secret("brand-new")),
                    confirm_password: Some(secret("brand-new")),
                },
            )
            .unwrap();

        assert!(directory.authenticate("a@b.com", &secret("brand-new")).is_ok());
        assert!(directory.authenticate("a@b.com", &secret("secret1")).is_err());
    }

    #[test]
    fn test_update_profile_rejects_unconfirmed_password() {
        let store = MemoryStore::new();
        let config = Config::default();
        let directory = AccountDirectory::new(&store, &config);

        let user = directory.register(new_account("a@b.com", "ashna")).unwrap();
        let result = directory.update_profile(
            user.id,
            ProfileUpdate {
                address: user.address.clone(),
                city: user.city.clone(),
                province: user.province.clone(),
                country: user.country.clone(),
                telephone: user.telephone.clone(),
                password: Some(secret("brand-new")),
                confirm_password: Some(secret("other")),
            },
        );
        assert!(matches!(result, Err(AccountError::PasswordMismatch)));
    }

    #[test]
    fn test_update_profile_unknown_user() {
        let store = MemoryStore::new();
        let config = Config::default();
        let directory = AccountDirectory::new(&store, &config);

        let result = directory.update_profile(
            UserId::generate(),
            ProfileUpdate {
                address: "300 Borough Dr".to_owned(),
                city: "Scarborough".to_owned(),
                province: "Ontario".to_owned(),
                country: "Canada".to_owned(),
                telephone: "+1 6475550184".to_owned(),
                password: None,
                confirm_password: None,
            },
        );
        assert!(matches!(result, Err(AccountError::UserNotFound)));
    }
}
