//! Session types.
//!
//! The session is an explicit value threaded through the workflow rather
//! than process-wide state: set on successful authentication, cleared on
//! logout, read by whatever screen needs the active user.

use serde::{Deserialize, Serialize};

use cenphone_core::{Email, UserId};

use super::User;

/// Session-stored user identity.
///
/// Minimal data kept for the lifetime of a login to identify the shopper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's customer ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// User's display name.
    pub full_name: String,
}

/// The association between the current interaction and an authenticated
/// user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<CurrentUser>,
}

impl Session {
    /// Create a logged-out session.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Associate the session with an authenticated user.
    pub fn login(&mut self, user: &User) {
        self.current = Some(CurrentUser {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
        });
    }

    /// Clear the association.
    pub fn logout(&mut self) {
        self.current = None;
    }

    /// The currently authenticated user, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&CurrentUser> {
        self.current.as_ref()
    }
}
