//! Driving ports for registering users and reading the current user.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Domain use-case port for creating accounts.
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Validate the draft, hash the password and store the user.
    async fn register(&self, draft: UserDraft) -> Result<UserId, Error>;
}

/// Domain use-case port for loading a user by id.
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Return the user, or `None` when the id is unknown.
    async fn find_user(&self, user_id: &UserId) -> Result<Option<User>, Error>;
}
