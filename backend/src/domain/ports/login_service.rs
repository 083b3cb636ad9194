//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to check credentials without knowing how users
//! or password hashes are stored.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown email addresses and wrong passwords both produce the same
    /// unauthorized error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
