//! User account services.
//!
//! Implements registration, credential checks and profile lookups on top of
//! the user repository and password hasher ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::auth::INVALID_CREDENTIALS;
use crate::domain::port_error_mapping::{map_hash_error, map_user_error};
use crate::domain::ports::{
    LoginService, PasswordHasher, UserProfileQuery, UserRegistration, UserRepository,
};
use crate::domain::user::EMAIL_IN_USE;
use crate::domain::{Error, FieldError, LoginCredentials, User, UserDraft, UserId};

/// Service implementing the user-facing driving ports.
#[derive(Clone)]
pub struct UserAccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> UserAccountService<U, H> {
    /// Build the service over a user repository and password hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> UserRegistration for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, draft: UserDraft) -> Result<UserId, Error> {
        let new_user = draft.validate().map_err(Error::validation)?;

        if self
            .users
            .find_by_email(&new_user.email_address)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(Error::validation(vec![FieldError::new(
                "emailAddress",
                EMAIL_IN_USE,
            )]));
        }

        let password_hash = self
            .hasher
            .hash(new_user.password.as_str())
            .await
            .map_err(map_hash_error)?;
        let user = User {
            id: UserId::random(),
            full_name: new_user.full_name,
            email_address: new_user.email_address,
            password_hash,
        };
        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id, "user registered");
        Ok(user.id)
    }
}

#[async_trait]
impl<U, H> LoginService for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email_address())
            .await
            .map_err(map_user_error)?
        else {
            warn!("login attempt for unknown email address");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .await
            .map_err(map_hash_error)?;
        if verified {
            Ok(user)
        } else {
            warn!(user_id = %user.id, "login attempt with wrong password");
            Err(Error::unauthorized(INVALID_CREDENTIALS))
        }
    }
}

#[async_trait]
impl<U, H> UserProfileQuery for UserAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn find_user(&self, user_id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(user_id).await.map_err(map_user_error)
    }
}
