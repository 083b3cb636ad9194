//! Port for one-way password hashing.
//!
//! Hashes are self-describing strings (PHC format for real adapters) so the
//! verifier needs nothing but the stored value.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// One-way password hashing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash of `password`.
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check `password` against a hash produced by [`PasswordHasher::hash`].
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}

#[cfg(any(test, feature = "test-support"))]
const FIXTURE_PREFIX: &str = "fixture$";

/// Reversible stand-in for tests where hashing cost would dominate.
///
/// The "hash" embeds the password, so it only exists in test builds.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl PasswordHasher for FixturePasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("{FIXTURE_PREFIX}{password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        hash.strip_prefix(FIXTURE_PREFIX)
            .map(|stored| stored == password)
            .ok_or_else(|| PasswordHashError::malformed_hash("missing fixture prefix"))
    }
}
