//! Argon2id adapter for the [`PasswordHasher`] port.
//!
//! Hashing is CPU-bound, so both operations run on Tokio's blocking pool.
//! Hashes are stored in PHC string format and embed their own salt and
//! parameters.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, SaltString};
use argon2::{Argon2, Params, PasswordHasher as _, PasswordVerifier as _};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id hasher with configurable cost parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    params: Option<Params>,
}

impl Argon2PasswordHasher {
    /// Hasher using the `argon2` crate's recommended defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher with explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self {
            params: Some(params),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        match &self.params {
            Some(params) => Argon2::new(
                argon2::Algorithm::Argon2id,
                argon2::Version::V0x13,
                params.clone(),
            ),
            None => Argon2::default(),
        }
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, PasswordHashError>
where
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| PasswordHashError::hash(format!("hashing task failed: {err}")))?
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let argon2 = self.argon2();
        let password = Zeroizing::new(password.to_owned());
        run_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| PasswordHashError::hash(err.to_string()))
        })
        .await
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let argon2 = self.argon2();
        let password = Zeroizing::new(password.to_owned());
        let stored = hash.to_owned();
        run_blocking(move || {
            let parsed = PasswordHash::new(&stored)
                .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))?;
            match argon2.verify_password(password.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(err) => Err(PasswordHashError::hash(err.to_string())),
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        let params = Params::new(8, 1, 1, None).expect("valid test params");
        Argon2PasswordHasher::with_params(params)
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_verify_only_the_original_password(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("password").await.expect("hash");
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("password"));
        assert!(hasher.verify("password", &hash).await.expect("verify"));
        assert!(!hasher.verify("passw0rd", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_are_salted(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("password").await.expect("hash");
        let second = hasher.hash("password").await.expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hashes_are_reported(hasher: Argon2PasswordHasher) {
        let err = hasher
            .verify("password", "not-a-phc-string")
            .await
            .expect_err("malformed");
        assert!(matches!(err, PasswordHashError::MalformedHash { .. }));
    }
}
