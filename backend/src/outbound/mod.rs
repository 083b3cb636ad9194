//! Outbound adapters implementing the domain's driven ports.
//!
//! - **memory**: process-local store for development and tests
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **password_hashing**: Argon2id implementation of `PasswordHasher`

pub mod memory;
pub mod password_hashing;
pub mod persistence;
