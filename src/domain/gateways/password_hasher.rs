//! Password Hasher Gateway

use async_trait::async_trait;

use crate::shared::errors::PasswordHashError;

/// One-way password hashing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
