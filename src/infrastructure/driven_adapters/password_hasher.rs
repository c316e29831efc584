//! Bcrypt Password Hasher

use async_trait::async_trait;

use crate::domain::gateways::PasswordHasher;
use crate::shared::errors::PasswordHashError;

/// `PasswordHasher` using bcrypt. Hashing runs on the blocking pool.
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    #[must_use]
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| PasswordHashError(e.to_string()))?
            .map_err(|e| PasswordHashError(e.to_string()))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| PasswordHashError(e.to_string()))?
            .map_err(|e| PasswordHashError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_verify_own_hash() {
        let hasher = BcryptPasswordHasher::new(4);
        let hash = hasher.hash("correct horse").await.unwrap();

        assert_ne!(hash, "correct horse");
        assert!(hasher.verify("correct horse", &hash).await.unwrap());
        assert!(!hasher.verify("battery staple", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn should_fail_on_malformed_hash() {
        let hasher = BcryptPasswordHasher::new(4);
        assert!(hasher.verify("whatever", "not-a-bcrypt-hash").await.is_err());
    }
}
