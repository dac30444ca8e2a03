//! Adaptive, salted one-way password hashing

use bomato_shared::config::PasswordConfig;

use crate::errors::DomainError;

/// Production bcrypt work factor
pub const DEFAULT_COST: u32 = 12;

/// bcrypt hasher with a fixed work factor.
///
/// Hashing and verification run on the blocking thread pool so request
/// tasks are not stalled by the key-stretching work.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn from_config(config: &PasswordConfig) -> Self {
        Self::new(config.bcrypt_cost)
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a fresh salt
    pub async fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| DomainError::internal(format!("password hashing task failed: {e}")))?
            .map_err(|e| DomainError::internal(format!("password hashing failed: {e}")))
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// Any failure, including a malformed hash, yields `false`.
    pub async fn verify(&self, plaintext: &str, hash: &str) -> bool {
        let plaintext = plaintext.to_owned();
        let hash = hash.to_owned();
        match tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &hash)).await {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "Password hash could not be verified");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                false
            }
        }
    }
}
