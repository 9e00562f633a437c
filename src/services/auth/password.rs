//! bcrypt hashing for account passwords.
//!
//! Both operations are CPU-heavy and run on the blocking pool.
use tracing::error;

use crate::error::AppError;

pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Compared against when the username does not exist, so unknown users cost
/// the same as wrong passwords.
const DUMMY_HASH: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewY5GyYqExt7YD3a";

pub async fn hash(password: String, cost: u32) -> Result<String, AppError> {
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        error!(cost, "invalid bcrypt cost");
        return Err(AppError::Internal);
    }

    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| {
            error!(error = %e, "password hashing task failed");
            AppError::Internal
        })?
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            AppError::Internal
        })
}

/// `hash = None` burns one comparison against a dummy hash and returns `false`.
pub async fn verify(password: String, hash: Option<String>) -> Result<bool, AppError> {
    let known = hash.is_some();
    let hash = hash.unwrap_or_else(|| DUMMY_HASH.to_string());

    let matched = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            error!(error = %e, "password verification task failed");
            AppError::Internal
        })?;

    match matched {
        Ok(ok) => Ok(ok && known),
        // A malformed stored hash is a refusal, not a server error.
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is not valid bcrypt");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let h = hash("hunter22".to_string(), MIN_BCRYPT_COST).await.unwrap();
        assert!(verify("hunter22".to_string(), Some(h.clone())).await.unwrap());
        assert!(!verify("hunter23".to_string(), Some(h)).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_account_never_matches() {
        assert!(!verify("anything".to_string(), None).await.unwrap());
    }

    #[tokio::test]
    async fn garbage_hash_is_a_mismatch() {
        assert!(!verify("pw".to_string(), Some("plaintext".to_string())).await.unwrap());
    }

    #[tokio::test]
    async fn out_of_range_cost_is_rejected() {
        assert!(hash("pw".to_string(), 2).await.is_err());
    }
}
