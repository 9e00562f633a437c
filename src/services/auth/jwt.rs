use std::sync::Arc;

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tracing::error;

use crate::error::AppError;
use crate::services::auth::claims::Claims;
use crate::services::auth::role::Role;
use crate::services::clock::Clock;

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

/// Signs access tokens with the shared secret the [`AuthService`](super::AuthService)
/// verifies against.
#[derive(Clone)]
pub struct JwtIssuer {
    algorithm: Algorithm,
    ttl_seconds: u64,
    encoding_key: EncodingKey,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIssuer")
            .field("algorithm", &self.algorithm)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl JwtIssuer {
    pub fn new(secret: &str, algorithm: Algorithm, ttl_seconds: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            algorithm,
            ttl_seconds,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            clock,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    pub fn issue(&self, id: &str, username: &str, role: Role) -> Result<IssuedToken, AppError> {
        let ttl = i64::try_from(self.ttl_seconds).map_err(|_| {
            error!(ttl_seconds = self.ttl_seconds, "token ttl out of range");
            AppError::Internal
        })?;
        let expires_at = self.clock.now_ts().saturating_add(ttl);

        let claims = Claims {
            id: id.to_string(),
            username: username.to_string(),
            role,
            exp: Some(expires_at),
        };

        let token = self.sign(&claims)?;
        tracing::info!(username, role = %role, "issued access token");

        Ok(IssuedToken { token, expires_at })
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        let mut header = Header::new(self.algorithm);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AppError::Internal
        })
    }
}
