use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::services::auth::claim_cache::ClaimCache;
use crate::services::auth::claims::{Claims, Identity};
use crate::services::auth::error::AuthError;
use crate::services::clock::Clock;

/// Cache lifetime for tokens that carry no `exp` claim.
pub const DEFAULT_CACHE_TTL_SECONDS: i64 = 3600;

#[derive(Debug, thiserror::Error)]
pub enum AuthSetupError {
    #[error("jwt secret must not be empty")]
    EmptySecret,
    #[error("unsupported signing algorithm: {0:?} (expected HS256/HS384/HS512)")]
    UnsupportedAlgorithm(Algorithm),
}

/// Shared-secret access-token verifier with a claim cache in front of it.
///
/// Expiry is checked here against the injected clock rather than by `jsonwebtoken`,
/// so cached and freshly decoded tokens follow the same rule: accepted only while
/// `exp > now`.
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
    cache: Arc<dyn ClaimCache>,
    clock: Arc<dyn Clock>,
    verifications: AtomicU64,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("algorithms", &self.validation.algorithms)
            .field("cached", &self.cache.len())
            .field("verifications", &self.verification_count())
            .finish()
    }
}

impl AuthService {
    pub fn new(
        secret: &str,
        algorithm: Algorithm,
        cache: Arc<dyn ClaimCache>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AuthSetupError> {
        if secret.is_empty() {
            return Err(AuthSetupError::EmptySecret);
        }
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AuthSetupError::UnsupportedAlgorithm(algorithm));
        }

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            cache,
            clock,
            verifications: AtomicU64::new(0),
        })
    }

    /// Resolve a raw token into the caller's identity.
    ///
    /// Cache hit: returned as stored, signature not re-checked.
    /// Cache miss: signature verified, expiry checked, result cached until `exp`
    /// (or one hour when the token has no `exp`).
    pub fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingCredential);
        }

        let now = self.clock.now_ts();

        if let Some(claims) = self.cache.get(token, now) {
            return Ok(claims.into());
        }

        let claims = self.verify(token)?;

        let expires_at = match claims.exp {
            Some(exp) if exp <= now => return Err(AuthError::ExpiredCredential),
            Some(exp) => exp,
            None => now + DEFAULT_CACHE_TTL_SECONDS,
        };

        self.cache
            .insert(token.to_string(), claims.clone(), expires_at, now);

        Ok(claims.into())
    }

    /// Signature check + claim decoding, bypassing the cache.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verifications.fetch_add(1, Ordering::Relaxed);

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Number of signature verifications performed so far (cache misses).
    pub fn verification_count(&self) -> u64 {
        self.verifications.load(Ordering::Relaxed)
    }

    pub fn cached_tokens(&self) -> usize {
        self.cache.len()
    }
}
