/*
 * Responsibility
 * - The authenticated-request context as seen by handlers
 * - The access middleware verifies the token and stores this in request extensions;
 *   handlers only ever receive this type
 */
use serde::Serialize;

use crate::services::auth::Identity;

/// Where the token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
    Header,
    Cookie,
}

#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub identity: Identity,
    pub source: TokenSource,
}

impl AuthCtx {
    pub fn new(identity: Identity, source: TokenSource) -> Self {
        Self { identity, source }
    }
}
