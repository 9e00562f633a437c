/*
 * Responsibility
 * - Generic Access<D> extractor: AuthCtx from extensions + policy table lookup
 * - 403 on InsufficientRole, 401 when the request was never authenticated
 *
 * Does not hold
 * - Concrete domain tags (types.rs)
 * - The permission table itself (services::auth::policy)
 */
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, RawPathParams},
    http::request::Parts,
};

use crate::api::v1::extractors::auth_ctx::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{Domain, Identity, MethodKind, Scope, authorize};
use crate::state::AppState;

/// Path parameter that names the record's owner on self-scoped routes.
pub const SUBJECT_PARAM: &str = "employee_id";

pub trait DomainTag: Send + Sync {
    const DOMAIN: Domain;
}

pub struct Access<D> {
    pub identity: Identity,
    pub scope: Scope,
    _marker: PhantomData<D>,
}

impl<D> Access<D> {
    /// Employee id list queries must be narrowed to, if any.
    pub fn subject_filter(&self) -> Option<&str> {
        self.scope.subject()
    }
}

impl<D> FromRequestParts<AppState> for Access<D>
where
    D: DomainTag,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .ok_or(AppError::Unauthorized)?;

        let subject = RawPathParams::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|params| {
                params
                    .iter()
                    .find(|(key, _)| *key == SUBJECT_PARAM)
                    .map(|(_, value)| value.to_string())
            });

        let method = MethodKind::from(&parts.method);

        match authorize(&ctx.identity, D::DOMAIN, method, subject.as_deref()) {
            Ok(scope) => Ok(Self {
                identity: ctx.identity,
                scope,
                _marker: PhantomData,
            }),
            Err(err) => {
                tracing::warn!(
                    user = %ctx.identity.id,
                    role = %ctx.identity.role,
                    domain = ?D::DOMAIN,
                    ?method,
                    subject = ?subject,
                    "access denied"
                );
                Err(err.into())
            }
        }
    }
}

impl<D> std::fmt::Debug for Access<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Access")
            .field("identity", &self.identity)
            .field("scope", &self.scope)
            .finish()
    }
}
