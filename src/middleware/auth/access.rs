//! Access token verification: token -> Identity -> AuthCtx in request extensions.
//!
//! The token is taken from `Authorization: Bearer <token>` first and from the `token`
//! cookie otherwise. Any failure ends the request with the same 401 body; the precise
//! cause only goes to the log.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::api::v1::extractors::{AuthCtx, TokenSource};
use crate::error::AppError;
use crate::services::auth::AuthError;
use crate::state::AppState;

pub const TOKEN_COOKIE: &str = "token";

/// Require a valid access token on every route of `router`.
///
/// Uses `route_layer`, so unknown paths still 404 instead of 401.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some((token, source)) = extract_token(req.headers()) else {
        tracing::warn!(
            path = %req.uri().path(),
            error = %AuthError::MissingCredential,
            "access token rejected"
        );
        return Err(AuthError::MissingCredential.into());
    };

    let identity = match state.auth.authenticate(&token) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(
                path = %req.uri().path(),
                ?source,
                error = %err,
                "access token rejected"
            );
            return Err(err.into());
        }
    };

    tracing::debug!(user = %identity.id, role = %identity.role, ?source, "authenticated");

    // middleware -> extractor
    req.extensions_mut().insert(AuthCtx::new(identity, source));

    Ok(next.run(req).await)
}

/// Header first, cookie as fallback. Empty values count as absent.
pub fn extract_token(headers: &HeaderMap) -> Option<(String, TokenSource)> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    if let Some(token) = from_header {
        return Some((token.to_string(), TokenSource::Header));
    }

    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| (v, TokenSource::Cookie))
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
