/*
 * Responsibility
 * - Application-wide AppError
 * - IntoResponse: HTTP status + `{ "Status": false, "Message": ... }`
 * - Conversions from the auth / repo / config layers
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::repos::error::RepoError;
use crate::services::auth::AuthError;

/// Every authentication failure reads the same to the client.
pub const UNAUTHORIZED_MESSAGE: &str = "Authentication required";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "Status")]
    pub status: bool,
    #[serde(rename = "Message")]
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid username or password")]
    InvalidLogin,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    ServiceUnavailable(String),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound(resource)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidLogin => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
            AppError::InvalidLogin => "Invalid username or password".to_string(),
            AppError::NotFound(resource) => format!("{resource} not found"),
            AppError::Internal => "Internal server error".to_string(),
            AppError::BadRequest(m)
            | AppError::Forbidden(m)
            | AppError::Conflict(m)
            | AppError::ServiceUnavailable(m) => m,
        };

        let body = ErrorResponse {
            status: false,
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InsufficientRole(message) => AppError::Forbidden(message),
            AuthError::MissingCredential
            | AuthError::InvalidCredential(_)
            | AuthError::ExpiredCredential => AppError::Unauthorized,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict(what) => AppError::Conflict(format!("{what} already exists")),
            RepoError::Unavailable(err) => {
                tracing::error!(error = %err, "database unavailable");
                AppError::ServiceUnavailable("Database unavailable".to_string())
            }
            RepoError::Db(err) => {
                tracing::error!(error = %err, "database error");
                AppError::Internal
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        tracing::error!(error = %e, "configuration error");
        AppError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn authentication_failures_share_one_message() {
        for e in [
            AuthError::MissingCredential,
            AuthError::InvalidCredential("bad signature".to_string()),
            AuthError::ExpiredCredential,
        ] {
            let (status, body) = body_json(e.into()).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["Status"], false);
            assert_eq!(body["Message"], UNAUTHORIZED_MESSAGE);
        }
    }

    #[tokio::test]
    async fn insufficient_role_is_forbidden_with_reason() {
        let (status, body) =
            body_json(AuthError::InsufficientRole("Access denied".to_string()).into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["Message"], "Access denied");
    }

    #[tokio::test]
    async fn repo_conflict_maps_to_409() {
        let (status, body) = body_json(RepoError::Conflict("employee").into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["Message"], "employee already exists");
    }
}
