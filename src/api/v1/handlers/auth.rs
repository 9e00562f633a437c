/*
 * Responsibility
 * - /auth: login / logout / roles (public)
 * - check-auth and the role test endpoints (behind the access middleware)
 * - account listing and registration (Accounts domain, Admin only)
 */
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::api::v1::dto::ApiResponse;
use crate::api::v1::dto::auth::{
    AccessCheckResponse, AccountResponse, IdentityResponse, LoginRequest, LoginResponse,
    RegisterRequest, RegisteredAccount,
};
use crate::api::v1::extractors::{
    AccountsAccess, AuthCtxExtractor, EmployeesAccess, PayrollAccess,
};
use crate::error::AppError;
use crate::middleware::auth::access::TOKEN_COOKIE;
use crate::services::auth::{Role, password, require_role};
use crate::state::AppState;

fn token_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, value))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let username = req.username.trim();
    let user = state.users.find_by_username(username).await?;

    let matched = password::verify(
        req.password.clone(),
        user.as_ref().map(|u| u.password_hash.clone()),
    )
    .await?;

    let user = match user {
        Some(u) if matched && u.status => u,
        Some(u) if matched => {
            tracing::warn!(username, user_id = u.user_id, "login refused: account disabled");
            return Err(AppError::InvalidLogin);
        }
        _ => {
            tracing::warn!(username, "login refused: bad credentials");
            return Err(AppError::InvalidLogin);
        }
    };

    let role: Role = user.role.parse().map_err(|e| {
        tracing::error!(user_id = user.user_id, error = %e, "stored role is not recognized");
        AppError::Internal
    })?;

    // Employee tokens are self-scoped by subject, which needs a linked employee.
    if role == Role::Employee && user.linked_employee_id().is_none() {
        tracing::warn!(
            username,
            user_id = user.user_id,
            "login refused: employee account has no linked employee"
        );
        return Err(AppError::InvalidLogin);
    }

    let subject = user.subject_id();
    let issued = state.issuer.issue(&subject, &user.username, role)?;

    if let Err(e) = state.users.touch_last_login(user.user_id).await {
        tracing::warn!(user_id = user.user_id, error = %e, "failed to record last login");
    }

    let jar = jar.add(token_cookie(
        issued.token.clone(),
        state.app_env.is_production(),
    ));

    Ok((
        jar,
        Json(LoginResponse {
            status: true,
            message: "Login successful",
            token: issued.token,
            data: IdentityResponse {
                id: subject,
                username: user.username,
                role,
            },
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<()>>) {
    let jar = jar.remove(token_cookie(String::new(), state.app_env.is_production()));
    (jar, Json(ApiResponse::message("Logout successful")))
}

pub async fn roles() -> Json<ApiResponse<Vec<&'static str>>> {
    Json(ApiResponse::data(
        Role::ALL.iter().map(|r| r.as_str()).collect(),
    ))
}

/// Current account, re-read from the payroll database.
pub async fn check_auth(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    let account = state
        .users
        .find_by_subject(&ctx.identity.id)
        .await?
        .filter(|a| a.status)
        .ok_or_else(|| {
            tracing::warn!(user = %ctx.identity.id, "token subject has no active account");
            AppError::Unauthorized
        })?;

    Ok(Json(ApiResponse::data(account.into())))
}

pub async fn test_auth(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::with_message(
        "Authentication successful",
        serde_json::json!({
            "id": ctx.identity.id,
            "username": ctx.identity.username,
            "role": ctx.identity.role,
            "via": ctx.source,
        }),
    ))
}

pub async fn test_admin(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<ApiResponse<IdentityResponse>>, AppError> {
    require_role(&ctx.identity, &[Role::Admin])?;

    Ok(Json(ApiResponse::with_message(
        "Admin access granted",
        ctx.identity.into(),
    )))
}

pub async fn test_employee(access: EmployeesAccess) -> Json<ApiResponse<AccessCheckResponse>> {
    Json(ApiResponse::with_message(
        "Employee data access granted",
        AccessCheckResponse {
            self_only: access.scope.is_self_only(),
            id: access.identity.id,
            role: access.identity.role,
        },
    ))
}

pub async fn test_payroll(access: PayrollAccess) -> Json<ApiResponse<AccessCheckResponse>> {
    Json(ApiResponse::with_message(
        "Payroll data access granted",
        AccessCheckResponse {
            self_only: access.scope.is_self_only(),
            id: access.identity.id,
            role: access.identity.role,
        },
    ))
}

pub async fn list_users(
    _access: AccountsAccess,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, AppError> {
    let rows = state.users.list().await?;
    Ok(Json(ApiResponse::data(
        rows.into_iter().map(AccountResponse::from).collect(),
    )))
}

pub async fn register(
    access: AccountsAccess,
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisteredAccount>>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let username = req.username.trim().to_string();
    let role = req.role();
    let employee_id = req.employee_id.as_deref().map(str::trim);

    let hash = password::hash(req.password.clone(), state.bcrypt_cost).await?;
    let user_id = state
        .users
        .create(&username, &hash, role.as_str(), employee_id)
        .await?;

    tracing::info!(
        by = %access.identity.id,
        user_id,
        username = %username,
        role = %role,
        "account registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Registration successful",
            RegisteredAccount {
                user_id,
                username,
                role,
            },
        )),
    ))
}
