/*
 * Responsibility
 * - GET /health (public)
 * - Pings both databases; 503 when either is unreachable
 */
use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;

use crate::state::AppState;

const PING_TIMEOUT: Duration = Duration::from_secs(2);

async fn ping(db: &PgPool) -> bool {
    match tokio::time::timeout(PING_TIMEOUT, sqlx::query("SELECT 1").execute(db)).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "database ping failed");
            false
        }
        Err(_) => {
            tracing::warn!("database ping timed out");
            false
        }
    }
}

fn label(up: bool) -> &'static str {
    if up { "up" } else { "down" }
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let (hr, payroll) = tokio::join!(ping(&state.hr_db), ping(&state.payroll_db));

    let healthy = hr && payroll;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if healthy { "ok" } else { "degraded" },
            "databases": { "hr": label(hr), "payroll": label(payroll) },
            "environment": if state.app_env.is_production() { "production" } else { "development" },
        })),
    )
}
