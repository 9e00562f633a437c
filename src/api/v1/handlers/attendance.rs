/*
 * Responsibility
 * - /attendance/{daily,monthly,summary}/{year}/{month}
 * - Employees get only their own rows (Scope::Own)
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::v1::dto::ApiResponse;
use crate::api::v1::dto::attendance::{
    AttendanceSummaryResponse, DailyAttendanceResponse, MonthlyAttendanceResponse,
};
use crate::api::v1::dto::common::{MonthPeriod, parse_path};
use crate::api::v1::extractors::AttendanceAccess;
use crate::error::AppError;
use crate::state::AppState;

fn period(year: &str, month: &str) -> Result<MonthPeriod, AppError> {
    let year: i32 = parse_path(year, "year")?;
    let month: u32 = parse_path(month, "month")?;
    if !(1..=12).contains(&month) {
        return Err(AppError::bad_request("Month must be between 1 and 12"));
    }
    MonthPeriod::new(year, month).ok_or_else(|| AppError::bad_request("Invalid year"))
}

pub async fn daily_attendance(
    access: AttendanceAccess,
    State(state): State<AppState>,
    Path((year, month)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<DailyAttendanceResponse>>>, AppError> {
    let period = period(&year, &month)?;
    tracing::debug!(period = %period.label(), self_only = access.scope.is_self_only(), "daily attendance");

    let (start, end) = period.bounds();
    let rows = state
        .attendance
        .daily(start, end, access.subject_filter())
        .await?;

    Ok(Json(ApiResponse::data(
        rows.into_iter().map(DailyAttendanceResponse::from).collect(),
    )))
}

pub async fn monthly_attendance(
    access: AttendanceAccess,
    State(state): State<AppState>,
    Path((year, month)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<MonthlyAttendanceResponse>>>, AppError> {
    let period = period(&year, &month)?;

    let (start, end) = period.bounds();
    let rows = state
        .attendance
        .monthly(start, end, access.subject_filter())
        .await?;

    Ok(Json(ApiResponse::data(
        rows.into_iter()
            .map(MonthlyAttendanceResponse::from)
            .collect(),
    )))
}

/// Per-department and overall counts; rates are count over headcount, in percent.
pub async fn attendance_summary(
    access: AttendanceAccess,
    State(state): State<AppState>,
    Path((year, month)): Path<(String, String)>,
) -> Result<Json<ApiResponse<AttendanceSummaryResponse>>, AppError> {
    let period = period(&year, &month)?;

    let (start, end) = period.bounds();
    let departments = state
        .attendance
        .department_counts(start, end, access.subject_filter())
        .await?;
    let overall = state
        .attendance
        .overall_counts(start, end, access.subject_filter())
        .await?;

    Ok(Json(ApiResponse::data(AttendanceSummaryResponse {
        department_stats: departments.into_iter().map(Into::into).collect(),
        overall_stats: overall.into(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_outside_calendar_is_bad_request() {
        assert!(matches!(period("2024", "13"), Err(AppError::BadRequest(_))));
        assert!(matches!(period("2024", "0"), Err(AppError::BadRequest(_))));
        assert!(matches!(period("twenty", "1"), Err(AppError::BadRequest(_))));
        assert!(period("2024", "02").is_ok());
    }
}
