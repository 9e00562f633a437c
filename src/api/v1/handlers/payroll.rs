/*
 * Responsibility
 * - /payroll: salary sheet, salary history, salary changes, deductions, allowances
 *   (payroll database)
 * - PayrollAccess: HR Manager read-only, Employee read-only on own records
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::v1::dto::ApiResponse;
use crate::api::v1::dto::common::{MonthPeriod, parse_path};
use crate::api::v1::dto::payroll::{
    AllowanceResponse, CreateAllowanceRequest, CreateDeductionRequest, DateRangeQuery,
    DeductionResponse, SalaryHistoryResponse, SalaryQuery, SalaryResponse, UpdateSalaryRequest,
};
use crate::api::v1::extractors::PayrollAccess;
use crate::error::AppError;
use crate::repos::payroll_repo::SalaryChange;
use crate::state::AppState;

pub async fn salaries(
    access: PayrollAccess,
    State(state): State<AppState>,
    Query(query): Query<SalaryQuery>,
) -> Result<Json<ApiResponse<Vec<SalaryResponse>>>, AppError> {
    let period = match query.month.as_deref() {
        Some(raw) => Some(
            MonthPeriod::parse(raw)
                .ok_or_else(|| AppError::bad_request("month must be formatted as YYYY-MM"))?,
        ),
        None => None,
    };
    let label = period.map(|p| p.label());

    let rows = state
        .payroll
        .salaries(period.map(|p| p.bounds()), access.subject_filter())
        .await?;

    Ok(Json(ApiResponse::data(
        rows.into_iter()
            .map(|r| SalaryResponse::from_row(r, label.as_deref()))
            .collect(),
    )))
}

pub async fn salary_history(
    _access: PayrollAccess,
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<SalaryHistoryResponse>>>, AppError> {
    let rows = state.payroll.salary_history(&employee_id).await?;
    Ok(Json(ApiResponse::data(
        rows.into_iter().map(SalaryHistoryResponse::from).collect(),
    )))
}

pub async fn update_salary(
    access: PayrollAccess,
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Json(req): Json<UpdateSalaryRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let salary = req.validate().map_err(AppError::bad_request)?;

    let change = SalaryChange {
        salary,
        effective_date: req.effective_date.unwrap_or_else(|| state.today()),
        reason: req.reason(),
    };

    if !state.payroll.update_salary(&employee_id, &change).await? {
        return Err(AppError::not_found("Salary record"));
    }

    tracing::info!(
        by = %access.identity.id,
        employee_id = %employee_id,
        salary,
        "salary updated"
    );

    Ok(Json(ApiResponse::message("Salary updated successfully")))
}

pub async fn add_deduction(
    _access: PayrollAccess,
    State(state): State<AppState>,
    Json(req): Json<CreateDeductionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DeductionResponse>>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = state
        .payroll
        .add_deduction(
            req.employee_id.trim(),
            req.amount,
            req.deduction_date,
            req.description.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Deduction added successfully",
            row.into(),
        )),
    ))
}

pub async fn deductions(
    _access: PayrollAccess,
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<DeductionResponse>>>, AppError> {
    query.validate().map_err(AppError::bad_request)?;

    let rows = state
        .payroll
        .deductions(&employee_id, query.start_date, query.end_date)
        .await?;

    Ok(Json(ApiResponse::data(
        rows.into_iter().map(DeductionResponse::from).collect(),
    )))
}

pub async fn delete_deduction(
    _access: PayrollAccess,
    State(state): State<AppState>,
    Path((employee_id, raw_deduction_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let deduction_id: i32 = parse_path(&raw_deduction_id, "deduction id")?;

    if !state
        .payroll
        .delete_deduction(&employee_id, deduction_id)
        .await?
    {
        return Err(AppError::not_found("Deduction"));
    }

    Ok(Json(ApiResponse::message("Deduction deleted successfully")))
}

pub async fn add_allowance(
    access: PayrollAccess,
    State(state): State<AppState>,
    Json(req): Json<CreateAllowanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AllowanceResponse>>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let row = state
        .payroll
        .add_allowance(
            req.employee_id.trim(),
            req.amount,
            req.allowance_date,
            req.description.as_deref(),
        )
        .await?;

    tracing::info!(
        by = %access.identity.id,
        employee_id = %row.employee_id,
        allowance_id = row.allowance_id,
        "allowance added"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Allowance added successfully",
            row.into(),
        )),
    ))
}

pub async fn allowances(
    _access: PayrollAccess,
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<AllowanceResponse>>>, AppError> {
    query.validate().map_err(AppError::bad_request)?;

    let rows = state
        .payroll
        .allowances(&employee_id, query.start_date, query.end_date)
        .await?;

    Ok(Json(ApiResponse::data(
        rows.into_iter().map(AllowanceResponse::from).collect(),
    )))
}

pub async fn delete_allowance(
    _access: PayrollAccess,
    State(state): State<AppState>,
    Path((employee_id, raw_allowance_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let allowance_id: i32 = parse_path(&raw_allowance_id, "allowance id")?;

    if !state
        .payroll
        .delete_allowance(&employee_id, allowance_id)
        .await?
    {
        return Err(AppError::not_found("Allowance"));
    }

    Ok(Json(ApiResponse::message("Allowance deleted successfully")))
}
