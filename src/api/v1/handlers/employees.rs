/*
 * Responsibility
 * - /employees CRUD (HR database)
 * - EmployeesAccess decides scope before the body runs; Employees only ever see themselves
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::v1::dto::ApiResponse;
use crate::api::v1::dto::employees::{
    CreateEmployeeRequest, EmployeeIdResponse, EmployeeListQuery, EmployeeResponse,
    UpdateEmployeeRequest,
};
use crate::api::v1::extractors::EmployeesAccess;
use crate::error::AppError;
use crate::repos::employee_repo::EmployeeFilter;
use crate::state::AppState;

pub async fn list_employees(
    access: EmployeesAccess,
    State(state): State<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Json<ApiResponse<Vec<EmployeeResponse>>>, AppError> {
    if let Some(employee_id) = access.subject_filter() {
        tracing::debug!(employee_id, "employee list narrowed to caller");
    }

    let filter = EmployeeFilter {
        department_id: query.department_id,
        status: query.status.as_deref(),
        employee_id: access.subject_filter(),
    };

    let rows = state.employees.list(filter).await?;
    Ok(Json(ApiResponse::data(
        rows.into_iter().map(EmployeeResponse::from).collect(),
    )))
}

pub async fn create_employee(
    _access: EmployeesAccess,
    State(state): State<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EmployeeIdResponse>>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let new = req.into_new();
    state.employees.create(&new).await?;

    tracing::info!(employee_id = %new.employee_id, "employee created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Employee added successfully",
            EmployeeIdResponse {
                employee_id: new.employee_id,
            },
        )),
    ))
}

pub async fn get_employee(
    _access: EmployeesAccess,
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<Json<ApiResponse<EmployeeResponse>>, AppError> {
    let row = state
        .employees
        .get(&employee_id)
        .await?
        .ok_or(AppError::not_found("Employee"))?;

    Ok(Json(ApiResponse::data(row.into())))
}

pub async fn update_employee(
    _access: EmployeesAccess,
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<ApiResponse<EmployeeIdResponse>>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let updated = state
        .employees
        .update(&employee_id, &req.into_changes())
        .await?;
    if !updated {
        return Err(AppError::not_found("Employee"));
    }

    tracing::info!(employee_id = %employee_id, "employee updated");

    Ok(Json(ApiResponse::with_message(
        "Employee updated successfully",
        EmployeeIdResponse { employee_id },
    )))
}
