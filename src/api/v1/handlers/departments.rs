/*
 * Responsibility
 * - /departments CRUD (HR database)
 * - Delete is refused while employees still belong to the department
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::v1::dto::ApiResponse;
use crate::api::v1::dto::common::parse_path;
use crate::api::v1::dto::departments::{
    CreateDepartmentRequest, DepartmentIdResponse, DepartmentResponse, UpdateDepartmentRequest,
};
use crate::api::v1::extractors::DepartmentsAccess;
use crate::error::AppError;
use crate::state::AppState;

fn department_id(raw: &str) -> Result<i32, AppError> {
    parse_path(raw, "department id")
}

pub async fn list_departments(
    _access: DepartmentsAccess,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DepartmentResponse>>>, AppError> {
    let rows = state.departments.list().await?;
    Ok(Json(ApiResponse::data(
        rows.into_iter().map(DepartmentResponse::from).collect(),
    )))
}

pub async fn create_department(
    _access: DepartmentsAccess,
    State(state): State<AppState>,
    Json(req): Json<CreateDepartmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DepartmentIdResponse>>), AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let department_id = state
        .departments
        .create(
            req.department_name.trim(),
            req.description.as_deref(),
            req.manager_id.as_deref(),
        )
        .await?;

    tracing::info!(department_id, "department created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Department added successfully",
            DepartmentIdResponse { department_id },
        )),
    ))
}

pub async fn get_department(
    _access: DepartmentsAccess,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<DepartmentResponse>>, AppError> {
    let id = department_id(&raw_id)?;

    let row = state
        .departments
        .get(id)
        .await?
        .ok_or(AppError::not_found("Department"))?;

    Ok(Json(ApiResponse::data(row.into())))
}

pub async fn update_department(
    _access: DepartmentsAccess,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(req): Json<UpdateDepartmentRequest>,
) -> Result<Json<ApiResponse<DepartmentIdResponse>>, AppError> {
    let id = department_id(&raw_id)?;
    req.validate().map_err(AppError::bad_request)?;

    if !state.departments.update(id, &req.into_changes()).await? {
        return Err(AppError::not_found("Department"));
    }

    Ok(Json(ApiResponse::with_message(
        "Department updated successfully",
        DepartmentIdResponse { department_id: id },
    )))
}

pub async fn delete_department(
    _access: DepartmentsAccess,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let id = department_id(&raw_id)?;

    if state.departments.get(id).await?.is_none() {
        return Err(AppError::not_found("Department"));
    }

    let members = state.departments.count_employees(id).await?;
    if members > 0 {
        return Err(AppError::bad_request(format!(
            "Cannot delete department with ID {id} because it has employees"
        )));
    }

    if !state.departments.delete(id).await? {
        return Err(AppError::not_found("Department"));
    }

    tracing::info!(department_id = id, "department deleted");
    Ok(Json(ApiResponse::message("Department deleted successfully")))
}
