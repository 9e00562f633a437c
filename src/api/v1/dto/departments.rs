/*
 * Responsibility
 * - Departments request/response DTOs
 */
use serde::{Deserialize, Serialize};

use crate::repos::department_repo::{DepartmentChanges, DepartmentRow};

#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    pub department_name: String,
    pub description: Option<String>,
    pub manager_id: Option<String>,
}

impl CreateDepartmentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.department_name.trim().is_empty() {
            return Err("department_name is required");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub department_name: Option<String>,
    pub description: Option<String>,
    pub manager_id: Option<String>,
}

impl UpdateDepartmentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.department_name.is_none() && self.description.is_none() && self.manager_id.is_none()
        {
            return Err("No data provided for update");
        }
        if let Some(name) = &self.department_name
            && name.trim().is_empty()
        {
            return Err("department_name cannot be empty");
        }
        Ok(())
    }

    pub fn into_changes(self) -> DepartmentChanges {
        DepartmentChanges {
            department_name: self.department_name,
            description: self.description,
            manager_id: self.manager_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DepartmentResponse {
    pub department_id: i32,
    pub department_name: String,
    pub description: Option<String>,
    pub manager_id: Option<String>,
    pub manager_name: Option<String>,
    pub total_employees: i64,
}

impl From<DepartmentRow> for DepartmentResponse {
    fn from(r: DepartmentRow) -> Self {
        Self {
            department_id: r.department_id,
            department_name: r.department_name,
            description: r.description,
            manager_id: r.manager_id,
            manager_name: r.manager_name,
            total_employees: r.total_employees,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DepartmentIdResponse {
    pub department_id: i32,
}
