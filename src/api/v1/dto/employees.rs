/*
 * Responsibility
 * - Employees request/response DTOs
 * - validate(): shape checks only; existence/uniqueness is the repo's job
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::repos::employee_repo::{EmployeeChanges, EmployeeRow, NewEmployee};

pub const EMPLOYEE_STATUSES: [&str; 2] = ["Active", "Inactive"];

fn validate_status(status: &str) -> Result<(), &'static str> {
    if EMPLOYEE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err("Status must be Active or Inactive")
    }
}

fn validate_salary(salary: f64) -> Result<(), &'static str> {
    if salary.is_finite() && salary > 0.0 {
        Ok(())
    } else {
        Err("Salary must be positive")
    }
}

fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

#[derive(Debug, Deserialize)]
pub struct EmployeeListQuery {
    pub department_id: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub employee_id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub hire_date: NaiveDate,
    pub department_id: i32,
    pub position_id: i32,
    pub salary: f64,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "Active".to_string()
}

impl CreateEmployeeRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.employee_id.trim().is_empty() {
            return Err("employee_id is required");
        }
        if self.full_name.trim().is_empty() {
            return Err("full_name is required");
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        validate_salary(self.salary)?;
        validate_status(&self.status)?;
        Ok(())
    }

    pub fn into_new(self) -> NewEmployee {
        NewEmployee {
            employee_id: self.employee_id.trim().to_string(),
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            hire_date: self.hire_date,
            department_id: self.department_id,
            position_id: self.position_id,
            salary: self.salary,
            status: self.status,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub department_id: Option<i32>,
    pub position_id: Option<i32>,
    pub salary: Option<f64>,
    pub status: Option<String>,
}

impl UpdateEmployeeRequest {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.gender.is_none()
            && self.date_of_birth.is_none()
            && self.department_id.is_none()
            && self.position_id.is_none()
            && self.salary.is_none()
            && self.status.is_none()
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.is_empty() {
            return Err("No data provided for update");
        }
        if let Some(name) = &self.full_name
            && name.trim().is_empty()
        {
            return Err("full_name cannot be empty");
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(salary) = self.salary {
            validate_salary(salary)?;
        }
        if let Some(status) = &self.status {
            validate_status(status)?;
        }
        Ok(())
    }

    pub fn into_changes(self) -> EmployeeChanges {
        EmployeeChanges {
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            department_id: self.department_id,
            position_id: self.position_id,
            salary: self.salary,
            status: self.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmployeeResponse {
    pub employee_id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub hire_date: NaiveDate,
    pub status: String,
    pub salary: f64,
    pub department_id: i32,
    pub department_name: Option<String>,
    pub position_id: i32,
    pub position_name: Option<String>,
}

impl From<EmployeeRow> for EmployeeResponse {
    fn from(r: EmployeeRow) -> Self {
        Self {
            employee_id: r.employee_id,
            full_name: r.full_name,
            email: r.email,
            phone_number: r.phone_number,
            gender: r.gender,
            date_of_birth: r.date_of_birth,
            hire_date: r.hire_date,
            status: r.status,
            salary: r.salary,
            department_id: r.department_id,
            department_name: r.department_name,
            position_id: r.position_id,
            position_name: r.position_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmployeeIdResponse {
    pub employee_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: serde_json::Value) -> CreateEmployeeRequest {
        serde_json::from_value(body).unwrap()
    }

    fn valid() -> serde_json::Value {
        json!({
            "employee_id": "E10",
            "full_name": "Dana Nguyen",
            "email": "dana@example.com",
            "hire_date": "2024-03-01",
            "department_id": 1,
            "position_id": 2,
            "salary": 1200.0
        })
    }

    #[test]
    fn create_defaults_status_to_active() {
        let req = create(valid());
        assert_eq!(req.status, "Active");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn create_rejects_bad_fields() {
        let mut body = valid();
        body["salary"] = json!(0);
        assert_eq!(create(body).validate(), Err("Salary must be positive"));

        let mut body = valid();
        body["email"] = json!("dana.example.com");
        assert_eq!(create(body).validate(), Err("Invalid email format"));

        let mut body = valid();
        body["status"] = json!("Terminated");
        assert_eq!(
            create(body).validate(),
            Err("Status must be Active or Inactive")
        );
    }

    #[test]
    fn empty_update_is_rejected() {
        let req = UpdateEmployeeRequest::default();
        assert_eq!(req.validate(), Err("No data provided for update"));
    }

    #[test]
    fn partial_update_validates_only_present_fields() {
        let req: UpdateEmployeeRequest =
            serde_json::from_value(json!({"phone_number": "0900"})).unwrap();
        assert!(req.validate().is_ok());

        let req: UpdateEmployeeRequest = serde_json::from_value(json!({"salary": -5})).unwrap();
        assert!(req.validate().is_err());
    }
}
