/*
 * Responsibility
 * - /auth request/response DTOs (login, register, account listing, identity echoes)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::user_repo::AccountRow;
use crate::services::auth::{Identity, Role};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err("Username and password are required");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IdentityResponse {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl From<Identity> for IdentityResponse {
    fn from(i: Identity) -> Self {
        Self {
            id: i.id,
            username: i.username,
            role: i.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "Status")]
    pub status: bool,
    #[serde(rename = "Message")]
    pub message: &'static str,
    pub token: String,
    #[serde(rename = "Data")]
    pub data: IdentityResponse,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Role>,
    pub employee_id: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().chars().count() < 3 {
            return Err("Username must be at least 3 characters");
        }
        if self.password.chars().count() < 6 {
            return Err("Password must be at least 6 characters");
        }
        if let Some(e) = &self.employee_id
            && e.trim().is_empty()
        {
            return Err("employee_id cannot be empty");
        }
        if self.role() == Role::Employee && self.employee_id.is_none() {
            return Err("employee_id is required for Employee accounts");
        }
        Ok(())
    }

    pub fn role(&self) -> Role {
        self.role.unwrap_or(Role::Employee)
    }
}

#[derive(Debug, Serialize)]
pub struct RegisteredAccount {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub user_id: i32,
    pub username: String,
    pub role: String,
    pub employee_id: Option<String>,
    pub status: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<AccountRow> for AccountResponse {
    fn from(r: AccountRow) -> Self {
        Self {
            user_id: r.user_id,
            username: r.username,
            role: r.role,
            employee_id: r.employee_id,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
            last_login: r.last_login,
        }
    }
}

/// Echo of what a domain guard decided for the caller.
#[derive(Debug, Serialize)]
pub struct AccessCheckResponse {
    pub id: String,
    pub role: Role,
    pub self_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_enforces_minimum_lengths() {
        let mut req = RegisterRequest {
            username: "ab".to_string(),
            password: "secret1".to_string(),
            role: None,
            employee_id: Some("E1".to_string()),
        };
        assert!(req.validate().is_err());

        req.username = "abc".to_string();
        assert!(req.validate().is_ok());

        req.password = "12345".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn employee_accounts_must_link_an_employee() {
        let mut req = RegisterRequest {
            username: "dave".to_string(),
            password: "secret1".to_string(),
            role: Some(Role::Employee),
            employee_id: None,
        };
        assert_eq!(
            req.validate(),
            Err("employee_id is required for Employee accounts")
        );

        req.role = Some(Role::PayrollManager);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn register_defaults_to_employee_role() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "username": "carol",
            "password": "secret1"
        }))
        .unwrap();
        assert_eq!(req.role(), Role::Employee);
    }

    #[test]
    fn register_rejects_unknown_role_string() {
        let res = serde_json::from_value::<RegisterRequest>(serde_json::json!({
            "username": "carol",
            "password": "secret1",
            "role": "Root"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn login_requires_both_fields() {
        let req: LoginRequest = serde_json::from_value(serde_json::json!({"username": "a"})).unwrap();
        assert_eq!(req.validate(), Err("Username and password are required"));
    }
}
