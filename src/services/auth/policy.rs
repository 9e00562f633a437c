//! Role x domain x method permission table.
//!
//! Every protected route names the data domain it touches; the caller's role and the
//! request method pick a [`Grant`] out of [`MATRIX`], and the grant (plus the path
//! subject, if any) turns into a [`Scope`] or a refusal.
use axum::http::Method;

use crate::services::auth::claims::Identity;
use crate::services::auth::error::AuthError;
use crate::services::auth::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Employees = 0,
    Departments = 1,
    Attendance = 2,
    Payroll = 3,
    Accounts = 4,
}

impl Domain {
    pub const COUNT: usize = 5;

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Employees => "employee",
            Domain::Departments => "department",
            Domain::Attendance => "attendance",
            Domain::Payroll => "payroll",
            Domain::Accounts => "account",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Read,
    Write,
}

impl From<&Method> for MethodKind {
    fn from(m: &Method) -> Self {
        if m == Method::GET || m == Method::HEAD || m == Method::OPTIONS {
            MethodKind::Read
        } else {
            MethodKind::Write
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    Full,
    ReadOnly,
    /// Reads restricted to the caller's own records.
    OwnReadOnly,
    Deny,
}

use Grant::{Deny, Full, OwnReadOnly, ReadOnly};

/// Indexed by `[Role::index()][Domain::index()]`.
pub const MATRIX: [[Grant; Domain::COUNT]; Role::COUNT] = [
    // Employees   Departments  Attendance   Payroll      Accounts
    [Full, Full, Full, Full, Full],                    // Admin
    [Full, Full, Full, ReadOnly, Deny],                // HR Manager
    [ReadOnly, ReadOnly, ReadOnly, Full, Deny],        // Payroll Manager
    [OwnReadOnly, ReadOnly, OwnReadOnly, OwnReadOnly, Deny], // Employee
];

pub fn grant(role: Role, domain: Domain) -> Grant {
    MATRIX[role.index()][domain.index()]
}

/// How much of a domain the handler may expose to this caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    All,
    /// Only records belonging to this subject id.
    Own(String),
}

impl Scope {
    pub fn is_self_only(&self) -> bool {
        matches!(self, Scope::Own(_))
    }

    /// Subject filter for list queries; `None` means unfiltered.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Scope::All => None,
            Scope::Own(id) => Some(id.as_str()),
        }
    }
}

/// Decide access for `identity` on `domain`.
///
/// `subject` is the employee id taken from the request path, when the route has one.
pub fn authorize(
    identity: &Identity,
    domain: Domain,
    method: MethodKind,
    subject: Option<&str>,
) -> Result<Scope, AuthError> {
    match (grant(identity.role, domain), method) {
        (Full, _) | (ReadOnly, MethodKind::Read) => Ok(Scope::All),

        (ReadOnly, MethodKind::Write) => Err(AuthError::InsufficientRole(format!(
            "{} cannot modify {} data",
            identity.role,
            domain.as_str()
        ))),

        (OwnReadOnly, MethodKind::Read) => match subject {
            Some(s) if s != identity.id => Err(AuthError::InsufficientRole(format!(
                "You can only access your own {} data",
                domain.as_str()
            ))),
            _ => Ok(Scope::Own(identity.id.clone())),
        },

        (OwnReadOnly, MethodKind::Write) => Err(AuthError::InsufficientRole(format!(
            "{} cannot modify {} data",
            identity.role,
            domain.as_str()
        ))),

        (Deny, _) => Err(AuthError::InsufficientRole("Access denied".to_string())),
    }
}

/// Plain membership check for routes guarded by an explicit role list.
pub fn require_role(identity: &Identity, allowed: &[Role]) -> Result<(), AuthError> {
    if allowed.contains(&identity.role) {
        return Ok(());
    }

    let names: Vec<&str> = allowed.iter().map(|r| r.as_str()).collect();
    Err(AuthError::InsufficientRole(format!(
        "Access denied. Required roles: {}",
        names.join(", ")
    )))
}
