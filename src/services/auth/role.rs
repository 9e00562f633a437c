use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Access level carried in every token.
///
/// The wire form is the human-readable name (`"HR Manager"`), which is also what the
/// accounts table stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Admin")]
    Admin = 0,
    #[serde(rename = "HR Manager")]
    HrManager = 1,
    #[serde(rename = "Payroll Manager")]
    PayrollManager = 2,
    #[serde(rename = "Employee")]
    Employee = 3,
}

impl Role {
    pub const COUNT: usize = 4;

    pub const ALL: [Role; Role::COUNT] = [
        Role::Admin,
        Role::HrManager,
        Role::PayrollManager,
        Role::Employee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::HrManager => "HR Manager",
            Role::PayrollManager => "Payroll Manager",
            Role::Employee => "Employee",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim())
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip_through_serde_and_from_str() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            assert_eq!(serde_json::from_str::<Role>(&json).unwrap(), role);
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("Manager".parse::<Role>().is_err());
        assert!(serde_json::from_str::<Role>("\"HR_MANAGER\"").is_err());
    }

    #[test]
    fn index_matches_all_order() {
        for (i, role) in Role::ALL.into_iter().enumerate() {
            assert_eq!(role.index(), i);
        }
    }
}
