use serde::{Deserialize, Deserializer, Serialize};

use crate::services::auth::role::Role;

/// Token payload.
///
/// - `id` is the subject: an employee id such as `"E1"` for linked accounts, otherwise the
///   numeric account id. Numeric ids in older tokens are accepted and normalized to strings.
/// - `exp` is optional on the wire; the authenticator decides what a missing value means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(deserialize_with = "subject_id")]
    pub id: String,
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Verified caller, as handed to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl From<Claims> for Identity {
    fn from(c: Claims) -> Self {
        Self {
            id: c.id,
            username: c.username,
            role: c.role,
        }
    }
}

fn subject_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    let id = match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    };

    if id.trim().is_empty() {
        return Err(serde::de::Error::custom("empty 'id' claim"));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_subject_is_normalized_to_string() {
        let claims: Claims = serde_json::from_value(json!({
            "id": 42,
            "username": "admin",
            "role": "Admin",
            "exp": 1_700_000_000
        }))
        .unwrap();

        assert_eq!(claims.id, "42");
        assert_eq!(claims.exp, Some(1_700_000_000));
    }

    #[test]
    fn missing_exp_is_allowed_and_not_serialized() {
        let claims: Claims = serde_json::from_value(json!({
            "id": "E1",
            "username": "alice",
            "role": "Employee"
        }))
        .unwrap();
        assert_eq!(claims.exp, None);

        let back = serde_json::to_value(&claims).unwrap();
        assert!(back.get("exp").is_none());
    }

    #[test]
    fn empty_subject_is_rejected() {
        let res = serde_json::from_value::<Claims>(json!({
            "id": "  ",
            "username": "alice",
            "role": "Employee"
        }));
        assert!(res.is_err());
    }
}
