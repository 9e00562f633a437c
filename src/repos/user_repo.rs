/*
 * Responsibility
 * - Accounts (`users` table, payroll database)
 * - Login lookup, account listing, registration, last-login bookkeeping
 *
 * Assumed columns:
 *   users(user_id serial PK, username text UNIQUE, password_hash text, role text,
 *         employee_id text NULL, status boolean, created_at timestamptz,
 *         updated_at timestamptz, last_login timestamptz NULL)
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::retry::{RetryPolicy, with_retry};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: i32,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub employee_id: Option<String>,
    pub status: bool,
}

/// Subjects of accounts without a linked employee live in their own `user:<id>`
/// namespace so they never equal an employee id.
pub const ACCOUNT_SUBJECT_PREFIX: &str = "user:";

impl UserRow {
    pub fn linked_employee_id(&self) -> Option<&str> {
        self.employee_id
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Token subject: the linked employee id when present, else `user:<user_id>`.
    pub fn subject_id(&self) -> String {
        match self.linked_employee_id() {
            Some(e) => e.to_string(),
            None => format!("{ACCOUNT_SUBJECT_PREFIX}{}", self.user_id),
        }
    }
}

/// The account id behind a `user:<id>` subject; `None` for employee subjects.
pub fn account_subject(subject: &str) -> Option<i32> {
    subject.strip_prefix(ACCOUNT_SUBJECT_PREFIX)?.parse().ok()
}

/// Account listing row; never carries the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub user_id: i32,
    pub username: String,
    pub role: String,
    pub employee_id: Option<String>,
    pub status: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug)]
pub struct UserRepo {
    pool: PgPool,
    retry: RetryPolicy,
}

impl UserRepo {
    pub fn new(pool: PgPool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<UserRow>> {
        with_retry(self.retry, "users.find_by_username", || async move {
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT user_id, username, password_hash, role, employee_id, status
                FROM users
                WHERE username = $1
                "#,
            )
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from)
        })
        .await
    }

    /// Resolve a token subject back to its account (see [`UserRow::subject_id`]).
    pub async fn find_by_subject(&self, subject: &str) -> RepoResult<Option<AccountRow>> {
        let account_id = account_subject(subject);
        with_retry(self.retry, "users.find_by_subject", || async move {
            sqlx::query_as::<_, AccountRow>(
                r#"
                SELECT user_id, username, role, employee_id, status,
                       created_at, updated_at, last_login
                FROM users
                WHERE ($2::int IS NULL AND employee_id = $1)
                   OR ($2::int IS NOT NULL AND user_id = $2
                       AND (employee_id IS NULL OR btrim(employee_id) = ''))
                LIMIT 1
                "#,
            )
            .bind(subject)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepoError::from)
        })
        .await
    }

    pub async fn list(&self) -> RepoResult<Vec<AccountRow>> {
        with_retry(self.retry, "users.list", || async move {
            sqlx::query_as::<_, AccountRow>(
                r#"
                SELECT user_id, username, role, employee_id, status,
                       created_at, updated_at, last_login
                FROM users
                ORDER BY user_id
                "#,
            )
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from)
        })
        .await
    }

    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
        employee_id: Option<&str>,
    ) -> RepoResult<i32> {
        let (user_id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO users (username, password_hash, role, employee_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, true, now(), now())
            RETURNING user_id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::from_sqlx(e, "username"))?;

        Ok(user_id)
    }

    pub async fn touch_last_login(&self, user_id: i32) -> RepoResult<u64> {
        let res = sqlx::query(
            r#"
            UPDATE users
            SET last_login = now()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(user_id: i32, employee_id: Option<&str>) -> UserRow {
        UserRow {
            user_id,
            username: "alice".to_string(),
            password_hash: String::new(),
            role: "Employee".to_string(),
            employee_id: employee_id.map(str::to_string),
            status: true,
        }
    }

    #[test]
    fn subject_prefers_linked_employee_id() {
        assert_eq!(row(7, Some("E1")).subject_id(), "E1");
        assert_eq!(row(7, None).subject_id(), "user:7");
        assert_eq!(row(7, Some(" ")).subject_id(), "user:7");
    }

    #[test]
    fn unlinked_subject_never_equals_a_numeric_employee_id() {
        let unlinked = row(7, None);
        let linked = row(9, Some("7"));
        assert_ne!(unlinked.subject_id(), linked.subject_id());
        assert_eq!(unlinked.linked_employee_id(), None);
    }

    #[test]
    fn account_subject_only_parses_prefixed_ids() {
        assert_eq!(account_subject("user:7"), Some(7));
        assert_eq!(account_subject("7"), None);
        assert_eq!(account_subject("E1"), None);
        assert_eq!(account_subject("user:abc"), None);
    }
}
