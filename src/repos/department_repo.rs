/*
 * Responsibility
 * - `departments` table (HR database) with manager name and head count
 *
 * Assumed columns:
 *   departments(department_id serial PK, department_name text, description text NULL,
 *               manager_id text NULL REFERENCES employees)
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::retry::{RetryPolicy, with_retry};

#[derive(Debug, Clone, FromRow)]
pub struct DepartmentRow {
    pub department_id: i32,
    pub department_name: String,
    pub description: Option<String>,
    pub manager_id: Option<String>,
    pub manager_name: Option<String>,
    pub total_employees: i64,
}

#[derive(Debug, Clone, Default)]
pub struct DepartmentChanges {
    pub department_name: Option<String>,
    pub description: Option<String>,
    pub manager_id: Option<String>,
}

const SELECT_DEPARTMENT: &str = r#"
    SELECT d.department_id, d.department_name, d.description, d.manager_id,
           m.full_name AS manager_name,
           COUNT(emp.employee_id) AS total_employees
    FROM departments d
    LEFT JOIN employees m ON m.employee_id = d.manager_id
    LEFT JOIN employees emp ON emp.department_id = d.department_id
"#;

const GROUP_DEPARTMENT: &str =
    "GROUP BY d.department_id, d.department_name, d.description, d.manager_id, m.full_name";

#[derive(Clone, Debug)]
pub struct DepartmentRepo {
    pool: PgPool,
    retry: RetryPolicy,
}

impl DepartmentRepo {
    pub fn new(pool: PgPool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    pub async fn list(&self) -> RepoResult<Vec<DepartmentRow>> {
        let sql = format!("{SELECT_DEPARTMENT} {GROUP_DEPARTMENT} ORDER BY d.department_name");
        let sql = sql.as_str();

        with_retry(self.retry, "departments.list", || async move {
            sqlx::query_as::<_, DepartmentRow>(sql)
                .fetch_all(&self.pool)
                .await
                .map_err(RepoError::from)
        })
        .await
    }

    pub async fn get(&self, department_id: i32) -> RepoResult<Option<DepartmentRow>> {
        let sql =
            format!("{SELECT_DEPARTMENT} WHERE d.department_id = $1 {GROUP_DEPARTMENT}");
        let sql = sql.as_str();

        with_retry(self.retry, "departments.get", || async move {
            sqlx::query_as::<_, DepartmentRow>(sql)
                .bind(department_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(RepoError::from)
        })
        .await
    }

    pub async fn create(
        &self,
        department_name: &str,
        description: Option<&str>,
        manager_id: Option<&str>,
    ) -> RepoResult<i32> {
        let (department_id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO departments (department_name, description, manager_id)
            VALUES ($1, $2, $3)
            RETURNING department_id
            "#,
        )
        .bind(department_name)
        .bind(description)
        .bind(manager_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::from_sqlx(e, "department"))?;

        Ok(department_id)
    }

    pub async fn update(&self, department_id: i32, changes: &DepartmentChanges) -> RepoResult<bool> {
        let res = sqlx::query(
            r#"
            UPDATE departments
            SET
                department_name = COALESCE($2, department_name),
                description     = COALESCE($3, description),
                manager_id      = COALESCE($4, manager_id)
            WHERE department_id = $1
            "#,
        )
        .bind(department_id)
        .bind(&changes.department_name)
        .bind(&changes.description)
        .bind(&changes.manager_id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::from_sqlx(e, "department"))?;

        Ok(res.rows_affected() > 0)
    }

    pub async fn count_employees(&self, department_id: i32) -> RepoResult<i64> {
        with_retry(self.retry, "departments.count_employees", || async move {
            let (count,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM employees WHERE department_id = $1")
                    .bind(department_id)
                    .fetch_one(&self.pool)
                    .await?;
            Ok::<_, RepoError>(count)
        })
        .await
    }

    pub async fn delete(&self, department_id: i32) -> RepoResult<bool> {
        let res = sqlx::query("DELETE FROM departments WHERE department_id = $1")
            .bind(department_id)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }
}
