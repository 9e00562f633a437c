/*
 * Responsibility
 * - `employees` table (HR database), joined with departments / positions for display
 *
 * Assumed columns:
 *   employees(employee_id text PK, full_name text, email text NULL, phone_number text NULL,
 *             gender text NULL, date_of_birth date NULL, hire_date date,
 *             department_id int, position_id int, salary float8, status text)
 *   positions(position_id int PK, position_name text)
 */
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::retry::{RetryPolicy, with_retry};

#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
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

#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeFilter<'a> {
    pub department_id: Option<i32>,
    pub status: Option<&'a str>,
    /// Narrow to one employee (self-scoped callers).
    pub employee_id: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct NewEmployee {
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
    pub status: String,
}

/// Partial update; `None` leaves the column as is.
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
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

const SELECT_EMPLOYEE: &str = r#"
    SELECT e.employee_id, e.full_name, e.email, e.phone_number, e.gender,
           e.date_of_birth, e.hire_date, e.status, e.salary,
           e.department_id, d.department_name,
           e.position_id, p.position_name
    FROM employees e
    LEFT JOIN departments d ON d.department_id = e.department_id
    LEFT JOIN positions p ON p.position_id = e.position_id
"#;

#[derive(Clone, Debug)]
pub struct EmployeeRepo {
    pool: PgPool,
    retry: RetryPolicy,
}

impl EmployeeRepo {
    pub fn new(pool: PgPool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    pub async fn list(&self, filter: EmployeeFilter<'_>) -> RepoResult<Vec<EmployeeRow>> {
        let sql = format!(
            "{SELECT_EMPLOYEE}
            WHERE ($1::int IS NULL OR e.department_id = $1)
              AND ($2::text IS NULL OR e.status = $2)
              AND ($3::text IS NULL OR e.employee_id = $3)
            ORDER BY e.employee_id"
        );
        let sql = sql.as_str();

        with_retry(self.retry, "employees.list", || async move {
            sqlx::query_as::<_, EmployeeRow>(sql)
                .bind(filter.department_id)
                .bind(filter.status)
                .bind(filter.employee_id)
                .fetch_all(&self.pool)
                .await
                .map_err(RepoError::from)
        })
        .await
    }

    pub async fn get(&self, employee_id: &str) -> RepoResult<Option<EmployeeRow>> {
        let sql = format!("{SELECT_EMPLOYEE} WHERE e.employee_id = $1");
        let sql = sql.as_str();

        with_retry(self.retry, "employees.get", || async move {
            sqlx::query_as::<_, EmployeeRow>(sql)
                .bind(employee_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(RepoError::from)
        })
        .await
    }

    pub async fn create(&self, new: &NewEmployee) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO employees
                (employee_id, full_name, email, phone_number, gender, date_of_birth,
                 hire_date, department_id, position_id, salary, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(&new.employee_id)
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.phone_number)
        .bind(&new.gender)
        .bind(new.date_of_birth)
        .bind(new.hire_date)
        .bind(new.department_id)
        .bind(new.position_id)
        .bind(new.salary)
        .bind(&new.status)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::from_sqlx(e, "employee"))?;

        Ok(())
    }

    /// Returns `false` when no employee has this id.
    pub async fn update(&self, employee_id: &str, changes: &EmployeeChanges) -> RepoResult<bool> {
        let res = sqlx::query(
            r#"
            UPDATE employees
            SET
                full_name     = COALESCE($2, full_name),
                email         = COALESCE($3, email),
                phone_number  = COALESCE($4, phone_number),
                gender        = COALESCE($5, gender),
                date_of_birth = COALESCE($6, date_of_birth),
                department_id = COALESCE($7, department_id),
                position_id   = COALESCE($8, position_id),
                salary        = COALESCE($9, salary),
                status        = COALESCE($10, status)
            WHERE employee_id = $1
            "#,
        )
        .bind(employee_id)
        .bind(&changes.full_name)
        .bind(&changes.email)
        .bind(&changes.phone_number)
        .bind(&changes.gender)
        .bind(changes.date_of_birth)
        .bind(changes.department_id)
        .bind(changes.position_id)
        .bind(changes.salary)
        .bind(&changes.status)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::from_sqlx(e, "employee"))?;

        Ok(res.rows_affected() > 0)
    }
}
