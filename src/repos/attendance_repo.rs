/*
 * Responsibility
 * - `attendance` table (HR database): daily rows, per-employee monthly summary and
 *   per-department counts
 *
 * Assumed columns:
 *   attendance(attendance_id serial PK, employee_id text, date date, check_in time NULL,
 *              check_out time NULL, status text ('Present' | 'Absent' | 'Leave'),
 *              work_hours float8 NULL, late_minutes int NULL, overtime float8 NULL)
 *
 * Every query takes a half-open date range `[start, end)`.
 */
use chrono::{NaiveDate, NaiveTime};
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::retry::{RetryPolicy, with_retry};

#[derive(Debug, Clone, FromRow)]
pub struct DailyAttendanceRow {
    pub attendance_id: i32,
    pub employee_id: String,
    pub employee_name: String,
    pub department: Option<String>,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: String,
    pub work_hours: Option<f64>,
    pub late_minutes: Option<i32>,
    pub overtime: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct MonthlyAttendanceRow {
    pub employee_id: String,
    pub employee_name: String,
    pub department: Option<String>,
    pub present_days: i64,
    pub absent_days: i64,
    pub leave_days: i64,
    pub late_days: i64,
    pub total_work_hours: Option<f64>,
}

/// Counts for one department, or for everyone when `department` is absent.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceCountsRow {
    pub department: Option<String>,
    pub total_employees: i64,
    pub total_present: i64,
    pub total_absent: i64,
    pub total_late: i64,
}

#[derive(Clone, Debug)]
pub struct AttendanceRepo {
    pool: PgPool,
    retry: RetryPolicy,
}

impl AttendanceRepo {
    pub fn new(pool: PgPool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    pub async fn daily(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        employee_id: Option<&str>,
    ) -> RepoResult<Vec<DailyAttendanceRow>> {
        with_retry(self.retry, "attendance.daily", || async move {
            sqlx::query_as::<_, DailyAttendanceRow>(
                r#"
                SELECT a.attendance_id, a.employee_id, e.full_name AS employee_name,
                       d.department_name AS department, a.date, a.check_in, a.check_out,
                       a.status, a.work_hours, a.late_minutes, a.overtime
                FROM attendance a
                JOIN employees e ON e.employee_id = a.employee_id
                LEFT JOIN departments d ON d.department_id = e.department_id
                WHERE a.date >= $1 AND a.date < $2
                  AND ($3::text IS NULL OR a.employee_id = $3)
                ORDER BY a.date DESC, a.employee_id
                "#,
            )
            .bind(start)
            .bind(end)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from)
        })
        .await
    }

    pub async fn monthly(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        employee_id: Option<&str>,
    ) -> RepoResult<Vec<MonthlyAttendanceRow>> {
        with_retry(self.retry, "attendance.monthly", || async move {
            sqlx::query_as::<_, MonthlyAttendanceRow>(
                r#"
                SELECT e.employee_id, e.full_name AS employee_name,
                       d.department_name AS department,
                       COUNT(*) FILTER (WHERE a.status = 'Present') AS present_days,
                       COUNT(*) FILTER (WHERE a.status = 'Absent')  AS absent_days,
                       COUNT(*) FILTER (WHERE a.status = 'Leave')   AS leave_days,
                       COUNT(*) FILTER (WHERE a.late_minutes > 0)   AS late_days,
                       SUM(a.work_hours)::float8 AS total_work_hours
                FROM employees e
                LEFT JOIN departments d ON d.department_id = e.department_id
                LEFT JOIN attendance a
                       ON a.employee_id = e.employee_id
                      AND a.date >= $1 AND a.date < $2
                WHERE ($3::text IS NULL OR e.employee_id = $3)
                GROUP BY e.employee_id, e.full_name, d.department_name
                ORDER BY d.department_name, e.full_name
                "#,
            )
            .bind(start)
            .bind(end)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from)
        })
        .await
    }

    pub async fn department_counts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        employee_id: Option<&str>,
    ) -> RepoResult<Vec<AttendanceCountsRow>> {
        with_retry(self.retry, "attendance.department_counts", || async move {
            sqlx::query_as::<_, AttendanceCountsRow>(
                r#"
                SELECT d.department_name AS department,
                       COUNT(DISTINCT e.employee_id)                AS total_employees,
                       COUNT(*) FILTER (WHERE a.status = 'Present')    AS total_present,
                       COUNT(*) FILTER (WHERE a.status = 'Absent')     AS total_absent,
                       COUNT(*) FILTER (WHERE a.late_minutes > 0)      AS total_late
                FROM departments d
                JOIN employees e ON e.department_id = d.department_id
                LEFT JOIN attendance a
                       ON a.employee_id = e.employee_id
                      AND a.date >= $1 AND a.date < $2
                WHERE ($3::text IS NULL OR e.employee_id = $3)
                GROUP BY d.department_name
                ORDER BY d.department_name
                "#,
            )
            .bind(start)
            .bind(end)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from)
        })
        .await
    }

    pub async fn overall_counts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        employee_id: Option<&str>,
    ) -> RepoResult<AttendanceCountsRow> {
        with_retry(self.retry, "attendance.overall_counts", || async move {
            sqlx::query_as::<_, AttendanceCountsRow>(
                r#"
                SELECT NULL::text AS department,
                       COUNT(DISTINCT e.employee_id)                AS total_employees,
                       COUNT(*) FILTER (WHERE a.status = 'Present')    AS total_present,
                       COUNT(*) FILTER (WHERE a.status = 'Absent')     AS total_absent,
                       COUNT(*) FILTER (WHERE a.late_minutes > 0)      AS total_late
                FROM employees e
                LEFT JOIN attendance a
                       ON a.employee_id = e.employee_id
                      AND a.date >= $1 AND a.date < $2
                WHERE ($3::text IS NULL OR e.employee_id = $3)
                "#,
            )
            .bind(start)
            .bind(end)
            .bind(employee_id)
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::from)
        })
        .await
    }
}
