/*
 * Responsibility
 * - Payroll database: base salaries, bonuses, salary history, deductions, allowances
 * - Salary changes update the base salary and append history in one transaction
 *
 * Assumed columns:
 *   salaries(employee_id text PK, full_name text, base_salary float8)
 *   salary_history(history_id serial PK, employee_id text, salary float8,
 *                  effective_date date, reason text NULL)
 *   deductions(deduction_id serial PK, employee_id text, amount float8,
 *              deduction_date date, description text NULL)
 *   allowances(allowance_id serial PK, employee_id text, amount float8,
 *              allowance_date date, description text NULL)
 *   bonuses(bonus_id serial PK, employee_id text, amount float8, bonus_date date)
 */
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::retry::{RetryPolicy, with_retry};

#[derive(Debug, Clone, FromRow)]
pub struct SalaryRow {
    pub employee_id: String,
    pub full_name: String,
    pub base_salary: f64,
    pub bonus: f64,
    pub deductions: f64,
}

impl SalaryRow {
    /// Base salary plus bonuses minus deductions for the sheet's period.
    pub fn net_salary(&self) -> f64 {
        self.base_salary + self.bonus - self.deductions
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct SalaryHistoryRow {
    pub history_id: i32,
    pub employee_id: String,
    pub salary: f64,
    pub effective_date: NaiveDate,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DeductionRow {
    pub deduction_id: i32,
    pub employee_id: String,
    pub amount: f64,
    pub deduction_date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AllowanceRow {
    pub allowance_id: i32,
    pub employee_id: String,
    pub amount: f64,
    pub allowance_date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SalaryChange<'a> {
    pub salary: f64,
    pub effective_date: NaiveDate,
    pub reason: &'a str,
}

#[derive(Clone, Debug)]
pub struct PayrollRepo {
    pool: PgPool,
    retry: RetryPolicy,
}

impl PayrollRepo {
    pub fn new(pool: PgPool, retry: RetryPolicy) -> Self {
        Self { pool, retry }
    }

    /// Salary sheet. Bonuses and deductions are summed over `[start, end)` when a period
    /// is given, otherwise over all time.
    pub async fn salaries(
        &self,
        period: Option<(NaiveDate, NaiveDate)>,
        employee_id: Option<&str>,
    ) -> RepoResult<Vec<SalaryRow>> {
        let (start, end) = period.unzip();

        with_retry(self.retry, "payroll.salaries", || async move {
            sqlx::query_as::<_, SalaryRow>(
                r#"
                SELECT s.employee_id, s.full_name, s.base_salary,
                       COALESCE(b.total, 0)::float8 AS bonus,
                       COALESCE(d.total, 0)::float8 AS deductions
                FROM salaries s
                LEFT JOIN (
                    SELECT employee_id, SUM(amount) AS total
                    FROM bonuses
                    WHERE ($1::date IS NULL OR bonus_date >= $1)
                      AND ($2::date IS NULL OR bonus_date < $2)
                    GROUP BY employee_id
                ) b ON b.employee_id = s.employee_id
                LEFT JOIN (
                    SELECT employee_id, SUM(amount) AS total
                    FROM deductions
                    WHERE ($1::date IS NULL OR deduction_date >= $1)
                      AND ($2::date IS NULL OR deduction_date < $2)
                    GROUP BY employee_id
                ) d ON d.employee_id = s.employee_id
                WHERE ($3::text IS NULL OR s.employee_id = $3)
                ORDER BY s.employee_id
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

    pub async fn salary_history(&self, employee_id: &str) -> RepoResult<Vec<SalaryHistoryRow>> {
        with_retry(self.retry, "payroll.salary_history", || async move {
            sqlx::query_as::<_, SalaryHistoryRow>(
                r#"
                SELECT history_id, employee_id, salary, effective_date, reason
                FROM salary_history
                WHERE employee_id = $1
                ORDER BY effective_date DESC, history_id DESC
                "#,
            )
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from)
        })
        .await
    }

    /// Returns `false` (and writes nothing) when the employee has no salary record.
    pub async fn update_salary(
        &self,
        employee_id: &str,
        change: &SalaryChange<'_>,
    ) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE salaries SET base_salary = $2 WHERE employee_id = $1")
            .bind(employee_id)
            .bind(change.salary)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO salary_history (employee_id, salary, effective_date, reason)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(employee_id)
        .bind(change.salary)
        .bind(change.effective_date)
        .bind(change.reason)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    pub async fn add_deduction(
        &self,
        employee_id: &str,
        amount: f64,
        deduction_date: NaiveDate,
        description: Option<&str>,
    ) -> RepoResult<DeductionRow> {
        let row = sqlx::query_as::<_, DeductionRow>(
            r#"
            INSERT INTO deductions (employee_id, amount, deduction_date, description)
            VALUES ($1, $2, $3, $4)
            RETURNING deduction_id, employee_id, amount, deduction_date, description
            "#,
        )
        .bind(employee_id)
        .bind(amount)
        .bind(deduction_date)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::from_sqlx(e, "deduction"))?;

        Ok(row)
    }

    /// Both bounds inclusive.
    pub async fn deductions(
        &self,
        employee_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RepoResult<Vec<DeductionRow>> {
        with_retry(self.retry, "payroll.deductions", || async move {
            sqlx::query_as::<_, DeductionRow>(
                r#"
                SELECT deduction_id, employee_id, amount, deduction_date, description
                FROM deductions
                WHERE employee_id = $1
                  AND ($2::date IS NULL OR deduction_date >= $2)
                  AND ($3::date IS NULL OR deduction_date <= $3)
                ORDER BY deduction_date DESC, deduction_id DESC
                "#,
            )
            .bind(employee_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from)
        })
        .await
    }

    pub async fn delete_deduction(&self, employee_id: &str, deduction_id: i32) -> RepoResult<bool> {
        let res = sqlx::query("DELETE FROM deductions WHERE deduction_id = $1 AND employee_id = $2")
            .bind(deduction_id)
            .bind(employee_id)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }

    pub async fn add_allowance(
        &self,
        employee_id: &str,
        amount: f64,
        allowance_date: NaiveDate,
        description: Option<&str>,
    ) -> RepoResult<AllowanceRow> {
        let row = sqlx::query_as::<_, AllowanceRow>(
            r#"
            INSERT INTO allowances (employee_id, amount, allowance_date, description)
            VALUES ($1, $2, $3, $4)
            RETURNING allowance_id, employee_id, amount, allowance_date, description
            "#,
        )
        .bind(employee_id)
        .bind(amount)
        .bind(allowance_date)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepoError::from_sqlx(e, "allowance"))?;

        Ok(row)
    }

    /// Both bounds inclusive.
    pub async fn allowances(
        &self,
        employee_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RepoResult<Vec<AllowanceRow>> {
        with_retry(self.retry, "payroll.allowances", || async move {
            sqlx::query_as::<_, AllowanceRow>(
                r#"
                SELECT allowance_id, employee_id, amount, allowance_date, description
                FROM allowances
                WHERE employee_id = $1
                  AND ($2::date IS NULL OR allowance_date >= $2)
                  AND ($3::date IS NULL OR allowance_date <= $3)
                ORDER BY allowance_date DESC, allowance_id DESC
                "#,
            )
            .bind(employee_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(RepoError::from)
        })
        .await
    }

    pub async fn delete_allowance(&self, employee_id: &str, allowance_id: i32) -> RepoResult<bool> {
        let res = sqlx::query("DELETE FROM allowances WHERE allowance_id = $1 AND employee_id = $2")
            .bind(allowance_id)
            .bind(employee_id)
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_salary_adds_bonus_and_subtracts_deductions() {
        let row = SalaryRow {
            employee_id: "E1".to_string(),
            full_name: "Alice".to_string(),
            base_salary: 10_000.0,
            bonus: 1_000.0,
            deductions: 500.0,
        };
        assert_eq!(row.net_salary(), 10_500.0);
    }
}
