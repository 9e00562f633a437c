/*
 * Responsibility
 * - Payroll request/response DTOs (salary sheet, salary history, deductions, allowances)
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::repos::payroll_repo::{AllowanceRow, DeductionRow, SalaryHistoryRow, SalaryRow};

#[derive(Debug, Deserialize)]
pub struct SalaryQuery {
    /// `YYYY-MM`; bonuses and deductions are limited to that month when present.
    pub month: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SalaryResponse {
    pub employee_id: String,
    pub full_name: String,
    pub base_salary: f64,
    pub bonus: f64,
    pub deductions: f64,
    pub net_salary: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

impl SalaryResponse {
    pub fn from_row(r: SalaryRow, month: Option<&str>) -> Self {
        let net_salary = r.net_salary();
        Self {
            employee_id: r.employee_id,
            full_name: r.full_name,
            base_salary: r.base_salary,
            bonus: r.bonus,
            deductions: r.deductions,
            net_salary,
            month: month.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SalaryHistoryResponse {
    pub history_id: i32,
    pub employee_id: String,
    pub salary: f64,
    pub effective_date: NaiveDate,
    pub reason: Option<String>,
}

impl From<SalaryHistoryRow> for SalaryHistoryResponse {
    fn from(r: SalaryHistoryRow) -> Self {
        Self {
            history_id: r.history_id,
            employee_id: r.employee_id,
            salary: r.salary,
            effective_date: r.effective_date,
            reason: r.reason,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSalaryRequest {
    pub salary: Option<f64>,
    pub effective_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

impl UpdateSalaryRequest {
    pub const DEFAULT_REASON: &'static str = "Salary Update";

    pub fn validate(&self) -> Result<f64, &'static str> {
        match self.salary {
            Some(s) if s.is_finite() && s > 0.0 => Ok(s),
            _ => Err("Invalid salary value"),
        }
    }

    pub fn reason(&self) -> &str {
        self.reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(Self::DEFAULT_REASON)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateDeductionRequest {
    pub employee_id: String,
    pub amount: f64,
    pub deduction_date: NaiveDate,
    pub description: Option<String>,
}

fn validate_entry(employee_id: &str, amount: f64) -> Result<(), &'static str> {
    if employee_id.trim().is_empty() {
        return Err("employee_id is required");
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err("Amount must be positive");
    }
    Ok(())
}

impl CreateDeductionRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_entry(&self.employee_id, self.amount)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAllowanceRequest {
    pub employee_id: String,
    pub amount: f64,
    pub allowance_date: NaiveDate,
    pub description: Option<String>,
}

impl CreateAllowanceRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_entry(&self.employee_id, self.amount)
    }
}

/// Optional inclusive date filter for deduction and allowance listings.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRangeQuery {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && start > end
        {
            return Err("start_date must not be after end_date");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct DeductionResponse {
    pub deduction_id: i32,
    pub employee_id: String,
    pub amount: f64,
    pub deduction_date: NaiveDate,
    pub description: Option<String>,
}

impl From<DeductionRow> for DeductionResponse {
    fn from(r: DeductionRow) -> Self {
        Self {
            deduction_id: r.deduction_id,
            employee_id: r.employee_id,
            amount: r.amount,
            deduction_date: r.deduction_date,
            description: r.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AllowanceResponse {
    pub allowance_id: i32,
    pub employee_id: String,
    pub amount: f64,
    pub allowance_date: NaiveDate,
    pub description: Option<String>,
}

impl From<AllowanceRow> for AllowanceResponse {
    fn from(r: AllowanceRow) -> Self {
        Self {
            allowance_id: r.allowance_id,
            employee_id: r.employee_id,
            amount: r.amount,
            allowance_date: r.allowance_date,
            description: r.description,
        }
    }
}
