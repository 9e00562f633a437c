/*
 * Responsibility
 * - Response envelope shared by every endpoint: `{ "Status": true, "Data" | "Message" }`
 * - Small parsing helpers for path / query values
 */
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    #[serde(rename = "Status")]
    pub status: bool,
    #[serde(rename = "Message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "Data", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Parse a path segment, answering 400 with `invalid <what>` on failure.
pub fn parse_path<T: FromStr>(raw: &str, what: &'static str) -> Result<T, AppError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::bad_request(format!("Invalid {what}")))
}

/// A calendar month as the half-open range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthPeriod {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self { start, end })
    }

    /// `YYYY-MM`
    pub fn parse(raw: &str) -> Option<Self> {
        let (y, m) = raw.trim().split_once('-')?;
        if y.len() != 4 || m.len() != 2 {
            return None;
        }
        Self::new(y.parse().ok()?, m.parse().ok()?)
    }

    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.start.year(), self.start.month())
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_period_handles_december_rollover() {
        let p = MonthPeriod::new(2024, 12).unwrap();
        assert_eq!(p.start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(p.end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn month_period_rejects_out_of_range_month() {
        assert!(MonthPeriod::new(2024, 0).is_none());
        assert!(MonthPeriod::new(2024, 13).is_none());
    }

    #[test]
    fn month_period_parses_year_month() {
        assert_eq!(MonthPeriod::parse("2024-02").unwrap().label(), "2024-02");
        assert!(MonthPeriod::parse("2024-2").is_none());
        assert!(MonthPeriod::parse("2024/02").is_none());
        assert!(MonthPeriod::parse("2024-13").is_none());
    }

    #[test]
    fn envelope_omits_absent_fields() {
        let v = serde_json::to_value(ApiResponse::message("done")).unwrap();
        assert_eq!(v, serde_json::json!({"Status": true, "Message": "done"}));

        let v = serde_json::to_value(ApiResponse::data(vec![1, 2])).unwrap();
        assert_eq!(v, serde_json::json!({"Status": true, "Data": [1, 2]}));
    }
}
