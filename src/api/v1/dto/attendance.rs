use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::repos::attendance_repo::{
    AttendanceCountsRow, DailyAttendanceRow, MonthlyAttendanceRow,
};

#[derive(Debug, Serialize)]
pub struct DailyAttendanceResponse {
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

impl From<DailyAttendanceRow> for DailyAttendanceResponse {
    fn from(r: DailyAttendanceRow) -> Self {
        Self {
            attendance_id: r.attendance_id,
            employee_id: r.employee_id,
            employee_name: r.employee_name,
            department: r.department,
            date: r.date,
            check_in: r.check_in,
            check_out: r.check_out,
            status: r.status,
            work_hours: r.work_hours,
            late_minutes: r.late_minutes,
            overtime: r.overtime,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MonthlyAttendanceResponse {
    pub employee_id: String,
    pub employee_name: String,
    pub department: Option<String>,
    pub present_days: i64,
    pub absent_days: i64,
    pub leave_days: i64,
    pub late_days: i64,
    pub total_work_hours: f64,
}

impl From<MonthlyAttendanceRow> for MonthlyAttendanceResponse {
    fn from(r: MonthlyAttendanceRow) -> Self {
        Self {
            employee_id: r.employee_id,
            employee_name: r.employee_name,
            department: r.department,
            present_days: r.present_days,
            absent_days: r.absent_days,
            leave_days: r.leave_days,
            late_days: r.late_days,
            total_work_hours: r.total_work_hours.unwrap_or(0.0),
        }
    }
}

/// Percentage of `count` over `total`, one decimal place. Zero when nobody is counted.
pub fn rate(count: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

#[derive(Debug, Serialize)]
pub struct DepartmentAttendanceStats {
    pub department: Option<String>,
    pub total_employees: i64,
    pub total_present: i64,
    pub total_absent: i64,
    pub total_late: i64,
    pub present_rate: f64,
    pub absent_rate: f64,
    pub late_rate: f64,
}

impl From<AttendanceCountsRow> for DepartmentAttendanceStats {
    fn from(r: AttendanceCountsRow) -> Self {
        Self {
            present_rate: rate(r.total_present, r.total_employees),
            absent_rate: rate(r.total_absent, r.total_employees),
            late_rate: rate(r.total_late, r.total_employees),
            department: r.department,
            total_employees: r.total_employees,
            total_present: r.total_present,
            total_absent: r.total_absent,
            total_late: r.total_late,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OverallAttendanceStats {
    pub total_employees: i64,
    pub total_present: i64,
    pub total_absent: i64,
    pub total_late: i64,
    pub average_present_rate: f64,
    pub average_absent_rate: f64,
    pub average_late_rate: f64,
}

impl From<AttendanceCountsRow> for OverallAttendanceStats {
    fn from(r: AttendanceCountsRow) -> Self {
        Self {
            average_present_rate: rate(r.total_present, r.total_employees),
            average_absent_rate: rate(r.total_absent, r.total_employees),
            average_late_rate: rate(r.total_late, r.total_employees),
            total_employees: r.total_employees,
            total_present: r.total_present,
            total_absent: r.total_absent,
            total_late: r.total_late,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttendanceSummaryResponse {
    pub department_stats: Vec<DepartmentAttendanceStats>,
    pub overall_stats: OverallAttendanceStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(total_employees: i64, present: i64, absent: i64, late: i64) -> AttendanceCountsRow {
        AttendanceCountsRow {
            department: Some("Engineering".to_string()),
            total_employees,
            total_present: present,
            total_absent: absent,
            total_late: late,
        }
    }

    #[test]
    fn rate_rounds_to_one_decimal() {
        assert_eq!(rate(1, 3), 33.3);
        assert_eq!(rate(2, 3), 66.7);
        assert_eq!(rate(3, 3), 100.0);
    }

    #[test]
    fn empty_department_has_zero_rates() {
        let stats = DepartmentAttendanceStats::from(counts(0, 0, 0, 0));
        assert_eq!(stats.present_rate, 0.0);
        assert_eq!(stats.absent_rate, 0.0);
        assert_eq!(stats.late_rate, 0.0);
    }

    #[test]
    fn overall_rates_are_relative_to_headcount() {
        let stats = OverallAttendanceStats::from(counts(4, 60, 6, 3));
        assert_eq!(stats.average_present_rate, 1500.0);
        assert_eq!(stats.average_absent_rate, 150.0);
        assert_eq!(stats.average_late_rate, 75.0);
        assert_eq!(stats.total_employees, 4);
    }
}
