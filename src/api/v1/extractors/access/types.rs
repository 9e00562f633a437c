/*
 * Responsibility
 * - One tag type + alias per data domain
 * - Everything declared pub here is re-exported through ./mod.rs
 */
use super::core::{Access, DomainTag};
use crate::services::auth::Domain;

// employees
pub enum EmployeesTag {}
impl DomainTag for EmployeesTag {
    const DOMAIN: Domain = Domain::Employees;
}
pub type EmployeesAccess = Access<EmployeesTag>;

// departments
pub enum DepartmentsTag {}
impl DomainTag for DepartmentsTag {
    const DOMAIN: Domain = Domain::Departments;
}
pub type DepartmentsAccess = Access<DepartmentsTag>;

// attendance
pub enum AttendanceTag {}
impl DomainTag for AttendanceTag {
    const DOMAIN: Domain = Domain::Attendance;
}
pub type AttendanceAccess = Access<AttendanceTag>;

// payroll
pub enum PayrollTag {}
impl DomainTag for PayrollTag {
    const DOMAIN: Domain = Domain::Payroll;
}
pub type PayrollAccess = Access<PayrollTag>;

// accounts
pub enum AccountsTag {}
impl DomainTag for AccountsTag {
    const DOMAIN: Domain = Domain::Accounts;
}
pub type AccountsAccess = Access<AccountsTag>;
