/*
 * Responsibility
 * - SQL access, one repo per table group
 * - HR database: employees, departments, attendance
 * - Payroll database: users, salaries, salary history, deductions
 */
pub mod attendance_repo;
pub mod department_repo;
pub mod employee_repo;
pub mod error;
pub mod payroll_repo;
pub mod retry;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use department_repo::DepartmentRepo;
pub use employee_repo::EmployeeRepo;
pub use payroll_repo::PayrollRepo;
pub use user_repo::UserRepo;
