/*
 * Responsibility
 * - v1 URL layout
 * - public: /health, /auth/login, /auth/logout, /auth/roles
 * - everything else goes through the access middleware (route_layer) and then the
 *   per-domain Access<D> extractors in the handlers
 */
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::api::v1::handlers::{attendance, auth, departments, employees, health, payroll};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(middleware::auth::access::apply(protected_routes(), state))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/roles", get(auth::roles))
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(employee_routes())
        .merge(department_routes())
        .merge(attendance_routes())
        .merge(payroll_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/check-auth", get(auth::check_auth))
        .route("/auth/test-auth", get(auth::test_auth))
        .route("/auth/test-admin", get(auth::test_admin))
        .route("/auth/test-employee", get(auth::test_employee))
        .route("/auth/test-employee/{employee_id}", get(auth::test_employee))
        .route("/auth/test-payroll", get(auth::test_payroll))
        .route("/auth/test-payroll/{employee_id}", get(auth::test_payroll))
        .route("/auth/users", get(auth::list_users))
        .route("/auth/register", post(auth::register))
}

fn employee_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/employees/{employee_id}",
            get(employees::get_employee).put(employees::update_employee),
        )
}

fn department_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/departments",
            get(departments::list_departments).post(departments::create_department),
        )
        .route(
            "/departments/{department_id}",
            get(departments::get_department)
                .put(departments::update_department)
                .delete(departments::delete_department),
        )
}

fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/attendance/daily/{year}/{month}",
            get(attendance::daily_attendance),
        )
        .route(
            "/attendance/monthly/{year}/{month}",
            get(attendance::monthly_attendance),
        )
        .route(
            "/attendance/summary/{year}/{month}",
            get(attendance::attendance_summary),
        )
}

fn payroll_routes() -> Router<AppState> {
    Router::new()
        .route("/payroll/salary", get(payroll::salaries))
        .route("/payroll/salary/{employee_id}", put(payroll::update_salary))
        .route(
            "/payroll/salary-history/{employee_id}",
            get(payroll::salary_history),
        )
        .route("/payroll/deductions", post(payroll::add_deduction))
        .route("/payroll/deductions/{employee_id}", get(payroll::deductions))
        .route(
            "/payroll/deductions/{employee_id}/{deduction_id}",
            delete(payroll::delete_deduction),
        )
        .route("/payroll/allowances", post(payroll::add_allowance))
        .route("/payroll/allowances/{employee_id}", get(payroll::allowances))
        .route(
            "/payroll/allowances/{employee_id}/{allowance_id}",
            delete(payroll::delete_allowance),
        )
}
