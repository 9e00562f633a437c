/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - pools for health checks, repos, token verifier/issuer, clock
 * - Cloned per request; everything inside is Arc or cheap to clone
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppEnv;
use crate::repos::{AttendanceRepo, DepartmentRepo, EmployeeRepo, PayrollRepo, UserRepo};
use crate::repos::retry::RetryPolicy;
use crate::services::auth::{AuthService, JwtIssuer};
use crate::services::clock::Clock;

#[derive(Clone)]
pub struct AppState {
    pub app_env: AppEnv,
    pub hr_db: PgPool,
    pub payroll_db: PgPool,

    pub auth: Arc<AuthService>,
    pub issuer: Arc<JwtIssuer>,
    pub clock: Arc<dyn Clock>,
    pub bcrypt_cost: u32,

    pub users: UserRepo,
    pub employees: EmployeeRepo,
    pub departments: DepartmentRepo,
    pub attendance: AttendanceRepo,
    pub payroll: PayrollRepo,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        app_env: AppEnv,
        hr_db: PgPool,
        payroll_db: PgPool,
        retry: RetryPolicy,
        auth: Arc<AuthService>,
        issuer: Arc<JwtIssuer>,
        clock: Arc<dyn Clock>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            app_env,
            users: UserRepo::new(payroll_db.clone(), retry),
            employees: EmployeeRepo::new(hr_db.clone(), retry),
            departments: DepartmentRepo::new(hr_db.clone(), retry),
            attendance: AttendanceRepo::new(hr_db.clone(), retry),
            payroll: PayrollRepo::new(payroll_db.clone(), retry),
            hr_db,
            payroll_db,
            auth,
            issuer,
            clock,
            bcrypt_cost,
        }
    }

    /// Today's date according to the injected clock (UTC).
    pub fn today(&self) -> chrono::NaiveDate {
        chrono::DateTime::from_timestamp(self.clock.now_ts(), 0)
            .unwrap_or_default()
            .date_naive()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("app_env", &self.app_env)
            .field("auth", &self.auth)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
