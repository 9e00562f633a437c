pub mod attendance;
pub mod auth;
pub mod common;
pub mod departments;
pub mod employees;
pub mod payroll;

pub use common::ApiResponse;
