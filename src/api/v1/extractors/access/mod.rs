/*!
 * Domain access guard
 *
 * Responsibility:
 * - Turn (caller role, data domain, HTTP method, path `employee_id`) into a Scope
 *   before the handler body runs
 *
 * Public API:
 * - Access<D> and the per-domain aliases in types
 */

mod core;
mod types;

pub use self::core::{Access, DomainTag, SUBJECT_PARAM};
pub use self::types::*;
