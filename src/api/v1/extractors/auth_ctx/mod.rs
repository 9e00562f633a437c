/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the verified caller (AuthCtx) to handlers
 * - axum-facing code lives in core, plain types in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 * - TokenSource
 */

mod core;
mod types;

pub use self::core::AuthCtxExtractor;
pub use self::types::{AuthCtx, TokenSource};
