pub mod access;
pub mod auth_ctx;

pub use access::*;
pub use auth_ctx::{AuthCtx, AuthCtxExtractor, TokenSource};
