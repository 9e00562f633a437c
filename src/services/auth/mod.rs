pub mod access_jwt;
pub mod claim_cache;
pub mod claims;
pub mod error;
pub mod jwt;
pub mod password;
pub mod policy;
pub mod role;

pub use access_jwt::AuthService;
pub use claim_cache::{BoundedClaimCache, ClaimCache};
pub use claims::{Claims, Identity};
pub use error::AuthError;
pub use jwt::{IssuedToken, JwtIssuer};
pub use policy::{Domain, MethodKind, Scope, authorize, require_role};
pub use role::Role;
