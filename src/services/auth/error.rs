use thiserror::Error;

/// Why a request was refused by the auth layer.
///
/// The first three are authentication failures (401) and look identical to clients.
/// `InsufficientRole` is an authorization failure (403).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no credential presented")]
    MissingCredential,

    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    #[error("credential expired")]
    ExpiredCredential,

    #[error("{0}")]
    InsufficientRole(String),
}

impl AuthError {
    pub fn is_authentication_failure(&self) -> bool {
        !matches!(self, AuthError::InsufficientRole(_))
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredCredential,
            ErrorKind::InvalidSignature => {
                AuthError::InvalidCredential("signature mismatch".to_string())
            }
            _ => AuthError::InvalidCredential(e.to_string()),
        }
    }
}
