/*
 * Responsibility
 * - What a repo tells the layers above when a query fails
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[source] sqlx::Error),
    /// Connection-level failure: the database could not be reached in time.
    #[error("db unavailable")]
    Unavailable(#[source] sqlx::Error),
    /// Unique constraint violated (`23505`); carries the resource name.
    #[error("conflict: {0}")]
    Conflict(&'static str),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    /// Classify a sqlx error. `resource` names what a unique violation collided on.
    pub fn from_sqlx(e: sqlx::Error, resource: &'static str) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some("23505")
        {
            return RepoError::Conflict(resource);
        }
        if is_transient(&e) {
            return RepoError::Unavailable(e);
        }
        RepoError::Db(e)
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, RepoError::Unavailable(_))
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        if is_transient(&e) {
            RepoError::Unavailable(e)
        } else {
            RepoError::Db(e)
        }
    }
}

fn is_transient(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeouts_are_transient() {
        assert!(RepoError::from(sqlx::Error::PoolTimedOut).is_transient());
        assert!(RepoError::from_sqlx(sqlx::Error::PoolClosed, "employee").is_transient());
    }

    #[test]
    fn row_not_found_is_not_transient() {
        let e = RepoError::from_sqlx(sqlx::Error::RowNotFound, "employee");
        assert!(matches!(e, RepoError::Db(_)));
        assert!(!e.is_transient());
    }
}
