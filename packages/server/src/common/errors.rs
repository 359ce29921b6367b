use thiserror::Error;

/// Domain errors with a stable, client-visible code per condition.
///
/// Validation and authorization failures surface synchronously through the
/// GraphQL layer; storage-level conflicts from racing writes are translated
/// into the matching variant instead of leaking a raw database error.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("A resolved location is required for this operation")]
    LocationRequired,

    #[error("A swipe already exists for this item")]
    DuplicateSwipe,

    #[error("Item is not available for swiping")]
    ItemUnavailable,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Match has already been {0}")]
    MatchResolved(String),

    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    /// Stable error code exposed to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotFound(_) => "NOT_FOUND",
            DomainError::Forbidden(_) => "FORBIDDEN",
            DomainError::LocationRequired => "LOCATION_REQUIRED",
            DomainError::DuplicateSwipe => "DUPLICATE_SWIPE",
            DomainError::ItemUnavailable => "ITEM_UNAVAILABLE",
            DomainError::InvalidInput(_) => "INVALID_INPUT",
            DomainError::MatchResolved(_) => "MATCH_RESOLVED",
            DomainError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            DomainError::Database(_) => "INTERNAL",
            DomainError::Internal(_) => "INTERNAL",
        }
    }
}

/// Convenience alias for effect-layer results.
pub type DomainResult<T> = Result<T, DomainError>;

/// True when the error (possibly wrapped by anyhow) is a Postgres
/// unique-constraint violation on the named constraint or index.
pub fn is_unique_violation(err: &anyhow::Error, constraint: &str) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db| db.is_unique_violation() && db.constraint() == Some(constraint))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(DomainError::NotFound("Item").code(), "NOT_FOUND");
        assert_eq!(DomainError::DuplicateSwipe.code(), "DUPLICATE_SWIPE");
        assert_eq!(DomainError::ItemUnavailable.code(), "ITEM_UNAVAILABLE");
        assert_eq!(DomainError::LocationRequired.code(), "LOCATION_REQUIRED");
        assert_eq!(
            DomainError::MatchResolved("accepted".into()).code(),
            "MATCH_RESOLVED"
        );
    }

    #[test]
    fn test_non_sqlx_error_is_not_unique_violation() {
        let err = anyhow::anyhow!("some other failure");
        assert!(!is_unique_violation(&err, "swipes_voter_item_key"));
    }
}
