use axum::http::StatusCode;
use thiserror::Error;
use tracing::{error, warn};

/// Failure of a model-layer operation.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    /// Foreign-key, unique or not-null violation reported by the store.
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Database(sqlx::Error),
    /// Server-side fault outside the store, e.g. password hashing.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ModelResult<T> = Result<T, ModelError>;

impl ModelError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<sqlx::Error> for ModelError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            // SQLSTATE class 23: integrity constraint violation
            if db.code().is_some_and(|code| code.starts_with("23")) {
                return Self::Constraint(db.message().to_string());
            }
        }
        Self::Database(e)
    }
}

/// Maps a model failure onto the `(StatusCode, String)` rejection used by handlers.
pub(crate) fn reject(e: ModelError) -> (StatusCode, String) {
    match e {
        ModelError::NotFound { .. } => (StatusCode::NOT_FOUND, e.to_string()),
        ModelError::Invalid(_) => {
            warn!(error = %e, "rejected invalid input");
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        ModelError::Constraint(_) => {
            warn!(error = %e, "store constraint violated");
            (StatusCode::CONFLICT, e.to_string())
        }
        ModelError::Database(_) => {
            error!(error = %e, "database error");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        ModelError::Internal(_) => {
            error!(error = %e, "internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let (status, msg) = reject(ModelError::not_found("card", "abc123xyz"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(msg, "card abc123xyz not found");
    }

    #[test]
    fn constraint_maps_to_conflict() {
        let (status, _) = reject(ModelError::Constraint("boards_lists_board_id_fkey".into()));
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn internal_maps_to_500_without_detail() {
        let (status, msg) = reject(ModelError::internal("argon2: salt too short"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, "internal server error");
    }

    #[test]
    fn row_not_found_stays_a_database_error() {
        let e = ModelError::from(sqlx::Error::RowNotFound);
        assert!(matches!(e, ModelError::Database(_)));
        assert_eq!(reject(e).0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
