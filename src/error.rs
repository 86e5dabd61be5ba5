use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::templates::{not_found_page, server_error_page};

/// Request-level faults, rendered as the static error pages
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(ref what) => {
                tracing::debug!("Not found: {}", what);
                (StatusCode::NOT_FOUND, Html(not_found_page().into_string())).into_response()
            }
            Self::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                server_error()
            }
        }
    }
}

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(server_error_page().into_string()),
    )
        .into_response()
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Outcome of a create/edit/delete, distinguishing why a write did not land
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("{0}")]
    Validation(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Connection failure: {0}")]
    Connection(String),

    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for PersistError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg))
            | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                return Self::ConstraintViolation(msg);
            }
            _ => {}
        }

        match err {
            DbErr::Conn(e) => Self::Connection(e.to_string()),
            DbErr::ConnectionAcquire(e) => Self::Connection(e.to_string()),
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => Self::NotFound,
            other => Self::Database(other),
        }
    }
}

impl PersistError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type PersistResult<T> = std::result::Result<T, PersistError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn test_connection_errors_are_classified() {
        let err = PersistError::from(DbErr::Conn(RuntimeErr::Internal("refused".into())));
        assert!(matches!(err, PersistError::Connection(msg) if msg.contains("refused")));
    }

    #[test]
    fn test_missing_record_maps_to_not_found() {
        let err = PersistError::from(DbErr::RecordNotFound("venue 7".into()));
        assert!(matches!(err, PersistError::NotFound));
        assert!(matches!(PersistError::from(DbErr::RecordNotUpdated), PersistError::NotFound));
    }

    #[test]
    fn test_other_errors_keep_the_cause() {
        let err = PersistError::from(DbErr::Custom("boom".into()));
        assert!(matches!(err, PersistError::Database(DbErr::Custom(ref m)) if m == "boom"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_not_found_renders_404_page() {
        let response = AppError::NotFound("venue 1".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_database_error_renders_500_page() {
        let response = AppError::Database(DbErr::Custom("boom".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
