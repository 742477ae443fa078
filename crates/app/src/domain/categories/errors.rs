//! Categories service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum CategoriesServiceError {
    #[error("category id cannot be negative")]
    NegativeId,

    #[error("category id does not match the target category")]
    IdMismatch,

    #[error("invalid category: {0}")]
    InvalidData(#[from] ValidationError),

    #[error("category not found")]
    NotFound,

    #[error("category was modified concurrently")]
    Conflict,

    #[error("store rejected the category write")]
    WriteFailure(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CategoriesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation,
            ) => Self::WriteFailure(error),
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
