//! Products service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product id cannot be negative")]
    NegativeId,

    #[error("product id does not match the target product")]
    IdMismatch,

    #[error("invalid product: {0}")]
    InvalidData(#[from] ValidationError),

    #[error("product not found")]
    NotFound,

    #[error("product was modified concurrently")]
    Conflict,

    #[error("store rejected the product write")]
    WriteFailure(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProductsServiceError {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            ProductsServiceError::from(Error::RowNotFound),
            ProductsServiceError::NotFound
        ));
    }

    #[test]
    fn closed_pool_maps_to_sql() {
        assert!(matches!(
            ProductsServiceError::from(Error::PoolClosed),
            ProductsServiceError::Sql(_)
        ));
    }

    #[test]
    fn validation_errors_convert() {
        let error = ProductsServiceError::from(ValidationError::Required {
            field: "ProductName",
        });

        assert_eq!(error.to_string(), "invalid product: ProductName is required");
    }
}
