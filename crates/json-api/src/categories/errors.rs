//! Category Errors

use salvo::http::StatusError;
use tracing::error;

use northwind_app::domain::categories::CategoriesServiceError;

pub(crate) fn into_status_error(error: CategoriesServiceError) -> StatusError {
    match error {
        CategoriesServiceError::NegativeId => {
            StatusError::bad_request().brief("Category id cannot be negative")
        }
        CategoriesServiceError::IdMismatch => {
            StatusError::bad_request().brief("CategoryID does not match the category in the path")
        }
        CategoriesServiceError::InvalidData(reason) => {
            StatusError::bad_request().brief(format!("Invalid category payload: {reason}"))
        }
        CategoriesServiceError::NotFound => StatusError::not_found().brief("Category not found"),
        CategoriesServiceError::Conflict => StatusError::conflict()
            .brief("Category was modified by another request; reload and try again"),
        CategoriesServiceError::WriteFailure(source) => {
            error!("store rejected category write: {source}");

            StatusError::internal_server_error()
                .brief("The category could not be saved; it may still be used by products")
        }
        CategoriesServiceError::Sql(source) => {
            error!("category storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
