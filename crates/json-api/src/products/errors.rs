//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use northwind_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NegativeId => {
            StatusError::bad_request().brief("Product id cannot be negative")
        }
        ProductsServiceError::IdMismatch => {
            StatusError::bad_request().brief("ProductID does not match the product in the path")
        }
        ProductsServiceError::InvalidData(reason) => {
            StatusError::bad_request().brief(format!("Invalid product payload: {reason}"))
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Conflict => StatusError::conflict()
            .brief("Product was modified by another request; reload and try again"),
        ProductsServiceError::WriteFailure(source) => {
            error!("store rejected product write: {source}");

            StatusError::internal_server_error().brief("The product could not be saved")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
