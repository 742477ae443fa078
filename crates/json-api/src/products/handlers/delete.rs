//! Delete Product Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use northwind_app::domain::products::records::ProductId;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
};

/// Delete Product Handler
///
/// Returns the removed product.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i32>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let deleted = state
        .app
        .products
        .delete_product(ProductId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_id = %deleted.id, "deleted product");

    Ok(Json(deleted.into()))
}
