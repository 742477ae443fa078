//! Delete Category Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use northwind_app::domain::categories::records::CategoryId;

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse},
    extensions::*,
};

/// Delete Category Handler
///
/// Returns the removed category. Categories still referenced by products cannot be
/// deleted.
#[endpoint(
    tags("categories"),
    summary = "Delete Category",
    responses(
        (status_code = StatusCode::OK, description = "Category deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Category is still in use"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i32>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let deleted = state
        .app
        .categories
        .delete_category(CategoryId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    tracing::info!(category_id = %deleted.id, "deleted category");

    Ok(Json(deleted.into()))
}
