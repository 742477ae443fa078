//! Category Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse},
    extensions::*,
    pagination::{PaginationResponse, page_request, paginate},
};

/// One page of categories.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesPageResponse {
    pub pagination: PaginationResponse,
    pub data: Vec<CategoryResponse>,
}

/// Category Index Handler
///
/// Lists categories ordered by id, paged by `pageNumber` and `pageSize`.
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoriesPageResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let categories = state
        .app
        .categories
        .list_categories(page_request(req))
        .await
        .map_err(into_status_error)?;

    let pagination = paginate(res, "/api/categories", &categories, &[])?;

    Ok(Json(CategoriesPageResponse {
        pagination,
        data: categories.items.into_iter().map(Into::into).collect(),
    }))
}
