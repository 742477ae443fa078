//! Product Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use northwind_app::domain::{categories::records::CategoryId, products::data::ProductFilter};

use crate::{
    extensions::*,
    pagination::{PaginationResponse, page_request, paginate},
    products::{errors::into_status_error, get::ProductResponse},
};

/// One page of products.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsPageResponse {
    pub pagination: PaginationResponse,
    pub data: Vec<ProductResponse>,
}

/// A present but non-numeric `categoryId` is rejected rather than ignored.
fn category_filter(req: &Request) -> Result<Option<i32>, StatusError> {
    req.query::<String>("categoryId")
        .map(|raw| raw.trim().parse::<i32>())
        .transpose()
        .or_400("categoryId must be an integer")
}

/// Product Index Handler
///
/// Lists products ordered by id. Accepts `pageNumber`, `pageSize` and `categoryId` query
/// parameters; out-of-range paging values are clamped.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductsPageResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let page = page_request(req);
    let category_id = category_filter(req)?;

    let products = state
        .app
        .products
        .list_products(
            ProductFilter {
                category_id: category_id.map(CategoryId::new),
            },
            page,
        )
        .await
        .map_err(into_status_error)?;

    let pagination = paginate(
        res,
        "/api/products",
        &products,
        &[("categoryId", category_id.map(i64::from))],
    )?;

    Ok(Json(ProductsPageResponse {
        pagination,
        data: products.items.into_iter().map(Into::into).collect(),
    }))
}
