//! Get Category Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use northwind_app::domain::categories::records::{CategoryId, CategoryRecord};

use crate::{
    categories::{errors::into_status_error, picture},
    extensions::*,
};

/// Category Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CategoryResponse {
    #[serde(rename = "CategoryID")]
    pub category_id: i32,

    pub category_name: String,

    pub description: Option<String>,

    /// Base64-encoded image
    pub picture: Option<String>,
}

impl From<CategoryRecord> for CategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        CategoryResponse {
            category_id: category.id.into_inner(),
            category_name: category.name,
            description: category.description,
            picture: category.picture.as_deref().map(picture::encode),
        }
    }
}

/// Get Category Handler
#[endpoint(
    tags("categories"),
    summary = "Get Category",
    responses(
        (status_code = StatusCode::OK, description = "Category found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Negative category id"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i32>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let category = state
        .app
        .categories
        .get_category(CategoryId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}
