//! Create Category Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use northwind_app::domain::categories::data::NewCategory;

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse, picture},
    extensions::*,
};

/// Create Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CreateCategoryRequest {
    pub category_name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Base64-encoded image
    #[serde(default)]
    pub picture: Option<String>,
}

impl TryFrom<CreateCategoryRequest> for NewCategory {
    type Error = StatusError;

    fn try_from(request: CreateCategoryRequest) -> Result<Self, Self::Error> {
        Ok(NewCategory {
            picture: picture::decode(request.picture.as_deref())?,
            name: request.category_name,
            description: request.description,
        })
    }
}

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid category payload"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "The store rejected the category"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let category = NewCategory::try_from(json.into_inner())?;

    let created = state
        .app
        .categories
        .create_category(category)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/categories/{}", created.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(category_id = %created.id, "created category");

    Ok(Json(created.into()))
}
