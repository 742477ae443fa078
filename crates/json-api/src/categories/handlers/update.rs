//! Update Category Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use northwind_app::domain::categories::{
    data::{CategoryField, CategoryUpdate},
    records::CategoryId,
};

use crate::{
    categories::{errors::into_status_error, get::CategoryResponse, picture},
    extensions::*,
};

/// Category fields that may be reset to null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) enum ClearableCategoryField {
    Description,
    Picture,
}

impl From<ClearableCategoryField> for CategoryField {
    fn from(field: ClearableCategoryField) -> Self {
        match field {
            ClearableCategoryField::Description => CategoryField::Description,
            ClearableCategoryField::Picture => CategoryField::Picture,
        }
    }
}

/// Update Category Request
///
/// Omitted and `null` fields keep their stored values; list a field under `Clear` to
/// reset it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct UpdateCategoryRequest {
    /// Must equal the id in the path
    #[serde(rename = "CategoryID")]
    pub category_id: i32,

    #[serde(default)]
    pub category_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Base64-encoded image
    #[serde(default)]
    pub picture: Option<String>,

    #[serde(default)]
    pub clear: SmallVec<[ClearableCategoryField; 2]>,
}

impl TryFrom<UpdateCategoryRequest> for CategoryUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateCategoryRequest) -> Result<Self, Self::Error> {
        Ok(CategoryUpdate {
            picture: picture::decode(request.picture.as_deref())?,
            id: CategoryId::new(request.category_id),
            name: request.category_name,
            description: request.description,
            clear: request.clear.into_iter().map(Into::into).collect(),
        })
    }
}

/// Category Update Handler
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload or mismatched CategoryID"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::CONFLICT, description = "Category was modified concurrently"),
    ),
)]
#[tracing::instrument(
    name = "categories.update",
    skip(id, json, depot),
    fields(category_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<i32>,
    json: JsonBody<UpdateCategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let category = CategoryId::new(id.into_inner());
    let update = CategoryUpdate::try_from(json.into_inner())?;

    tracing::Span::current().record("category_id", tracing::field::display(category));

    let updated = state
        .app
        .categories
        .update_category(category, update)
        .await
        .map_err(into_status_error)?;

    tracing::info!(category_id = %category, version = updated.version, "updated category");

    Ok(Json(updated.into()))
}
