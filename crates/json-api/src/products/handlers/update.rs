//! Update Product Handler

use rust_decimal::Decimal;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use northwind_app::domain::{
    categories::records::CategoryId,
    products::{
        data::{ProductField, ProductUpdate},
        records::ProductId,
    },
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
};

/// Product fields that may be reset to null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) enum ClearableProductField {
    #[serde(rename = "SupplierID")]
    SupplierId,
    #[serde(rename = "CategoryID")]
    CategoryId,
    QuantityPerUnit,
    UnitPrice,
    UnitsInStock,
    UnitsOnOrder,
    ReorderLevel,
}

impl From<ClearableProductField> for ProductField {
    fn from(field: ClearableProductField) -> Self {
        match field {
            ClearableProductField::SupplierId => ProductField::SupplierId,
            ClearableProductField::CategoryId => ProductField::CategoryId,
            ClearableProductField::QuantityPerUnit => ProductField::QuantityPerUnit,
            ClearableProductField::UnitPrice => ProductField::UnitPrice,
            ClearableProductField::UnitsInStock => ProductField::UnitsInStock,
            ClearableProductField::UnitsOnOrder => ProductField::UnitsOnOrder,
            ClearableProductField::ReorderLevel => ProductField::ReorderLevel,
        }
    }
}

/// Update Product Request
///
/// Omitted and `null` fields keep their stored values. List a field under `Clear` to
/// reset it to null.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct UpdateProductRequest {
    /// Must equal the id in the path
    #[serde(rename = "ProductID")]
    pub product_id: i32,

    #[serde(default)]
    pub product_name: Option<String>,

    #[serde(default, rename = "SupplierID")]
    pub supplier_id: Option<i32>,

    #[serde(default, rename = "CategoryID")]
    pub category_id: Option<i32>,

    #[serde(default)]
    pub quantity_per_unit: Option<String>,

    #[serde(default)]
    #[salvo(schema(value_type = Option<f64>))]
    pub unit_price: Option<Decimal>,

    #[serde(default)]
    pub units_in_stock: Option<i16>,

    #[serde(default)]
    pub units_on_order: Option<i16>,

    #[serde(default)]
    pub reorder_level: Option<i16>,

    #[serde(default)]
    pub discontinued: Option<bool>,

    #[serde(default)]
    pub clear: SmallVec<[ClearableProductField; 4]>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            id: ProductId::new(request.product_id),
            name: request.product_name,
            supplier_id: request.supplier_id,
            category_id: request.category_id.map(CategoryId::new),
            quantity_per_unit: request.quantity_per_unit,
            unit_price: request.unit_price,
            units_in_stock: request.units_in_stock,
            units_on_order: request.units_on_order,
            reorder_level: request.reorder_level,
            discontinued: request.discontinued,
            clear: request.clear.into_iter().map(Into::into).collect(),
        }
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid payload or mismatched ProductID"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Product was modified concurrently"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(id, json, depot),
    fields(
        product_id = tracing::field::Empty,
        cleared = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    id: PathParam<i32>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let product = ProductId::new(id.into_inner());
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("product_id", tracing::field::display(product));
    span.record("cleared", request.clear.len());

    let updated = state
        .app
        .products
        .update_product(product, request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(product_id = %product, version = updated.version, "updated product");

    Ok(Json(updated.into()))
}
