//! Get Product Handler

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use northwind_app::domain::products::records::{ProductId, ProductRecord};

use crate::{extensions::*, products::errors::into_status_error};

/// Product Response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ProductResponse {
    #[serde(rename = "ProductID")]
    pub product_id: i32,

    pub product_name: String,

    #[serde(rename = "SupplierID")]
    pub supplier_id: Option<i32>,

    #[serde(rename = "CategoryID")]
    pub category_id: Option<i32>,

    pub quantity_per_unit: Option<String>,

    #[salvo(schema(value_type = Option<f64>))]
    pub unit_price: Option<Decimal>,

    pub units_in_stock: Option<i16>,

    pub units_on_order: Option<i16>,

    pub reorder_level: Option<i16>,

    pub discontinued: bool,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            product_id: product.id.into_inner(),
            product_name: product.name,
            supplier_id: product.supplier_id,
            category_id: product.category_id.map(Into::into),
            quantity_per_unit: product.quantity_per_unit,
            unit_price: product.unit_price,
            units_in_stock: product.units_in_stock,
            units_on_order: product.units_on_order,
            reorder_level: product.reorder_level,
            discontinued: product.discontinued,
        }
    }
}

/// Get Product Handler
///
/// Returns a single product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Negative product id"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<i32>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let product = state
        .app
        .products
        .get_product(ProductId::new(id.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
