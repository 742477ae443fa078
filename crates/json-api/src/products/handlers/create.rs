//! Create Product Handler

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use northwind_app::domain::{categories::records::CategoryId, products::data::NewProduct};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
};

/// Create Product Request
///
/// Any `ProductID` in the body is ignored; the store assigns one.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CreateProductRequest {
    pub product_name: String,

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
    pub discontinued: bool,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(request: CreateProductRequest) -> Self {
        NewProduct {
            name: request.product_name,
            supplier_id: request.supplier_id,
            category_id: request.category_id.map(CategoryId::new),
            quantity_per_unit: request.quantity_per_unit,
            unit_price: request.unit_price,
            units_in_stock: request.units_in_stock,
            units_on_order: request.units_on_order,
            reorder_level: request.reorder_level,
            discontinued: request.discontinued,
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid product payload"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "The store rejected the product"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let product = state
        .app
        .products
        .create_product(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/api/products/{}", product.id), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(product_id = %product.id, "created product");

    Ok(Json(product.into()))
}
