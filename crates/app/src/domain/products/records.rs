//! Product Records

use rust_decimal::Decimal;

use crate::{domain::categories::records::CategoryId, ids::TypedId};

/// Product ID
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub supplier_id: Option<i32>,
    pub category_id: Option<CategoryId>,
    pub quantity_per_unit: Option<String>,
    pub unit_price: Option<Decimal>,
    pub units_in_stock: Option<i16>,
    pub units_on_order: Option<i16>,
    pub reorder_level: Option<i16>,
    pub discontinued: bool,

    /// Row version, bumped by every successful write.
    pub version: i64,
}
