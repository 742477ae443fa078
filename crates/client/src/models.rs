//! Wire models.

use base64::{DecodeError, Engine as _, engine::general_purpose::STANDARD};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::links::PageLinks;

/// Product as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(rename = "ProductID")]
    pub product_id: i32,
    pub product_name: String,
    #[serde(rename = "SupplierID")]
    pub supplier_id: Option<i32>,
    #[serde(rename = "CategoryID")]
    pub category_id: Option<i32>,
    pub quantity_per_unit: Option<String>,
    pub unit_price: Option<Decimal>,
    pub units_in_stock: Option<i16>,
    pub units_on_order: Option<i16>,
    pub reorder_level: Option<i16>,
    pub discontinued: bool,
}

/// Category as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Category {
    #[serde(rename = "CategoryID")]
    pub category_id: i32,
    pub category_name: String,
    pub description: Option<String>,
    /// Base64-encoded image
    pub picture: Option<String>,
}

impl Category {
    /// Decode the picture bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the server sent malformed base64.
    pub fn picture_bytes(&self) -> Result<Option<Vec<u8>>, DecodeError> {
        self.picture.as_deref().map(|p| STANDARD.decode(p)).transpose()
    }
}

/// Product to create; the server assigns the identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewProduct {
    pub product_name: String,
    #[serde(rename = "SupplierID", skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i32>,
    #[serde(rename = "CategoryID", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_per_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units_in_stock: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units_on_order: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<i16>,
    pub discontinued: bool,
}

/// Category to create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewCategory {
    pub category_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base64-encoded image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Nullable product fields that an update may reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProductField {
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

/// Partial product update. Unset fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(rename = "SupplierID", skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i32>,
    #[serde(rename = "CategoryID", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_per_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units_in_stock: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units_on_order: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discontinued: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clear: Vec<ProductField>,
}

/// Nullable category fields that an update may reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CategoryField {
    Description,
    Picture,
}

/// Partial category update. Unset fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clear: Vec<CategoryField>,
}

/// List window for products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListProducts {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub category_id: Option<i32>,
}

/// List window for categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCategories {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub total_pages: i64,
    #[serde(default)]
    pub next_page_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageBody<T> {
    pub(crate) pagination: Pagination,
    pub(crate) data: Vec<T>,
}

/// One page of a list plus the navigation advertised in the `Link` header.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedResponse<T> {
    pub pagination: Pagination,
    pub data: Vec<T>,
    pub links: PageLinks,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_update_sends_only_what_is_set() -> TestResult {
        let update = ProductUpdate {
            unit_price: Some(Decimal::new(1_950, 2)),
            clear: vec![ProductField::CategoryId],
            ..ProductUpdate::default()
        };

        assert_eq!(
            serde_json::to_value(&update)?,
            json!({ "UnitPrice": 19.5, "Clear": ["CategoryID"] })
        );

        Ok(())
    }

    #[test]
    fn category_picture_is_decoded() -> TestResult {
        let category = Category {
            category_id: 1,
            category_name: "Beverages".to_string(),
            description: None,
            picture: Some("R0lGODlh".to_string()),
        };

        assert_eq!(category.picture_bytes()?, Some(b"GIF89a".to_vec()));

        Ok(())
    }
}
