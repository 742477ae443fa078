//! Products Data

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{
    domain::{
        categories::records::CategoryId,
        products::records::{ProductId, ProductRecord},
    },
    patch::{merge, merge_nullable},
    validation::{ValidationError, non_negative, optional_text, required_text},
};

/// Longest accepted product name, in characters.
pub const PRODUCT_NAME_MAX_CHARS: usize = 40;

/// Longest accepted unit descriptor, in characters.
pub const QUANTITY_PER_UNIT_MAX_CHARS: usize = 20;

/// Product listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
}

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub supplier_id: Option<i32>,
    pub category_id: Option<CategoryId>,
    pub quantity_per_unit: Option<String>,
    pub unit_price: Option<Decimal>,
    pub units_in_stock: Option<i16>,
    pub units_on_order: Option<i16>,
    pub reorder_level: Option<i16>,
    pub discontinued: bool,
}

impl NewProduct {
    /// Check the payload before it reaches the store.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is blank, too long or negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.name,
            self.quantity_per_unit.as_deref(),
            self.unit_price,
        )
    }
}

/// Nullable product fields that an update may clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    SupplierId,
    CategoryId,
    QuantityPerUnit,
    UnitPrice,
    UnitsInStock,
    UnitsOnOrder,
    ReorderLevel,
}

impl ProductField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SupplierId => "SupplierID",
            Self::CategoryId => "CategoryID",
            Self::QuantityPerUnit => "QuantityPerUnit",
            Self::UnitPrice => "UnitPrice",
            Self::UnitsInStock => "UnitsInStock",
            Self::UnitsOnOrder => "UnitsOnOrder",
            Self::ReorderLevel => "ReorderLevel",
        }
    }
}

/// Product Update Data
///
/// `None` leaves the stored value untouched; fields listed in `clear` are set to null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub id: ProductId,
    pub name: Option<String>,
    pub supplier_id: Option<i32>,
    pub category_id: Option<CategoryId>,
    pub quantity_per_unit: Option<String>,
    pub unit_price: Option<Decimal>,
    pub units_in_stock: Option<i16>,
    pub units_on_order: Option<i16>,
    pub reorder_level: Option<i16>,
    pub discontinued: Option<bool>,
    pub clear: SmallVec<[ProductField; 4]>,
}

impl ProductUpdate {
    /// An update that only carries the identity.
    #[must_use]
    pub fn for_product(id: ProductId) -> Self {
        Self {
            id,
            name: None,
            supplier_id: None,
            category_id: None,
            quantity_per_unit: None,
            unit_price: None,
            units_in_stock: None,
            units_on_order: None,
            reorder_level: None,
            discontinued: None,
            clear: SmallVec::new(),
        }
    }

    /// Merge the supplied fields onto `record` and re-validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is both supplied and cleared, or the merged record is invalid.
    pub fn apply_to(self, record: &mut ProductRecord) -> Result<(), ValidationError> {
        let mut merged = record.clone();
        let clears = |field: ProductField| self.clear.contains(&field);

        merge(&mut merged.name, self.name);
        merge(&mut merged.discontinued, self.discontinued);

        merge_nullable(
            ProductField::SupplierId.as_str(),
            &mut merged.supplier_id,
            self.supplier_id,
            clears(ProductField::SupplierId),
        )?;
        merge_nullable(
            ProductField::CategoryId.as_str(),
            &mut merged.category_id,
            self.category_id,
            clears(ProductField::CategoryId),
        )?;
        merge_nullable(
            ProductField::QuantityPerUnit.as_str(),
            &mut merged.quantity_per_unit,
            self.quantity_per_unit,
            clears(ProductField::QuantityPerUnit),
        )?;
        merge_nullable(
            ProductField::UnitPrice.as_str(),
            &mut merged.unit_price,
            self.unit_price,
            clears(ProductField::UnitPrice),
        )?;
        merge_nullable(
            ProductField::UnitsInStock.as_str(),
            &mut merged.units_in_stock,
            self.units_in_stock,
            clears(ProductField::UnitsInStock),
        )?;
        merge_nullable(
            ProductField::UnitsOnOrder.as_str(),
            &mut merged.units_on_order,
            self.units_on_order,
            clears(ProductField::UnitsOnOrder),
        )?;
        merge_nullable(
            ProductField::ReorderLevel.as_str(),
            &mut merged.reorder_level,
            self.reorder_level,
            clears(ProductField::ReorderLevel),
        )?;

        validate_fields(
            &merged.name,
            merged.quantity_per_unit.as_deref(),
            merged.unit_price,
        )?;

        *record = merged;

        Ok(())
    }
}

fn validate_fields(
    name: &str,
    quantity_per_unit: Option<&str>,
    unit_price: Option<Decimal>,
) -> Result<(), ValidationError> {
    required_text("ProductName", name, PRODUCT_NAME_MAX_CHARS)?;
    optional_text(
        ProductField::QuantityPerUnit.as_str(),
        quantity_per_unit,
        QUANTITY_PER_UNIT_MAX_CHARS,
    )?;
    non_negative(ProductField::UnitPrice.as_str(), unit_price)
}
