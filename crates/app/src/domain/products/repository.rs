//! Products Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::UpdateOutcome,
    domain::{
        categories::records::CategoryId,
        products::{
            data::NewProduct,
            records::{ProductId, ProductRecord},
        },
    },
    pagination::PageRequest,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const PRODUCT_EXISTS_SQL: &str = include_str!("sql/product_exists.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Option<CategoryId>,
        page: PageRequest,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(category.map(CategoryId::into_inner))
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Option<CategoryId>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .bind(category.map(CategoryId::into_inner))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn product_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(PRODUCT_EXISTS_SQL)
            .bind(product.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(&product.name)
            .bind(product.supplier_id)
            .bind(product.category_id.map(CategoryId::into_inner))
            .bind(product.quantity_per_unit.as_deref())
            .bind(product.unit_price)
            .bind(product.units_in_stock)
            .bind(product.units_on_order)
            .bind(product.reorder_level)
            .bind(product.discontinued)
            .fetch_one(&mut **tx)
            .await
    }

    /// Write `product` only if its stored version still equals `product.version`.
    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &ProductRecord,
    ) -> Result<UpdateOutcome<ProductRecord>, sqlx::Error> {
        let updated = query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.id.into_inner())
            .bind(product.version)
            .bind(&product.name)
            .bind(product.supplier_id)
            .bind(product.category_id.map(CategoryId::into_inner))
            .bind(product.quantity_per_unit.as_deref())
            .bind(product.unit_price)
            .bind(product.units_in_stock)
            .bind(product.units_on_order)
            .bind(product.reorder_level)
            .bind(product.discontinued)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(updated.map_or(UpdateOutcome::VersionMismatch, UpdateOutcome::Updated))
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(DELETE_PRODUCT_SQL)
            .bind(product.into_inner())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let category_id: Option<i32> = row.try_get("category_id")?;

        Ok(Self {
            id: ProductId::new(row.try_get("id")?),
            name: row.try_get("product_name")?,
            supplier_id: row.try_get("supplier_id")?,
            category_id: category_id.map(CategoryId::new),
            quantity_per_unit: row.try_get("quantity_per_unit")?,
            unit_price: row.try_get("unit_price")?,
            units_in_stock: row.try_get("units_in_stock")?,
            units_on_order: row.try_get("units_on_order")?,
            reorder_level: row.try_get("reorder_level")?,
            discontinued: row.try_get("discontinued")?,
            version: row.try_get("row_version")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::{TestDb, helpers::new_product};

    use super::*;

    async fn insert_category(tx: &mut Transaction<'_, Postgres>, name: &str) -> CategoryId {
        let id = query_scalar::<Postgres, i32>(
            "INSERT INTO categories (category_name) VALUES ($1) RETURNING id",
        )
        .bind(name)
        .fetch_one(&mut **tx)
        .await
        .expect("Failed to insert category");

        CategoryId::new(id)
    }

    #[tokio::test]
    async fn filter_applies_before_count_and_window() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgProductsRepository::new();

        let mut tx = db.begin_test_transaction().await;

        let beverages = insert_category(&mut tx, "Beverages").await;
        let condiments = insert_category(&mut tx, "Condiments").await;

        for (index, name) in ["Chai", "Aniseed Syrup", "Chang", "Cajun Seasoning", "Ipoh Coffee"]
            .into_iter()
            .enumerate()
        {
            let mut product = new_product(name);
            product.category_id = Some(if index % 2 == 0 { beverages } else { condiments });

            repository.create_product(&mut tx, &product).await?;
        }

        let window = repository
            .list_products(&mut tx, Some(beverages), PageRequest::new(Some(2), Some(2)))
            .await?;

        let names: Vec<&str> = window.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Ipoh Coffee"]);
        assert_eq!(repository.count_products(&mut tx, Some(beverages)).await?, 3);
        assert_eq!(repository.count_products(&mut tx, None).await?, 5);

        Ok(())
    }

    #[tokio::test]
    async fn price_round_trips_through_numeric() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgProductsRepository::new();

        let mut tx = db.begin_test_transaction().await;

        let mut product = new_product("Mishi Kobe Niku");
        product.unit_price = Some(Decimal::new(9_700, 2));

        let created = repository.create_product(&mut tx, &product).await?;
        let fetched = repository.get_product(&mut tx, created.id).await?;

        assert_eq!(fetched.unit_price, Some(Decimal::new(9_700, 2)));
        assert_eq!(fetched.version, 1);

        Ok(())
    }

    #[tokio::test]
    async fn stale_version_is_reported_as_mismatch() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgProductsRepository::new();

        let mut tx = db.begin_test_transaction().await;

        let loaded = repository
            .create_product(&mut tx, &new_product("Chai"))
            .await?;

        let mut first = loaded.clone();
        first.units_in_stock = Some(20);

        assert!(matches!(
            repository.update_product(&mut tx, &first).await?,
            UpdateOutcome::Updated(_)
        ));

        let mut second = loaded;
        second.units_in_stock = Some(10);

        assert_eq!(
            repository.update_product(&mut tx, &second).await?,
            UpdateOutcome::VersionMismatch
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_product_returns_none() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgProductsRepository::new();

        let mut tx = db.begin_test_transaction().await;

        let deleted = repository
            .delete_product(&mut tx, ProductId::new(12_345))
            .await?;

        assert_eq!(deleted, None);

        Ok(())
    }
}
