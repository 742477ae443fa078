//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    database::{Db, UpdateOutcome},
    domain::products::{
        data::{NewProduct, ProductFilter, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductId, ProductRecord},
        repository::PgProductsRepository,
    },
    pagination::{Page, PageRequest},
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_products(&mut tx, filter.category_id, page)
            .await?;

        let total_count = self
            .repository
            .count_products(&mut tx, filter.category_id)
            .await?;

        tx.commit().await?;

        Ok(Page::new(products, page, total_count))
    }

    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        if product.is_negative() {
            return Err(ProductsServiceError::NegativeId);
        }

        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if update.id != product {
            return Err(ProductsServiceError::IdMismatch);
        }

        let mut tx = self.db.begin().await?;

        let mut record = self.repository.get_product(&mut tx, product).await?;

        update.apply_to(&mut record)?;

        match self.repository.update_product(&mut tx, &record).await? {
            UpdateOutcome::Updated(updated) => {
                tx.commit().await?;

                Ok(updated)
            }
            UpdateOutcome::VersionMismatch => {
                let still_exists = self.repository.product_exists(&mut tx, product).await?;

                Err(version_mismatch(product, still_exists))
            }
        }
    }

    async fn delete_product(
        &self,
        product: ProductId,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let deleted = self
            .repository
            .delete_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(deleted)
    }
}

/// A stale write is a conflict while the row survives; once it is gone it is not found.
fn version_mismatch(product: ProductId, still_exists: bool) -> ProductsServiceError {
    if still_exists {
        warn!(product_id = %product, "product changed since it was loaded");

        ProductsServiceError::Conflict
    } else {
        ProductsServiceError::NotFound
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve one page of products, optionally narrowed to a category.
    async fn list_products(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, ProductsServiceError>;

    /// Store a new product; the store assigns its identity.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Merge `update` onto the stored product.
    ///
    /// Fails with [`ProductsServiceError::Conflict`] when another writer got there first.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Delete a product, returning the removed record.
    async fn delete_product(
        &self,
        product: ProductId,
    ) -> Result<ProductRecord, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use smallvec::smallvec;
    use sqlx::Postgres;
    use testresult::TestResult;

    use crate::{
        domain::{
            categories::{CategoriesService, data::NewCategory},
            products::data::ProductField,
        },
        test::{TestContext, helpers::new_product, lazy_db},
    };

    use super::*;

    #[test]
    fn stale_write_on_surviving_product_is_a_conflict() {
        let result = version_mismatch(ProductId::new(7), true);

        assert!(
            matches!(result, ProductsServiceError::Conflict),
            "expected Conflict, got {result:?}"
        );
    }

    #[test]
    fn stale_write_on_deleted_product_is_not_found() {
        let result = version_mismatch(ProductId::new(7), false);

        assert!(
            matches!(result, ProductsServiceError::NotFound),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn mismatched_id_is_rejected_before_touching_the_store() {
        let service = PgProductsService::new(lazy_db());

        let result = service
            .update_product(
                ProductId::new(1),
                ProductUpdate::for_product(ProductId::new(7)),
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::IdMismatch)),
            "expected IdMismatch, got {result:?}"
        );
    }

    #[tokio::test]
    async fn negative_id_is_rejected_before_touching_the_store() {
        let service = PgProductsService::new(lazy_db());

        let result = service.get_product(ProductId::new(-5)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NegativeId)),
            "expected NegativeId, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_missing_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductId::new(0)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    /// Hold a row lock with `competing_sql`, let an update load the row and block behind it,
    /// then commit the competing write.
    async fn update_behind(
        ctx: &TestContext,
        product: ProductId,
        competing_sql: &str,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut competitor = ctx
            .db
            .pool()
            .begin()
            .await
            .expect("Failed to begin competing transaction");

        sqlx::query(competing_sql)
            .bind(product.into_inner())
            .execute(&mut *competitor)
            .await
            .expect("Failed to run competing write");

        let service = ctx.products.clone();

        let update = tokio::spawn(async move {
            let mut update = ProductUpdate::for_product(product);
            update.name = Some("Chai Latte".to_string());

            service.update_product(product, update).await
        });

        let mut blocked = false;

        for _ in 0..500 {
            blocked = sqlx::query_scalar::<Postgres, bool>(
                "SELECT EXISTS (SELECT 1 FROM pg_stat_activity \
                 WHERE datname = current_database() AND wait_event_type = 'Lock')",
            )
            .fetch_one(ctx.db.pool())
            .await
            .expect("Failed to inspect lock waits");

            if blocked {
                break;
            }

            tokio::task::yield_now().await;
        }

        assert!(blocked, "update never waited on the competing row lock");

        competitor
            .commit()
            .await
            .expect("Failed to commit competing write");

        update.await.expect("Update task panicked")
    }

    #[tokio::test]
    async fn concurrent_version_bump_is_a_conflict() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(new_product("Chai")).await?;

        let result = update_behind(
            &ctx,
            created.id,
            "UPDATE products SET row_version = row_version + 1 WHERE id = $1",
        )
        .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Conflict)),
            "expected Conflict, got {result:?}"
        );
        assert_eq!(ctx.products.get_product(created.id).await?.name, "Chai");

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_delete_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(new_product("Chai")).await?;

        let result = update_behind(&ctx, created.id, "DELETE FROM products WHERE id = $1").await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn price_update_leaves_other_fields_untouched() -> TestResult {
        let ctx = TestContext::new().await;

        let mut product = new_product("Chai");
        product.quantity_per_unit = Some("10 boxes x 20 bags".to_string());
        product.unit_price = Some(Decimal::new(18, 0));
        product.units_in_stock = Some(39);

        let created = ctx.products.create_product(product).await?;

        let mut update = ProductUpdate::for_product(created.id);
        update.unit_price = Some(Decimal::new(1950, 2));

        let updated = ctx.products.update_product(created.id, update).await?;

        assert_eq!(
            updated,
            ProductRecord {
                unit_price: Some(Decimal::new(1950, 2)),
                version: created.version + 1,
                ..created
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn clearing_category_detaches_product() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx
            .categories
            .create_category(NewCategory {
                name: "Beverages".to_string(),
                description: None,
                picture: None,
            })
            .await?;

        let mut product = new_product("Chang");
        product.category_id = Some(category.id);

        let created = ctx.products.create_product(product).await?;

        let mut update = ProductUpdate::for_product(created.id);
        update.clear = smallvec![ProductField::CategoryId];

        let updated = ctx.products.update_product(created.id, update).await?;

        assert_eq!(updated.category_id, None);

        let filtered = ctx
            .products
            .list_products(
                ProductFilter {
                    category_id: Some(category.id),
                },
                PageRequest::default(),
            )
            .await?;

        assert_eq!(filtered.total_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn invalid_update_is_not_written() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(new_product("Chai")).await?;

        let mut update = ProductUpdate::for_product(created.id);
        update.name = Some(String::new());

        let result = ctx.products.update_product(created.id, update).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData(_))),
            "expected InvalidData, got {result:?}"
        );
        assert_eq!(ctx.products.get_product(created.id).await?, created);

        Ok(())
    }

    #[tokio::test]
    async fn delete_returns_removed_product() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(new_product("Chai")).await?;
        let deleted = ctx.products.delete_product(created.id).await?;

        assert_eq!(deleted, created);

        let result = ctx.products.delete_product(created.id).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound on second delete, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn twenty_five_products_paginate_into_three_pages() -> TestResult {
        let ctx = TestContext::new().await;

        for index in 1..=25 {
            ctx.products
                .create_product(new_product(&format!("Product {index}")))
                .await?;
        }

        let page = ctx
            .products
            .list_products(ProductFilter::default(), PageRequest::new(Some(3), Some(10)))
            .await?;

        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Product 21", "Product 22", "Product 23", "Product 24", "Product 25"]);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_next(), "page 3 of 3 has no next page");

        Ok(())
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products.create_product(new_product("Chai")).await?;

        let page = ctx
            .products
            .list_products(ProductFilter::default(), PageRequest::new(Some(9), Some(10)))
            .await?;

        assert!(page.items.is_empty(), "window beyond the data is empty");
        assert_eq!(page.total_count, 1);

        Ok(())
    }
}
