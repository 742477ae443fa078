//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use tracing::warn;

use crate::{
    database::{Db, UpdateOutcome},
    domain::categories::{
        data::{CategoryUpdate, NewCategory},
        errors::CategoriesServiceError,
        records::{CategoryId, CategoryRecord},
        repository::PgCategoriesRepository,
    },
    pagination::{Page, PageRequest},
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(
        &self,
        page: PageRequest,
    ) -> Result<Page<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx, page).await?;
        let total_count = self.repository.count_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(Page::new(categories, page, total_count))
    }

    async fn get_category(
        &self,
        category: CategoryId,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        if category.is_negative() {
            return Err(CategoriesServiceError::NegativeId);
        }

        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        category.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, &category).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_category(
        &self,
        category: CategoryId,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        if update.id != category {
            return Err(CategoriesServiceError::IdMismatch);
        }

        let mut tx = self.db.begin().await?;

        let mut record = self.repository.get_category(&mut tx, category).await?;

        update.apply_to(&mut record)?;

        match self.repository.update_category(&mut tx, &record).await? {
            UpdateOutcome::Updated(updated) => {
                tx.commit().await?;

                Ok(updated)
            }
            UpdateOutcome::VersionMismatch => {
                let still_exists = self.repository.category_exists(&mut tx, category).await?;

                Err(version_mismatch(category, still_exists))
            }
        }
    }

    async fn delete_category(
        &self,
        category: CategoryId,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let deleted = self
            .repository
            .delete_category(&mut tx, category)
            .await?
            .ok_or(CategoriesServiceError::NotFound)?;

        tx.commit().await?;

        Ok(deleted)
    }
}

/// A stale write is a conflict while the row survives; once it is gone it is not found.
fn version_mismatch(category: CategoryId, still_exists: bool) -> CategoriesServiceError {
    if still_exists {
        warn!(category_id = %category, "category changed since it was loaded");

        CategoriesServiceError::Conflict
    } else {
        CategoriesServiceError::NotFound
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieve one page of categories ordered by identity.
    async fn list_categories(
        &self,
        page: PageRequest,
    ) -> Result<Page<CategoryRecord>, CategoriesServiceError>;

    /// Retrieve a single category.
    async fn get_category(
        &self,
        category: CategoryId,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Store a new category; the store assigns its identity.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Merge `update` onto the stored category.
    async fn update_category(
        &self,
        category: CategoryId,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Delete a category, returning the removed record.
    async fn delete_category(
        &self,
        category: CategoryId,
    ) -> Result<CategoryRecord, CategoriesServiceError>;
}
