//! Categories Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::UpdateOutcome,
    domain::categories::{
        data::NewCategory,
        records::{CategoryId, CategoryRecord},
    },
    pagination::PageRequest,
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const COUNT_CATEGORIES_SQL: &str = include_str!("sql/count_categories.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const CATEGORY_EXISTS_SQL: &str = include_str!("sql/category_exists.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const UPDATE_CATEGORY_SQL: &str = include_str!("sql/update_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(LIST_CATEGORIES_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_CATEGORIES_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryId,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(GET_CATEGORY_SQL)
            .bind(category.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn category_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(CATEGORY_EXISTS_SQL)
            .bind(category.into_inner())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &NewCategory,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(&category.name)
            .bind(category.description.as_deref())
            .bind(category.picture.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    /// Write `category` only if its stored version still equals `category.version`.
    pub(crate) async fn update_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &CategoryRecord,
    ) -> Result<UpdateOutcome<CategoryRecord>, sqlx::Error> {
        let updated = query_as::<Postgres, CategoryRecord>(UPDATE_CATEGORY_SQL)
            .bind(category.id.into_inner())
            .bind(category.version)
            .bind(&category.name)
            .bind(category.description.as_deref())
            .bind(category.picture.as_deref())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(updated.map_or(UpdateOutcome::VersionMismatch, UpdateOutcome::Updated))
    }

    pub(crate) async fn delete_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryId,
    ) -> Result<Option<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(DELETE_CATEGORY_SQL)
            .bind(category.into_inner())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CategoryId::new(row.try_get("id")?),
            name: row.try_get("category_name")?,
            description: row.try_get("description")?,
            picture: row.try_get("picture")?,
            version: row.try_get("row_version")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestDb;

    use super::*;

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            description: None,
            picture: None,
        }
    }

    #[tokio::test]
    async fn stale_version_is_reported_as_mismatch() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgCategoriesRepository::new();

        let mut tx = db.begin_test_transaction().await;

        let loaded = repository
            .create_category(&mut tx, &new_category("Beverages"))
            .await?;

        let mut first = loaded.clone();
        first.name = "Drinks".to_string();

        let outcome = repository.update_category(&mut tx, &first).await?;

        assert!(
            matches!(outcome, UpdateOutcome::Updated(ref c) if c.version == loaded.version + 1),
            "expected first write to succeed, got {outcome:?}"
        );

        // Second writer still holds the version it loaded before the first write.
        let mut second = loaded;
        second.name = "Sodas".to_string();

        let outcome = repository.update_category(&mut tx, &second).await?;

        assert_eq!(outcome, UpdateOutcome::VersionMismatch);

        Ok(())
    }

    #[tokio::test]
    async fn list_windows_by_identity() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgCategoriesRepository::new();

        let mut tx = db.begin_test_transaction().await;

        for name in ["A", "B", "C", "D", "E"] {
            repository
                .create_category(&mut tx, &new_category(name))
                .await?;
        }

        let window = repository
            .list_categories(&mut tx, PageRequest::new(Some(2), Some(2)))
            .await?;

        let names: Vec<&str> = window.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["C", "D"]);
        assert_eq!(repository.count_categories(&mut tx).await?, 5);

        Ok(())
    }
}
