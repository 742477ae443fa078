//! Category Records

use crate::ids::TypedId;

/// Category Identity
pub type CategoryId = TypedId<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub picture: Option<Vec<u8>>,

    /// Concurrency token, bumped on every write.
    pub version: i64,
}
