use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::CategoryResult;
use crate::models::{Category, CreateCategory, UpdateCategory};

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new category
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category>;

    /// Count categories whose name matches `pattern` (case-insensitive regex)
    async fn count(&self, pattern: &str) -> CategoryResult<u64>;

    /// Categories whose name matches `pattern`, sorted by name.
    /// A `limit` of zero returns every match after `skip`.
    async fn list(&self, pattern: &str, skip: u64, limit: u64) -> CategoryResult<Vec<Category>>;

    /// Get a category by ID
    async fn get_by_id(&self, id: ObjectId) -> CategoryResult<Option<Category>>;

    /// Apply an update, returning the new document or `None` if absent
    async fn update(&self, id: ObjectId, input: UpdateCategory)
    -> CategoryResult<Option<Category>>;

    /// Delete by ID, returning whether a document was removed
    async fn delete(&self, id: ObjectId) -> CategoryResult<bool>;

    /// Check if a category name exists
    async fn exists_by_name(&self, name: &str) -> CategoryResult<bool>;
}
